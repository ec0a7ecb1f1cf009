use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Validated participant identity. Leading/trailing whitespace is stripped;
/// a blank identity is rejected rather than silently keyed into the map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidParticipant(raw.to_string()));
        }
        Ok(ParticipantId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finished two-party contest, already normalized from the feed.
/// Side A is the "away" side of the record, side B the "home" side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub participant_a: ParticipantId,
    pub participant_b: ParticipantId,
    pub score_a: u32,
    pub score_b: u32,
    #[serde(default)]
    pub is_comeback: bool,
    #[serde(default)]
    pub total_overtimes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp_participant: Option<ParticipantId>,
}

impl MatchRecord {
    pub fn is_self_match(&self) -> bool {
        self.participant_a == self.participant_b
    }

    /// Winner and loser by strict score comparison. `None` for self matches
    /// and for tied records between distinct sides (undecided).
    pub fn decide(&self) -> Option<(&ParticipantId, &ParticipantId)> {
        if self.is_self_match() || self.score_a == self.score_b {
            return None;
        }
        if self.score_a > self.score_b {
            Some((&self.participant_a, &self.participant_b))
        } else {
            Some((&self.participant_b, &self.participant_a))
        }
    }
}

/// Closed streak lengths in feed order. A run only lands here once the
/// opposite outcome ends it, or when the scan finishes with it still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakHistory {
    pub wins: Vec<u32>,
    pub lose: Vec<u32>,
}

/// Per-opponent tally for the matchup matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupTally {
    pub total: u32,
    pub win: u32,
    pub lose: u32,
}

/// Accumulator for one participant, mutated in place while scanning the
/// feed. Field names are the legacy wire names and must stay as-is for
/// existing consumers of the serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantStats {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_lost: u32,
    pub total_undecided: u32,
    pub total_scored: u32,
    pub total_suffered: u32,
    pub total_diff: i64,
    pub total_overtimes: u32,
    pub total_won_comebacks: u32,
    pub total_lost_comebacks: u32,
    pub total_knockouts: u32,
    pub total_suffered_knockouts: u32,
    pub total_home_games: u32,
    pub total_away_games: u32,
    pub total_home_wins: u32,
    pub total_home_lost: u32,
    pub total_road_wins: u32,
    pub total_road_lost: u32,
    pub total_tournament_wins: u32,
    pub win_streak: u32,
    pub lose_streak: u32,
    pub streaks: StreakHistory,
    pub max_win_streak: u32,
    pub max_lose_streak: u32,
    pub total_win_percents: String,
    pub total_diff_per_game: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub matchups: BTreeMap<ParticipantId, MatchupTally>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<MatchRecord>,
}

impl ParticipantStats {
    pub fn new() -> Self {
        ParticipantStats {
            total_games: 0,
            total_wins: 0,
            total_lost: 0,
            total_undecided: 0,
            total_scored: 0,
            total_suffered: 0,
            total_diff: 0,
            total_overtimes: 0,
            total_won_comebacks: 0,
            total_lost_comebacks: 0,
            total_knockouts: 0,
            total_suffered_knockouts: 0,
            total_home_games: 0,
            total_away_games: 0,
            total_home_wins: 0,
            total_home_lost: 0,
            total_road_wins: 0,
            total_road_lost: 0,
            total_tournament_wins: 0,
            win_streak: 0,
            lose_streak: 0,
            streaks: StreakHistory::default(),
            max_win_streak: 0,
            max_lose_streak: 0,
            total_win_percents: "0.00%".to_string(),
            total_diff_per_game: "0.00".to_string(),
            matchups: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    /// Recompute the two derived ratio fields. Kept live after every
    /// processed record so partial results are always consistent.
    pub fn refresh_ratios(&mut self) {
        if self.total_games == 0 {
            self.total_win_percents = "0.00%".to_string();
            self.total_diff_per_game = "0.00".to_string();
        } else {
            self.total_win_percents = format!(
                "{:.2}%",
                self.total_wins as f64 * 100.0 / self.total_games as f64
            );
            self.total_diff_per_game =
                format!("{:.2}", self.total_diff as f64 / self.total_games as f64);
        }
    }

    /// Credit a win: extend the win run, and close a live lose run into
    /// history. Zero-length runs are never recorded.
    pub fn credit_win(&mut self) {
        self.total_wins += 1;
        self.win_streak += 1;
        if self.lose_streak > 0 {
            self.streaks.lose.push(self.lose_streak);
            self.lose_streak = 0;
        }
    }

    pub fn credit_loss(&mut self) {
        self.total_lost += 1;
        self.lose_streak += 1;
        if self.win_streak > 0 {
            self.streaks.wins.push(self.win_streak);
            self.win_streak = 0;
        }
    }

    /// Push any still-open run into history and fix the high-water marks.
    /// Called once, after the whole feed has been scanned.
    pub fn close_open_streaks(&mut self) {
        if self.win_streak > 0 {
            self.streaks.wins.push(self.win_streak);
            self.win_streak = 0;
        }
        if self.lose_streak > 0 {
            self.streaks.lose.push(self.lose_streak);
            self.lose_streak = 0;
        }
        self.max_win_streak = self.streaks.wins.iter().copied().max().unwrap_or(0);
        self.max_lose_streak = self.streaks.lose.iter().copied().max().unwrap_or(0);
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_wins as f64 / self.total_games as f64
        }
    }
}

impl Default for ParticipantStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_trimmed() {
        let id = ParticipantId::new("  Ada ").unwrap();
        assert_eq!(id.as_str(), "Ada");
    }

    #[test]
    fn blank_identity_is_rejected() {
        assert!(ParticipantId::new("").is_err());
        assert!(ParticipantId::new("   ").is_err());
    }

    #[test]
    fn fresh_stats_have_placeholder_ratios() {
        let stats = ParticipantStats::new();
        assert_eq!(stats.total_win_percents, "0.00%");
        assert_eq!(stats.total_diff_per_game, "0.00");
    }

    #[test]
    fn ratios_guard_against_zero_games() {
        let mut stats = ParticipantStats::new();
        stats.refresh_ratios();
        assert_eq!(stats.total_win_percents, "0.00%");
        assert_eq!(stats.total_diff_per_game, "0.00");
    }

    #[test]
    fn win_percent_is_two_decimals_with_suffix() {
        let mut stats = ParticipantStats::new();
        stats.total_games = 3;
        stats.total_wins = 1;
        stats.total_diff = -4;
        stats.refresh_ratios();
        assert_eq!(stats.total_win_percents, "33.33%");
        assert_eq!(stats.total_diff_per_game, "-1.33");
    }

    #[test]
    fn alternating_outcomes_close_runs() {
        let mut stats = ParticipantStats::new();
        stats.credit_win();
        stats.credit_win();
        stats.credit_loss();
        assert_eq!(stats.streaks.wins, vec![2]);
        assert_eq!(stats.win_streak, 0);
        assert_eq!(stats.lose_streak, 1);
        stats.credit_win();
        assert_eq!(stats.streaks.lose, vec![1]);
        stats.close_open_streaks();
        assert_eq!(stats.streaks.wins, vec![2, 1]);
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.max_lose_streak, 1);
    }

    #[test]
    fn closing_without_any_games_leaves_zero_marks() {
        let mut stats = ParticipantStats::new();
        stats.close_open_streaks();
        assert_eq!(stats.max_win_streak, 0);
        assert_eq!(stats.max_lose_streak, 0);
        assert!(stats.streaks.wins.is_empty());
        assert!(stats.streaks.lose.is_empty());
    }

    #[test]
    fn tied_record_between_distinct_sides_is_undecided() {
        let record = MatchRecord {
            participant_a: ParticipantId::new("A").unwrap(),
            participant_b: ParticipantId::new("B").unwrap(),
            score_a: 7,
            score_b: 7,
            is_comeback: false,
            total_overtimes: 0,
            mvp_participant: None,
        };
        assert!(record.decide().is_none());
        assert!(!record.is_self_match());
    }
}
