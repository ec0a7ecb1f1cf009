use super::stats::{MatchRecord, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Out-of-band metadata for one tournament unit: the overall winner and the
/// tournament MVP. Supplied alongside the game list, never derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentMeta {
    pub winner: Option<ParticipantId>,
    pub mvp: Option<ParticipantId>,
}

/// Cross-tournament aggregate counters and MVP frequency maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSummary {
    pub total_tournaments: u32,
    pub total_games: u32,
    pub total_knockouts: u32,
    pub total_overtimes: u32,
    pub total_comebacks: u32,
    pub total_scored: u64,
    pub mvps: BTreeMap<ParticipantId, u32>,
    pub tournament_mvps: BTreeMap<ParticipantId, u32>,
}

impl GlobalSummary {
    /// Per-game accrual. Knockouts are tallied separately by the caller,
    /// which owns the knockout threshold.
    pub fn record_game(&mut self, record: &MatchRecord) {
        self.total_games += 1;
        self.total_overtimes += record.total_overtimes;
        self.total_scored += record.score_a as u64 + record.score_b as u64;
        if record.is_comeback {
            self.total_comebacks += 1;
        }
        if let Some(mvp) = &record.mvp_participant {
            *self.mvps.entry(mvp.clone()).or_insert(0) += 1;
        }
    }

    pub fn record_knockout(&mut self) {
        self.total_knockouts += 1;
    }

    /// Per-tournament accrual; runs once per tournament unit, not per game.
    pub fn record_tournament(&mut self, meta: &TournamentMeta) {
        self.total_tournaments += 1;
        if let Some(mvp) = &meta.mvp {
            *self.tournament_mvps.entry(mvp.clone()).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name).unwrap()
    }

    fn game(score_a: u32, score_b: u32, mvp: Option<&str>) -> MatchRecord {
        MatchRecord {
            participant_a: id("A"),
            participant_b: id("B"),
            score_a,
            score_b,
            is_comeback: false,
            total_overtimes: 1,
            mvp_participant: mvp.map(|name| id(name)),
        }
    }

    #[test]
    fn game_accrual_sums_scores_and_overtimes() {
        let mut summary = GlobalSummary::default();
        summary.record_game(&game(90, 80, None));
        summary.record_game(&game(50, 60, None));
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.total_scored, 280);
        assert_eq!(summary.total_overtimes, 2);
    }

    #[test]
    fn per_game_mvps_are_tallied_by_name() {
        let mut summary = GlobalSummary::default();
        summary.record_game(&game(2, 1, Some("Jordan")));
        summary.record_game(&game(3, 1, Some("Jordan")));
        summary.record_game(&game(1, 4, Some("Pippen")));
        assert_eq!(summary.mvps.get(&id("Jordan")), Some(&2));
        assert_eq!(summary.mvps.get(&id("Pippen")), Some(&1));
    }

    #[test]
    fn tournament_accrual_is_independent_of_games() {
        let mut summary = GlobalSummary::default();
        summary.record_tournament(&TournamentMeta {
            winner: Some(id("Bulls")),
            mvp: Some(id("Jordan")),
        });
        summary.record_tournament(&TournamentMeta {
            winner: None,
            mvp: Some(id("Jordan")),
        });
        assert_eq!(summary.total_tournaments, 2);
        assert_eq!(summary.tournament_mvps.get(&id("Jordan")), Some(&2));
        assert_eq!(summary.total_games, 0);
    }

    #[test]
    fn comeback_flag_bumps_the_global_counter() {
        let mut summary = GlobalSummary::default();
        let mut record = game(5, 3, None);
        record.is_comeback = true;
        summary.record_game(&record);
        assert_eq!(summary.total_comebacks, 1);
    }
}
