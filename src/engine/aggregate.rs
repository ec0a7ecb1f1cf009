use super::stats::{MatchRecord, ParticipantId, ParticipantStats};
use super::summary::{GlobalSummary, TournamentMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// Plain one-on-one history: counters, streaks and home/away splits.
    HeadToHead,
    /// Multi-team data: adds the matchup matrix and the global summary.
    Tournament,
}

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Minimum winning score for a shutout to count as a knockout.
    pub knockout_min: u32,
    /// Retain each participant's raw record list for drill-down.
    pub keep_records: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions {
            knockout_min: 1,
            keep_records: true,
        }
    }
}

/// Final output of one aggregation pass. The stats map is ordered so that
/// serializing the same feed twice yields byte-identical JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    pub stats: BTreeMap<ParticipantId, ParticipantStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<GlobalSummary>,
}

/// Single-pass accumulator over an ordered feed of match records.
///
/// Records must be fed in their original order: streak bookkeeping depends
/// on linear history, so the tracker never sorts or reorders its input.
/// Partial results are valid between calls; the derived ratio fields are
/// refreshed after every record.
pub struct MatchStatsTracker {
    mode: AggregateMode,
    options: AggregateOptions,
    stats: BTreeMap<ParticipantId, ParticipantStats>,
    summary: Option<GlobalSummary>,
}

impl MatchStatsTracker {
    pub fn new(mode: AggregateMode) -> Self {
        Self::with_options(mode, AggregateOptions::default())
    }

    pub fn with_options(mode: AggregateMode, options: AggregateOptions) -> Self {
        let summary = match mode {
            AggregateMode::Tournament => Some(GlobalSummary::default()),
            AggregateMode::HeadToHead => None,
        };
        MatchStatsTracker {
            mode,
            options,
            stats: BTreeMap::new(),
            summary,
        }
    }

    fn entry<'a>(
        stats: &'a mut BTreeMap<ParticipantId, ParticipantStats>,
        id: &ParticipantId,
    ) -> &'a mut ParticipantStats {
        stats.entry(id.clone()).or_insert_with(ParticipantStats::new)
    }

    /// Fold one record into the map. Side B is the home side of every
    /// record, side A the away side.
    pub fn record_match(&mut self, record: &MatchRecord) {
        let self_match = record.is_self_match();

        // Side A accrual. For a self match this is also where the single
        // game credit and the single raw-record copy land.
        {
            let stats = Self::entry(&mut self.stats, &record.participant_a);
            stats.total_games += 1;
            stats.total_scored += record.score_a;
            stats.total_suffered += record.score_b;
            stats.total_diff += record.score_a as i64 - record.score_b as i64;
            stats.total_overtimes += record.total_overtimes;
            if !self_match {
                stats.total_away_games += 1;
            }
            if self.options.keep_records {
                stats.records.push(record.clone());
            }
        }

        // Side B accrual. A self match lands on the same accumulator: the
        // mirrored point deltas still apply (net diff contribution is zero)
        // but the game itself must not be counted twice.
        {
            let stats = Self::entry(&mut self.stats, &record.participant_b);
            stats.total_scored += record.score_b;
            stats.total_suffered += record.score_a;
            stats.total_diff += record.score_b as i64 - record.score_a as i64;
            stats.total_overtimes += record.total_overtimes;
            if !self_match {
                stats.total_games += 1;
                stats.total_home_games += 1;
                if self.options.keep_records {
                    stats.records.push(record.clone());
                }
            }
        }

        match record.decide() {
            Some((winner, loser)) => {
                let winner = winner.clone();
                let loser = loser.clone();
                {
                    let stats = Self::entry(&mut self.stats, &winner);
                    stats.credit_win();
                    if record.is_comeback {
                        stats.total_won_comebacks += 1;
                    }
                    if winner == record.participant_b {
                        stats.total_home_wins += 1;
                    } else {
                        stats.total_road_wins += 1;
                    }
                }
                {
                    let stats = Self::entry(&mut self.stats, &loser);
                    stats.credit_loss();
                    if record.is_comeback {
                        stats.total_lost_comebacks += 1;
                    }
                    if loser == record.participant_b {
                        stats.total_home_lost += 1;
                    } else {
                        stats.total_road_lost += 1;
                    }
                }
            }
            None if !self_match => {
                // Tied record between distinct sides: no winner is guessed.
                // The game still counted above; streaks are untouched.
                Self::entry(&mut self.stats, &record.participant_a).total_undecided += 1;
                Self::entry(&mut self.stats, &record.participant_b).total_undecided += 1;
            }
            None => {}
        }

        if !self_match {
            let blanked_a = record.score_a == 0 && record.score_b >= self.options.knockout_min;
            let blanked_b = record.score_b == 0 && record.score_a >= self.options.knockout_min;
            if blanked_a {
                Self::entry(&mut self.stats, &record.participant_b).total_knockouts += 1;
                Self::entry(&mut self.stats, &record.participant_a).total_suffered_knockouts += 1;
            } else if blanked_b {
                Self::entry(&mut self.stats, &record.participant_a).total_knockouts += 1;
                Self::entry(&mut self.stats, &record.participant_b).total_suffered_knockouts += 1;
            }
            if blanked_a || blanked_b {
                if let Some(summary) = self.summary.as_mut() {
                    summary.record_knockout();
                }
            }
        }

        if self.mode == AggregateMode::Tournament && !self_match {
            let winner = record.decide().map(|(winner, _)| winner.clone());
            {
                let tally = Self::entry(&mut self.stats, &record.participant_a)
                    .matchups
                    .entry(record.participant_b.clone())
                    .or_default();
                tally.total += 1;
                match &winner {
                    Some(w) if *w == record.participant_a => tally.win += 1,
                    Some(_) => tally.lose += 1,
                    None => {}
                }
            }
            {
                let tally = Self::entry(&mut self.stats, &record.participant_b)
                    .matchups
                    .entry(record.participant_a.clone())
                    .or_default();
                tally.total += 1;
                match &winner {
                    Some(w) if *w == record.participant_b => tally.win += 1,
                    Some(_) => tally.lose += 1,
                    None => {}
                }
            }
        }

        if let Some(summary) = self.summary.as_mut() {
            summary.record_game(record);
        }

        Self::entry(&mut self.stats, &record.participant_a).refresh_ratios();
        if !self_match {
            Self::entry(&mut self.stats, &record.participant_b).refresh_ratios();
        }
    }

    /// Fold one tournament unit: overall-winner credit and per-tournament
    /// MVP. Independent of the per-game loop, sharing the same stats map.
    pub fn record_tournament(&mut self, meta: &TournamentMeta) {
        if let Some(summary) = self.summary.as_mut() {
            summary.record_tournament(meta);
        }
        if let Some(winner) = &meta.winner {
            Self::entry(&mut self.stats, winner).total_tournament_wins += 1;
        }
    }

    /// Partial results; valid between record_match calls.
    pub fn stats(&self) -> &BTreeMap<ParticipantId, ParticipantStats> {
        &self.stats
    }

    pub fn summary(&self) -> Option<&GlobalSummary> {
        self.summary.as_ref()
    }

    /// Close still-open streaks, fix the high-water marks, and hand the
    /// report over. The report is immutable from here on.
    pub fn finish(mut self) -> AggregateReport {
        for stats in self.stats.values_mut() {
            stats.close_open_streaks();
        }
        AggregateReport {
            stats: self.stats,
            summary: self.summary,
        }
    }
}

/// Aggregate an ordered feed in one pass with default options.
pub fn aggregate(records: &[MatchRecord], mode: AggregateMode) -> AggregateReport {
    aggregate_with_options(records, mode, AggregateOptions::default())
}

pub fn aggregate_with_options(
    records: &[MatchRecord],
    mode: AggregateMode,
    options: AggregateOptions,
) -> AggregateReport {
    let mut tracker = MatchStatsTracker::with_options(mode, options);
    for record in records {
        tracker.record_match(record);
    }
    tracker.finish()
}
