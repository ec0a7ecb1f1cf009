use super::models::{RawMatchDto, TournamentDto};
use crate::engine::stats::{MatchRecord, ParticipantId};
use crate::engine::summary::TournamentMeta;
use crate::error::AppError;

/// A feed row that failed normalization, with its position in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub position: usize,
    pub reason: String,
}

impl RejectedRecord {
    pub fn into_error(self) -> AppError {
        AppError::MalformedRecord {
            position: self.position,
            reason: self.reason,
        }
    }
}

/// Normalization output: the uniform record stream plus every rejected row.
/// A bad row never aborts the scan; the caller decides what to do with the
/// rejects.
#[derive(Debug, Default)]
pub struct NormalizedFeed {
    pub records: Vec<MatchRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl NormalizedFeed {
    /// Abort-on-error policy: the first rejected row becomes the error.
    pub fn strict(self) -> Result<Vec<MatchRecord>, AppError> {
        match self.rejected.into_iter().next() {
            Some(rejected) => Err(rejected.into_error()),
            None => Ok(self.records),
        }
    }
}

/// Flattened tournament dump: every game of every tournament in one record
/// stream, plus one metadata unit per tournament for the summary step.
#[derive(Debug, Default)]
pub struct FlattenedTournaments {
    pub feed: NormalizedFeed,
    pub tournaments: Vec<TournamentMeta>,
}

/// Project heterogeneous one-on-one rows into the uniform record shape.
pub fn normalize(rows: &[RawMatchDto]) -> NormalizedFeed {
    let mut feed = NormalizedFeed::default();
    for (position, row) in rows.iter().enumerate() {
        match project(row) {
            Ok(record) => feed.records.push(record),
            Err(reason) => feed.rejected.push(RejectedRecord { position, reason }),
        }
    }
    feed
}

/// Project a tournament dump. Tournaments are ordered by their addedAt
/// timestamp (stable for ties) before flattening, so the record stream the
/// engine sees follows tournament chronology; within a tournament, game
/// order is preserved. Rejected rows carry their position in the flattened
/// stream.
pub fn flatten_tournaments(rows: &[TournamentDto]) -> FlattenedTournaments {
    let mut ordered: Vec<&TournamentDto> = rows.iter().collect();
    ordered.sort_by_key(|tournament| tournament.added_at);

    let mut flattened = FlattenedTournaments::default();
    let mut position = 0usize;
    for tournament in ordered {
        for row in &tournament.games {
            match project(row) {
                Ok(record) => flattened.feed.records.push(record),
                Err(reason) => flattened
                    .feed
                    .rejected
                    .push(RejectedRecord { position, reason }),
            }
            position += 1;
        }
        flattened.tournaments.push(TournamentMeta {
            winner: identity_of(tournament.winner_name.as_deref()),
            mvp: identity_of(tournament.mvp_player_name.as_deref()),
        });
    }
    flattened
}

fn identity_of(raw: Option<&str>) -> Option<ParticipantId> {
    raw.and_then(|name| ParticipantId::new(name).ok())
}

fn project(row: &RawMatchDto) -> Result<MatchRecord, String> {
    let participant_a = row
        .participant_a
        .as_deref()
        .ok_or_else(|| "missing participantA".to_string())?;
    let participant_b = row
        .participant_b
        .as_deref()
        .ok_or_else(|| "missing participantB".to_string())?;
    let participant_a = ParticipantId::new(participant_a)
        .map_err(|_| format!("blank participantA {:?}", participant_a))?;
    let participant_b = ParticipantId::new(participant_b)
        .map_err(|_| format!("blank participantB {:?}", participant_b))?;
    let score_a = row.score_a.ok_or_else(|| "missing scoreA".to_string())?;
    let score_b = row.score_b.ok_or_else(|| "missing scoreB".to_string())?;

    Ok(MatchRecord {
        participant_a,
        participant_b,
        score_a,
        score_b,
        is_comeback: row.is_comeback,
        total_overtimes: row.total_overtimes,
        mvp_participant: identity_of(row.mvp_player_name.as_deref()),
    })
}
