pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod feed;
pub mod snapshot;

pub use engine::aggregate::{
    aggregate, aggregate_with_options, AggregateMode, AggregateOptions, AggregateReport,
    MatchStatsTracker,
};
pub use engine::stats::{MatchRecord, MatchupTally, ParticipantId, ParticipantStats, StreakHistory};
pub use engine::summary::{GlobalSummary, TournamentMeta};
pub use error::AppError;
