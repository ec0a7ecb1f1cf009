use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed record at feed position {position}: {reason}")]
    MalformedRecord { position: usize, reason: String },

    #[error("Invalid participant identity: {0:?}")]
    InvalidParticipant(String),

    #[error("No match records found in feed")]
    EmptyFeed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
