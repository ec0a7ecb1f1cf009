use crate::engine::aggregate::AggregateOptions;
use crate::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for report snapshots; defaults to ~/.faceoff when unset.
    pub data_dir: Option<PathBuf>,
    /// Minimum winning score for a shutout to count as a knockout.
    pub knockout_min: u32,
    /// Retain each participant's raw record list for drill-down output.
    pub keep_records: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("FACEOFF_DATA_DIR").ok().map(PathBuf::from);

        let knockout_min = match env::var("FACEOFF_KNOCKOUT_MIN") {
            Ok(raw) => {
                let parsed = raw.parse::<u32>().map_err(|_| {
                    AppError::ConfigError(format!(
                        "FACEOFF_KNOCKOUT_MIN must be a positive integer, got {:?}",
                        raw
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "FACEOFF_KNOCKOUT_MIN must be at least 1".to_string(),
                    ));
                }
                parsed
            }
            Err(_) => 1,
        };

        let keep_records = env::var("FACEOFF_KEEP_RECORDS")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Config {
            data_dir,
            knockout_min,
            keep_records,
        })
    }

    pub fn options(&self) -> AggregateOptions {
        AggregateOptions {
            knockout_min: self.knockout_min,
            keep_records: self.keep_records,
        }
    }
}
