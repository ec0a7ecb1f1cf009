use crate::engine::aggregate::AggregateReport;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One saved aggregation report, keyed by a caller-supplied scope name
/// (typically the feed file stem).
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub scope: String,
    pub created: DateTime<Utc>,
    pub report: AggregateReport,
}

impl ReportSnapshot {
    pub fn new(scope: &str, report: AggregateReport) -> Self {
        ReportSnapshot {
            scope: scope.to_string(),
            created: Utc::now(),
            report,
        }
    }

    fn scope_file_name(scope: &str) -> String {
        let safe: String = scope
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}.json", safe)
    }

    pub fn snapshot_path(scope: &str, data_dir: Option<&Path>) -> PathBuf {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".faceoff"),
        };

        let _ = fs::create_dir_all(&dir);

        dir.join(Self::scope_file_name(scope))
    }

    pub fn load(scope: &str, data_dir: Option<&Path>) -> Result<Option<Self>, AppError> {
        let path = Self::snapshot_path(scope, data_dir);

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                AppError::JsonError(format!("Failed to parse snapshot: {}", e))
            }),
            // No snapshot yet for this scope.
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self, data_dir: Option<&Path>) -> Result<PathBuf, AppError> {
        let path = Self::snapshot_path(&self.scope, data_dir);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize snapshot: {}", e)))?;

        fs::write(&path, json)
            .map_err(|e| AppError::IoError(format!("Failed to write snapshot: {}", e)))?;

        Ok(path)
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.created);
        age.num_minutes() > max_age_mins as i64
    }
}
