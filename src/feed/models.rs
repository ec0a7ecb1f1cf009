use chrono::{DateTime, Utc};
use serde::Deserialize;

// Raw one-on-one match row as exported by the legacy backend. Required
// fields are optional here so normalization can reject a malformed row
// with its position instead of failing the whole parse.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchDto {
    #[serde(default)]
    pub participant_a: Option<String>,
    #[serde(default)]
    pub participant_b: Option<String>,
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
    #[serde(default)]
    pub is_comeback: bool,
    #[serde(default)]
    pub total_overtimes: u32,
    #[serde(default)]
    pub mvp_player_name: Option<String>,
}

// Tournament dump row: the owning tournament's metadata plus its games.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDto {
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub mvp_player_name: Option<String>,
    #[serde(default)]
    pub teams_names: Vec<String>,
    #[serde(default)]
    pub games: Vec<RawMatchDto>,
}
