//! Error types for the fantasy commander CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommanderError>;

#[derive(Error, Debug)]
pub enum CommanderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{platform} temporarily unavailable (rate limited or session denied)")]
    UpstreamUnavailable { platform: &'static str },

    #[error("{platform} has no data for league {league_id}")]
    UpstreamNotFound {
        platform: &'static str,
        league_id: String,
    },

    #[error("Profile not found. Profiles: {}", .known.join(", "))]
    ProfileNotFound { profile: String, known: Vec<String> },

    #[error("No profiles file found; pass --config or set {env_var}")]
    MissingConfig { env_var: String },

    #[error("League {league_id} is missing session credentials")]
    MissingCredentials { league_id: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid mode: {mode} (expected default, max, or all)")]
    InvalidMode { mode: String },

    #[error("Failed to parse numeric value: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Operation cancelled")]
    Cancelled,
}
