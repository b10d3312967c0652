//! Error types for tournament setup

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("unknown or malformed strategy `{0}`")]
    InvalidStrategy(String),

    #[error("roster must contain at least one strategy")]
    EmptyRoster,

    #[error("game length must be at least one round")]
    ZeroGameLength,

    #[error("invalid tournament config: {0}")]
    Config(#[from] serde_json::Error),
}
