//! Error types for leaderboard operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested mode is neither all-time nor single-season
    #[error("Invalid leaderboard mode: {0}")]
    InvalidMode(String),

    /// The record source failed while serving the request
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(#[from] stat_store::StoreError),
}
