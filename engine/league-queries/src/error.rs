//! Error types for league view queries

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The record source failed while serving the query
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(#[from] stat_store::StoreError),

    /// The player has no stat rows and no awards
    #[error("No stats or awards found for player {0}")]
    PlayerNotFound(String),

    /// No award rows exist under this name
    #[error("No awards found under the name {0}")]
    AwardNotFound(String),

    /// The franchise ID is outside the league's team map
    #[error("Invalid team ID: {0}")]
    InvalidTeam(u32),

    /// The franchise is mapped but has no summary row
    #[error("Team {0} not found")]
    TeamNotFound(u32),
}
