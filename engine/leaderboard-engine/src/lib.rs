//! # Leaderboard Engine
//!
//! Serves paginated all-time and single-season leaderboards over a
//! [`stat_store::RecordSource`].
//!
//! ## Architecture
//!
//! - **LeaderboardRequest**: mode, position/search filters, page number
//! - **LeaderboardEngine**: count, rank, window, decorate
//! - **LeaderboardPage**: one page of rows plus the page total
//!
//! All-time mode groups career totals by player and hydrates names,
//! position history and trophy counts from unfiltered career rows.
//! Single-season mode ranks individual player-seasons and marks award
//! winners for that exact season.

pub mod awards;
pub mod career;
pub mod engine;
pub mod error;
pub mod filter;
pub mod request;
pub mod types;

#[cfg(test)]
mod tests;

pub use awards::{correlate_awards, AwardFlags};
pub use career::{assemble_career_rows, fold_careers, format_average, CareerDetail};
pub use engine::LeaderboardEngine;
pub use error::{EngineError, Result};
pub use filter::{build_filter, POSITION_ALL};
pub use request::{LeaderboardMode, LeaderboardRequest};
pub use types::{LeaderboardPage, LeaderboardRow};

/// Rows per leaderboard page
pub const PAGE_SIZE: u64 = 25;
