//! # Stat Store
//!
//! This crate provides the storage layer for the league history system. It
//! defines the record types, the query contract every backend implements,
//! and two interchangeable backends.
//!
//! ## Architecture
//!
//! - **RecordSource**: Abstract trait for querying stats, awards and teams
//! - **MemorySource**: Default backend, serves a JSON dataset from memory
//! - **SqliteSource**: Durable SQLite backend, populated by import
//!
//! ## Usage
//!
//! ```rust
//! use stat_store::{LeagueDataset, MemorySource, RecordSource, StatFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MemorySource::from_dataset(LeagueDataset::new());
//!     let scorers = source.count_players(&StatFilter::any()).await?;
//!     assert_eq!(scorers, 0);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod query;
pub mod sqlite;
pub mod types;

pub use error::{Result, StoreError};
pub use memory::MemorySource;
pub use query::{PlayerTotals, RecordSource, StatFilter, StatOrder, Window};
pub use sqlite::SqliteSource;
pub use types::{
    AwardRecord, LeagueDataset, PlayerId, PlayerRef, StatRecord, TeamRecord, Year,
};
