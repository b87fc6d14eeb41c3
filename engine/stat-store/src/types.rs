//! Record types for league history data
//!
//! Wire field names (`ID`, `Player`, `FPts`, ...) match the responses the
//! web tier has always served, so serialized output stays drop-in compatible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Stable player identifier, independent of display name
pub type PlayerId = String;

/// Season year
pub type Year = i32;

/// One player's performance in one season. Created by the import process,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Stable player identifier
    #[serde(rename = "ID")]
    pub player_id: PlayerId,

    /// Player display name
    #[serde(rename = "Player")]
    pub player: String,

    /// Season year
    #[serde(rename = "Year")]
    pub year: Year,

    /// Player age during the season, when known
    #[serde(rename = "Age")]
    pub age: Option<u32>,

    /// Comma-joined position code set (e.g. "C, LW")
    #[serde(rename = "Position")]
    pub position: String,

    /// Fantasy points scored over the season
    #[serde(rename = "FPts")]
    pub fpts: f64,

    /// Fantasy points per game (tracked independently; games played is not
    /// modeled)
    #[serde(rename = "FPG")]
    pub fpg: f64,

    /// Historical team abbreviation for the season
    #[serde(rename = "Team")]
    pub team_code: String,

    /// True if the season's team won the championship
    #[serde(rename = "Champion")]
    pub champion: bool,
}

/// One award given in one season. A player can win more than one award in a
/// season, so `(winner, year)` pairs are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRecord {
    /// Award name
    #[serde(rename = "Award")]
    pub award: String,

    /// Season year
    #[serde(rename = "Year")]
    pub year: Year,

    /// Winner's player identifier
    #[serde(rename = "Winner")]
    pub winner: PlayerId,

    /// Team abbreviation the winner played for
    #[serde(rename = "Team")]
    pub team_code: String,
}

/// Franchise summary row (standings, ownership, trophies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Franchise identifier
    #[serde(rename = "ID")]
    pub id: u32,

    /// Current display name
    #[serde(rename = "Team")]
    pub team: String,

    /// Current abbreviation
    #[serde(rename = "Abbreviation")]
    pub abbreviation: String,

    /// Owner display name
    #[serde(rename = "Owner")]
    pub owner: String,

    /// All-time wins
    #[serde(rename = "Wins")]
    pub wins: i64,

    /// All-time losses
    #[serde(rename = "Losses")]
    pub losses: i64,

    /// All-time fantasy points for
    #[serde(rename = "FPF")]
    pub fpf: f64,

    /// Championships won
    #[serde(rename = "Championships")]
    pub championships: i64,

    /// Finals appearances
    #[serde(rename = "Finals")]
    pub finals: i64,
}

/// A distinct `(id, name)` pair, as returned by player search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Stable player identifier
    #[serde(rename = "ID")]
    pub player_id: PlayerId,

    /// Player display name
    #[serde(rename = "Player")]
    pub player: String,
}

/// On-disk container for the fixed per-deployment dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueDataset {
    /// When this dataset was exported
    pub last_updated: DateTime<Utc>,

    /// Per-player per-season stat rows
    pub stats: Vec<StatRecord>,

    /// Award history
    pub awards: Vec<AwardRecord>,

    /// Franchise summary table
    pub teams: Vec<TeamRecord>,
}

impl LeagueDataset {
    /// Create an empty dataset stamped with the current time
    pub fn new() -> Self {
        Self { last_updated: Utc::now(), stats: Vec::new(), awards: Vec::new(), teams: Vec::new() }
    }

    /// Seasons covered by the stat rows, ascending
    pub fn seasons(&self) -> Vec<Year> {
        let mut years: Vec<Year> = self.stats.iter().map(|record| record.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Reject rows that would corrupt grouping and joins downstream. Run by
    /// the load and import paths before the dataset is served.
    pub fn validate(&self) -> Result<()> {
        for (index, record) in self.stats.iter().enumerate() {
            if record.player_id.is_empty() {
                return Err(StoreError::invalid_dataset(format!(
                    "stat row {} has a blank player id",
                    index
                )));
            }
        }
        for (index, award) in self.awards.iter().enumerate() {
            if award.winner.is_empty() {
                return Err(StoreError::invalid_dataset(format!(
                    "award row {} has a blank winner id",
                    index
                )));
            }
        }
        Ok(())
    }
}

impl Default for LeagueDataset {
    fn default() -> Self {
        Self::new()
    }
}
