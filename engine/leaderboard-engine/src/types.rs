//! Leaderboard page types
//!
//! Rows are a tagged variant because the two modes genuinely carry
//! different columns; serialization flattens the tag away so the wire
//! shape stays what clients already parse. `FPG` is serialized as an
//! already-formatted string (see [`crate::career::format_average`]).

use serde::Serialize;
use stat_store::Year;

/// One leaderboard row, in the shape the mode dictates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LeaderboardRow {
    /// All-time mode: one row per player, career totals
    Career {
        #[serde(rename = "ID")]
        player_id: String,

        #[serde(rename = "Player")]
        player: String,

        /// Every position the player has been listed at, most recent first
        #[serde(rename = "Position")]
        position: String,

        /// Career fantasy point total
        #[serde(rename = "FPts")]
        fpts: f64,

        /// Career per-game average, formatted, or `N/A` when unavailable
        #[serde(rename = "FPG")]
        fpg: String,

        #[serde(rename = "ChampionshipsWon")]
        championships_won: u32,
    },

    /// Single-season mode: one row per player-season
    Season {
        #[serde(rename = "ID")]
        player_id: String,

        #[serde(rename = "Player")]
        player: String,

        #[serde(rename = "Position")]
        position: String,

        #[serde(rename = "FPts")]
        fpts: f64,

        /// Per-game average for the season, formatted
        #[serde(rename = "FPG")]
        fpg: String,

        #[serde(rename = "Year")]
        year: Year,

        /// The player won at least one award that season
        #[serde(rename = "hasAward")]
        has_award: bool,

        /// The player won more than one award that season
        #[serde(rename = "hasMultipleAwards")]
        has_multiple_awards: bool,

        /// The season ended in a championship
        #[serde(rename = "Champion")]
        champion: bool,
    },
}

/// One page of leaderboard rows plus the page count for the same filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardPage {
    /// Rows for the requested page, at most [`crate::PAGE_SIZE`]
    #[serde(rename = "players")]
    pub rows: Vec<LeaderboardRow>,

    /// Total pages available under the request's filter
    #[serde(rename = "maxPages")]
    pub max_pages: u64,
}
