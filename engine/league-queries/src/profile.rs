//! Player profile view
//!
//! One player's season-by-season history plus their trophy case. Seasons
//! run oldest first and each is annotated with the present-day franchise
//! that owns its historical team abbreviation, so old abbreviations still
//! link somewhere.

use std::sync::Arc;

use serde::Serialize;

use franchise_registry::FranchiseRegistry;
use stat_store::{RecordSource, StatOrder, Year};

use crate::error::{QueryError, Result};

/// One season in a player's profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSeason {
    #[serde(rename = "Year")]
    pub year: Year,

    #[serde(rename = "Age")]
    pub age: Option<u32>,

    #[serde(rename = "Position")]
    pub position: String,

    #[serde(rename = "FPts")]
    pub fpts: f64,

    #[serde(rename = "FPG")]
    pub fpg: f64,

    #[serde(rename = "Champion")]
    pub champion: bool,

    /// Abbreviation the team used that season
    #[serde(rename = "Team")]
    pub team_code: String,

    #[serde(rename = "Player")]
    pub player: String,

    /// Present-day franchise behind the abbreviation, when the registry
    /// knows it
    #[serde(rename = "TeamID")]
    pub team_id: Option<u32>,
}

/// One entry in a player's trophy case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrophyEntry {
    #[serde(rename = "Award")]
    pub award: String,

    #[serde(rename = "Year")]
    pub year: Year,
}

/// A player's full history: seasons oldest first, awards oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    #[serde(rename = "playerStats")]
    pub player_stats: Vec<ProfileSeason>,

    pub awards: Vec<TrophyEntry>,
}

/// Build the profile for one player. A player unknown to both the stat
/// rows and the award table is an error; either alone is enough.
pub async fn player_profile(
    source: &Arc<dyn RecordSource>,
    registry: &FranchiseRegistry,
    player_id: &str,
) -> Result<PlayerProfile> {
    let rows = source
        .stats_for_players(&[player_id.to_string()], StatOrder::YearAsc)
        .await?;

    let player_stats: Vec<ProfileSeason> = rows
        .into_iter()
        .map(|row| ProfileSeason {
            year: row.year,
            age: row.age,
            position: row.position,
            fpts: row.fpts,
            fpg: row.fpg,
            champion: row.champion,
            team_id: registry.resolve(&row.team_code),
            team_code: row.team_code,
            player: row.player,
        })
        .collect();

    let awards: Vec<TrophyEntry> = source
        .awards_for_winner(player_id)
        .await?
        .into_iter()
        .map(|award| TrophyEntry { award: award.award, year: award.year })
        .collect();

    if player_stats.is_empty() && awards.is_empty() {
        return Err(QueryError::PlayerNotFound(player_id.to_string()));
    }

    Ok(PlayerProfile { player_stats, awards })
}
