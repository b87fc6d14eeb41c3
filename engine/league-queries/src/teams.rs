//! Franchise views
//!
//! The league table is a straight read of the team summary rows. The
//! per-franchise view is an all-time scorer list folded across every
//! abbreviation the franchise has played under, so a renamed team keeps
//! its history.

use std::sync::Arc;

use serde::Serialize;

use franchise_registry::FranchiseRegistry;
use leaderboard_engine::{assemble_career_rows, fold_careers, LeaderboardRow};
use stat_store::{PlayerId, RecordSource, StatFilter, StatOrder, TeamRecord};

use crate::error::{QueryError, Result};

/// A franchise's all-time top scorers plus its current display name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamTopScorers {
    #[serde(rename = "topPlayers")]
    pub top_players: Vec<LeaderboardRow>,

    #[serde(rename = "teamName")]
    pub team_name: String,
}

/// The league table, wins descending
pub async fn team_summaries(source: &Arc<dyn RecordSource>) -> Result<Vec<TeamRecord>> {
    source.team_summaries().await.map_err(Into::into)
}

/// All-time top scorers for one franchise, across every abbreviation it
/// has used. Unlike the leaderboards there is no score floor: every season
/// played for the franchise counts.
pub async fn team_top_scorers(
    source: &Arc<dyn RecordSource>,
    registry: &FranchiseRegistry,
    team_id: u32,
) -> Result<TeamTopScorers> {
    let codes =
        registry.codes_for(team_id).map_err(|_| QueryError::InvalidTeam(team_id))?;

    let summary =
        source.team_summary(team_id).await?.ok_or(QueryError::TeamNotFound(team_id))?;

    let filter = StatFilter { team_codes: Some(codes.to_vec()), ..Default::default() };
    let totals = source.player_totals(&filter, None).await?;

    let ids: Vec<PlayerId> = totals.iter().map(|entry| entry.player_id.clone()).collect();
    let careers =
        fold_careers(&source.stats_for_players(&ids, StatOrder::YearDesc).await?);

    Ok(TeamTopScorers {
        top_players: assemble_career_rows(totals, &careers),
        team_name: summary.team,
    })
}
