//! Award history view
//!
//! All winners of one award, newest first. Award rows store winner IDs;
//! the view resolves them to display names so the table reads properly,
//! falling back to `Unknown` for IDs with no stat rows left.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use stat_store::{PlayerId, RecordSource, StatOrder, Year};

use crate::error::{QueryError, Result};

/// One row in an award's history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardEntry {
    #[serde(rename = "Award")]
    pub award: String,

    #[serde(rename = "Year")]
    pub year: Year,

    /// Winner's display name, `Unknown` when unresolvable
    #[serde(rename = "Winner")]
    pub winner: String,

    /// Winner's player ID, for linking; `None` when unresolvable
    #[serde(rename = "PlayerID")]
    pub player_id: Option<PlayerId>,

    #[serde(rename = "Team")]
    pub team_code: String,
}

/// Every season's winner of the award named `award`, newest first
pub async fn award_history(
    source: &Arc<dyn RecordSource>,
    award: &str,
) -> Result<Vec<AwardEntry>> {
    let rows = source.awards_by_name(award).await?;
    if rows.is_empty() {
        return Err(QueryError::AwardNotFound(award.to_string()));
    }

    // Resolve winner IDs to display names via their stat rows
    let mut winner_ids: Vec<PlayerId> =
        rows.iter().map(|row| row.winner.clone()).collect();
    winner_ids.sort();
    winner_ids.dedup();

    let mut names: HashMap<PlayerId, String> = HashMap::new();
    for stat in source.stats_for_players(&winner_ids, StatOrder::YearDesc).await? {
        // Year-descending rows, so the first name seen is the latest spelling
        names.entry(stat.player_id).or_insert(stat.player);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let name = names.get(&row.winner).cloned();
            if name.is_none() {
                warn!("No stat rows for award winner {}, listing as Unknown", row.winner);
            }
            AwardEntry {
                award: row.award,
                year: row.year,
                player_id: name.as_ref().map(|_| row.winner.clone()),
                winner: name.unwrap_or_else(|| "Unknown".to_string()),
                team_code: row.team_code,
            }
        })
        .collect())
}
