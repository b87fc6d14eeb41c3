//! Player name search
//!
//! Backs the typeahead box: short inputs return nothing rather than
//! scanning the whole league, and results are capped at a handful of
//! distinct players.

use std::sync::Arc;

use stat_store::{PlayerRef, RecordSource};

use crate::error::Result;

/// Queries shorter than this return no results
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum players returned per search
pub const SEARCH_LIMIT: u64 = 10;

/// Find players whose name contains `query`, case-insensitively. One entry
/// per player, alphabetical, at most [`SEARCH_LIMIT`].
pub async fn search_players(
    source: &Arc<dyn RecordSource>,
    query: &str,
) -> Result<Vec<PlayerRef>> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Vec::new());
    }
    source.search_players(query, SEARCH_LIMIT).await.map_err(Into::into)
}
