//! Leaderboard assembly
//!
//! Both modes follow the same outline: count the filtered population for
//! the page total, fetch one window of ranked entries, then decorate the
//! window with data the ranking query cannot carry (career details or
//! award flags). The count and the window always run the same filter.

use std::sync::Arc;

use stat_store::{PlayerId, RecordSource, StatOrder, Window, Year};

use crate::awards::correlate_awards;
use crate::career::{assemble_career_rows, fold_careers, format_average};
use crate::error::Result;
use crate::filter::build_filter;
use crate::request::{LeaderboardMode, LeaderboardRequest};
use crate::types::{LeaderboardPage, LeaderboardRow};
use crate::PAGE_SIZE;

/// Serves leaderboard pages from a record source
pub struct LeaderboardEngine {
    source: Arc<dyn RecordSource>,
}

impl LeaderboardEngine {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// Serve one page for `request`
    pub async fn leaderboard(&self, request: &LeaderboardRequest) -> Result<LeaderboardPage> {
        match request.mode {
            LeaderboardMode::AllTime => self.all_time(request).await,
            LeaderboardMode::SingleSeason => self.single_season(request).await,
        }
    }

    /// Window for a 1-based page number. Page 0 is treated as page 1; a page
    /// number large enough to overflow the skip saturates, which lands past
    /// the end and serves an empty page.
    fn window_for(page: u64) -> Window {
        let page = page.max(1);
        Window::new((page - 1).saturating_mul(PAGE_SIZE), PAGE_SIZE)
    }

    async fn all_time(&self, request: &LeaderboardRequest) -> Result<LeaderboardPage> {
        let filter = build_filter(request);

        // Page count follows distinct players, not row count
        let unique_players = self.source.count_players(&filter).await?;
        let max_pages = unique_players.div_ceil(PAGE_SIZE);

        let totals =
            self.source.player_totals(&filter, Some(Self::window_for(request.page))).await?;

        // Hydration is deliberately unfiltered: a player found through a
        // position filter still shows their full position history and
        // every championship
        let ids: Vec<PlayerId> = totals.iter().map(|entry| entry.player_id.clone()).collect();
        let career_rows = self.source.stats_for_players(&ids, StatOrder::YearDesc).await?;
        let careers = fold_careers(&career_rows);

        Ok(LeaderboardPage { rows: assemble_career_rows(totals, &careers), max_pages })
    }

    async fn single_season(&self, request: &LeaderboardRequest) -> Result<LeaderboardPage> {
        let filter = build_filter(request);

        let total_rows = self.source.count_stats(&filter).await?;
        let max_pages = total_rows.div_ceil(PAGE_SIZE);

        let seasons = self
            .source
            .find_stats(&filter, StatOrder::FptsDesc, Some(Self::window_for(request.page)))
            .await?;

        let pairs: Vec<(PlayerId, Year)> =
            seasons.iter().map(|row| (row.player_id.clone(), row.year)).collect();
        let awards = self.source.awards_for_pairs(&pairs).await?;
        let flags = correlate_awards(&awards);

        let rows = seasons
            .into_iter()
            .map(|row| {
                let marks =
                    flags.get(&(row.player_id.clone(), row.year)).copied().unwrap_or_default();

                LeaderboardRow::Season {
                    player_id: row.player_id,
                    player: row.player,
                    position: row.position,
                    fpts: row.fpts,
                    fpg: format_average(Some(row.fpg)),
                    year: row.year,
                    has_award: marks.has_award,
                    has_multiple_awards: marks.has_multiple_awards,
                    champion: row.champion,
                }
            })
            .collect();

        Ok(LeaderboardPage { rows, max_pages })
    }
}
