//! In-memory record source
//!
//! Serves queries directly from a [`LeagueDataset`] held in memory. This is
//! the default backend: league history is small (a few thousand rows) and
//! fixed between imports, so scanning is cheap and keeps deployments free of
//! database setup. Also the reference implementation the SQLite backend is
//! tested against.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::query::{PlayerTotals, RecordSource, StatFilter, StatOrder, Window};
use crate::types::{AwardRecord, LeagueDataset, PlayerId, PlayerRef, StatRecord, TeamRecord, Year};

/// Record source backed by an in-memory dataset
#[derive(Debug)]
pub struct MemorySource {
    dataset: LeagueDataset,
}

impl MemorySource {
    /// Create a source over an already-loaded dataset
    pub fn from_dataset(dataset: LeagueDataset) -> Self {
        Self { dataset }
    }

    /// Load a JSON dataset export from disk. Fails with
    /// `StoreError::InvalidDataset` if the export contains rows with
    /// blank ids.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let dataset: LeagueDataset = serde_json::from_str(&contents)?;
        dataset.validate()?;

        info!(
            path = %path.display(),
            stats = dataset.stats.len(),
            awards = dataset.awards.len(),
            teams = dataset.teams.len(),
            "Loaded league dataset"
        );

        Ok(Self::from_dataset(dataset))
    }

    /// The dataset this source serves
    pub fn dataset(&self) -> &LeagueDataset {
        &self.dataset
    }

    fn matching<'a>(&'a self, filter: &'a StatFilter) -> impl Iterator<Item = &'a StatRecord> {
        self.dataset.stats.iter().filter(move |record| filter.matches(record))
    }
}

fn apply_window<T>(mut rows: Vec<T>, window: Option<Window>) -> Vec<T> {
    if let Some(window) = window {
        let skip = window.skip.min(rows.len() as u64) as usize;
        rows.drain(..skip);
        rows.truncate(window.take as usize);
    }
    rows
}

fn compare_stats(a: &StatRecord, b: &StatRecord, order: StatOrder) -> Ordering {
    match order {
        StatOrder::FptsDesc => b
            .fpts
            .total_cmp(&a.fpts)
            .then_with(|| a.player_id.cmp(&b.player_id))
            .then_with(|| a.year.cmp(&b.year)),
        StatOrder::YearAsc => a
            .year
            .cmp(&b.year)
            .then_with(|| b.fpts.total_cmp(&a.fpts))
            .then_with(|| a.player_id.cmp(&b.player_id)),
        StatOrder::YearDesc => b
            .year
            .cmp(&a.year)
            .then_with(|| b.fpts.total_cmp(&a.fpts))
            .then_with(|| a.player_id.cmp(&b.player_id)),
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn count_stats(&self, filter: &StatFilter) -> Result<u64> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn count_players(&self, filter: &StatFilter) -> Result<u64> {
        let ids: HashSet<&str> =
            self.matching(filter).map(|record| record.player_id.as_str()).collect();
        Ok(ids.len() as u64)
    }

    async fn player_totals(
        &self,
        filter: &StatFilter,
        window: Option<Window>,
    ) -> Result<Vec<PlayerTotals>> {
        // Sum and mean per player id, in one pass
        let mut groups: HashMap<&str, (f64, f64, u64)> = HashMap::new();
        for record in self.matching(filter) {
            let entry = groups.entry(record.player_id.as_str()).or_insert((0.0, 0.0, 0));
            entry.0 += record.fpts;
            entry.1 += record.fpg;
            entry.2 += 1;
        }

        let mut totals: Vec<PlayerTotals> = groups
            .into_iter()
            .map(|(id, (total_fpts, fpg_sum, seasons))| PlayerTotals {
                player_id: id.to_string(),
                total_fpts,
                average_fpg: if seasons > 0 { Some(fpg_sum / seasons as f64) } else { None },
            })
            .collect();

        totals.sort_by(|a, b| {
            b.total_fpts.total_cmp(&a.total_fpts).then_with(|| a.player_id.cmp(&b.player_id))
        });

        Ok(apply_window(totals, window))
    }

    async fn find_stats(
        &self,
        filter: &StatFilter,
        order: StatOrder,
        window: Option<Window>,
    ) -> Result<Vec<StatRecord>> {
        let mut rows: Vec<StatRecord> = self.matching(filter).cloned().collect();
        rows.sort_by(|a, b| compare_stats(a, b, order));
        Ok(apply_window(rows, window))
    }

    async fn stats_for_players(
        &self,
        player_ids: &[PlayerId],
        order: StatOrder,
    ) -> Result<Vec<StatRecord>> {
        if player_ids.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<&str> = player_ids.iter().map(|id| id.as_str()).collect();
        let mut rows: Vec<StatRecord> = self
            .dataset
            .stats
            .iter()
            .filter(|record| wanted.contains(record.player_id.as_str()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare_stats(a, b, order));
        Ok(rows)
    }

    async fn awards_for_pairs(&self, pairs: &[(PlayerId, Year)]) -> Result<Vec<AwardRecord>> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<(&str, Year)> =
            pairs.iter().map(|(id, year)| (id.as_str(), *year)).collect();
        Ok(self
            .dataset
            .awards
            .iter()
            .filter(|award| wanted.contains(&(award.winner.as_str(), award.year)))
            .cloned()
            .collect())
    }

    async fn awards_for_winner(&self, winner: &str) -> Result<Vec<AwardRecord>> {
        let mut rows: Vec<AwardRecord> = self
            .dataset
            .awards
            .iter()
            .filter(|award| award.winner == winner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.award.cmp(&b.award)));
        Ok(rows)
    }

    async fn awards_by_name(&self, award: &str) -> Result<Vec<AwardRecord>> {
        let wanted = award.to_lowercase();
        let mut rows: Vec<AwardRecord> = self
            .dataset
            .awards
            .iter()
            .filter(|row| row.award.to_lowercase() == wanted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.winner.cmp(&b.winner)));
        Ok(rows)
    }

    async fn team_summaries(&self) -> Result<Vec<TeamRecord>> {
        let mut rows = self.dataset.teams.clone();
        rows.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn team_summary(&self, id: u32) -> Result<Option<TeamRecord>> {
        Ok(self.dataset.teams.iter().find(|team| team.id == id).cloned())
    }

    async fn search_players(&self, term: &str, limit: u64) -> Result<Vec<PlayerRef>> {
        let wanted = term.to_lowercase();
        let mut matches: Vec<PlayerRef> = self
            .dataset
            .stats
            .iter()
            .filter(|record| record.player.to_lowercase().contains(&wanted))
            .map(|record| PlayerRef {
                player_id: record.player_id.clone(),
                player: record.player.clone(),
            })
            .collect();

        // Distinct by id, keeping the alphabetically-first name per id
        matches.sort_by(|a, b| {
            a.player.cmp(&b.player).then_with(|| a.player_id.cmp(&b.player_id))
        });
        let mut seen: HashSet<String> = HashSet::new();
        matches.retain(|entry| seen.insert(entry.player_id.clone()));
        matches.truncate(limit as usize);
        Ok(matches)
    }
}
