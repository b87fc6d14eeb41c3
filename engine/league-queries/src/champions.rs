//! Championship roster view
//!
//! Every player-season on the championship team of a given year, best
//! scorers first. A year with no recorded champion yields an empty roster,
//! not an error.

use std::sync::Arc;

use stat_store::{RecordSource, StatFilter, StatOrder, StatRecord, Year};

use crate::error::Result;

/// The championship roster for `year`, fantasy points descending
pub async fn championship_roster(
    source: &Arc<dyn RecordSource>,
    year: Year,
) -> Result<Vec<StatRecord>> {
    let filter = StatFilter { year: Some(year), champions_only: true, ..Default::default() };
    source.find_stats(&filter, StatOrder::FptsDesc, None).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_store::{LeagueDataset, MemorySource};

    fn stat(id: &str, year: Year, fpts: f64, champion: bool) -> StatRecord {
        StatRecord {
            player_id: id.to_string(),
            player: format!("Player {}", id),
            year,
            age: None,
            position: "C".to_string(),
            fpts,
            fpg: 2.0,
            team_code: "WWE".to_string(),
            champion,
        }
    }

    fn source() -> Arc<dyn RecordSource> {
        let mut dataset = LeagueDataset::new();
        dataset.stats = vec![
            stat("1", 2020, 120.0, true),
            stat("2", 2020, 180.0, true),
            stat("3", 2020, 150.0, false),
            stat("1", 2019, 200.0, false),
        ];
        Arc::new(MemorySource::from_dataset(dataset))
    }

    #[tokio::test]
    async fn test_roster_holds_champions_of_that_year_only() {
        let source = source();
        let roster = championship_roster(&source, 2020).await.unwrap();

        let ids: Vec<&str> = roster.iter().map(|row| row.player_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"], "champions only, best scorer first");
    }

    #[tokio::test]
    async fn test_year_without_champion_is_empty() {
        let source = source();
        assert!(championship_roster(&source, 2019).await.unwrap().is_empty());
        assert!(championship_roster(&source, 1999).await.unwrap().is_empty());
    }
}
