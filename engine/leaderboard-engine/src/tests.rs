//! Leaderboard behavior tests over the in-memory source

use std::sync::Arc;

use stat_store::{AwardRecord, LeagueDataset, MemorySource, StatRecord, Year};

use crate::{
    LeaderboardEngine, LeaderboardMode, LeaderboardPage, LeaderboardRequest, LeaderboardRow,
};

fn stat(
    id: &str,
    name: &str,
    year: Year,
    position: &str,
    fpts: f64,
    fpg: f64,
    champion: bool,
) -> StatRecord {
    StatRecord {
        player_id: id.to_string(),
        player: name.to_string(),
        year,
        age: None,
        position: position.to_string(),
        fpts,
        fpg,
        team_code: "NPD".to_string(),
        champion,
    }
}

fn award(name: &str, winner: &str, year: Year) -> AwardRecord {
    AwardRecord {
        award: name.to_string(),
        year,
        winner: winner.to_string(),
        team_code: "NPD".to_string(),
    }
}

/// Small league: a multi-position champion, a double award winner, and a
/// pair of players tied on points
fn league_engine() -> LeaderboardEngine {
    let mut dataset = LeagueDataset::new();
    dataset.stats = vec![
        stat("42", "Alex Vasquez", 2021, "LW", 120.0, 3.0, false),
        stat("42", "Alex Vasquez", 2020, "C", 0.0, 0.0, false),
        stat("42", "Alex Vasquez", 2019, "C", 80.0, 2.0, true),
        stat("7", "Noah Reed", 2020, "RW", 300.0, 4.0, false),
        stat("7", "Noah Reed", 2021, "RW", 290.0, 3.9, false),
        stat("1", "Liam Park", 2021, "D", 150.0, 2.2, false),
        stat("2", "Owen Hale", 2020, "D", 150.0, 2.1, false),
    ];
    dataset.awards = vec![
        award("MVP", "7", 2020),
        award("Best Forward", "7", 2020),
        award("MVP", "7", 2021),
    ];
    LeaderboardEngine::new(Arc::new(MemorySource::from_dataset(dataset)))
}

/// Thirty single-season players, strictly descending scores
fn two_page_engine() -> LeaderboardEngine {
    let mut dataset = LeagueDataset::new();
    for i in 0..30 {
        dataset.stats.push(stat(
            &format!("p{:02}", i),
            &format!("Player {:02}", i),
            2020,
            "C",
            1000.0 - i as f64,
            2.0,
            false,
        ));
    }
    LeaderboardEngine::new(Arc::new(MemorySource::from_dataset(dataset)))
}

fn request(mode: LeaderboardMode) -> LeaderboardRequest {
    LeaderboardRequest::new(mode)
}

fn row_ids(page: &LeaderboardPage) -> Vec<String> {
    page.rows
        .iter()
        .map(|row| match row {
            LeaderboardRow::Career { player_id, .. } => player_id.clone(),
            LeaderboardRow::Season { player_id, .. } => player_id.clone(),
        })
        .collect()
}

mod all_time_tests {
    use super::*;

    #[tokio::test]
    async fn test_ranks_by_career_total_with_stable_ties() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();

        // 7 has 590, 42 has 200, 1 and 2 tie at 150
        assert_eq!(row_ids(&page), vec!["7", "42", "1", "2"]);
        assert_eq!(page.max_pages, 1);
    }

    #[tokio::test]
    async fn test_zero_point_seasons_stay_out_of_totals() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();

        match &page.rows[1] {
            LeaderboardRow::Career { player_id, fpts, fpg, .. } => {
                assert_eq!(player_id, "42");
                // 120 + 80, the 0.0 season contributes nothing
                assert_eq!(*fpts, 200.0);
                assert_eq!(fpg, "2.50");
            }
            other => panic!("expected career row, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_position_filter_narrows_totals_but_not_details() {
        let engine = league_engine();
        let mut req = request(LeaderboardMode::AllTime);
        req.position = Some("c".to_string());

        let page = engine.leaderboard(&req).await.unwrap();
        assert_eq!(page.max_pages, 1);
        assert_eq!(page.rows.len(), 1);

        match &page.rows[0] {
            LeaderboardRow::Career {
                player_id,
                player,
                position,
                fpts,
                fpg,
                championships_won,
            } => {
                assert_eq!(player_id, "42");
                assert_eq!(player, "Alex Vasquez");
                // Only the 2019 C season passes the filter
                assert_eq!(*fpts, 80.0);
                assert_eq!(fpg, "2.00");
                // But details cover the whole career
                assert_eq!(position, "LW, C");
                assert_eq!(*championships_won, 1);
            }
            other => panic!("expected career row, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_filter_matches_name_substring() {
        let engine = league_engine();
        let mut req = request(LeaderboardMode::AllTime);
        req.search = Some("reed".to_string());

        let page = engine.leaderboard(&req).await.unwrap();
        assert_eq!(row_ids(&page), vec!["7"]);
    }

    #[tokio::test]
    async fn test_position_all_equals_no_filter() {
        let engine = league_engine();
        let mut with_sentinel = request(LeaderboardMode::AllTime);
        with_sentinel.position = Some("all".to_string());

        let sentinel = engine.leaderboard(&with_sentinel).await.unwrap();
        let bare = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();
        assert_eq!(sentinel, bare);
    }

    #[tokio::test]
    async fn test_same_request_is_deterministic() {
        let engine = league_engine();
        let req = request(LeaderboardMode::AllTime);

        let first = engine.leaderboard(&req).await.unwrap();
        let second = engine.leaderboard(&req).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_two_season_career_aggregates() {
        let mut dataset = LeagueDataset::new();
        dataset.stats = vec![
            stat("42", "Alex Vasquez", 2019, "C", 50.0, 2.5, false),
            stat("42", "Alex Vasquez", 2020, "LW", 70.0, 3.1, true),
        ];
        let engine = LeaderboardEngine::new(Arc::new(MemorySource::from_dataset(dataset)));

        let page = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();
        match &page.rows[0] {
            LeaderboardRow::Career { fpts, fpg, position, championships_won, .. } => {
                assert_eq!(*fpts, 120.0);
                assert_eq!(fpg, "2.80");
                assert_eq!(position, "LW, C");
                assert_eq!(*championships_won, 1);
            }
            other => panic!("expected career row, got {:?}", other),
        }

        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();
        match &page.rows[0] {
            LeaderboardRow::Season { fpts, fpg, champion, has_award, .. } => {
                assert_eq!(*fpts, 70.0);
                assert_eq!(fpg, "3.10");
                assert!(*champion);
                assert!(!*has_award);
            }
            other => panic!("expected season row, got {:?}", other),
        }
    }
}

mod single_season_tests {
    use super::*;

    #[tokio::test]
    async fn test_ranks_individual_seasons() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();

        // Six scoring seasons; the zero-point 2020 season is excluded
        assert_eq!(page.max_pages, 1);
        let order: Vec<(String, Year)> = page
            .rows
            .iter()
            .map(|row| match row {
                LeaderboardRow::Season { player_id, year, .. } => (player_id.clone(), *year),
                other => panic!("expected season row, got {:?}", other),
            })
            .collect();
        assert_eq!(
            order,
            vec![
                ("7".to_string(), 2020),
                ("7".to_string(), 2021),
                ("1".to_string(), 2021),
                ("2".to_string(), 2020),
                ("42".to_string(), 2021),
                ("42".to_string(), 2019),
            ]
        );
    }

    #[tokio::test]
    async fn test_award_flags_follow_exact_season() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();

        for row in &page.rows {
            if let LeaderboardRow::Season {
                player_id,
                year,
                has_award,
                has_multiple_awards,
                ..
            } = row
            {
                match (player_id.as_str(), *year) {
                    ("7", 2020) => {
                        assert!(*has_award);
                        assert!(*has_multiple_awards);
                    }
                    ("7", 2021) => {
                        assert!(*has_award);
                        assert!(!*has_multiple_awards);
                    }
                    _ => {
                        assert!(!*has_award);
                        assert!(!*has_multiple_awards);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_champion_season_is_marked() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();

        for row in &page.rows {
            if let LeaderboardRow::Season { player_id, year, champion, .. } = row {
                assert_eq!(*champion, player_id == "42" && *year == 2019);
            }
        }
    }

    #[tokio::test]
    async fn test_season_fpg_always_formats() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();

        if let LeaderboardRow::Season { fpg, .. } = &page.rows[0] {
            assert_eq!(fpg, "4.00");
        } else {
            panic!("expected season row");
        }
    }
}

mod paging_tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_split_at_twenty_five() {
        let engine = two_page_engine();

        let first = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();
        assert_eq!(first.rows.len(), 25);
        assert_eq!(first.max_pages, 2);
        assert_eq!(row_ids(&first)[0], "p00");

        let mut req = request(LeaderboardMode::AllTime);
        req.page = 2;
        let second = engine.leaderboard(&req).await.unwrap();
        assert_eq!(second.rows.len(), 5);
        assert_eq!(second.max_pages, 2);
        assert_eq!(row_ids(&second)[0], "p25");
    }

    #[tokio::test]
    async fn test_page_zero_serves_page_one() {
        let engine = two_page_engine();

        let mut req = request(LeaderboardMode::SingleSeason);
        req.page = 0;
        let zero = engine.leaderboard(&req).await.unwrap();

        req.page = 1;
        let one = engine.leaderboard(&req).await.unwrap();
        assert_eq!(zero, one);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_with_stable_total() {
        let engine = two_page_engine();

        let mut req = request(LeaderboardMode::SingleSeason);
        req.page = 99;
        let page = engine.leaderboard(&req).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.max_pages, 2);
    }

    #[tokio::test]
    async fn test_page_at_u64_max_is_empty() {
        let engine = two_page_engine();

        // The skip for this page would overflow; it must saturate into an
        // empty page rather than panic or wrap around to page one
        for mode in [LeaderboardMode::AllTime, LeaderboardMode::SingleSeason] {
            let mut req = request(mode);
            req.page = u64::MAX;
            let page = engine.leaderboard(&req).await.unwrap();
            assert!(page.rows.is_empty());
            assert_eq!(page.max_pages, 2);
        }
    }

    #[tokio::test]
    async fn test_empty_filter_result_has_zero_pages() {
        let engine = league_engine();

        let mut req = request(LeaderboardMode::AllTime);
        req.search = Some("nobody".to_string());
        let page = engine.leaderboard(&req).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.max_pages, 0);
    }

    #[tokio::test]
    async fn test_career_total_spans_page_boundary() {
        let mut dataset = LeagueDataset::new();
        for i in 0..30 {
            dataset.stats.push(stat(
                &format!("p{:02}", i),
                &format!("Player {:02}", i),
                2020,
                "C",
                1000.0 - i as f64,
                2.0,
                false,
            ));
        }
        // One career split across the single-season page boundary
        dataset.stats.push(stat("px", "Paige Spanner", 2021, "C", 999.5, 3.0, false));
        dataset.stats.push(stat("px", "Paige Spanner", 2019, "C", 0.25, 0.5, false));
        let engine = LeaderboardEngine::new(Arc::new(MemorySource::from_dataset(dataset)));

        let mut req = request(LeaderboardMode::SingleSeason);
        let first = engine.leaderboard(&req).await.unwrap();
        assert!(row_ids(&first).contains(&"px".to_string()));
        req.page = 2;
        let second = engine.leaderboard(&req).await.unwrap();
        assert!(row_ids(&second).contains(&"px".to_string()));

        // The all-time total still covers the season on the later page
        let page = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();
        match &page.rows[1] {
            LeaderboardRow::Career { player_id, fpts, .. } => {
                assert_eq!(player_id, "px");
                assert_eq!(*fpts, 999.75);
            }
            other => panic!("expected career row, got {:?}", other),
        }
    }
}

mod wire_format_tests {
    use super::*;

    #[tokio::test]
    async fn test_career_rows_serialize_flat() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::AllTime)).await.unwrap();

        let json = serde_json::to_value(&page).unwrap();
        assert!(json["maxPages"].is_u64());

        let row = json["players"][0].as_object().unwrap();
        assert_eq!(row["ID"], "7");
        assert_eq!(row["Player"], "Noah Reed");
        assert_eq!(row["FPts"], 590.0);
        assert_eq!(row["FPG"], "3.95");
        assert_eq!(row["ChampionshipsWon"], 0);
        assert!(!row.contains_key("Career"), "variant tag must not leak");
        assert!(!row.contains_key("Year"));
    }

    #[tokio::test]
    async fn test_season_rows_serialize_flat() {
        let engine = league_engine();
        let page = engine.leaderboard(&request(LeaderboardMode::SingleSeason)).await.unwrap();

        let json = serde_json::to_value(&page).unwrap();
        let row = json["players"][0].as_object().unwrap();
        assert_eq!(row["ID"], "7");
        assert_eq!(row["Year"], 2020);
        assert_eq!(row["hasAward"], true);
        assert_eq!(row["hasMultipleAwards"], true);
        assert_eq!(row["Champion"], false);
        assert!(!row.contains_key("ChampionshipsWon"));
    }
}
