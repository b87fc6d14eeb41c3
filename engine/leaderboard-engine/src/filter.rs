//! Request-to-filter translation
//!
//! Both leaderboard modes run over the same predicate: rows with points on
//! the board, optionally narrowed by position and player name. Count and
//! fetch queries must use the identical filter or page math drifts from the
//! rows served.

use stat_store::StatFilter;

use crate::request::LeaderboardRequest;

/// Position value that disables position filtering
pub const POSITION_ALL: &str = "all";

/// Build the stat filter shared by every query a request issues
pub fn build_filter(request: &LeaderboardRequest) -> StatFilter {
    let mut filter = StatFilter {
        // Zero-point seasons never appear on a leaderboard
        min_fpts_exclusive: Some(0.0),
        ..Default::default()
    };

    if let Some(position) = &request.position {
        if !position.eq_ignore_ascii_case(POSITION_ALL) {
            filter.position_term = Some(position.to_uppercase());
        }
    }

    if let Some(search) = &request.search {
        if !search.is_empty() {
            filter.name_term = Some(search.clone());
        }
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::LeaderboardMode;

    #[test]
    fn test_bare_request_keeps_score_floor_only() {
        let filter = build_filter(&LeaderboardRequest::new(LeaderboardMode::AllTime));
        assert_eq!(filter.min_fpts_exclusive, Some(0.0));
        assert_eq!(filter.position_term, None);
        assert_eq!(filter.name_term, None);
    }

    #[test]
    fn test_position_all_disables_filter() {
        let mut request = LeaderboardRequest::new(LeaderboardMode::AllTime);
        request.position = Some("all".to_string());
        assert_eq!(build_filter(&request).position_term, None);

        request.position = Some("All".to_string());
        assert_eq!(build_filter(&request).position_term, None);

        request.position = Some("lw".to_string());
        assert_eq!(build_filter(&request).position_term, Some("LW".to_string()));
    }

    #[test]
    fn test_empty_search_is_no_filter() {
        let mut request = LeaderboardRequest::new(LeaderboardMode::SingleSeason);
        request.search = Some(String::new());
        assert_eq!(build_filter(&request).name_term, None);

        request.search = Some("gretzky".to_string());
        assert_eq!(build_filter(&request).name_term, Some("gretzky".to_string()));
    }
}
