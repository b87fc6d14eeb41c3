//! Leaderboard request parameters

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Which leaderboard to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMode {
    /// Career totals, one row per player
    AllTime,
    /// Best individual seasons, one row per player-season
    SingleSeason,
}

impl FromStr for LeaderboardMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all-time") {
            Ok(Self::AllTime)
        } else if s.eq_ignore_ascii_case("single-season") {
            Ok(Self::SingleSeason)
        } else {
            Err(EngineError::InvalidMode(s.to_string()))
        }
    }
}

impl fmt::Display for LeaderboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => write!(f, "all-time"),
            Self::SingleSeason => write!(f, "single-season"),
        }
    }
}

/// One leaderboard page request. Both modes share the same parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRequest {
    /// Which leaderboard to serve
    pub mode: LeaderboardMode,

    /// Position code to filter on, or the `all` sentinel for no filter
    pub position: Option<String>,

    /// Player name search term, empty means no filter
    pub search: Option<String>,

    /// 1-based page number
    pub page: u64,
}

impl LeaderboardRequest {
    /// Request the first page with no filters
    pub fn new(mode: LeaderboardMode) -> Self {
        Self { mode, position: None, search: None, page: 1 }
    }
}
