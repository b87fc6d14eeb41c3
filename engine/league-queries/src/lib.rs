//! # League Queries
//!
//! The non-leaderboard views of league history: player profiles, name
//! search, championship rosters, award histories and franchise tables.
//! Each view is a free function over a [`stat_store::RecordSource`], with
//! franchise alias resolution supplied by [`franchise_registry`].

pub mod awards;
pub mod champions;
pub mod error;
pub mod profile;
pub mod search;
pub mod teams;

pub use awards::{award_history, AwardEntry};
pub use champions::championship_roster;
pub use error::{QueryError, Result};
pub use profile::{player_profile, PlayerProfile, ProfileSeason, TrophyEntry};
pub use search::{search_players, MIN_QUERY_CHARS, SEARCH_LIMIT};
pub use teams::{team_summaries, team_top_scorers, TeamTopScorers};
