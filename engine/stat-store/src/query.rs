//! Query contract shared by every storage backend
//!
//! Callers describe what they want with [`StatFilter`], [`StatOrder`] and
//! [`Window`]; backends are responsible for honoring those descriptions with
//! whatever mechanism suits them (in-memory scans, SQL, ...). The engine and
//! query layers above never see backend-specific types.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AwardRecord, PlayerId, PlayerRef, StatRecord, TeamRecord, Year};

/// Predicate over stat rows. All populated fields must match (logical AND);
/// an empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatFilter {
    /// Keep rows with fantasy points strictly greater than this
    pub min_fpts_exclusive: Option<f64>,

    /// Keep rows whose position string contains this term,
    /// case-insensitively
    pub position_term: Option<String>,

    /// Keep rows whose player name contains this term, case-insensitively
    pub name_term: Option<String>,

    /// Keep rows whose team code is one of these (exact match)
    pub team_codes: Option<Vec<String>>,

    /// Keep rows from this season only
    pub year: Option<Year>,

    /// Keep only rows from championship-winning teams
    pub champions_only: bool,
}

impl StatFilter {
    /// Filter that matches every row
    pub fn any() -> Self {
        Self::default()
    }

    /// True if `record` satisfies every populated field
    pub fn matches(&self, record: &StatRecord) -> bool {
        if let Some(floor) = self.min_fpts_exclusive {
            if record.fpts <= floor {
                return false;
            }
        }
        if let Some(term) = &self.position_term {
            if !record.position.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(term) = &self.name_term {
            if !record.player.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(codes) = &self.team_codes {
            if !codes.iter().any(|code| code == &record.team_code) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        if self.champions_only && !record.champion {
            return false;
        }
        true
    }
}

/// Sort order for stat row queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOrder {
    /// Fantasy points descending, ties by player id ascending then year
    /// ascending
    FptsDesc,
    /// Year ascending, ties by fantasy points descending
    YearAsc,
    /// Year descending, ties by fantasy points descending
    YearDesc,
}

/// Pagination window in row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Rows to skip before the first returned row
    pub skip: u64,
    /// Maximum rows to return
    pub take: u64,
}

impl Window {
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }
}

/// Per-player aggregate over a set of filtered stat rows
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTotals {
    /// Stable player identifier
    pub player_id: PlayerId,

    /// Sum of fantasy points across matching rows
    pub total_fpts: f64,

    /// Mean fantasy points per game across matching rows, `None` when the
    /// backend has no rows to average
    pub average_fpg: Option<f64>,
}

/// Read contract over league history data.
///
/// Every operation takes explicit filter/order/window descriptions so results
/// are identical across backends. Implementations must apply ordering before
/// windows and must use deterministic tie-breaks (documented per method).
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Count stat rows matching `filter`
    async fn count_stats(&self, filter: &StatFilter) -> Result<u64>;

    /// Count distinct player ids among rows matching `filter`
    async fn count_players(&self, filter: &StatFilter) -> Result<u64>;

    /// Group rows matching `filter` by player id and aggregate fantasy
    /// points (sum) and per-game average (mean). Ordered by total
    /// descending, ties by player id ascending. `window` applies to the
    /// grouped result, not the underlying rows.
    async fn player_totals(
        &self,
        filter: &StatFilter,
        window: Option<Window>,
    ) -> Result<Vec<PlayerTotals>>;

    /// Fetch rows matching `filter` in `order`, optionally windowed
    async fn find_stats(
        &self,
        filter: &StatFilter,
        order: StatOrder,
        window: Option<Window>,
    ) -> Result<Vec<StatRecord>>;

    /// All rows for the given players, sorted by `order`. Returns an empty
    /// vec for an empty id list.
    async fn stats_for_players(
        &self,
        player_ids: &[PlayerId],
        order: StatOrder,
    ) -> Result<Vec<StatRecord>>;

    /// Award rows whose `(winner, year)` pair appears in `pairs`. Returns an
    /// empty vec for an empty pair list.
    async fn awards_for_pairs(&self, pairs: &[(PlayerId, Year)]) -> Result<Vec<AwardRecord>>;

    /// Award rows won by `winner`, year ascending
    async fn awards_for_winner(&self, winner: &str) -> Result<Vec<AwardRecord>>;

    /// Award rows for the award named `award` (case-insensitive), year
    /// descending
    async fn awards_by_name(&self, award: &str) -> Result<Vec<AwardRecord>>;

    /// All franchise summary rows, wins descending
    async fn team_summaries(&self) -> Result<Vec<TeamRecord>>;

    /// One franchise summary row by id, `None` if absent
    async fn team_summary(&self, id: u32) -> Result<Option<TeamRecord>>;

    /// Distinct `(id, name)` pairs whose name contains `term`
    /// case-insensitively, ordered by name ascending then id ascending,
    /// truncated to `limit`
    async fn search_players(&self, term: &str, limit: u64) -> Result<Vec<PlayerRef>>;
}
