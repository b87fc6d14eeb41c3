//! Career detail folding
//!
//! All-time rows are aggregated by the record source, but names, position
//! history and trophy counts come from a second pass over each player's
//! full career. That pass always runs unfiltered: a player found via a
//! position filter still shows every position they ever played and every
//! championship they ever won.

use std::collections::HashMap;

use tracing::warn;

use stat_store::{PlayerId, PlayerTotals, StatRecord};

use crate::types::LeaderboardRow;

/// Career facts for one player, folded from their stat rows
#[derive(Debug, Clone, PartialEq)]
pub struct CareerDetail {
    /// Display name from the most recent season
    pub player: String,

    /// Distinct position codes in first-seen order
    pub positions: Vec<String>,

    /// Championship seasons across the whole career
    pub championships_won: u32,
}

impl CareerDetail {
    /// Position codes joined for display
    pub fn position_list(&self) -> String {
        self.positions.join(", ")
    }
}

/// Fold stat rows into per-player career details. Rows must arrive most
/// recent season first so the display name tracks the latest spelling.
pub fn fold_careers(rows: &[StatRecord]) -> HashMap<PlayerId, CareerDetail> {
    let mut careers: HashMap<PlayerId, CareerDetail> = HashMap::new();

    for row in rows {
        let detail = careers.entry(row.player_id.clone()).or_insert_with(|| CareerDetail {
            player: row.player.clone(),
            positions: Vec::new(),
            championships_won: 0,
        });

        // Season positions are comma-joined code lists ("C, LW")
        for code in row.position.split(',') {
            let code = code.trim();
            if !code.is_empty() && !detail.positions.iter().any(|seen| seen == code) {
                detail.positions.push(code.to_string());
            }
        }

        if row.champion {
            detail.championships_won += 1;
        }
    }

    careers
}

/// Format a per-game average for display. `N/A` marks an average the data
/// genuinely lacks; a real 0.0 renders as `0.00`.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

/// Join aggregated totals with folded career details into display rows,
/// keeping the totals' order. A total with no career rows means the two
/// queries disagree; the row is dropped with a warning rather than served
/// half-empty.
pub fn assemble_career_rows(
    totals: Vec<PlayerTotals>,
    careers: &HashMap<PlayerId, CareerDetail>,
) -> Vec<LeaderboardRow> {
    let mut rows = Vec::with_capacity(totals.len());
    for entry in totals {
        let detail = match careers.get(&entry.player_id) {
            Some(detail) => detail,
            None => {
                warn!("No career rows for aggregated player {}, dropping", entry.player_id);
                continue;
            }
        };

        rows.push(LeaderboardRow::Career {
            player_id: entry.player_id,
            player: detail.player.clone(),
            position: detail.position_list(),
            fpts: entry.total_fpts,
            fpg: format_average(entry.average_fpg),
            championships_won: detail.championships_won,
        });
    }
    rows
}
