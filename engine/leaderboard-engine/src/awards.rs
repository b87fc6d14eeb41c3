//! Award correlation
//!
//! Single-season rows are decorated with award markers. Awards are keyed by
//! exact `(winner, year)` pair: the same player on the page in a different
//! season must not inherit the flag.

use std::collections::HashMap;

use stat_store::{AwardRecord, PlayerId, Year};

/// Award markers for one player-season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AwardFlags {
    /// Won at least one award that season
    pub has_award: bool,

    /// Won more than one award that season
    pub has_multiple_awards: bool,
}

/// Count awards per `(winner, year)` pair and reduce to flags
pub fn correlate_awards(awards: &[AwardRecord]) -> HashMap<(PlayerId, Year), AwardFlags> {
    let mut counts: HashMap<(PlayerId, Year), u32> = HashMap::new();
    for award in awards {
        *counts.entry((award.winner.clone(), award.year)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(pair, count)| {
            (pair, AwardFlags { has_award: count > 0, has_multiple_awards: count > 1 })
        })
        .collect()
}
