//! Franchise alias registry
//!
//! Franchises rename themselves between seasons, so historical stat rows
//! carry abbreviations that no longer exist. This registry maps every
//! abbreviation a franchise has ever used back to its stable franchise ID,
//! in both directions.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{RegistryError, Result};

/// Every abbreviation each franchise has used, in the order they were
/// adopted. Covers the league's fourteen founding franchises.
const DEFAULT_ALIASES: &[(u32, &[&str])] = &[
    (1, &["HCHH", "PVLS"]),
    (2, &["NPD"]),
    (3, &["STEG", "STEC", "HH"]),
    (4, &["VWIZ"]),
    (5, &["JAGR"]),
    (6, &["WWE", "ORCA", "TEEHAW"]),
    (7, &["Lali"]),
    (8, &["SEED", "SKGS"]),
    (9, &["WTURR", "Reaper", "Reapers"]),
    (10, &["ASI", "RP"]),
    (11, &["NFLD"]),
    (12, &["DGWY", "MAC", "NKN"]),
    (13, &["JUBA", "MEAT", "HUNG"]),
    (14, &["JTPJ"]),
];

/// Franchise Registry - maps team abbreviations to franchise IDs
///
/// Lookups go both ways: from a franchise ID to every abbreviation it has
/// used, and from any historical abbreviation back to its franchise.
pub struct FranchiseRegistry {
    /// Map from franchise ID to its abbreviations, oldest first
    codes_by_franchise: HashMap<u32, Vec<String>>,

    /// Map from abbreviation to franchise ID (for reverse lookup)
    franchise_by_code: HashMap<String, u32>,
}

impl FranchiseRegistry {
    /// Create a registry with the league's built-in alias table
    pub fn new() -> Self {
        Self::from_aliases(
            DEFAULT_ALIASES
                .iter()
                .map(|(id, codes)| (*id, codes.iter().map(|code| code.to_string()).collect())),
        )
    }

    /// Build a registry from `(franchise_id, codes)` pairs. A code claimed
    /// by two franchises stays with the first; the duplicate is dropped
    /// with a warning.
    pub fn from_aliases(aliases: impl IntoIterator<Item = (u32, Vec<String>)>) -> Self {
        let mut codes_by_franchise: HashMap<u32, Vec<String>> = HashMap::new();
        let mut franchise_by_code: HashMap<String, u32> = HashMap::new();

        for (id, codes) in aliases {
            for code in codes {
                if let Some(existing) = franchise_by_code.get(&code) {
                    warn!(
                        "Abbreviation {} already registered to franchise {}, ignoring for {}",
                        code, existing, id
                    );
                    continue;
                }
                franchise_by_code.insert(code.clone(), id);
                codes_by_franchise.entry(id).or_default().push(code);
            }
        }

        Self { codes_by_franchise, franchise_by_code }
    }

    /// Load an alias table from a JSON file mapping franchise IDs to
    /// abbreviation lists
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let aliases: HashMap<u32, Vec<String>> = serde_json::from_str(&json_content)?;

        info!(
            path = ?file_path.as_ref(),
            franchises = aliases.len(),
            "Loaded franchise alias table"
        );

        let mut pairs: Vec<(u32, Vec<String>)> = aliases.into_iter().collect();
        // Deterministic duplicate resolution regardless of map order
        pairs.sort_by_key(|(id, _)| *id);
        Ok(Self::from_aliases(pairs))
    }

    /// Every abbreviation the franchise has used, oldest first
    pub fn codes_for(&self, franchise_id: u32) -> Result<&[String]> {
        self.codes_by_franchise
            .get(&franchise_id)
            .map(|codes| codes.as_slice())
            .ok_or(RegistryError::UnknownFranchise(franchise_id))
    }

    /// The franchise that used `code`, if any. Abbreviations match exactly,
    /// including case.
    pub fn resolve(&self, code: &str) -> Option<u32> {
        self.franchise_by_code.get(code).copied()
    }

    /// True if the franchise ID is registered
    pub fn contains(&self, franchise_id: u32) -> bool {
        self.codes_by_franchise.contains_key(&franchise_id)
    }

    /// Number of registered franchises
    pub fn franchise_count(&self) -> usize {
        self.codes_by_franchise.len()
    }
}

impl Default for FranchiseRegistry {
    fn default() -> Self {
        Self::new()
    }
}
