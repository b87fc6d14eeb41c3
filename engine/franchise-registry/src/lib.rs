//! # Franchise Registry
//!
//! Maps the abbreviations franchises have used across league history to
//! stable franchise IDs. Stat rows store the abbreviation that was current
//! in their season; this crate ties those back to today's franchises.

pub mod error;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::FranchiseRegistry;
