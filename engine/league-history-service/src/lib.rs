//! League History Service Library
//!
//! This library wires the league history query stack together: configuration
//! management, logging setup, backend selection and the CLI surface.

use anyhow::{Context, Result};
use std::path::Path;

pub mod cli;
pub mod config;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use logging::initialize_logging;
pub use service::ServiceState;

/// Load configuration from an optional file and environment variables
pub fn load_configuration(config_file: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(config_file).context("Failed to load service configuration")
}
