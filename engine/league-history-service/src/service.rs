//! Service state and backend wiring

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use franchise_registry::FranchiseRegistry;
use leaderboard_engine::LeaderboardEngine;
use stat_store::{MemorySource, RecordSource, SqliteSource};

use crate::config::ServiceConfig;

/// Service state containing the wired query components
pub struct ServiceState {
    /// Service configuration
    pub config: ServiceConfig,

    /// Record source backing all queries
    pub source: Arc<dyn RecordSource>,

    /// Franchise alias registry
    pub registry: FranchiseRegistry,

    /// Leaderboard engine over the record source
    pub engine: LeaderboardEngine,
}

impl ServiceState {
    /// Create a new service state with the configured backend
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        info!("Initializing league history components...");

        let registry = match &config.service.aliases_file {
            Some(path) => FranchiseRegistry::load_from_file(path)
                .await
                .with_context(|| format!("Failed to load alias table from {:?}", path))?,
            None => FranchiseRegistry::new(),
        };

        let source: Arc<dyn RecordSource> = match config.storage.backend.as_str() {
            "sqlite" => {
                info!("Using SQLite backend at {}", config.storage.database_url);
                Arc::new(
                    SqliteSource::connect(&config.storage.database_url)
                        .await
                        .context("Failed to open SQLite database")?,
                )
            }
            _ => {
                info!("Using in-memory backend from {:?}", config.service.dataset_file);
                let memory = MemorySource::load_from_file(&config.service.dataset_file)
                    .await
                    .with_context(|| {
                        format!("Failed to load dataset from {:?}", config.service.dataset_file)
                    })?;

                let seasons = memory.dataset().seasons();
                if let (Some(first), Some(last)) = (seasons.first(), seasons.last()) {
                    info!("Dataset covers seasons {} through {}", first, last);
                }
                Arc::new(memory)
            }
        };

        let engine = LeaderboardEngine::new(source.clone());

        info!("Service state initialized");
        Ok(Self { config, source, registry, engine })
    }
}
