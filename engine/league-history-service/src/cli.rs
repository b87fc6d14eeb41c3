//! # Command Line Interface
//!
//! CLI for querying league history: leaderboards, player profiles, search,
//! championship rosters, award histories and franchise tables. Results are
//! printed as JSON, matching the shapes the web tier serves.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use leaderboard_engine::{LeaderboardMode, LeaderboardRequest, POSITION_ALL};
use league_queries::{
    award_history, championship_roster, player_profile, search_players, team_summaries,
    team_top_scorers, QueryError,
};
use stat_store::{LeagueDataset, SqliteSource, Year};

use crate::config::ServiceConfig;
use crate::service::ServiceState;

/// League history CLI
#[derive(Parser)]
#[command(name = "league-history")]
#[command(about = "Query service for fantasy league history records")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a leaderboard page
    Leaderboard {
        /// Leaderboard mode: all-time or single-season
        mode: String,

        /// Position code to filter on, or all
        #[arg(long, default_value = POSITION_ALL)]
        position: String,

        /// Player name search term
        #[arg(long)]
        search: Option<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Show a player's season history and trophy case
    Player {
        /// Player ID
        id: String,
    },
    /// Search players by name
    Search {
        /// Name fragment, at least 3 characters
        query: String,
    },
    /// Show a championship roster
    Champions {
        /// Season year
        year: Year,
    },
    /// Show the history of an award
    Award {
        /// Award name
        name: String,
    },
    /// Show the league table
    Teams,
    /// Show a franchise's all-time top scorers
    Team {
        /// Franchise ID
        id: u32,
    },
    /// Import a JSON dataset into the SQLite backend
    Import {
        /// Dataset file to import (defaults to the configured dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Target database URL (defaults to the configured URL)
        #[arg(long)]
        database_url: Option<String>,
    },
}

/// CLI handler
pub struct CliHandler {
    config: ServiceConfig,
}

impl CliHandler {
    /// Create new CLI handler
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Leaderboard { mode, position, search, page } => {
                self.show_leaderboard(&mode, position, search, page).await?;
            }
            Commands::Player { id } => {
                self.show_player(&id).await?;
            }
            Commands::Search { query } => {
                self.show_search(&query).await?;
            }
            Commands::Champions { year } => {
                self.show_champions(year).await?;
            }
            Commands::Award { name } => {
                self.show_award(&name).await?;
            }
            Commands::Teams => {
                self.show_teams().await?;
            }
            Commands::Team { id } => {
                self.show_team(id).await?;
            }
            Commands::Import { dataset, database_url } => {
                self.import(dataset, database_url).await?;
            }
        }
        Ok(())
    }

    async fn state(&self) -> Result<ServiceState> {
        ServiceState::new(self.config.clone()).await
    }

    async fn show_leaderboard(
        &self,
        mode: &str,
        position: String,
        search: Option<String>,
        page: u64,
    ) -> Result<()> {
        let mode: LeaderboardMode = mode.parse()?;
        let request = LeaderboardRequest { mode, position: Some(position), search, page };

        let state = self.state().await?;
        let page = state.engine.leaderboard(&request).await?;
        println!("{}", serde_json::to_string_pretty(&page)?);
        Ok(())
    }

    async fn show_player(&self, id: &str) -> Result<()> {
        let state = self.state().await?;
        match player_profile(&state.source, &state.registry, id).await {
            Ok(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            Err(QueryError::PlayerNotFound(id)) => {
                println!("No stats or awards found for player {}", id);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    async fn show_search(&self, query: &str) -> Result<()> {
        let state = self.state().await?;
        let players = search_players(&state.source, query).await?;
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "players": players }))?);
        Ok(())
    }

    async fn show_champions(&self, year: Year) -> Result<()> {
        let state = self.state().await?;
        let roster = championship_roster(&state.source, year).await?;
        println!("{}", serde_json::to_string_pretty(&roster)?);
        Ok(())
    }

    async fn show_award(&self, name: &str) -> Result<()> {
        let state = self.state().await?;
        match award_history(&state.source, name).await {
            Ok(history) => println!("{}", serde_json::to_string_pretty(&history)?),
            Err(QueryError::AwardNotFound(name)) => {
                println!("No awards found under the name {}", name);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    async fn show_teams(&self) -> Result<()> {
        let state = self.state().await?;
        let table = team_summaries(&state.source).await?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        Ok(())
    }

    async fn show_team(&self, id: u32) -> Result<()> {
        let state = self.state().await?;
        match team_top_scorers(&state.source, &state.registry, id).await {
            Ok(scorers) => println!("{}", serde_json::to_string_pretty(&scorers)?),
            Err(QueryError::InvalidTeam(id)) => println!("Invalid team ID: {}", id),
            Err(QueryError::TeamNotFound(id)) => println!("Team {} not found", id),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    /// Load the JSON dataset and replace the SQLite database contents
    async fn import(&self, dataset: Option<PathBuf>, database_url: Option<String>) -> Result<()> {
        let dataset_path = dataset.unwrap_or_else(|| self.config.service.dataset_file.clone());
        let url = database_url.unwrap_or_else(|| self.config.storage.database_url.clone());

        let contents = tokio::fs::read_to_string(&dataset_path)
            .await
            .with_context(|| format!("Failed to read dataset from {:?}", dataset_path))?;
        let dataset: LeagueDataset = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse dataset from {:?}", dataset_path))?;

        let store =
            SqliteSource::connect(&url).await.context("Failed to open SQLite database")?;
        store.import_dataset(&dataset).await?;

        println!(
            "Imported {} stat rows across {} seasons, {} awards and {} teams into {}",
            dataset.stats.len(),
            dataset.seasons().len(),
            dataset.awards.len(),
            dataset.teams.len(),
            url
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_args_parse_with_defaults() {
        let cli = Cli::try_parse_from(["league-history", "leaderboard", "all-time"]).unwrap();
        match cli.command {
            Commands::Leaderboard { mode, position, search, page } => {
                assert_eq!(mode, "all-time");
                assert_eq!(position, POSITION_ALL);
                assert_eq!(search, None);
                assert_eq!(page, 1);
            }
            _ => panic!("expected leaderboard command"),
        }
    }

    #[test]
    fn test_leaderboard_flags_parse() {
        let cli = Cli::try_parse_from([
            "league-history",
            "leaderboard",
            "single-season",
            "--position",
            "lw",
            "--search",
            "smith",
            "--page",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Leaderboard { mode, position, search, page } => {
                assert_eq!(mode, "single-season");
                assert_eq!(position, "lw");
                assert_eq!(search.as_deref(), Some("smith"));
                assert_eq!(page, 3);
            }
            _ => panic!("expected leaderboard command"),
        }
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["league-history", "--config", "league.toml", "teams"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("league.toml")));
        assert!(matches!(cli.command, Commands::Teams));
    }

    #[test]
    fn test_import_defaults_to_config_paths() {
        let cli = Cli::try_parse_from(["league-history", "import"]).unwrap();
        match cli.command {
            Commands::Import { dataset, database_url } => {
                assert_eq!(dataset, None);
                assert_eq!(database_url, None);
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["league-history"]).is_err());
    }
}
