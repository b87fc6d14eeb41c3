//! League History Service
//!
//! Entry point for the league history query service. Loads configuration,
//! initializes logging, and dispatches the requested command.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use league_history_service::cli::{Cli, CliHandler};
use league_history_service::{initialize_logging, load_configuration};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref())?;
    initialize_logging(&config.logging)?;

    info!("League History Service v{}", env!("CARGO_PKG_VERSION"));

    let handler = CliHandler::new(config);
    handler.handle_command(cli.command).await?;

    Ok(())
}
