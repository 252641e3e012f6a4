use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use skycast_core::{AppError, Config, Units};
use skycast_services::{KeyValueStore, MemoryStore, SessionStore, SqliteStore};
use skycast_ui::{SearchController, TerminalView};
use skycast_weather::OpenWeatherProvider;

mod repl;

#[derive(Parser)]
#[command(name = "skycast")]
#[command(version)]
#[command(about = "Current weather and five-day forecasts in the terminal")]
struct Cli {
    /// Config file (default: <config dir>/skycast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep recent searches in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Override the configured units (metric, imperial, standard)
    #[arg(long, global = true)]
    units: Option<Units>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive search (default)
    Repl,

    /// Look up one city
    Search {
        /// City name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show recent searches
    History,

    /// Forget recent searches
    ClearHistory {
        /// Don't ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = skycast_core::init("warn") {
        eprintln!("{:#}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            let err = AppError::from_anyhow(e);
            eprintln!("Error: {}", err.user_message());
            eprintln!("  {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load_validated(cli.config.as_deref())?;
    if let Some(units) = cli.units {
        config.weather.units = units;
    }

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let path = config.storage.state_db_path();
        Arc::new(
            SqliteStore::open(&path)
                .with_context(|| format!("Failed to open state store {}", path.display()))?,
        )
    };

    let command = cli.command.unwrap_or(Command::Repl);
    let assume_yes = matches!(command, Command::ClearHistory { yes: true });

    let provider = Arc::new(
        OpenWeatherProvider::new(&config.weather).context("Failed to create weather client")?,
    );
    let view = Arc::new(TerminalView::new(provider.units()).with_assume_yes(assume_yes));
    let controller = SearchController::new(provider, SessionStore::new(store), view);

    tracing::info!("SkyCast started");

    match command {
        Command::Repl => repl::run(&controller).await?,
        Command::Search { city } => {
            let input = city.join(" ");
            match controller.submit_search(&input).await {
                Ok(outcome) if outcome.is_success() => {}
                _ => return Ok(ExitCode::FAILURE),
            }
        }
        Command::History => {
            if controller.recent_searches().is_empty() {
                println!("No recent searches.");
            } else {
                controller.refresh_recent_searches();
            }
        }
        Command::ClearHistory { .. } => {
            if controller.clear_history() {
                println!("Recent searches cleared.");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
