//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use clothe_core::backend::{BackendConfig, Endpoint};
use clothe_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "clothe")]
#[command(version)]
#[command(about = "Terminal client for the Clothe AI wardrobe assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// View to open first (primary, secondary, login)
    #[arg(long, value_name = "NAME")]
    view: Option<String>,

    /// Backend base URL (overrides CLOTHE_BACKEND_URL and config)
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sends one request to the backend and prints the result
    Ask {
        /// Endpoint to call (find-ideas, analyze, list-garments, add-garment)
        #[arg(value_name = "ENDPOINT")]
        endpoint: Endpoint,

        /// Clothing description or garment type
        #[arg(short, long)]
        text: String,

        /// User id sent with the request (default: config user_id, then "user")
        #[arg(long, value_name = "ID")]
        user_id: Option<String>,
    },

    /// Checks that the backend is reachable
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let _log_guard = match logging::init(&config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let Cli {
        command,
        view,
        backend_url,
    } = cli;

    let backend = |config: &config::Config| -> Result<BackendConfig> {
        match backend_url.as_deref() {
            Some(url) => BackendConfig::new(url, config.request_timeout()),
            None => config.backend_config(),
        }
    };

    // default to the TUI
    let Some(command) = command else {
        return commands::tui::run(&config, backend(&config)?, view.as_deref());
    };

    match command {
        Commands::Ask {
            endpoint,
            text,
            user_id,
        } => {
            let user_id = user_id
                .filter(|id| !id.trim().is_empty())
                .or_else(|| config.user_id().map(str::to_string))
                .unwrap_or_else(|| commands::ask::DEFAULT_USER_ID.to_string());
            commands::ask::run(backend(&config)?, endpoint, &user_id, &text).await
        }
        Commands::Health => commands::health::run(backend(&config)?).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
