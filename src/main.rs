//! Postroom terminal entry point.

use anyhow::{Context, Result};
use clap::Parser;
use postroom::backend::{AppEnv, JsonFileStore, MemoryStore, Storage, TerminalConsole};
use postroom::config::{load_config, StorageBackend, DEFAULT_CONFIG_FILE};
use postroom::effects::BackendInterpreter;
use postroom::{logging, Router, Session, SessionEnd};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "postroom",
    version,
    about = "Create authors, write posts and read them back from a terminal menu"
)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when it does not exist.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Keep records in this JSON file instead of the configured store.
    #[arg(short, long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli.config)?;
    if let Some(path) = cli.data {
        config = config.with_data_path(path);
        config.validate()?;
    }

    let store: Arc<dyn Storage> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Json => Arc::new(
            JsonFileStore::open(&config.storage.path)
                .await
                .with_context(|| format!("open store {}", config.storage.path.display()))?,
        ),
    };
    let env = AppEnv::new(store, Arc::new(TerminalConsole::stdio()));

    let router = Router::standard(config.catalog()).context("build router")?;
    let mut session: Session<AppEnv> = Session::new(
        Arc::new(router),
        Arc::new(BackendInterpreter),
        config.session.history_limit,
    );

    let SessionEnd::InputClosed { steps } = session.run(&env).await?;
    info!(steps, "goodbye");
    Ok(())
}
