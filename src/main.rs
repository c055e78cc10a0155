use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossarb::infrastructure::config::Config;
use crossarb::infrastructure::orchestration::orchestrator::Orchestrator;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "crossarb")]
#[command(version, about = "Cross-venue arbitrage engine", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Detect and log crossings without sending orders
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.dry_run |= cli.dry_run;

    config.init_logging();
    info!(config = %cli.config.display(), dry_run = config.dry_run, "crossarb starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine = Orchestrator::run_with_shutdown(config, shutdown_rx);
    tokio::pin!(engine);

    tokio::select! {
        result = &mut engine => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                return Err(e.into());
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            engine.await?;
        }
    }

    info!("crossarb stopped");
    Ok(())
}
