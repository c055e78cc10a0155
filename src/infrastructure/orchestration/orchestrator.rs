//! Infrastructure orchestration façade.

use tokio::sync::watch;

use crate::error::Result;
use crate::infrastructure::config::Config;

pub use super::runtime::run_with_shutdown;

/// Main application orchestrator.
pub struct Orchestrator;

impl Orchestrator {
    /// Run until the process is dropped. No shutdown handle is kept.
    pub async fn run(config: Config) -> Result<()> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        run_with_shutdown(config, shutdown_rx).await
    }

    /// Run with externally controlled shutdown signal.
    pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
        run_with_shutdown(config, shutdown).await
    }
}
