//! Orchestrator runtime lifecycle.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::application::strategy::{RunnerState, StrategyRunner};
use crate::domain::VenueId;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;
use crate::infrastructure::factory::venue::{build_venues, VenueRegistry};
use crate::port::outbound::Venue;

/// Venues and strategy runners wired from one [`Config`].
pub struct Runtime {
    venues: VenueRegistry,
    runners: Vec<StrategyRunner>,
}

impl Runtime {
    /// Build and initialize every venue, then start every strategy.
    ///
    /// Venues are initialized concurrently. Strategies start one after the
    /// other so that no two registrations race on a shared venue. A strategy
    /// that fails to start is logged and left idle; the others keep going.
    ///
    /// # Errors
    ///
    /// Fails when venues cannot be built or a strategy references a venue
    /// that was not declared.
    pub async fn start(config: &Config) -> Result<Self> {
        let venues = build_venues(&config.venues)?;

        let inits = venues.values().map(|venue| async move {
            if let Err(e) = venue.init().await {
                error!(venue = %venue.id(), error = %e, "Venue initialization failed");
            }
        });
        join_all(inits).await;
        info!(venues = venues.len(), "Venues initialized");

        let mut runners = Vec::with_capacity(config.strategies.len());
        for strategy in &config.strategies {
            let mut strategy = strategy.clone();
            strategy.params.dry_run |= config.dry_run;
            let source = lookup(&venues, &strategy.id.to_string(), &strategy.source.venue)?;
            let target = lookup(&venues, &strategy.id.to_string(), &strategy.target.venue)?;
            runners.push(StrategyRunner::new(strategy, source, target));
        }

        for runner in &runners {
            if let Err(e) = runner.start().await {
                warn!(strategy = %runner.id(), error = %e, "Strategy not started");
            }
        }

        let running = runners
            .iter()
            .filter(|runner| runner.state() == RunnerState::Running)
            .count();
        info!(strategies = runners.len(), running, "Runtime started");

        Ok(Self { venues, runners })
    }

    #[must_use]
    pub fn runners(&self) -> &[StrategyRunner] {
        &self.runners
    }

    #[must_use]
    pub fn venue(&self, id: &VenueId) -> Option<&Arc<dyn Venue>> {
        self.venues.get(id)
    }

    /// Stop every runner. In-flight cycles finish on their own.
    pub fn stop(&self) {
        for runner in &self.runners {
            runner.stop();
        }
    }
}

fn lookup(venues: &VenueRegistry, strategy: &str, venue: &VenueId) -> Result<Arc<dyn Venue>> {
    venues.get(venue).cloned().ok_or_else(|| {
        ConfigError::UnknownVenue {
            strategy: strategy.to_string(),
            venue: venue.to_string(),
        }
        .into()
    })
}

/// Runtime loop entrypoint used by [`super::orchestrator::Orchestrator`].
pub async fn run_with_shutdown(config: Config, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    info!(
        venues = config.venues.len(),
        strategies = config.strategies.len(),
        dry_run = config.dry_run,
        "Starting crossarb"
    );

    let runtime = Runtime::start(&config).await?;

    loop {
        if *shutdown.borrow_and_update() {
            info!("Shutdown signal received");
            break;
        }
        if shutdown.changed().await.is_err() {
            info!("Shutdown channel closed");
            break;
        }
    }

    runtime.stop();
    Ok(())
}
