//! Periodic strategy scheduling with start/stop lifecycle.
//!
//! A [`StrategyRunner`] is `Idle` until [`StrategyRunner::start`] registers
//! its markets and spawns a timer. Each tick spawns one cycle as its own
//! task. The cycle's single-permit gate turns a tick that lands while the
//! previous cycle is still in flight into a no-op, so at most one cycle per
//! strategy runs at any time and missed ticks are never queued.
//!
//! [`StrategyRunner::stop`] stops the timer, and a tick task that has not
//! begun its cycle yet gives up. A cycle already in flight runs to
//! completion.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use super::config::StrategyConfig;
use super::cycle::{Cycle, CycleOutcome};
use crate::domain::StrategyId;
use crate::error::Result;
use crate::port::outbound::Venue;

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    /// Markets are being registered.
    Starting,
    Running,
}

enum Lifecycle {
    Idle,
    Starting,
    Running(watch::Sender<bool>),
}

/// Drives one strategy's cycles on a fixed period.
pub struct StrategyRunner {
    cycle: Arc<Cycle>,
    lifecycle: Mutex<Lifecycle>,
}

impl StrategyRunner {
    #[must_use]
    pub fn new(config: StrategyConfig, source: Arc<dyn Venue>, target: Arc<dyn Venue>) -> Self {
        Self {
            cycle: Arc::new(Cycle::new(config, source, target)),
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    #[must_use]
    pub fn id(&self) -> &StrategyId {
        &self.cycle.config().id
    }

    #[must_use]
    pub fn state(&self) -> RunnerState {
        match *self.lifecycle.lock() {
            Lifecycle::Idle => RunnerState::Idle,
            Lifecycle::Starting => RunnerState::Starting,
            Lifecycle::Running(_) => RunnerState::Running,
        }
    }

    /// Register markets and begin firing cycles every period.
    ///
    /// A disabled strategy stays `Idle`. Calling `start` while starting or
    /// running is a no-op. If `stop` is called while markets are still being
    /// registered, the timer is never spawned.
    ///
    /// # Errors
    ///
    /// Fails if either venue rejects its market registration; the runner
    /// stays `Idle`.
    pub async fn start(&self) -> Result<RunnerState> {
        let config = self.cycle.config();
        if !config.enabled {
            info!(strategy = %config.id, "Strategy is disabled");
            return Ok(RunnerState::Idle);
        }

        {
            let mut lifecycle = self.lifecycle.lock();
            if !matches!(*lifecycle, Lifecycle::Idle) {
                drop(lifecycle);
                return Ok(self.state());
            }
            *lifecycle = Lifecycle::Starting;
        }

        if let Err(e) = self.cycle.register_markets().await {
            error!(strategy = %config.id, error = %e, "Failed to initialize strategy");
            *self.lifecycle.lock() = Lifecycle::Idle;
            return Err(e);
        }

        let mut lifecycle = self.lifecycle.lock();
        if !matches!(*lifecycle, Lifecycle::Starting) {
            info!(strategy = %config.id, "Strategy stopped during startup");
            return Ok(RunnerState::Idle);
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(run_timer(Arc::clone(&self.cycle), config.period(), stop_rx));
        *lifecycle = Lifecycle::Running(stop_tx);

        info!(
            strategy = %config.id,
            period_ms = config.period_ms,
            source = %config.source.venue,
            target = %config.target.venue,
            model = %config.profit_model,
            "Strategy started"
        );
        Ok(RunnerState::Running)
    }

    /// Stop firing cycles. Idempotent; does not interrupt an in-flight cycle.
    pub fn stop(&self) {
        let previous = std::mem::replace(&mut *self.lifecycle.lock(), Lifecycle::Idle);
        if let Lifecycle::Running(stop_tx) = previous {
            let _ = stop_tx.send(true);
            info!(strategy = %self.id(), "Strategy stopped");
        }
    }

    /// Run one cycle now, outside the timer.
    ///
    /// Returns [`CycleOutcome::Busy`] without touching the venues if a cycle
    /// is already in flight.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.cycle.run().await
    }
}

impl Drop for StrategyRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer(cycle: Arc<Cycle>, period: Duration, mut stop: watch::Receiver<bool>) {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = ticks.tick() => {
                let cycle = Arc::clone(&cycle);
                let stop = stop.clone();
                tokio::spawn(async move {
                    // The task may be scheduled after `stop` returned.
                    if *stop.borrow() {
                        return;
                    }
                    cycle.run().await;
                });
            }
        }
    }
}
