//! A single fetch → match → execute pass for one strategy.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::config::StrategyConfig;
use crate::application::execution::{ExecutionSummary, Executor};
use crate::application::matcher::{match_books, MatchReport, Quote};
use crate::domain::Balance;
use crate::error::Result;
use crate::port::outbound::Venue;

/// What a completed cycle found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub matched: MatchReport,
    /// `None` when nothing was executed (no crossings or dry run).
    pub execution: Option<ExecutionSummary>,
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Another cycle of the same strategy was still in flight.
    Busy,
    /// At least one venue was not ready; nothing was fetched.
    NotReady,
    /// A balance was under the floor; no orders were sent.
    BelowFloor { source: Balance, target: Balance },
    Completed(CycleReport),
    /// An error reached the cycle boundary.
    Failed(String),
}

/// Cycle body shared between the runner's timer and direct callers.
pub struct Cycle {
    config: StrategyConfig,
    source: Arc<dyn Venue>,
    target: Arc<dyn Venue>,
    executor: Executor,
    gate: Semaphore,
}

impl Cycle {
    pub fn new(config: StrategyConfig, source: Arc<dyn Venue>, target: Arc<dyn Venue>) -> Self {
        let executor = Executor::new(Arc::clone(&source), Arc::clone(&target));
        Self {
            config,
            source,
            target,
            executor,
            gate: Semaphore::new(1),
        }
    }

    pub const fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Register the source and target markets on their venues.
    pub(crate) async fn register_markets(&self) -> Result<()> {
        self.source.register_market(&self.config.source.market).await?;
        self.target.register_market(&self.config.target.market).await?;
        Ok(())
    }

    /// Run one cycle unless one is already in flight.
    ///
    /// Never returns an error: failures are logged and reported as
    /// [`CycleOutcome::Failed`].
    pub async fn run(&self) -> CycleOutcome {
        let Ok(_permit) = self.gate.try_acquire() else {
            debug!(strategy = %self.config.id, "Previous cycle still running, skipping tick");
            return CycleOutcome::Busy;
        };

        async {
            match self.run_inner().await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "Cycle failed");
                    CycleOutcome::Failed(e.to_string())
                }
            }
        }
        .instrument(info_span!("cycle", strategy = %self.config.id))
        .await
    }

    async fn run_inner(&self) -> Result<CycleOutcome> {
        let config = &self.config;
        let source_ready = self.source.is_ready();
        let target_ready = self.target.is_ready();
        if !source_ready || !target_ready {
            warn!(source_ready, target_ready, "Venues not ready, skipping cycle");
            return Ok(CycleOutcome::NotReady);
        }

        let source_book = self.source.fetch_order_book(&config.source.market).await?;
        let target_book = self.target.fetch_order_book(&config.target.market).await?;
        let source_balance = self.source.fetch_balance().await;
        let target_balance = self.target.fetch_balance().await;

        debug!(
            source = %config.source.venue,
            source_balance = %source_balance,
            target = %config.target.venue,
            target_balance = %target_balance,
            "Balances fetched"
        );

        let floor = config.params.min_balance_floor;
        if source_balance < floor || target_balance < floor {
            warn!(
                source_balance = %source_balance,
                target_balance = %target_balance,
                floor = %floor,
                "Balance below floor, skipping execution"
            );
            return Ok(CycleOutcome::BelowFloor {
                source: source_balance,
                target: target_balance,
            });
        }

        let matched = match_books(
            Quote {
                venue: &config.source.venue,
                book: &source_book,
                balance: source_balance,
            },
            Quote {
                venue: &config.target.venue,
                book: &target_book,
                balance: target_balance,
            },
            config.profit_model,
            &config.match_params(),
        );

        if matched.is_empty() {
            info!("No arbitrage opportunities found");
            return Ok(CycleOutcome::Completed(CycleReport {
                matched,
                execution: None,
            }));
        }

        for crossing in matched.crossings() {
            info!(
                buy_venue = %crossing.buy().venue,
                buy_price = %crossing.buy_price(),
                sell_venue = %crossing.sell().venue,
                sell_price = %crossing.sell_price(),
                size = %crossing.size(),
                profit = %crossing.expected_profit(),
                "Opportunity"
            );
        }
        info!(
            crossings = matched.crossings().len(),
            total_profit = %matched.total_profit(),
            source_capital = %matched.source_capital(),
            target_capital = %matched.target_capital(),
            total_capital = %matched.total_capital(),
            roi_percent = ?matched.roi_percent(),
            "Arbitrage opportunities found"
        );

        if config.params.dry_run {
            info!("Dry run, not executing");
            return Ok(CycleOutcome::Completed(CycleReport {
                matched,
                execution: None,
            }));
        }

        let execution = self.executor.execute_all(matched.crossings()).await?;
        info!(
            hedged = execution.hedged(),
            rejected = execution.rejected(),
            unhedged = execution.unhedged(),
            skipped = execution.skipped(),
            hedged_profit = %execution.hedged_profit(),
            "Execution finished"
        );

        Ok(CycleOutcome::Completed(CycleReport {
            matched,
            execution: Some(execution),
        }))
    }
}
