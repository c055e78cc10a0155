//! Two-leg crossing execution.
//!
//! A crossing is realized as two independent immediate-or-cancel orders:
//! the buy on the venue offering the ask, then, only if the buy filled, the
//! sell on the venue offering the bid. Both legs request the same size.
//! There is no atomicity across venues; a failed sell after a filled buy
//! leaves an unhedged position that is reported and left alone.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::domain::{Crossing, OrderSide, Route, TradeResult};
use crate::error::Result;
use crate::port::outbound::Venue;

/// Aggregate outcome of executing a cycle's crossings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    results: Vec<TradeResult>,
    hedged_profit: Decimal,
    skipped: usize,
}

impl ExecutionSummary {
    /// Per-crossing results, in execution order.
    #[must_use]
    pub fn results(&self) -> &[TradeResult] {
        &self.results
    }

    #[must_use]
    pub fn hedged(&self) -> usize {
        self.count(TradeResult::Hedged)
    }

    #[must_use]
    pub fn rejected(&self) -> usize {
        self.count(TradeResult::BuyRejected)
    }

    #[must_use]
    pub fn unhedged(&self) -> usize {
        self.count(TradeResult::Unhedged)
    }

    /// Crossings never attempted because an earlier one left a leg unhedged.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Expected profit of the crossings whose both legs filled.
    #[must_use]
    pub const fn hedged_profit(&self) -> Decimal {
        self.hedged_profit
    }

    fn count(&self, wanted: TradeResult) -> usize {
        self.results.iter().filter(|r| **r == wanted).count()
    }
}

/// Places crossing legs on the strategy's source and target venues.
pub struct Executor {
    source: Arc<dyn Venue>,
    target: Arc<dyn Venue>,
}

impl Executor {
    #[must_use]
    pub fn new(source: Arc<dyn Venue>, target: Arc<dyn Venue>) -> Self {
        Self { source, target }
    }

    fn legs(&self, route: Route) -> (&dyn Venue, &dyn Venue) {
        match route {
            Route::BuyTargetSellSource => (self.target.as_ref(), self.source.as_ref()),
            Route::BuySourceSellTarget => (self.source.as_ref(), self.target.as_ref()),
        }
    }

    /// Execute one crossing: buy first, sell only after a successful buy.
    ///
    /// # Errors
    ///
    /// Propagates venue errors (e.g. an unregistered market). If the sell
    /// leg errors after the buy filled, the unhedged position is logged
    /// before the error is returned.
    pub async fn execute(&self, crossing: &Crossing) -> Result<TradeResult> {
        let (buy_venue, sell_venue) = self.legs(crossing.route());
        let buy = crossing.buy();
        let sell = crossing.sell();
        let size = crossing.size();

        let bought = buy_venue
            .create_ioc_order(&buy.market, buy.price, size, OrderSide::Buy)
            .await?;
        if !bought {
            warn!(
                venue = %buy.venue,
                market = %buy.market,
                price = %buy.price,
                size = %size,
                "Buy leg rejected, crossing abandoned"
            );
            return Ok(TradeResult::BuyRejected);
        }

        let sold = match sell_venue
            .create_ioc_order(&sell.market, sell.price, size, OrderSide::Sell)
            .await
        {
            Ok(sold) => sold,
            Err(e) => {
                report_unhedged(crossing, Some(&e.to_string()));
                return Err(e);
            }
        };
        if !sold {
            report_unhedged(crossing, None);
            return Ok(TradeResult::Unhedged);
        }

        info!(
            buy_venue = %buy.venue,
            buy_price = %buy.price,
            sell_venue = %sell.venue,
            sell_price = %sell.price,
            size = %size,
            profit = %crossing.expected_profit(),
            "Crossing executed"
        );
        Ok(TradeResult::Hedged)
    }

    /// Execute crossings one after another.
    ///
    /// Stops attempting further crossings once a leg is left unhedged, since
    /// the balances used for sizing no longer match the venues.
    ///
    /// # Errors
    ///
    /// Returns the first venue error; crossings after it are not attempted.
    pub async fn execute_all(&self, crossings: &[Crossing]) -> Result<ExecutionSummary> {
        let mut summary = ExecutionSummary::default();

        for (idx, crossing) in crossings.iter().enumerate() {
            let result = self.execute(crossing).await?;
            summary.results.push(result);
            if result.is_hedged() {
                summary.hedged_profit += crossing.expected_profit();
            }
            if result.is_unhedged() {
                summary.skipped = crossings.len() - idx - 1;
                if summary.skipped > 0 {
                    warn!(
                        skipped = summary.skipped,
                        "Halting remaining crossings after unhedged leg"
                    );
                }
                break;
            }
        }

        Ok(summary)
    }
}

fn report_unhedged(crossing: &Crossing, cause: Option<&str>) {
    let buy = crossing.buy();
    let sell = crossing.sell();
    error!(
        filled_venue = %buy.venue,
        filled_market = %buy.market,
        filled_price = %buy.price,
        missing_venue = %sell.venue,
        missing_market = %sell.market,
        missing_price = %sell.price,
        size = %crossing.size(),
        cause = cause.unwrap_or("sell order not filled"),
        "UNHEDGED POSITION: buy leg filled but sell leg failed; no automatic unwind"
    );
}
