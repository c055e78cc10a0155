//! Venue port for market data, balances and order execution.
//!
//! Every trading venue the engine talks to implements [`Venue`]. The engine
//! depends only on this trait and never on a concrete venue type.
//!
//! # Error contract
//!
//! Transport problems are absorbed inside the venue: a failed book fetch
//! yields an empty [`Book`], a failed balance fetch yields zero, and a failed
//! order yields `Ok(false)`. `Err` is reserved for conditions that indicate a
//! programming or configuration mistake, such as trading a market that was
//! never registered.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Balance, Book, MarketId, Order, OrderId, OrderSide, Price, VenueId, Volume};
use crate::error::Result;

/// Per-order cancellation outcome keyed by order id.
pub type CancelReport = HashMap<OrderId, bool>;

/// Uniform capability surface over a trading venue.
#[async_trait]
pub trait Venue: Send + Sync {
    /// Venue identifier used in configuration and logs.
    fn id(&self) -> &VenueId;

    /// Authenticate and subscribe. Must complete before [`Venue::is_ready`]
    /// reports true.
    async fn init(&self) -> Result<()>;

    /// Whether the venue finished initialization and may be queried.
    fn is_ready(&self) -> bool;

    /// Map a strategy-level market id onto the venue's internal handle.
    ///
    /// Safe to call concurrently from several strategies sharing the venue.
    ///
    /// # Errors
    ///
    /// Fails when the venue does not list the market.
    async fn register_market(&self, market: &MarketId) -> Result<()>;

    /// Best-effort order book snapshot.
    ///
    /// # Errors
    ///
    /// Only for unregistered markets; transport failures return an empty book.
    async fn fetch_order_book(&self, market: &MarketId) -> Result<Book>;

    /// Spendable balance in the settlement unit; zero when unavailable.
    async fn fetch_balance(&self) -> Balance;

    /// Place a resting limit order.
    async fn create_limit_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool>;

    /// Place an immediate-or-cancel order. Any unfilled remainder is
    /// cancelled by the venue.
    ///
    /// Returns `Ok(false)` on rejection, timeout, insufficient balance or a
    /// venue that is not ready.
    async fn create_ioc_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool>;

    /// Open orders on registered markets.
    async fn fetch_open_orders(&self) -> Result<Vec<Order>>;

    /// Cancel a single order. `Ok(false)` if the venue refused or the order
    /// is unknown.
    async fn cancel_order(&self, order_id: &OrderId) -> Result<bool>;

    /// Cancel several orders, one request per id.
    async fn cancel_orders(&self, order_ids: &[OrderId]) -> Result<CancelReport> {
        let mut report = CancelReport::with_capacity(order_ids.len());
        for order_id in order_ids {
            let cancelled = self.cancel_order(order_id).await?;
            report.insert(order_id.clone(), cancelled);
        }
        Ok(report)
    }

    /// Cancel every open order on one market.
    async fn cancel_orders_of_market(&self, market: &MarketId) -> Result<CancelReport> {
        let order_ids: Vec<OrderId> = self
            .fetch_open_orders()
            .await?
            .into_iter()
            .filter(|order| &order.market_id == market)
            .map(|order| order.id)
            .collect();
        self.cancel_orders(&order_ids).await
    }
}
