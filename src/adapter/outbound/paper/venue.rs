//! In-memory venue that fills orders against a simulated ladder.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::ladder::Ladder;
use super::settings::PaperVenueConfig;
use crate::domain::{
    Balance, Book, MarketId, Order, OrderId, OrderKind, OrderSide, OrderStatus, Price, VenueId,
    Volume,
};
use crate::error::{Result, VenueError};
use crate::port::outbound::Venue;

/// Simulated venue for dry runs and local testing.
///
/// IOC orders are fill-or-kill: an order that cannot be filled in full at
/// its limit is rejected without touching the ladder. Limit orders fill
/// what crosses and rest the remainder as an open order. Resting orders
/// are bookkeeping only and never match later flow.
pub struct PaperVenue {
    id: VenueId,
    ready: AtomicBool,
    listings: HashMap<MarketId, Book>,
    registry: RwLock<HashMap<MarketId, Arc<Mutex<Ladder>>>>,
    balance: Mutex<Balance>,
    orders: Mutex<Vec<Order>>,
}

impl PaperVenue {
    #[must_use]
    pub fn new(id: VenueId, config: &PaperVenueConfig) -> Self {
        let listings = config
            .markets
            .iter()
            .map(|market| {
                let book = Book::with_levels(
                    market.id.clone(),
                    market.bids.clone(),
                    market.asks.clone(),
                );
                (market.id.clone(), book)
            })
            .collect();

        Self {
            id,
            ready: AtomicBool::new(false),
            listings,
            registry: RwLock::new(HashMap::new()),
            balance: Mutex::new(config.balance),
            orders: Mutex::new(Vec::new()),
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(VenueError::NotReady {
                venue: self.id.clone(),
            }
            .into())
        }
    }

    fn ladder(&self, market: &MarketId) -> Result<Arc<Mutex<Ladder>>> {
        self.ensure_ready()?;
        self.registry.read().get(market).cloned().ok_or_else(|| {
            VenueError::UnregisteredMarket {
                venue: self.id.clone(),
                market: market.clone(),
            }
            .into()
        })
    }

    /// Orders sent before `init` are rejected rather than treated as errors.
    fn accepts_orders(&self, market: &MarketId) -> bool {
        if self.is_ready() {
            return true;
        }
        warn!(venue = %self.id, market = %market, "Venue not ready, order rejected");
        false
    }

    fn settle(&self, side: OrderSide, notional: Decimal) {
        let mut balance = self.balance.lock();
        match side {
            OrderSide::Buy => *balance -= notional,
            OrderSide::Sell => *balance += notional,
        }
    }

    fn record(&self, order: Order) -> OrderId {
        let id = order.id.clone();
        self.orders.lock().push(order);
        id
    }
}

fn new_order(
    market: &MarketId,
    side: OrderSide,
    price: Price,
    size: Volume,
    filled_size: Volume,
    kind: OrderKind,
) -> Order {
    let status = if filled_size >= size {
        OrderStatus::Filled
    } else if kind == OrderKind::ImmediateOrCancel {
        OrderStatus::Cancelled
    } else {
        OrderStatus::Open
    };
    Order {
        id: OrderId::new(uuid::Uuid::new_v4().to_string()),
        side,
        price,
        size,
        filled_size,
        market_id: market.clone(),
        status,
        expiry: None,
        kind,
    }
}

#[async_trait]
impl Venue for PaperVenue {
    fn id(&self) -> &VenueId {
        &self.id
    }

    async fn init(&self) -> Result<()> {
        self.ready.store(true, Ordering::SeqCst);
        info!(venue = %self.id, markets = self.listings.len(), "Paper venue ready");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn register_market(&self, market: &MarketId) -> Result<()> {
        self.ensure_ready()?;
        let Some(book) = self.listings.get(market) else {
            return Err(VenueError::UnknownMarket {
                venue: self.id.clone(),
                market: market.clone(),
            }
            .into());
        };

        self.registry
            .write()
            .entry(market.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Ladder::from_book(book))));
        debug!(venue = %self.id, market = %market, "Market registered");
        Ok(())
    }

    async fn fetch_order_book(&self, market: &MarketId) -> Result<Book> {
        let ladder = self.ladder(market)?;
        let book = ladder.lock().snapshot(market);
        Ok(book)
    }

    async fn fetch_balance(&self) -> Balance {
        if !self.is_ready() {
            return Decimal::ZERO;
        }
        *self.balance.lock()
    }

    async fn create_limit_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool> {
        if !self.accepts_orders(market) {
            return Ok(false);
        }
        let ladder = self.ladder(market)?;
        if price <= Decimal::ZERO || size <= Decimal::ZERO {
            warn!(venue = %self.id, %price, %size, "Rejected limit order with non-positive terms");
            return Ok(false);
        }
        if side == OrderSide::Buy && *self.balance.lock() < price * size {
            warn!(venue = %self.id, market = %market, %price, %size, "Insufficient balance for limit order");
            return Ok(false);
        }

        let sweep = ladder.lock().take(side, price, size);
        self.settle(side, sweep.notional);
        let order_id = self.record(new_order(
            market,
            side,
            price,
            size,
            sweep.filled,
            OrderKind::Limit,
        ));
        info!(
            venue = %self.id,
            market = %market,
            order = %order_id,
            %side,
            %price,
            %size,
            filled = %sweep.filled,
            "Limit order placed"
        );
        Ok(true)
    }

    async fn create_ioc_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool> {
        if !self.accepts_orders(market) {
            return Ok(false);
        }
        let ladder = self.ladder(market)?;
        if price <= Decimal::ZERO || size <= Decimal::ZERO {
            warn!(venue = %self.id, %price, %size, "Rejected IOC order with non-positive terms");
            return Ok(false);
        }

        let mut ladder = ladder.lock();
        let preview = ladder.preview(side, price, size);
        if preview.filled < size {
            warn!(
                venue = %self.id,
                market = %market,
                %side,
                %price,
                %size,
                available = %preview.filled,
                "IOC order killed, insufficient liquidity"
            );
            return Ok(false);
        }
        if side == OrderSide::Buy && *self.balance.lock() < preview.notional {
            warn!(
                venue = %self.id,
                market = %market,
                notional = %preview.notional,
                "IOC order killed, insufficient balance"
            );
            return Ok(false);
        }

        let sweep = ladder.take(side, price, size);
        drop(ladder);
        self.settle(side, sweep.notional);
        let order_id = self.record(new_order(
            market,
            side,
            price,
            size,
            sweep.filled,
            OrderKind::ImmediateOrCancel,
        ));
        info!(
            venue = %self.id,
            market = %market,
            order = %order_id,
            %side,
            %price,
            %size,
            notional = %sweep.notional,
            "IOC order filled"
        );
        Ok(true)
    }

    async fn fetch_open_orders(&self) -> Result<Vec<Order>> {
        self.ensure_ready()?;
        Ok(self
            .orders
            .lock()
            .iter()
            .filter(|order| order.is_open())
            .cloned()
            .collect())
    }

    async fn cancel_order(&self, order_id: &OrderId) -> Result<bool> {
        self.ensure_ready()?;
        let mut orders = self.orders.lock();
        let Some(order) = orders
            .iter_mut()
            .find(|order| &order.id == order_id && order.is_open())
        else {
            return Ok(false);
        };
        order.status = OrderStatus::Cancelled;
        debug!(venue = %self.id, order = %order_id, "Order cancelled");
        Ok(true)
    }
}
