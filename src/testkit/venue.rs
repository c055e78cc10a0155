//! Scripted [`Venue`] implementation for testing.
//!
//! [`ScriptedVenue`] records every call it receives and answers from
//! pre-loaded state:
//!
//! - books per market (empty book when none is set)
//! - a balance (defaults to 1000)
//! - a queue of IOC results (defaults to `true` when exhausted)
//! - readiness, an optional set of listed markets, and a switch that turns
//!   every market-keyed call into an "unregistered market" error
//!
//! [`ScriptedVenue::hold_books`] parks `fetch_order_book` until released so a
//! test can observe a cycle mid-flight.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::domain::{
    Balance, Book, MarketId, Order, OrderId, OrderSide, Price, VenueId, Volume,
};
use crate::error::{Result, VenueError};
use crate::port::outbound::Venue;

/// A call received by a [`ScriptedVenue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    RegisterMarket(MarketId),
    FetchOrderBook(MarketId),
    FetchBalance,
    LimitOrder {
        market: MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    },
    IocOrder {
        market: MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    },
    FetchOpenOrders,
    CancelOrder(OrderId),
}

impl Call {
    /// True for calls that place an order.
    #[must_use]
    pub const fn is_order(&self) -> bool {
        matches!(self, Self::LimitOrder { .. } | Self::IocOrder { .. })
    }
}

/// Release handle returned by [`ScriptedVenue::hold_books`].
pub struct BookHold {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl BookHold {
    /// Wait until a `fetch_order_book` call is parked on the hold.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked call (or the next one) continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// A mock venue with scripted answers and a call log.
pub struct ScriptedVenue {
    id: VenueId,
    ready: AtomicBool,
    unregistered: AtomicBool,
    listed: Mutex<Option<HashSet<MarketId>>>,
    books: Mutex<HashMap<MarketId, Book>>,
    balance: Mutex<Balance>,
    ioc_results: Mutex<VecDeque<bool>>,
    open_orders: Mutex<Vec<Order>>,
    hold: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedVenue {
    pub fn new(id: &str) -> Self {
        Self {
            id: VenueId::new(id),
            ready: AtomicBool::new(true),
            unregistered: AtomicBool::new(false),
            listed: Mutex::new(None),
            books: Mutex::new(HashMap::new()),
            balance: Mutex::new(Decimal::ONE_THOUSAND),
            ioc_results: Mutex::new(VecDeque::new()),
            open_orders: Mutex::new(Vec::new()),
            hold: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_book(self, book: Book) -> Self {
        self.set_book(book);
        self
    }

    pub fn with_balance(self, balance: Balance) -> Self {
        self.set_balance(balance);
        self
    }

    /// Restrict `register_market` to the given markets.
    pub fn with_listed_markets(self, markets: &[&str]) -> Self {
        *self.listed.lock() = Some(markets.iter().map(|m| MarketId::new(*m)).collect());
        self
    }

    pub fn with_open_orders(self, orders: Vec<Order>) -> Self {
        *self.open_orders.lock() = orders;
        self
    }

    pub fn set_book(&self, book: Book) {
        self.books.lock().insert(book.market_id().clone(), book);
    }

    pub fn set_balance(&self, balance: Balance) {
        *self.balance.lock() = balance;
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Queue results for upcoming IOC orders.
    pub fn push_ioc_results(&self, results: impl IntoIterator<Item = bool>) {
        self.ioc_results.lock().extend(results);
    }

    /// Make every market-keyed call fail as if the market was never registered.
    pub fn fail_unregistered(&self) {
        self.unregistered.store(true, Ordering::SeqCst);
    }

    /// Park every `fetch_order_book` call until released through the handle.
    pub fn hold_books(&self) -> BookHold {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.hold.lock() = Some((entered.clone(), release.clone()));
        BookHold { entered, release }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Order placement calls only.
    pub fn orders(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_order).collect()
    }

    pub fn book_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::FetchOrderBook(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check_registered(&self, market: &MarketId) -> Result<()> {
        if self.unregistered.load(Ordering::SeqCst) {
            return Err(VenueError::UnregisteredMarket {
                venue: self.id.clone(),
                market: market.clone(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl Venue for ScriptedVenue {
    fn id(&self) -> &VenueId {
        &self.id
    }

    async fn init(&self) -> Result<()> {
        self.record(Call::Init);
        self.set_ready(true);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn register_market(&self, market: &MarketId) -> Result<()> {
        self.record(Call::RegisterMarket(market.clone()));
        let listed = self
            .listed
            .lock()
            .as_ref()
            .map_or(true, |listed| listed.contains(market));
        if !listed {
            return Err(VenueError::UnknownMarket {
                venue: self.id.clone(),
                market: market.clone(),
            }
            .into());
        }
        Ok(())
    }

    async fn fetch_order_book(&self, market: &MarketId) -> Result<Book> {
        self.record(Call::FetchOrderBook(market.clone()));
        let hold = self.hold.lock().clone();
        if let Some((entered, release)) = hold {
            entered.notify_one();
            release.notified().await;
        }
        self.check_registered(market)?;
        Ok(self
            .books
            .lock()
            .get(market)
            .cloned()
            .unwrap_or_else(|| Book::empty(market.clone())))
    }

    async fn fetch_balance(&self) -> Balance {
        self.record(Call::FetchBalance);
        *self.balance.lock()
    }

    async fn create_limit_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool> {
        self.record(Call::LimitOrder {
            market: market.clone(),
            price,
            size,
            side,
        });
        self.check_registered(market)?;
        Ok(true)
    }

    async fn create_ioc_order(
        &self,
        market: &MarketId,
        price: Price,
        size: Volume,
        side: OrderSide,
    ) -> Result<bool> {
        self.record(Call::IocOrder {
            market: market.clone(),
            price,
            size,
            side,
        });
        self.check_registered(market)?;
        Ok(self.ioc_results.lock().pop_front().unwrap_or(true))
    }

    async fn fetch_open_orders(&self) -> Result<Vec<Order>> {
        self.record(Call::FetchOpenOrders);
        Ok(self.open_orders.lock().clone())
    }

    async fn cancel_order(&self, order_id: &OrderId) -> Result<bool> {
        self.record(Call::CancelOrder(order_id.clone()));
        let mut orders = self.open_orders.lock();
        let before = orders.len();
        orders.retain(|order| &order.id != order_id);
        Ok(orders.len() < before)
    }
}
