//! Cross-venue order book matching.
//!
//! [`match_books`] walks the bids of one venue against the asks of the other
//! with two cursors, best price first, and emits a [`Crossing`] for every
//! profitable step. The walk runs once per direction: source bids against
//! target asks, then target bids against source asks.
//!
//! Sizing respects three limits at once: the remaining size at the current
//! bid level, the remaining size at the current ask level, and the capital
//! left on each venue. Capital spent by one crossing is no longer available
//! to the next, including across the two directional walks.

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{
    Balance, Book, Crossing, CrossingLeg, Price, PriceLevel, ProfitModel, Route, VenueId, Volume,
};

/// Tunables for a matcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchParams {
    /// Crossings smaller than this end the walk.
    pub min_tradable_size: Volume,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            min_tradable_size: Decimal::ONE,
        }
    }
}

/// One side of the strategy as seen by the matcher.
#[derive(Debug, Clone, Copy)]
pub struct Quote<'a> {
    pub venue: &'a VenueId,
    pub book: &'a Book,
    pub balance: Balance,
}

/// Crossings found in one matcher run plus aggregate figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    crossings: Vec<Crossing>,
    total_profit: Decimal,
    source_capital: Decimal,
    target_capital: Decimal,
}

impl MatchReport {
    fn push(&mut self, crossing: Crossing) {
        self.total_profit += crossing.expected_profit();
        match crossing.route() {
            Route::BuyTargetSellSource => {
                self.target_capital += crossing.buy_capital();
                self.source_capital += crossing.sell_capital();
            }
            Route::BuySourceSellTarget => {
                self.source_capital += crossing.buy_capital();
                self.target_capital += crossing.sell_capital();
            }
        }
        self.crossings.push(crossing);
    }

    /// Crossings in discovery order (best price first, source-bid walk first).
    #[must_use]
    pub fn crossings(&self) -> &[Crossing] {
        &self.crossings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }

    /// Sum of expected profit over all crossings.
    #[must_use]
    pub const fn total_profit(&self) -> Decimal {
        self.total_profit
    }

    /// Capital committed on the source venue across all crossings.
    #[must_use]
    pub const fn source_capital(&self) -> Decimal {
        self.source_capital
    }

    /// Capital committed on the target venue across all crossings.
    #[must_use]
    pub const fn target_capital(&self) -> Decimal {
        self.target_capital
    }

    #[must_use]
    pub fn total_capital(&self) -> Decimal {
        self.source_capital + self.target_capital
    }

    /// Return on committed capital in percent, if any capital is committed.
    #[must_use]
    pub fn roi_percent(&self) -> Option<Decimal> {
        let capital = self.total_capital();
        if capital.is_zero() {
            return None;
        }
        Some(self.total_profit / capital * Decimal::ONE_HUNDRED)
    }
}

struct Walk<'a> {
    route: Route,
    bids: &'a [PriceLevel],
    asks: &'a [PriceLevel],
    buy: Quote<'a>,
    sell: Quote<'a>,
}

/// Compute the profitable crossings between two books.
///
/// Pure and deterministic: the same inputs always yield the same report.
/// Books that violate the ordering invariant are ignored with a warning.
#[must_use]
pub fn match_books(
    source: Quote<'_>,
    target: Quote<'_>,
    model: ProfitModel,
    params: &MatchParams,
) -> MatchReport {
    let source_levels = usable_levels(&source);
    let target_levels = usable_levels(&target);

    let mut report = MatchReport::default();
    let mut source_balance = source.balance;
    let mut target_balance = target.balance;

    walk(
        Walk {
            route: Route::BuyTargetSellSource,
            bids: source_levels.0,
            asks: target_levels.1,
            buy: target,
            sell: source,
        },
        &mut target_balance,
        &mut source_balance,
        model,
        params,
        &mut report,
    );
    walk(
        Walk {
            route: Route::BuySourceSellTarget,
            bids: target_levels.0,
            asks: source_levels.1,
            buy: source,
            sell: target,
        },
        &mut source_balance,
        &mut target_balance,
        model,
        params,
        &mut report,
    );

    report
}

fn usable_levels<'a>(quote: &Quote<'a>) -> (&'a [PriceLevel], &'a [PriceLevel]) {
    let book = quote.book;
    match book.validate() {
        Ok(()) => (book.bids(), book.asks()),
        Err(e) => {
            warn!(
                venue = %quote.venue,
                market = %book.market_id(),
                error = %e,
                "Ignoring malformed order book"
            );
            let empty: &'a [PriceLevel] = &[];
            (empty, empty)
        }
    }
}

fn walk(
    walk: Walk<'_>,
    buy_balance: &mut Balance,
    sell_balance: &mut Balance,
    model: ProfitModel,
    params: &MatchParams,
    report: &mut MatchReport,
) {
    let (Some(first_bid), Some(first_ask)) = (walk.bids.first(), walk.asks.first()) else {
        return;
    };

    let mut bid_idx = 0;
    let mut ask_idx = 0;
    let mut bid_left = first_bid.size();
    let mut ask_left = first_ask.size();

    while let (Some(bid), Some(ask)) = (walk.bids.get(bid_idx), walk.asks.get(ask_idx)) {
        if bid.price() <= ask.price() {
            break;
        }

        let by_capital =
            capital_limit(*buy_balance, ask.price()).min(capital_limit(*sell_balance, bid.price()));
        let size = bid_left.min(ask_left).min(by_capital);
        if size <= Decimal::ZERO || size < params.min_tradable_size {
            break;
        }

        let profit = model.profit(bid.price(), ask.price(), size);
        if profit > Decimal::ZERO {
            *buy_balance -= ask.price() * size;
            *sell_balance -= bid.price() * size;
            report.push(Crossing::new(
                walk.route,
                CrossingLeg {
                    venue: walk.buy.venue.clone(),
                    market: walk.buy.book.market_id().clone(),
                    price: ask.price(),
                },
                CrossingLeg {
                    venue: walk.sell.venue.clone(),
                    market: walk.sell.book.market_id().clone(),
                    price: bid.price(),
                },
                size,
                profit,
            ));
        }

        bid_left -= size;
        ask_left -= size;
        if bid_left <= Decimal::ZERO {
            bid_idx += 1;
            bid_left = walk.bids.get(bid_idx).map_or(Decimal::ZERO, PriceLevel::size);
        }
        if ask_left <= Decimal::ZERO {
            ask_idx += 1;
            ask_left = walk.asks.get(ask_idx).map_or(Decimal::ZERO, PriceLevel::size);
        }
    }
}

/// Units of `price` that `balance` pays for. A quotient too large for
/// `Decimal` places no limit on size.
fn capital_limit(balance: Balance, price: Price) -> Volume {
    balance.checked_div(price).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use rust_decimal_macros::dec;

    fn book(market: &str, bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> Book {
        Book::with_levels(
            MarketId::new(market),
            bids.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect(),
            asks.iter().map(|&(p, s)| PriceLevel::new(p, s)).collect(),
        )
    }

    fn run(source: &Book, target: &Book, source_balance: Decimal, target_balance: Decimal) -> MatchReport {
        let source_venue = VenueId::new("polymarket");
        let target_venue = VenueId::new("drift");
        match_books(
            Quote { venue: &source_venue, book: source, balance: source_balance },
            Quote { venue: &target_venue, book: target, balance: target_balance },
            ProfitModel::Mirrored,
            &MatchParams::default(),
        )
    }

    #[test]
    fn walks_levels_best_price_first() {
        let source = book("src", &[(dec!(0.60), dec!(10)), (dec!(0.55), dec!(5))], &[]);
        let target = book("tgt", &[], &[(dec!(0.50), dec!(8)), (dec!(0.58), dec!(3))]);

        let report = run(&source, &target, dec!(1000000), dec!(1000000));

        let crossings = report.crossings();
        assert_eq!(crossings.len(), 2);

        assert_eq!(crossings[0].size(), dec!(8));
        assert_eq!(crossings[0].buy_price(), dec!(0.50));
        assert_eq!(crossings[0].sell_price(), dec!(0.60));
        assert_eq!(crossings[0].expected_profit(), dec!(0.80));

        assert_eq!(crossings[1].size(), dec!(2));
        assert_eq!(crossings[1].buy_price(), dec!(0.58));
        assert_eq!(crossings[1].expected_profit(), dec!(0.04));

        assert_eq!(report.total_profit(), dec!(0.84));
    }

    #[test]
    fn source_bid_walk_buys_on_target() {
        let source = book("src", &[(dec!(0.60), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.50), dec!(10))]);

        let report = run(&source, &target, dec!(100), dec!(100));
        let crossing = &report.crossings()[0];

        assert_eq!(crossing.route(), Route::BuyTargetSellSource);
        assert_eq!(crossing.buy().venue, VenueId::new("drift"));
        assert_eq!(crossing.buy().market, MarketId::new("tgt"));
        assert_eq!(crossing.sell().venue, VenueId::new("polymarket"));
        assert_eq!(crossing.sell().market, MarketId::new("src"));
    }

    #[test]
    fn target_bid_walk_buys_on_source() {
        let source = book("src", &[], &[(dec!(0.40), dec!(5))]);
        let target = book("tgt", &[(dec!(0.45), dec!(5))], &[]);

        let report = run(&source, &target, dec!(100), dec!(100));

        assert_eq!(report.crossings().len(), 1);
        assert_eq!(report.crossings()[0].route(), Route::BuySourceSellTarget);
        assert_eq!(report.crossings()[0].buy().venue, VenueId::new("polymarket"));
        assert_eq!(report.total_profit(), dec!(0.25));
    }

    #[test]
    fn equal_prices_end_the_walk() {
        let source = book("src", &[(dec!(0.50), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.50), dec!(10))]);

        assert!(run(&source, &target, dec!(100), dec!(100)).is_empty());
    }

    #[test]
    fn empty_side_yields_nothing() {
        let source = Book::empty(MarketId::new("src"));
        let target = book("tgt", &[(dec!(0.9), dec!(10))], &[(dec!(0.1), dec!(10))]);

        let report = run(&source, &target, dec!(100), dec!(100));
        assert!(report.is_empty());
        assert_eq!(report.total_profit(), Decimal::ZERO);
        assert_eq!(report.roi_percent(), None);
    }

    #[test]
    fn capital_limits_size_on_both_venues() {
        let source = book("src", &[(dec!(0.80), dec!(100))], &[]);
        let target = book("tgt", &[], &[(dec!(0.40), dec!(100))]);

        // Buying 0.40 on target with 4 => 10 units; selling 0.80 on source with 20 => 25 units.
        let report = run(&source, &target, dec!(20), dec!(4));

        assert_eq!(report.crossings().len(), 1);
        assert_eq!(report.crossings()[0].size(), dec!(10));
        assert_eq!(report.target_capital(), dec!(4.00));
        assert_eq!(report.source_capital(), dec!(8.00));
    }

    #[test]
    fn spent_capital_carries_into_reverse_walk() {
        let source = book("src", &[(dec!(0.60), dec!(10))], &[(dec!(0.30), dec!(10))]);
        let target = book("tgt", &[(dec!(0.50), dec!(10))], &[(dec!(0.40), dec!(10))]);

        // First walk: buy 10 on target at 0.40 (4.00), sell on source at 0.60 (6.00).
        // Target keeps 1.00, so the reverse walk can sell at most 2 units at 0.50.
        let report = run(&source, &target, dec!(100), dec!(5));

        assert_eq!(report.crossings().len(), 2);
        assert_eq!(report.crossings()[0].size(), dec!(10));
        assert_eq!(report.crossings()[1].route(), Route::BuySourceSellTarget);
        assert_eq!(report.crossings()[1].size(), dec!(2));
    }

    #[test]
    fn sub_minimum_size_stops_the_walk() {
        let source = book("src", &[(dec!(0.60), dec!(0.5)), (dec!(0.59), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.50), dec!(10))]);

        assert!(run(&source, &target, dec!(100), dec!(100)).is_empty());
    }

    #[test]
    fn malformed_book_is_ignored() {
        let source = book("src", &[(dec!(0.55), dec!(10)), (dec!(0.60), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.50), dec!(10))]);

        assert!(run(&source, &target, dec!(100), dec!(100)).is_empty());
    }

    #[test]
    fn complementary_model_prices_against_one() {
        let venue_a = VenueId::new("a");
        let venue_b = VenueId::new("b");
        let source = book("yes", &[(dec!(0.45), dec!(10)), (dec!(0.44), dec!(10))], &[]);
        let target = book("no", &[], &[(dec!(0.40), dec!(10)), (dec!(0.43), dec!(10))]);

        let report = match_books(
            Quote { venue: &venue_a, book: &source, balance: dec!(100) },
            Quote { venue: &venue_b, book: &target, balance: dec!(100) },
            ProfitModel::Complementary,
            &MatchParams::default(),
        );

        // (1 - 0.85) * 10, then 0.44 vs 0.43: (1 - 0.87) * 10
        assert_eq!(report.crossings().len(), 2);
        assert_eq!(report.total_profit(), dec!(2.80));
    }

    #[test]
    fn complementary_model_rejects_combined_cost_above_one() {
        let source = book("yes", &[(dec!(0.70), dec!(10))], &[]);
        let target = book("no", &[], &[(dec!(0.40), dec!(10))]);
        let venue = VenueId::new("v");

        let report = match_books(
            Quote { venue: &venue, book: &source, balance: dec!(100) },
            Quote { venue: &venue, book: &target, balance: dec!(100) },
            ProfitModel::Complementary,
            &MatchParams::default(),
        );

        assert!(report.is_empty());
    }

    #[test]
    fn matching_is_idempotent() {
        let source = book("src", &[(dec!(0.60), dec!(10)), (dec!(0.55), dec!(5))], &[(dec!(0.35), dec!(4))]);
        let target = book("tgt", &[(dec!(0.45), dec!(6))], &[(dec!(0.50), dec!(8)), (dec!(0.58), dec!(3))]);

        let first = run(&source, &target, dec!(7), dec!(9));
        let second = run(&source, &target, dec!(7), dec!(9));

        assert_eq!(first, second);
    }

    #[test]
    fn roi_is_profit_over_committed_capital() {
        let source = book("src", &[(dec!(0.60), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.40), dec!(10))]);

        let report = run(&source, &target, dec!(100), dec!(100));

        // profit 2.00 on 4.00 + 6.00
        assert_eq!(report.total_capital(), dec!(10.00));
        assert_eq!(report.roi_percent(), Some(dec!(20)));
    }

    #[test]
    fn huge_balances_do_not_overflow_sizing() {
        let source = book("src", &[(dec!(0.60), dec!(10))], &[]);
        let target = book("tgt", &[], &[(dec!(0.01), dec!(4))]);

        let report = run(&source, &target, Decimal::MAX, Decimal::MAX);

        assert_eq!(report.crossings().len(), 1);
        assert_eq!(report.crossings()[0].size(), dec!(4));
    }
}
