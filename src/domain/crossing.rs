//! Crossing types produced by the matcher.
//!
//! A [`Crossing`] pairs a bid on one venue with an ask on the other where
//! buying at the ask and selling at the bid locks in a profit. Crossings are
//! derived values, recomputed on every cycle and never persisted.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::id::{MarketId, VenueId};
use super::money::{Price, Volume};

/// How the two legs of a strategy relate economically.
///
/// Chosen explicitly per strategy; never inferred from prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitModel {
    /// Both legs carry the same exposure priced in the same unit.
    ///
    /// Profit per unit is `bid - ask`.
    #[serde(alias = "MIRRORED")]
    Mirrored,
    /// The legs are complementary binary outcomes ("yes" vs "no") whose
    /// combined fair price is 1.
    ///
    /// Profit per unit is `1 - (bid + ask)`.
    #[serde(alias = "COMPLEMENTARY")]
    Complementary,
}

impl ProfitModel {
    /// Profit of crossing `size` units between `bid` and `ask`.
    #[must_use]
    pub fn profit(self, bid: Price, ask: Price, size: Volume) -> Decimal {
        match self {
            Self::Mirrored => (bid - ask) * size,
            Self::Complementary => (Decimal::ONE - (bid + ask)) * size,
        }
    }
}

impl fmt::Display for ProfitModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mirrored => write!(f, "mirrored"),
            Self::Complementary => write!(f, "complementary"),
        }
    }
}

/// Which side of a strategy buys and which sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Target asks lifted, source bids hit.
    BuyTargetSellSource,
    /// Source asks lifted, target bids hit.
    BuySourceSellTarget,
}

/// One leg of a crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingLeg {
    pub venue: VenueId,
    pub market: MarketId,
    pub price: Price,
}

/// A profitable (bid, ask) pairing across the two venues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossing {
    route: Route,
    buy: CrossingLeg,
    sell: CrossingLeg,
    size: Volume,
    expected_profit: Decimal,
}

impl Crossing {
    #[must_use]
    pub const fn new(
        route: Route,
        buy: CrossingLeg,
        sell: CrossingLeg,
        size: Volume,
        expected_profit: Decimal,
    ) -> Self {
        Self {
            route,
            buy,
            sell,
            size,
            expected_profit,
        }
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Leg executed first, lifting the ask.
    #[must_use]
    pub const fn buy(&self) -> &CrossingLeg {
        &self.buy
    }

    /// Leg executed second, hitting the bid.
    #[must_use]
    pub const fn sell(&self) -> &CrossingLeg {
        &self.sell
    }

    #[must_use]
    pub const fn buy_price(&self) -> Price {
        self.buy.price
    }

    #[must_use]
    pub const fn sell_price(&self) -> Price {
        self.sell.price
    }

    /// Quantity requested on both legs.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    #[must_use]
    pub const fn expected_profit(&self) -> Decimal {
        self.expected_profit
    }

    /// Settlement-unit capital consumed on the buying venue.
    #[must_use]
    pub fn buy_capital(&self) -> Decimal {
        self.buy.price * self.size
    }

    /// Settlement-unit capital consumed on the selling venue.
    #[must_use]
    pub fn sell_capital(&self) -> Decimal {
        self.sell.price * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mirrored_profit_is_spread_times_size() {
        assert_eq!(
            ProfitModel::Mirrored.profit(dec!(0.60), dec!(0.50), dec!(8)),
            dec!(0.80)
        );
    }

    #[test]
    fn complementary_profit_is_discount_to_one() {
        assert_eq!(
            ProfitModel::Complementary.profit(dec!(0.45), dec!(0.40), dec!(10)),
            dec!(1.50)
        );
        assert!(ProfitModel::Complementary.profit(dec!(0.70), dec!(0.40), dec!(10)) < Decimal::ZERO);
    }

    #[test]
    fn profit_model_accepts_both_spellings() {
        #[derive(Deserialize)]
        struct Holder {
            model: ProfitModel,
        }

        let lower: Holder = toml::from_str("model = \"complementary\"").unwrap();
        let upper: Holder = toml::from_str("model = \"MIRRORED\"").unwrap();
        assert_eq!(lower.model, ProfitModel::Complementary);
        assert_eq!(upper.model, ProfitModel::Mirrored);
    }
}
