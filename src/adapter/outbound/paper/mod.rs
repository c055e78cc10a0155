//! Paper trading venue.
//!
//! Keeps one price ladder per listed market in memory and fills orders
//! against it, debiting and crediting a single settlement balance.

mod ladder;
mod settings;
mod venue;

pub use settings::{PaperMarketConfig, PaperVenueConfig};
pub use venue::PaperVenue;
