//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod venue;

pub use venue::{CancelReport, Venue};
