//! Outbound adapters (driven side).

pub mod paper;
