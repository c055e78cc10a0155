//! Factory modules for building infrastructure components.
//!
//! # Submodules
//!
//! - [`venue`] - Venue construction from configuration

pub mod venue;
