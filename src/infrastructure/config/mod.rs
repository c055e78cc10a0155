//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod venue;

pub use logging::LoggingConfig;
pub use settings::Config;
pub use venue::{VenueConfig, VenueSettings};
