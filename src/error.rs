use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::{MarketId, VenueId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("strategy '{strategy}' references undeclared venue '{venue}'")]
    UnknownVenue { strategy: String, venue: String },
}

/// Errors raised by venue implementations for conditions the engine cannot
/// degrade around.
///
/// Ordinary trading failures (rejections, timeouts, insufficient balance)
/// are never reported through this type; they surface as `Ok(false)`.
#[derive(Error, Debug, Clone)]
pub enum VenueError {
    #[error("market {market} is not listed on venue {venue}")]
    UnknownMarket { venue: VenueId, market: MarketId },

    #[error("market {market} was never registered on venue {venue}")]
    UnregisteredMarket { venue: VenueId, market: MarketId },

    #[error("venue {venue} is not ready")]
    NotReady { venue: VenueId },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
