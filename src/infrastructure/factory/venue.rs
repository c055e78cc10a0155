//! Venue factory.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::paper::PaperVenue;
use crate::domain::VenueId;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::{VenueConfig, VenueSettings};
use crate::port::outbound::Venue;

/// Venues keyed by their configured id.
pub type VenueRegistry = HashMap<VenueId, Arc<dyn Venue>>;

/// Build one venue from its declaration.
#[must_use]
pub fn build_venue(config: &VenueConfig) -> Arc<dyn Venue> {
    match &config.settings {
        VenueSettings::Paper(paper) => {
            info!(venue = %config.id, kind = "paper", markets = paper.markets.len(), "Venue built");
            Arc::new(PaperVenue::new(config.id.clone(), paper))
        }
    }
}

/// Build every declared venue.
///
/// # Errors
///
/// Fails on a duplicate venue id.
#[allow(clippy::result_large_err)]
pub fn build_venues(configs: &[VenueConfig]) -> Result<VenueRegistry> {
    let mut venues = VenueRegistry::with_capacity(configs.len());
    for config in configs {
        if venues.contains_key(&config.id) {
            return Err(ConfigError::DuplicateId {
                kind: "venue",
                id: config.id.to_string(),
            }
            .into());
        }
        venues.insert(config.id.clone(), build_venue(config));
    }
    Ok(venues)
}
