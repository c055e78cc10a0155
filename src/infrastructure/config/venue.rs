//! Venue declarations.

use serde::Deserialize;

use crate::adapter::outbound::paper::PaperVenueConfig;
use crate::domain::VenueId;

/// Venue-specific settings, selected by the `kind` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VenueSettings {
    /// In-memory simulated venue.
    Paper(PaperVenueConfig),
}

/// One `[[venues]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
    pub id: VenueId,
    #[serde(flatten)]
    pub settings: VenueSettings,
}
