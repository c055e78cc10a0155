//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture. They are
//! traits that adapters implement to integrate with external systems.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  matcher · executor ·   │
//!                    │       scheduler         │
//!                    └────────────┬────────────┘
//!                                 │
//!                                 ▼
//!                          ┌─────────────┐
//!                          │    Venue    │
//!                          │    port     │
//!                          └──────┬──────┘
//!                     ┌───────────┴───────────┐
//!                     ▼                       ▼
//!               ┌───────────┐           ┌───────────┐
//!               │  Paper    │           │  Other    │
//!               │  venue    │           │  venues   │
//!               └───────────┘           └───────────┘
//! ```

pub mod outbound;
