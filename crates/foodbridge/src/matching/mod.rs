//! Surplus-to-NGO matching engine.
//!
//! Ranks candidate NGOs for a posted surplus-food item by a weighted
//! blend of distance, freshness, capacity fit, food-type compatibility,
//! and service-hour alignment, boosted for elevated NGO need. Also hosts
//! the simpler emergency broadcast path that finds nearby active surplus
//! for a crisis alert. Storage and time are injected seams so every
//! ranking decision is reproducible in tests.

pub mod domain;
pub mod geo;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AlertId, EmergencyAlert, GeoPoint, MatchId, MatchStatus, NeedLevel, Ngo, NgoId, PostStatus,
    ServiceHours, SurplusPost, SurplusPostId,
};
pub use repository::{Clock, MatchStore, NearbySurplus, NewMatch, StoreError, SystemClock};
pub use router::matching_router;
pub use scoring::{MatchScorer, RankedMatch, ScoreBreakdown, ScoringPolicy};
pub use service::{MatchingError, MatchingService};
