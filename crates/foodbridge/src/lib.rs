//! FoodBridge core: the NGO matching and routing engine.
//!
//! The interesting logic lives in [`matching`]: factor scorers, the
//! weighted match scorer, ranking, persistence of proposed matches, and
//! the emergency broadcast path. Everything else here is the supporting
//! configuration, telemetry, and error plumbing shared with the API
//! service crate.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
