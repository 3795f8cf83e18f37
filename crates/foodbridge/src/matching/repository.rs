use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AlertId, EmergencyAlert, GeoPoint, MatchId, MatchStatus, Ngo, NgoId, SurplusPost, SurplusPostId,
};

/// Fields for a match proposal about to be persisted. Scores are stored
/// as fractions in [0, 1], converted back from the display scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub surplus_post_id: SurplusPostId,
    pub ngo_id: NgoId,
    pub distance_km: f64,
    pub capacity_score: f64,
    pub freshness_score: f64,
    pub overall_score: f64,
    pub reasoning: String,
    pub status: MatchStatus,
}

/// An active surplus post annotated with its distance from an emergency
/// alert's center and the donor it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySurplus {
    pub post: SurplusPost,
    pub donor_name: String,
    pub distance_km: f64,
}

/// Storage abstraction so the matching service can be exercised in
/// isolation. Implementations are expected to apply the eligibility
/// filter (verified, geolocated, positive available capacity) in
/// `eligible_ngos`, and to return only active, non-expired posts from
/// `nearby_active_surplus`.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn surplus_post(&self, id: &SurplusPostId)
        -> Result<Option<SurplusPost>, StoreError>;

    async fn eligible_ngos(&self) -> Result<Vec<Ngo>, StoreError>;

    async fn emergency_alert(&self, id: &AlertId) -> Result<Option<EmergencyAlert>, StoreError>;

    async fn nearby_active_surplus(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbySurplus>, StoreError>;

    async fn insert_match(&self, fields: NewMatch) -> Result<MatchId, StoreError>;
}

/// Error enumeration for storage failures. The service logs these with
/// operation context and propagates them unchanged; no internal retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Time source injected into the service so freshness boundaries can be
/// pinned exactly in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock reading the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
