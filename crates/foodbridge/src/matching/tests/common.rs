use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::matching::domain::{
    AlertId, EmergencyAlert, GeoPoint, MatchId, NeedLevel, Ngo, NgoId, PostStatus, SurplusPost,
    SurplusPostId,
};
use crate::matching::geo::haversine_km;
use crate::matching::repository::{
    Clock, MatchStore, NearbySurplus, NewMatch, StoreError, SystemClock,
};
use crate::matching::scoring::ScoringPolicy;
use crate::matching::service::MatchingService;

/// Downtown Des Moines, the anchor for all fixture coordinates.
pub(super) const CENTER: GeoPoint = GeoPoint::new(41.5868, -93.625);

/// Fixed "now" so freshness boundaries are exact in every test.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).single().expect("valid timestamp")
}

/// A point `km` kilometers due north of `center`; haversine reproduces
/// the offset to within a few meters.
pub(super) fn offset_north(center: GeoPoint, km: f64) -> GeoPoint {
    GeoPoint::new(center.lat + km / 111.195, center.lon)
}

pub(super) fn post(id: &str, expires_in_minutes: i64, safety_window_minutes: u32) -> SurplusPost {
    let now = fixed_now();
    SurplusPost {
        id: SurplusPostId(id.to_string()),
        location: CENTER,
        food_type: "cooked_meals".to_string(),
        quantity_servings: 20,
        expiry_at: now + Duration::minutes(expires_in_minutes),
        safety_window_minutes,
        created_at: now,
        status: PostStatus::Active,
    }
}

pub(super) fn ngo(id: &str, km_north: f64, daily_capacity: u32) -> Ngo {
    Ngo {
        id: NgoId(id.to_string()),
        name: format!("NGO {id}"),
        location: Some(offset_north(CENTER, km_north)),
        verified: true,
        accepted_food_types: Vec::new(),
        daily_capacity,
        capacity_used: 0,
        need_level: NeedLevel::Normal,
        service_hours: None,
    }
}

pub(super) fn alert(id: &str, radius_km: f64) -> EmergencyAlert {
    EmergencyAlert {
        id: AlertId(id.to_string()),
        center: CENTER,
        broadcast_radius_km: radius_km,
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) posts: Mutex<HashMap<SurplusPostId, SurplusPost>>,
    pub(super) donors: Mutex<HashMap<SurplusPostId, String>>,
    pub(super) ngos: Mutex<Vec<Ngo>>,
    pub(super) alerts: Mutex<HashMap<AlertId, EmergencyAlert>>,
    pub(super) inserted: Mutex<Vec<NewMatch>>,
    sequence: AtomicUsize,
}

impl MemoryStore {
    pub(super) fn with_post(self, post: SurplusPost) -> Self {
        self.posts
            .lock()
            .expect("post mutex poisoned")
            .insert(post.id.clone(), post);
        self
    }

    pub(super) fn with_donor(self, post_id: &str, donor: &str) -> Self {
        self.donors
            .lock()
            .expect("donor mutex poisoned")
            .insert(SurplusPostId(post_id.to_string()), donor.to_string());
        self
    }

    pub(super) fn with_ngo(self, ngo: Ngo) -> Self {
        self.ngos.lock().expect("ngo mutex poisoned").push(ngo);
        self
    }

    pub(super) fn with_alert(self, alert: EmergencyAlert) -> Self {
        self.alerts
            .lock()
            .expect("alert mutex poisoned")
            .insert(alert.id.clone(), alert);
        self
    }

    pub(super) fn inserted(&self) -> Vec<NewMatch> {
        self.inserted.lock().expect("insert mutex poisoned").clone()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn surplus_post(&self, id: &SurplusPostId) -> Result<Option<SurplusPost>, StoreError> {
        Ok(self.posts.lock().expect("post mutex poisoned").get(id).cloned())
    }

    async fn eligible_ngos(&self) -> Result<Vec<Ngo>, StoreError> {
        Ok(self.ngos.lock().expect("ngo mutex poisoned").clone())
    }

    async fn emergency_alert(&self, id: &AlertId) -> Result<Option<EmergencyAlert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .expect("alert mutex poisoned")
            .get(id)
            .cloned())
    }

    async fn nearby_active_surplus(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbySurplus>, StoreError> {
        let donors = self.donors.lock().expect("donor mutex poisoned");
        let posts = self.posts.lock().expect("post mutex poisoned");
        Ok(posts
            .values()
            .filter(|post| post.status == PostStatus::Active && post.expiry_at > fixed_now())
            .filter_map(|post| {
                let distance_km = haversine_km(center, post.location);
                (distance_km <= radius_km).then(|| NearbySurplus {
                    post: post.clone(),
                    donor_name: donors
                        .get(&post.id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown donor".to_string()),
                    distance_km,
                })
            })
            .collect())
    }

    async fn insert_match(&self, fields: NewMatch) -> Result<MatchId, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.inserted
            .lock()
            .expect("insert mutex poisoned")
            .push(fields);
        Ok(MatchId(format!("match-{id:04}")))
    }
}

/// Store whose inserts start failing after a set number of successes.
pub(super) struct FlakyStore {
    pub(super) inner: MemoryStore,
    pub(super) successful_inserts: usize,
    attempted: AtomicUsize,
}

impl FlakyStore {
    pub(super) fn new(inner: MemoryStore, successful_inserts: usize) -> Self {
        Self {
            inner,
            successful_inserts,
            attempted: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MatchStore for FlakyStore {
    async fn surplus_post(&self, id: &SurplusPostId) -> Result<Option<SurplusPost>, StoreError> {
        self.inner.surplus_post(id).await
    }

    async fn eligible_ngos(&self) -> Result<Vec<Ngo>, StoreError> {
        self.inner.eligible_ngos().await
    }

    async fn emergency_alert(&self, id: &AlertId) -> Result<Option<EmergencyAlert>, StoreError> {
        self.inner.emergency_alert(id).await
    }

    async fn nearby_active_surplus(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbySurplus>, StoreError> {
        self.inner.nearby_active_surplus(center, radius_km).await
    }

    async fn insert_match(&self, fields: NewMatch) -> Result<MatchId, StoreError> {
        let attempt = self.attempted.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.successful_inserts {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.insert_match(fields).await
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn build_service(store: MemoryStore) -> (MatchingService<MemoryStore, FixedClock>, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let service = MatchingService::new(
        store.clone(),
        Arc::new(FixedClock(fixed_now())),
        ScoringPolicy::default(),
    );
    (service, store)
}

pub(super) fn build_flaky_service(
    store: FlakyStore,
) -> (MatchingService<FlakyStore, FixedClock>, Arc<FlakyStore>) {
    let store = Arc::new(store);
    let service = MatchingService::new(
        store.clone(),
        Arc::new(FixedClock(fixed_now())),
        ScoringPolicy::default(),
    );
    (service, store)
}

#[test]
fn system_clock_tracks_wall_time() {
    let before = Utc::now();
    let now = SystemClock.now();
    assert!(now >= before);
}
