use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use foodbridge::matching::geo::haversine_km;
use foodbridge::matching::{
    AlertId, EmergencyAlert, GeoPoint, MatchId, MatchStore, NearbySurplus, NeedLevel, NewMatch,
    Ngo, NgoId, PostStatus, ServiceHours, StoreError, SurplusPost, SurplusPostId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory store backing the demo commands and the default server
/// wiring. Applies the NGO eligibility filter the same way the
/// production queries would.
#[derive(Default)]
pub(crate) struct InMemoryMatchStore {
    posts: Mutex<HashMap<SurplusPostId, SurplusPost>>,
    donors: Mutex<HashMap<SurplusPostId, String>>,
    ngos: Mutex<Vec<Ngo>>,
    alerts: Mutex<HashMap<AlertId, EmergencyAlert>>,
    matches: Mutex<Vec<NewMatch>>,
    sequence: AtomicU64,
}

impl InMemoryMatchStore {
    pub(crate) fn insert_post(&self, post: SurplusPost, donor: &str) {
        self.donors
            .lock()
            .expect("donor mutex poisoned")
            .insert(post.id.clone(), donor.to_string());
        self.posts
            .lock()
            .expect("post mutex poisoned")
            .insert(post.id.clone(), post);
    }

    pub(crate) fn insert_ngo(&self, ngo: Ngo) {
        self.ngos.lock().expect("ngo mutex poisoned").push(ngo);
    }

    pub(crate) fn insert_alert(&self, alert: EmergencyAlert) {
        self.alerts
            .lock()
            .expect("alert mutex poisoned")
            .insert(alert.id.clone(), alert);
    }

    pub(crate) fn match_count(&self) -> usize {
        self.matches.lock().expect("match mutex poisoned").len()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn surplus_post(&self, id: &SurplusPostId) -> Result<Option<SurplusPost>, StoreError> {
        Ok(self
            .posts
            .lock()
            .expect("post mutex poisoned")
            .get(id)
            .cloned())
    }

    async fn eligible_ngos(&self) -> Result<Vec<Ngo>, StoreError> {
        Ok(self
            .ngos
            .lock()
            .expect("ngo mutex poisoned")
            .iter()
            .filter(|ngo| ngo.verified && ngo.location.is_some() && ngo.available_capacity() > 0)
            .cloned()
            .collect())
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
        let now = Utc::now();
        let donors = self.donors.lock().expect("donor mutex poisoned");
        Ok(self
            .posts
            .lock()
            .expect("post mutex poisoned")
            .values()
            .filter(|post| post.status == PostStatus::Active && post.expiry_at > now)
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
        self.matches
            .lock()
            .expect("match mutex poisoned")
            .push(fields);
        Ok(MatchId(format!("match-{id:06}")))
    }
}

/// Seed the store with a small Des Moines scenario so the demo and a
/// freshly started server have data to rank against.
pub(crate) fn seeded_store() -> InMemoryMatchStore {
    let store = InMemoryMatchStore::default();
    let downtown = GeoPoint::new(41.5868, -93.625);
    let now = Utc::now();

    store.insert_post(
        SurplusPost {
            id: SurplusPostId("post-0001".to_string()),
            location: downtown,
            food_type: "cooked_meals".to_string(),
            quantity_servings: 40,
            expiry_at: now + Duration::minutes(90),
            safety_window_minutes: 120,
            created_at: now,
            status: PostStatus::Active,
        },
        "Court Avenue Bistro",
    );
    store.insert_post(
        SurplusPost {
            id: SurplusPostId("post-0002".to_string()),
            location: GeoPoint::new(41.6005, -93.6091),
            food_type: "bakery".to_string(),
            quantity_servings: 25,
            expiry_at: now + Duration::hours(6),
            safety_window_minutes: 240,
            created_at: now - Duration::minutes(45),
            status: PostStatus::Active,
        },
        "East Village Breads",
    );

    store.insert_ngo(Ngo {
        id: NgoId("ngo-riverside".to_string()),
        name: "Riverside Community Pantry".to_string(),
        location: Some(GeoPoint::new(41.5795, -93.6337)),
        verified: true,
        accepted_food_types: Vec::new(),
        daily_capacity: 120,
        capacity_used: 30,
        need_level: NeedLevel::Normal,
        service_hours: Some(ServiceHours {
            start_hour: 8,
            end_hour: 20,
        }),
    });
    store.insert_ngo(Ngo {
        id: NgoId("ngo-northside".to_string()),
        name: "Northside Shelter Kitchen".to_string(),
        location: Some(GeoPoint::new(41.6201, -93.6202)),
        verified: true,
        accepted_food_types: vec!["cooked_meals".to_string(), "produce".to_string()],
        daily_capacity: 60,
        capacity_used: 10,
        need_level: NeedLevel::Critical,
        service_hours: None,
    });
    store.insert_ngo(Ngo {
        id: NgoId("ngo-westside".to_string()),
        name: "Westside Family Services".to_string(),
        location: Some(GeoPoint::new(41.5864, -93.7103)),
        verified: true,
        accepted_food_types: vec!["bakery".to_string()],
        daily_capacity: 45,
        capacity_used: 20,
        need_level: NeedLevel::High,
        service_hours: Some(ServiceHours {
            start_hour: 9,
            end_hour: 17,
        }),
    });

    store.insert_alert(EmergencyAlert {
        id: AlertId("alert-0001".to_string()),
        center: downtown,
        broadcast_radius_km: 8.0,
    });

    store
}
