pub(crate) mod factors;
mod policy;
mod reasoning;

pub use policy::ScoringPolicy;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{GeoPoint, NeedLevel, Ngo, NgoId, SurplusPost};
use super::geo::haversine_km;

/// Stateless scorer that blends the factor scores for one (post, NGO)
/// pair under a fixed policy.
pub struct MatchScorer {
    policy: ScoringPolicy,
}

impl MatchScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score a candidate NGO for a surplus post at the given instant.
    ///
    /// Callers must ensure the NGO has coordinates; candidates without
    /// them are filtered before scoring.
    pub fn score(&self, post: &SurplusPost, ngo: &Ngo, now: DateTime<Utc>) -> RankedMatch {
        // Missing coordinates are filtered upstream; if one slips
        // through, the distance stays NaN instead of panicking.
        let location = ngo
            .location
            .unwrap_or(GeoPoint::new(f64::NAN, f64::NAN));
        let distance_km = haversine_km(post.location, location);
        let available = ngo.available_capacity();

        let distance = factors::distance_score(distance_km, self.policy.max_distance_km);
        let freshness = factors::freshness_score(post.expiry_at, post.safety_window_minutes, now);
        let capacity = factors::capacity_score(available, post.quantity_servings);
        let food_type = factors::food_type_score(&post.food_type, &ngo.accepted_food_types);
        let time_window = factors::time_window_score(post.created_at.hour(), ngo.service_hours);
        let boost = factors::demand_boost(ngo.need_level);

        let overall = (distance * self.policy.distance_weight
            + freshness * self.policy.freshness_weight
            + capacity * self.policy.capacity_weight
            + food_type * self.policy.food_type_weight
            + time_window * self.policy.time_window_weight)
            * boost;

        RankedMatch {
            ngo_id: ngo.id.clone(),
            ngo_name: ngo.name.clone(),
            distance_km: round_to_tenth(distance_km),
            available_capacity: available,
            need_level: ngo.need_level,
            scores: ScoreBreakdown {
                distance: to_display(distance),
                freshness: to_display(freshness),
                capacity: to_display(capacity),
                food_type: to_display(food_type),
                time_window: to_display(time_window),
            },
            // The boost can push the raw sum above 1.0; the display scale
            // is clamped at 100.
            overall_score: (overall * 100.0).round().min(100.0) as u8,
            reasoning: reasoning::build_reasoning(
                distance_km,
                freshness,
                available,
                post.quantity_servings,
                ngo.need_level,
            ),
            estimated_pickup_minutes: reasoning::estimate_pickup_minutes(distance_km),
        }
    }
}

fn to_display(fraction: f64) -> u8 {
    (fraction * 100.0).round() as u8
}

fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Component scores on the 0-100 display scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: u8,
    pub freshness: u8,
    pub capacity: u8,
    pub food_type: u8,
    pub time_window: u8,
}

/// One scored candidate as handed to the notification/UI layer and, on
/// acceptance, back to the persister.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub ngo_id: NgoId,
    pub ngo_name: String,
    /// Kilometers, rounded to 0.1.
    pub distance_km: f64,
    pub available_capacity: i64,
    pub need_level: NeedLevel,
    pub scores: ScoreBreakdown,
    /// Weighted blend times the demand boost, clamped to 100.
    pub overall_score: u8,
    pub reasoning: String,
    pub estimated_pickup_minutes: u32,
}
