//! Human-readable justification for a ranked candidate, plus the coarse
//! pickup-time heuristic. Explanatory metadata only; never consulted by
//! the ranking itself.

use super::super::domain::NeedLevel;

/// Effective urban travel speed assumed for pickup estimates.
const PICKUP_SPEED_KMH: f64 = 25.0;
const PICKUP_BUFFER_MINUTES: u32 = 10;

/// Assemble independent threshold-bucket phrases into one sentence.
pub(crate) fn build_reasoning(
    distance_km: f64,
    freshness: f64,
    available_capacity: i64,
    required_servings: u32,
    need: NeedLevel,
) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if distance_km < 2.0 {
        reasons.push("Very close location");
    } else if distance_km < 5.0 {
        reasons.push("Nearby location");
    } else if distance_km < 10.0 {
        reasons.push("Reasonable distance");
    }

    if freshness > 0.8 {
        reasons.push("Excellent freshness window");
    } else if freshness > 0.5 {
        reasons.push("Good freshness window");
    } else if freshness > 0.2 {
        reasons.push("Short freshness window");
    }

    let required = i64::from(required_servings);
    if available_capacity * 2 >= required * 3 {
        reasons.push("More than enough capacity");
    } else if available_capacity >= required {
        reasons.push("Sufficient capacity");
    } else {
        reasons.push("Capacity constraints");
    }

    match need {
        NeedLevel::Critical => reasons.push("Critical urgent need"),
        NeedLevel::High => reasons.push("High current demand"),
        NeedLevel::Normal => {}
    }

    format!("{}.", reasons.join(". "))
}

/// Minutes to reach the NGO at a flat 25 km/h plus a fixed loading
/// buffer. A heuristic, not a routing computation.
pub(crate) fn estimate_pickup_minutes(distance_km: f64) -> u32 {
    (distance_km / PICKUP_SPEED_KMH * 60.0).ceil() as u32 + PICKUP_BUFFER_MINUTES
}
