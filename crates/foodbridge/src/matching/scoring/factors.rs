//! Independent factor scorers. Each is pure and returns a value in
//! [0.0, 1.0]; the demand boost is the one deliberate exception, a
//! multiplier applied after weighting.

use chrono::{DateTime, Utc};

use super::super::domain::{NeedLevel, ServiceHours};

/// Linear freshness decay inside the safety window: fully fresh while at
/// least a whole window remains, zero at or past expiry.
pub(crate) fn freshness_score(
    expiry_at: DateTime<Utc>,
    safety_window_minutes: u32,
    now: DateTime<Utc>,
) -> f64 {
    let minutes_remaining = (expiry_at - now).num_seconds() as f64 / 60.0;

    if minutes_remaining <= 0.0 {
        return 0.0;
    }
    if safety_window_minutes == 0 || minutes_remaining >= f64::from(safety_window_minutes) {
        return 1.0;
    }

    (minutes_remaining / f64::from(safety_window_minutes)).max(0.0)
}

/// Partial-capacity NGOs are penalized proportionally, not excluded; a
/// partial pickup can still be useful.
pub(crate) fn capacity_score(available: i64, required_servings: u32) -> f64 {
    if available <= 0 {
        return 0.0;
    }
    if required_servings == 0 || available as u64 >= u64::from(required_servings) {
        return 1.0;
    }

    available as f64 / f64::from(required_servings)
}

/// Hard cutoff beyond the radius, linearly decreasing inside it.
pub(crate) fn distance_score(distance_km: f64, max_distance_km: f64) -> f64 {
    if distance_km > max_distance_km {
        return 0.0;
    }

    (1.0 - distance_km / max_distance_km).max(0.0)
}

/// Soft penalty for a type mismatch; NGOs may still take mismatched food
/// opportunistically. An empty accepted set means "accepts everything".
pub(crate) fn food_type_score(food_type: &str, accepted_types: &[String]) -> f64 {
    if accepted_types.is_empty() {
        return 1.0;
    }
    if accepted_types.iter().any(|accepted| accepted == food_type) {
        1.0
    } else {
        0.3
    }
}

/// Neutral 0.5 when the NGO declares no service hours; otherwise 1.0
/// inside the `[start, end)` window and the same soft penalty as food
/// type outside it.
pub(crate) fn time_window_score(post_hour: u32, hours: Option<ServiceHours>) -> f64 {
    match hours {
        None => 0.5,
        Some(window) => {
            if window.contains(post_hour) {
                1.0
            } else {
                0.3
            }
        }
    }
}

/// Multiplicative urgency boost so NGOs in distress can outrank
/// otherwise better-fitting candidates without capping at 1.0.
pub(crate) fn demand_boost(need: NeedLevel) -> f64 {
    need.boost()
}
