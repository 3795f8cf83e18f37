use serde::{Deserialize, Serialize};

/// Fixed weighting used to blend the factor scores, plus the hard
/// distance cutoff. Weights sum to 1.0 before the demand boost is
/// applied; proximity and perishability dominate on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub max_distance_km: f64,
    pub distance_weight: f64,
    pub freshness_weight: f64,
    pub capacity_weight: f64,
    pub food_type_weight: f64,
    pub time_window_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            max_distance_km: 15.0,
            distance_weight: 0.40,
            freshness_weight: 0.30,
            capacity_weight: 0.20,
            food_type_weight: 0.05,
            time_window_weight: 0.05,
        }
    }
}

impl ScoringPolicy {
    pub fn with_max_distance_km(max_distance_km: f64) -> Self {
        Self {
            max_distance_km,
            ..Self::default()
        }
    }
}
