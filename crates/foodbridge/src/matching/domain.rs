use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for surplus-food posts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurplusPostId(pub String);

/// Identifier wrapper for distribution NGOs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NgoId(pub String);

/// Identifier assigned to a persisted match proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

/// Identifier wrapper for emergency hunger alerts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(pub String);

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Lifecycle state of a surplus post. The engine only reads it; status
/// transitions happen in donor-side order handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Active,
    Matched,
    PickedUp,
    Expired,
    Cancelled,
}

impl PostStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Matched => "matched",
            PostStatus::PickedUp => "picked_up",
            PostStatus::Expired => "expired",
            PostStatus::Cancelled => "cancelled",
        }
    }
}

/// A donor's listing of excess food available for pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurplusPost {
    pub id: SurplusPostId,
    pub location: GeoPoint,
    pub food_type: String,
    pub quantity_servings: u32,
    pub expiry_at: DateTime<Utc>,
    /// Duration after posting during which the food is considered safely
    /// consumable; drives freshness decay.
    pub safety_window_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub status: PostStatus,
}

/// Reported demand pressure at an NGO, used as a multiplicative boost
/// rather than a capped factor score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedLevel {
    Normal,
    High,
    Critical,
}

impl NeedLevel {
    pub const fn boost(self) -> f64 {
        match self {
            NeedLevel::Critical => 1.3,
            NeedLevel::High => 1.15,
            NeedLevel::Normal => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            NeedLevel::Normal => "normal",
            NeedLevel::High => "high",
            NeedLevel::Critical => "critical",
        }
    }
}

/// Declared daily service window as hours of day, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHours {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl ServiceHours {
    pub fn contains(&self, hour: u32) -> bool {
        hour >= u32::from(self.start_hour) && hour < u32::from(self.end_hour)
    }
}

/// Snapshot of a distribution-capable organization at ranking time.
/// Capacity usage and need level are mutated elsewhere; the engine never
/// writes back to this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngo {
    pub id: NgoId,
    pub name: String,
    pub location: Option<GeoPoint>,
    pub verified: bool,
    /// Empty means the NGO accepts every food type.
    pub accepted_food_types: Vec<String>,
    pub daily_capacity: u32,
    pub capacity_used: u32,
    pub need_level: NeedLevel,
    pub service_hours: Option<ServiceHours>,
}

impl Ngo {
    /// Servings the NGO can still absorb today. Snapshots can report
    /// usage above capacity, so this may be negative.
    pub fn available_capacity(&self) -> i64 {
        i64::from(self.daily_capacity) - i64::from(self.capacity_used)
    }
}

/// A broadcast request for food within a radius around a crisis site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub id: AlertId,
    pub center: GeoPoint,
    pub broadcast_radius_km: f64,
}

/// Lifecycle of a persisted match proposal. The engine only ever creates
/// matches in the `Proposed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Proposed,
    Accepted,
    PickedUp,
    Delivered,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Proposed => "proposed",
            MatchStatus::Accepted => "accepted",
            MatchStatus::PickedUp => "picked_up",
            MatchStatus::Delivered => "delivered",
        }
    }
}
