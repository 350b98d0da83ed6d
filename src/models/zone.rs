use crate::models::sql_text_enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneStatus {
    Active,
    Pending,
    Inactive,
}

sql_text_enum!(ZoneStatus {
    Active => "active",
    Pending => "pending",
    Inactive => "inactive",
});

/// A registered neighborhood competing in the league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub population: u32,
    pub baseline_score: u32,
    /// Cleanliness score, kept within [0, 100].
    pub current_score: u32,
    /// Monotonic accumulator; only verified reports add to it.
    pub total_points: u64,
    pub representative: Option<Representative>,
    pub status: ZoneStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_activity_at: Option<i64>,
}

/// Registration payload; derived fields (id, scores, status, timestamps) are
/// assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewZone {
    pub name: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub population: u32,
    pub baseline_score: u32,
    pub representative: Option<Representative>,
}

/// Partial update. Fields left as `None` keep their current value. There is
/// no field-level validation here; callers own payload sanity.
#[derive(Debug, Clone, Default)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub population: Option<u32>,
    pub baseline_score: Option<u32>,
    pub current_score: Option<u32>,
    pub total_points: Option<u64>,
    pub representative: Option<Representative>,
    pub status: Option<ZoneStatus>,
    pub last_activity_at: Option<i64>,
}
