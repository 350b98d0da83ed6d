use crate::models::sql_text_enum;
use crate::models::zone::Coordinates;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteType {
    Plastics,
    Recyclables,
    Organic,
    EWaste,
    Hazardous,
    General,
}

sql_text_enum!(WasteType {
    Plastics => "plastics",
    Recyclables => "recyclables",
    Organic => "organic",
    EWaste => "e-waste",
    Hazardous => "hazardous",
    General => "general",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

sql_text_enum!(ReportStatus {
    Pending => "pending",
    Verified => "verified",
    Rejected => "rejected",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    Pass,
    Review,
    Fail,
}

sql_text_enum!(VerificationStatus {
    Pass => "pass",
    Review => "review",
    Fail => "fail",
});

/// Output of the (pluggable) photo classifier attached at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiClassification {
    pub confidence: f64,
    pub detected_waste: Vec<WasteType>,
    pub cleanliness_before: u32,
    pub cleanliness_after: u32,
    pub verification_status: VerificationStatus,
}

/// Four-component decomposition of a report's awarded points. `total` is
/// always the sum of the components and never accepted as an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub volume_score: u32,
    pub cleanliness_improvement: u32,
    pub frequency_bonus: u32,
    pub waste_type_impact: u32,
    pub total: u32,
}

/// Component-wise admin override applied at verification time. Deliberately
/// has no `total` field: the total is recomputed from the final components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreOverride {
    pub volume_score: Option<u32>,
    pub cleanliness_improvement: Option<u32>,
    pub frequency_bonus: Option<u32>,
    pub waste_type_impact: Option<u32>,
}

/// A submitted cleanup record. Lifecycle: created Pending, then exactly one
/// transition to Verified or Rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub id: String,
    pub zone_id: String,
    /// Snapshot of the zone name at submission time; a later rename does not
    /// rewrite it.
    pub zone_name: String,
    pub before_photo: String,
    pub after_photo: String,
    pub trash_bags: u32,
    pub weight_kg: f64,
    pub cleanup_date: String,
    pub coordinates: Option<Coordinates>,
    pub waste_tags: Vec<WasteType>,
    pub status: ReportStatus,
    pub score: Option<u32>,
    pub score_breakdown: Option<ScoreBreakdown>,
    pub submitted_at: i64,
    pub verified_at: Option<i64>,
    pub verified_by: Option<String>,
    pub classification: Option<AiClassification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReport {
    pub zone_id: String,
    pub before_photo: String,
    pub after_photo: String,
    pub trash_bags: u32,
    pub weight_kg: f64,
    pub cleanup_date: String,
    pub coordinates: Option<Coordinates>,
    pub waste_tags: Vec<WasteType>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub zone_id: Option<String>,
    pub status: Option<ReportStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waste_tags_use_kebab_case() {
        assert_eq!(WasteType::EWaste.as_str(), "e-waste");
        assert_eq!(
            serde_json::to_string(&WasteType::EWaste).unwrap(),
            "\"e-waste\""
        );
        assert_eq!("e-waste".parse::<WasteType>().unwrap(), WasteType::EWaste);
    }

    #[test]
    fn report_status_text_round_trips() {
        for status in [
            ReportStatus::Pending,
            ReportStatus::Verified,
            ReportStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ReportStatus>().unwrap(), status);
        }
    }

    #[test]
    fn breakdown_survives_json_round_trip() {
        let breakdown = ScoreBreakdown {
            volume_score: 14,
            cleanliness_improvement: 20,
            frequency_bonus: 0,
            waste_type_impact: 3,
            total: 37,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: ScoreBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }
}
