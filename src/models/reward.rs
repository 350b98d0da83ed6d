use crate::models::sql_text_enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardType {
    SolarStreetlight,
    TrashBins,
    CleanupTools,
    Certificate,
    SponsorIncentive,
}

sql_text_enum!(RewardType {
    SolarStreetlight => "solar-streetlight",
    TrashBins => "trash-bins",
    CleanupTools => "cleanup-tools",
    Certificate => "certificate",
    SponsorIncentive => "sponsor-incentive",
});

impl RewardType {
    /// Human-readable form used in notification copy.
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardTier {
    Gold,
    Silver,
    Bronze,
}

sql_text_enum!(RewardTier {
    Gold => "gold",
    Silver => "silver",
    Bronze => "bronze",
});

impl RewardTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub reward_description: String,
}

/// A minted reward for one of the top-3 zones of a distribution period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub zone_id: String,
    pub zone_name: String,
    pub reward_type: RewardType,
    pub tier: RewardTier,
    pub period: String,
    pub awarded_at: i64,
    pub sponsor: Option<Sponsor>,
    /// Defaults to false; no operation in the core flips it.
    pub claimed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_type_label_drops_hyphens() {
        assert_eq!(RewardType::SolarStreetlight.label(), "solar streetlight");
        assert_eq!(RewardType::Certificate.label(), "certificate");
    }

    #[test]
    fn tier_display_name_is_capitalized() {
        assert_eq!(RewardTier::Gold.display_name(), "Gold");
        assert_eq!(RewardTier::Gold.as_str(), "gold");
    }
}
