//! League configuration: scoring caps, the waste impact table, the reward
//! catalog and the sponsor roster. Defaults match the published league rules;
//! a JSON file can override them for pilots running different point tables.

use crate::error::Result;
use crate::models::{RewardType, Sponsor, WasteType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Cap on the volume component (bags + weight).
    pub volume_cap: u32,
    /// Cap on the same-month frequency bonus.
    pub frequency_cap: u32,
    /// Points per verified report in the current calendar month.
    pub frequency_step: u32,
    /// Cap on the waste-type impact component.
    pub waste_impact_cap: u32,
    /// Per-tag impact points; duplicate tags count once per occurrence.
    pub waste_impact: HashMap<WasteType, u32>,
    /// A verified report lifts the zone's cleanliness score by
    /// cleanliness_improvement / score_gain_divisor, clamped to 100.
    pub score_gain_divisor: u32,
    /// Positional reward types for ranks 1-3 at distribution time.
    pub reward_catalog: Vec<RewardType>,
    /// Sponsors attached to gold and silver rewards, in order.
    pub sponsors: Vec<Sponsor>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            volume_cap: 35,
            frequency_cap: 20,
            frequency_step: 5,
            waste_impact_cap: 20,
            waste_impact: default_waste_impact(),
            score_gain_divisor: 5,
            reward_catalog: default_reward_catalog(),
            sponsors: default_sponsors(),
        }
    }
}

impl LeagueConfig {
    /// Loads and sanitizes a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&raw)?;
        config.sanitize();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Repairs malformed saved state instead of failing on it.
    pub fn sanitize(&mut self) {
        self.score_gain_divisor = self.score_gain_divisor.max(1);
        self.frequency_step = self.frequency_step.max(1);

        for (tag, impact) in default_waste_impact() {
            self.waste_impact.entry(tag).or_insert(impact);
        }

        // The catalog is indexed by rank; keep at least three entries.
        let defaults = default_reward_catalog();
        if self.reward_catalog.len() < defaults.len() {
            self.reward_catalog
                .extend(defaults.into_iter().skip(self.reward_catalog.len()));
        }
    }

    pub fn waste_impact_for(&self, tag: WasteType) -> u32 {
        self.waste_impact.get(&tag).copied().unwrap_or(0)
    }
}

fn default_waste_impact() -> HashMap<WasteType, u32> {
    let mut impact = HashMap::new();
    impact.insert(WasteType::EWaste, 5);
    impact.insert(WasteType::Hazardous, 5);
    impact.insert(WasteType::Recyclables, 4);
    impact.insert(WasteType::Plastics, 3);
    impact.insert(WasteType::Organic, 2);
    impact.insert(WasteType::General, 1);
    impact
}

fn default_reward_catalog() -> Vec<RewardType> {
    vec![
        RewardType::SolarStreetlight,
        RewardType::TrashBins,
        RewardType::Certificate,
    ]
}

fn default_sponsors() -> Vec<Sponsor> {
    vec![
        Sponsor {
            id: "sp-greengrid".to_string(),
            name: "GreenGrid Energy".to_string(),
            logo: "/sponsors/greengrid.svg".to_string(),
            reward_description: "Solar street lighting for the winning zone".to_string(),
        },
        Sponsor {
            id: "sp-ecoworks".to_string(),
            name: "EcoWorks Supplies".to_string(),
            logo: "/sponsors/ecoworks.svg".to_string(),
            reward_description: "Heavy-duty public trash bins".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_league_rules() {
        let config = LeagueConfig::default();
        assert_eq!(config.volume_cap, 35);
        assert_eq!(config.frequency_cap, 20);
        assert_eq!(config.waste_impact_cap, 20);
        assert_eq!(config.waste_impact_for(WasteType::EWaste), 5);
        assert_eq!(config.waste_impact_for(WasteType::General), 1);
        assert_eq!(config.reward_catalog.len(), 3);
        assert_eq!(config.sponsors.len(), 2);
    }

    #[test]
    fn sanitize_restores_catalog_and_divisor() {
        let mut config = LeagueConfig {
            reward_catalog: vec![RewardType::CleanupTools],
            score_gain_divisor: 0,
            ..LeagueConfig::default()
        };
        config.sanitize();

        assert_eq!(config.reward_catalog.len(), 3);
        assert_eq!(config.reward_catalog[0], RewardType::CleanupTools);
        assert_eq!(config.score_gain_divisor, 1);
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LeagueConfig::load(&dir.path().join("league.json")).expect("load");
        assert_eq!(config.volume_cap, 35);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("league.json");

        let mut config = LeagueConfig::default();
        config.volume_cap = 40;
        config.save(&path).expect("save");

        let loaded = LeagueConfig::load(&path).expect("load");
        assert_eq!(loaded.volume_cap, 40);
        assert_eq!(loaded.waste_impact_for(WasteType::Plastics), 3);
    }

    #[test]
    fn load_fills_missing_impact_entries() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("league.json");
        fs::write(&path, r#"{ "waste_impact": { "e-waste": 8 } }"#).expect("write");

        let config = LeagueConfig::load(&path).expect("load");
        assert_eq!(config.waste_impact_for(WasteType::EWaste), 8);
        assert_eq!(config.waste_impact_for(WasteType::Organic), 2);
    }
}
