use crate::models::sql_text_enum;
use crate::models::zone::Zone;
use serde::{Deserialize, Serialize};

/// Aggregation window for leaderboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePeriod {
    Weekly,
    Monthly,
    Seasonal,
    AllTime,
}

sql_text_enum!(TimePeriod {
    Weekly => "weekly",
    Monthly => "monthly",
    Seasonal => "seasonal",
    AllTime => "all-time",
});

/// Derived ranking row; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position after sorting by points.
    pub rank: usize,
    pub zone: Zone,
    pub points: u64,
    /// Rank movement against the previous period. Fixed at 0 until a
    /// leaderboard snapshot history exists to diff against.
    pub change: i32,
    pub reports_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_zones: usize,
    pub active_zones: usize,
    pub total_reports: usize,
    pub pending_verifications: usize,
    pub total_points_awarded: u64,
    pub rewards_distributed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_text_round_trips() {
        for period in [
            TimePeriod::Weekly,
            TimePeriod::Monthly,
            TimePeriod::Seasonal,
            TimePeriod::AllTime,
        ] {
            assert_eq!(period.as_str().parse::<TimePeriod>().unwrap(), period);
        }
        assert_eq!(TimePeriod::AllTime.as_str(), "all-time");
    }
}
