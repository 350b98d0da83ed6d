use super::Store;
use crate::error::{Result, StoreError};
use crate::models::{NewNotification, NotificationKind, Reward, RewardTier, RewardType, TimePeriod};
use crate::scoring::windows::now_millis;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const REWARD_COLUMNS: &str =
    "id, zone_id, zone_name, reward_type, tier, period, awarded_at, sponsor_json, claimed";

const TIERS: [RewardTier; 3] = [RewardTier::Gold, RewardTier::Silver, RewardTier::Bronze];

impl Store {
    /// Rewards, newest first, optionally for a single zone.
    pub fn rewards(&self, zone_id: Option<&str>) -> Result<Vec<Reward>> {
        let sql = match zone_id {
            Some(_) => format!(
                "SELECT {REWARD_COLUMNS} FROM rewards WHERE zone_id = ?1 ORDER BY awarded_at DESC"
            ),
            None => format!("SELECT {REWARD_COLUMNS} FROM rewards ORDER BY awarded_at DESC"),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rewards = match zone_id {
            Some(zone_id) => stmt
                .query_map(params![zone_id], reward_from_row)?
                .filter_map(|r| r.ok())
                .collect(),
            None => stmt
                .query_map([], reward_from_row)?
                .filter_map(|r| r.ok())
                .collect(),
        };
        Ok(rewards)
    }

    /// Mints tiered rewards for the current top-3 zones and notifies the
    /// winners. Standing is always judged on the monthly board; `period`
    /// only labels the minted records, and each label can be distributed
    /// exactly once.
    pub fn distribute_rewards(&self, period: &str) -> Result<Vec<Reward>> {
        let already: Option<i64> = self
            .conn
            .query_row(
                "SELECT distributed_at FROM reward_distributions WHERE period = ?1",
                params![period],
                |row| row.get(0),
            )
            .optional()?;
        if already.is_some() {
            return Err(StoreError::AlreadyDistributed(period.to_string()));
        }

        let standings = self.leaderboard(TimePeriod::Monthly)?;
        let now = now_millis();
        let mut minted = Vec::new();

        for (index, entry) in standings.iter().take(TIERS.len()).enumerate() {
            let reward = Reward {
                id: Uuid::new_v4().to_string(),
                zone_id: entry.zone.id.clone(),
                zone_name: entry.zone.name.clone(),
                reward_type: self
                    .config
                    .reward_catalog
                    .get(index)
                    .copied()
                    .unwrap_or(RewardType::Certificate),
                tier: TIERS[index],
                period: period.to_string(),
                awarded_at: now,
                // Sponsors back gold and silver only.
                sponsor: if index < 2 {
                    self.config.sponsors.get(index).cloned()
                } else {
                    None
                },
                claimed: false,
            };

            self.conn.execute(
                "INSERT INTO rewards (id, zone_id, zone_name, reward_type, tier, period,
                     awarded_at, sponsor_json, claimed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    reward.id,
                    reward.zone_id,
                    reward.zone_name,
                    reward.reward_type,
                    reward.tier,
                    reward.period,
                    reward.awarded_at,
                    reward
                        .sponsor
                        .as_ref()
                        .map(|s| serde_json::to_string(s).unwrap_or_else(|_| "{}".to_string())),
                    reward.claimed,
                ],
            )?;

            self.add_notification(NewNotification {
                kind: NotificationKind::Reward,
                title: format!("{} Reward Unlocked!", reward.tier.display_name()),
                message: format!(
                    "Congratulations! Your zone earned a {} {}.",
                    reward.tier.as_str(),
                    reward.reward_type.label()
                ),
                zone_id: Some(reward.zone_id.clone()),
                action_url: Some("/rewards".to_string()),
            })?;

            minted.push(reward);
        }

        self.conn.execute(
            "INSERT INTO reward_distributions (period, distributed_at) VALUES (?1, ?2)",
            params![period, now],
        )?;

        log::info!("distributed {} rewards for period {period}", minted.len());
        Ok(minted)
    }
}

fn reward_from_row(row: &Row<'_>) -> rusqlite::Result<Reward> {
    let sponsor: Option<String> = row.get(7)?;

    Ok(Reward {
        id: row.get(0)?,
        zone_id: row.get(1)?,
        zone_name: row.get(2)?,
        reward_type: row.get(3)?,
        tier: row.get(4)?,
        period: row.get(5)?,
        awarded_at: row.get(6)?,
        sponsor: sponsor.and_then(|raw| serde_json::from_str(&raw).ok()),
        claimed: row.get(8)?,
    })
}
