use super::zones::{zone_from_row, ZONE_COLUMNS};
use super::Store;
use crate::error::Result;
use crate::models::{LeaderboardEntry, TimePeriod, Zone};
use crate::scoring::windows::window_start;
use chrono::Utc;
use rusqlite::params;
use std::collections::HashMap;

impl Store {
    /// Ranks every registered zone over the requested window. Zones without
    /// qualifying reports still appear, with zero points.
    ///
    /// Points are the window sum of verified report scores, except all-time,
    /// which uses the zone's persisted `total_points` (the two can diverge
    /// when points were adjusted outside verification, and the persisted
    /// value is authoritative for the all-time board).
    pub fn leaderboard(&self, period: TimePeriod) -> Result<Vec<LeaderboardEntry>> {
        let start = window_start(period, Utc::now());

        let mut stmt = self.conn.prepare(
            "SELECT zone_id, COALESCE(SUM(score), 0), COUNT(*) FROM reports
             WHERE status = 'verified' AND submitted_at >= ?1
             GROUP BY zone_id",
        )?;
        let mut window: HashMap<String, (u64, usize)> = HashMap::new();
        let rows = stmt.query_map(params![start], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)? as u64,
                row.get::<_, i64>(2)? as usize,
            ))
        })?;
        for (zone_id, points, count) in rows.flatten() {
            window.insert(zone_id, (points, count));
        }

        // Registration order; the stable sort below keeps it for ties.
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ZONE_COLUMNS} FROM zones ORDER BY rowid ASC"))?;
        let zones: Vec<Zone> = stmt
            .query_map([], zone_from_row)?
            .filter_map(|r| r.ok())
            .collect();

        let mut entries: Vec<LeaderboardEntry> = zones
            .into_iter()
            .map(|zone| {
                let (window_points, reports_count) =
                    window.get(&zone.id).copied().unwrap_or((0, 0));
                let points = if period == TimePeriod::AllTime {
                    zone.total_points
                } else {
                    window_points
                };
                LeaderboardEntry {
                    rank: 0,
                    points,
                    change: 0,
                    reports_count,
                    zone,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.points.cmp(&a.points));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Ok(entries)
    }
}
