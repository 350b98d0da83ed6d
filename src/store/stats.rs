use super::Store;
use crate::error::Result;
use crate::models::AdminStats;

impl Store {
    /// One aggregate read for the admin dashboard.
    pub fn admin_stats(&self) -> Result<AdminStats> {
        let total_points_awarded: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(score), 0) FROM reports WHERE status = 'verified'",
            [],
            |row| row.get(0),
        )?;

        Ok(AdminStats {
            total_zones: self.count("SELECT COUNT(*) FROM zones")?,
            active_zones: self.count("SELECT COUNT(*) FROM zones WHERE status = 'active'")?,
            total_reports: self.count("SELECT COUNT(*) FROM reports")?,
            pending_verifications: self
                .count("SELECT COUNT(*) FROM reports WHERE status = 'pending'")?,
            total_points_awarded: total_points_awarded as u64,
            rewards_distributed: self.count("SELECT COUNT(*) FROM rewards")?,
        })
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
