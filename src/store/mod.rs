//! The entity store: a single handle owning the SQLite connection, the
//! injected photo classifier, and the league config. Every operation goes
//! through it; there are no ambient globals.

mod leaderboard;
mod notifications;
mod reports;
mod rewards;
mod stats;
mod zones;

use crate::config::LeagueConfig;
use crate::error::Result;
use crate::scoring::{Classifier, MockClassifier};
use rusqlite::{Connection, Result as SqlResult};
use std::path::Path;

const DB_SCHEMA_VERSION: i64 = 2;

pub struct Store {
    conn: Connection,
    classifier: Box<dyn Classifier>,
    config: LeagueConfig,
}

impl Store {
    /// Opens a volatile in-memory league; all state is lost when the store is
    /// dropped. This matches the deployment model: one process, one caller.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Opens a file-backed league for callers that want state to survive a
    /// restart. No durability guarantees beyond what SQLite provides.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            classifier: Box::new(MockClassifier),
            config: LeagueConfig::default(),
        })
    }

    /// Replaces the mock classifier, typically with a deterministic one.
    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_config(mut self, mut config: LeagueConfig) -> Self {
        config.sanitize();
        self.config = config;
        self
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    /// Escape hatch for callers that need raw SQL (reporting, migrations,
    /// test fixtures).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn initialize_schema(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        conn.pragma_update(None, "user_version", 2)?;
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS zones (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            lat REAL,
            lng REAL,
            population INTEGER NOT NULL DEFAULT 0,
            baseline_score INTEGER NOT NULL DEFAULT 0,
            current_score INTEGER NOT NULL DEFAULT 0,
            total_points INTEGER NOT NULL DEFAULT 0,
            rep_json TEXT,
            status TEXT NOT NULL CHECK(status IN ('active', 'pending', 'inactive')) DEFAULT 'active',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            last_activity_at INTEGER
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_zones_name_nocase ON zones(name COLLATE NOCASE);

        CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            zone_id TEXT NOT NULL REFERENCES zones(id) ON DELETE CASCADE,
            zone_name TEXT NOT NULL,
            before_photo TEXT NOT NULL DEFAULT '',
            after_photo TEXT NOT NULL DEFAULT '',
            trash_bags INTEGER NOT NULL DEFAULT 0,
            weight_kg REAL NOT NULL DEFAULT 0,
            cleanup_date TEXT NOT NULL DEFAULT '',
            lat REAL,
            lng REAL,
            waste_tags TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL CHECK(status IN ('pending', 'verified', 'rejected')) DEFAULT 'pending',
            score INTEGER,
            breakdown_json TEXT,
            submitted_at INTEGER NOT NULL,
            verified_at INTEGER,
            verified_by TEXT,
            classification_json TEXT
        );

        CREATE TABLE IF NOT EXISTS rewards (
            id TEXT PRIMARY KEY,
            zone_id TEXT NOT NULL,
            zone_name TEXT NOT NULL,
            reward_type TEXT NOT NULL,
            tier TEXT NOT NULL CHECK(tier IN ('gold', 'silver', 'bronze')),
            period TEXT NOT NULL,
            awarded_at INTEGER NOT NULL,
            sponsor_json TEXT,
            claimed INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS notifications (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL CHECK(kind IN ('reminder', 'alert', 'announcement', 'score-change', 'reward')),
            title TEXT NOT NULL,
            message TEXT NOT NULL,
            zone_id TEXT,
            read INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            action_url TEXT
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> SqlResult<()> {
    // V2 keys reward issuance by period and indexes the hot query paths.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reward_distributions (
            period TEXT PRIMARY KEY,
            distributed_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reports_zone_status ON reports(zone_id, status);
        CREATE INDEX IF NOT EXISTS idx_reports_submitted_at ON reports(submitted_at);
        CREATE INDEX IF NOT EXISTS idx_rewards_awarded_at ON rewards(awarded_at);
        CREATE INDEX IF NOT EXISTS idx_notifications_created_at ON notifications(created_at);
        ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_initializes_with_expected_version() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("schema version");
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn schema_init_is_idempotent() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("first init");
        initialize_schema(&conn).expect("second init");
    }
}
