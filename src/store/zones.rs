use super::Store;
use crate::error::{Result, StoreError};
use crate::models::{
    Coordinates, NewNotification, NewZone, NotificationKind, Representative, Zone, ZonePatch,
    ZoneStatus,
};
use crate::scoring::windows::now_millis;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

pub(super) const ZONE_COLUMNS: &str = "id, name, location, lat, lng, population, \
     baseline_score, current_score, total_points, rep_json, status, created_at, \
     updated_at, last_activity_at";

impl Store {
    /// All zones, best first.
    pub fn zones(&self) -> Result<Vec<Zone>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ZONE_COLUMNS} FROM zones ORDER BY total_points DESC"))?;
        let zones = stmt
            .query_map([], zone_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(zones)
    }

    pub fn zone(&self, id: &str) -> Result<Option<Zone>> {
        let zone = self
            .conn
            .query_row(
                &format!("SELECT {ZONE_COLUMNS} FROM zones WHERE id = ?1"),
                params![id],
                zone_from_row,
            )
            .optional()?;
        Ok(zone)
    }

    /// Registers a zone. Names are unique case-insensitively; the new zone
    /// starts active with its cleanliness score at the surveyed baseline.
    pub fn create_zone(&self, data: NewZone) -> Result<Zone> {
        let taken: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM zones WHERE name = ?1 COLLATE NOCASE",
                params![data.name],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(StoreError::DuplicateName(data.name));
        }

        let now = now_millis();
        let zone = Zone {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            location: data.location,
            coordinates: data.coordinates,
            population: data.population,
            baseline_score: data.baseline_score,
            current_score: data.baseline_score,
            total_points: 0,
            representative: data.representative,
            status: ZoneStatus::Active,
            created_at: now,
            updated_at: now,
            last_activity_at: None,
        };
        self.insert_zone(&zone)?;

        self.add_notification(NewNotification {
            kind: NotificationKind::Announcement,
            title: "New Zone Registered".to_string(),
            message: format!("Welcome {} to the Clean-Up League!", zone.name),
            zone_id: None,
            action_url: None,
        })?;

        log::info!("zone registered: {} ({})", zone.name, zone.id);
        Ok(zone)
    }

    /// Merges the supplied fields into the zone and refreshes `updated_at`.
    pub fn update_zone(&self, id: &str, patch: ZonePatch) -> Result<Zone> {
        let mut zone = self.zone(id)?.ok_or_else(|| StoreError::NotFound {
            entity: "zone",
            id: id.to_string(),
        })?;

        if let Some(name) = patch.name {
            zone.name = name;
        }
        if let Some(location) = patch.location {
            zone.location = location;
        }
        if let Some(coordinates) = patch.coordinates {
            zone.coordinates = Some(coordinates);
        }
        if let Some(population) = patch.population {
            zone.population = population;
        }
        if let Some(baseline_score) = patch.baseline_score {
            zone.baseline_score = baseline_score;
        }
        if let Some(current_score) = patch.current_score {
            zone.current_score = current_score;
        }
        if let Some(total_points) = patch.total_points {
            zone.total_points = total_points;
        }
        if let Some(representative) = patch.representative {
            zone.representative = Some(representative);
        }
        if let Some(status) = patch.status {
            zone.status = status;
        }
        if let Some(last_activity_at) = patch.last_activity_at {
            zone.last_activity_at = Some(last_activity_at);
        }
        zone.updated_at = now_millis();

        self.conn.execute(
            "UPDATE zones SET name = ?2, location = ?3, lat = ?4, lng = ?5, population = ?6,
                 baseline_score = ?7, current_score = ?8, total_points = ?9, rep_json = ?10,
                 status = ?11, updated_at = ?12, last_activity_at = ?13
             WHERE id = ?1",
            params![
                zone.id,
                zone.name,
                zone.location,
                zone.coordinates.map(|c| c.lat),
                zone.coordinates.map(|c| c.lng),
                zone.population as i64,
                zone.baseline_score as i64,
                zone.current_score as i64,
                zone.total_points as i64,
                rep_json(zone.representative.as_ref()),
                zone.status,
                zone.updated_at,
                zone.last_activity_at,
            ],
        )?;

        Ok(zone)
    }

    /// Removes the zone; its reports go with it (FK cascade). Rewards and
    /// notifications keep their now-orphaned zone references. Unknown ids
    /// are a silent no-op.
    pub fn delete_zone(&self, id: &str) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM zones WHERE id = ?1", params![id])?;
        if removed > 0 {
            log::info!("zone deleted: {id}");
        }
        Ok(())
    }

    fn insert_zone(&self, zone: &Zone) -> Result<()> {
        self.conn.execute(
            "INSERT INTO zones (id, name, location, lat, lng, population, baseline_score,
                 current_score, total_points, rep_json, status, created_at, updated_at,
                 last_activity_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                zone.id,
                zone.name,
                zone.location,
                zone.coordinates.map(|c| c.lat),
                zone.coordinates.map(|c| c.lng),
                zone.population as i64,
                zone.baseline_score as i64,
                zone.current_score as i64,
                zone.total_points as i64,
                rep_json(zone.representative.as_ref()),
                zone.status,
                zone.created_at,
                zone.updated_at,
                zone.last_activity_at,
            ],
        )?;
        Ok(())
    }
}

fn rep_json(representative: Option<&Representative>) -> Option<String> {
    representative.map(|r| serde_json::to_string(r).unwrap_or_else(|_| "{}".to_string()))
}

pub(super) fn zone_from_row(row: &Row<'_>) -> rusqlite::Result<Zone> {
    let lat: Option<f64> = row.get(3)?;
    let lng: Option<f64> = row.get(4)?;
    let rep: Option<String> = row.get(9)?;

    Ok(Zone {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        coordinates: lat.zip(lng).map(|(lat, lng)| Coordinates { lat, lng }),
        population: row.get::<_, i64>(5)? as u32,
        baseline_score: row.get::<_, i64>(6)? as u32,
        current_score: row.get::<_, i64>(7)? as u32,
        total_points: row.get::<_, i64>(8)? as u64,
        representative: rep.and_then(|raw| serde_json::from_str(&raw).ok()),
        status: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
        last_activity_at: row.get(13)?,
    })
}
