use super::Store;
use crate::error::{Result, StoreError};
use crate::models::{
    CleanupReport, Coordinates, NewNotification, NewReport, NotificationKind, ReportFilter,
    ReportStatus, ScoreOverride, TimePeriod, ZonePatch,
};
use crate::scoring;
use crate::scoring::windows::{now_millis, window_start};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const REPORT_COLUMNS: &str = "id, zone_id, zone_name, before_photo, after_photo, trash_bags, \
     weight_kg, cleanup_date, lat, lng, waste_tags, status, score, breakdown_json, \
     submitted_at, verified_at, verified_by, classification_json";

impl Store {
    /// Reports matching the filter, newest submission first.
    pub fn reports(&self, filter: &ReportFilter) -> Result<Vec<CleanupReport>> {
        let mut sql = format!("SELECT {REPORT_COLUMNS} FROM reports");
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(zone_id) = &filter.zone_id {
            clauses.push("zone_id = ?");
            values.push(zone_id.clone());
        }
        if let Some(status) = filter.status {
            clauses.push("status = ?");
            values.push(status.as_str().to_string());
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY submitted_at DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let reports = stmt
            .query_map(rusqlite::params_from_iter(values), report_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(reports)
    }

    pub fn report(&self, id: &str) -> Result<Option<CleanupReport>> {
        let report = self
            .conn
            .query_row(
                &format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?1"),
                params![id],
                report_from_row,
            )
            .optional()?;
        Ok(report)
    }

    /// Submits a report against an existing zone. The classifier runs over
    /// the waste tags at submission time; the zone itself is untouched until
    /// verification.
    pub fn create_report(&self, data: NewReport) -> Result<CleanupReport> {
        let zone = self.zone(&data.zone_id)?.ok_or_else(|| StoreError::NotFound {
            entity: "zone",
            id: data.zone_id.clone(),
        })?;

        let classification = self.classifier.classify(&data.waste_tags);
        let report = CleanupReport {
            id: Uuid::new_v4().to_string(),
            zone_id: data.zone_id,
            zone_name: zone.name,
            before_photo: data.before_photo,
            after_photo: data.after_photo,
            trash_bags: data.trash_bags,
            weight_kg: data.weight_kg,
            cleanup_date: data.cleanup_date,
            coordinates: data.coordinates,
            waste_tags: data.waste_tags,
            status: ReportStatus::Pending,
            score: None,
            score_breakdown: None,
            submitted_at: now_millis(),
            verified_at: None,
            verified_by: None,
            classification: Some(classification),
        };

        self.conn.execute(
            "INSERT INTO reports (id, zone_id, zone_name, before_photo, after_photo, trash_bags,
                 weight_kg, cleanup_date, lat, lng, waste_tags, status, score, breakdown_json,
                 submitted_at, verified_at, verified_by, classification_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                report.id,
                report.zone_id,
                report.zone_name,
                report.before_photo,
                report.after_photo,
                report.trash_bags as i64,
                report.weight_kg,
                report.cleanup_date,
                report.coordinates.map(|c| c.lat),
                report.coordinates.map(|c| c.lng),
                to_json(&report.waste_tags, "[]"),
                report.status,
                Option::<i64>::None,
                Option::<String>::None,
                report.submitted_at,
                report.verified_at,
                report.verified_by,
                report.classification.as_ref().map(|c| to_json(c, "{}")),
            ],
        )?;

        log::debug!("report submitted for zone {}: {}", report.zone_id, report.id);
        Ok(report)
    }

    /// Decides a pending report. Approval scores the report and credits the
    /// owning zone; rejection only stamps the decision. Either way the
    /// transition is one-way: a second call fails instead of re-running the
    /// side effects.
    pub fn verify_report(
        &self,
        id: &str,
        approved: bool,
        admin_override: Option<&ScoreOverride>,
    ) -> Result<CleanupReport> {
        let mut report = self.report(id)?.ok_or_else(|| StoreError::NotFound {
            entity: "report",
            id: id.to_string(),
        })?;
        if report.status != ReportStatus::Pending {
            return Err(StoreError::InvalidTransition {
                id: report.id,
                status: report.status,
            });
        }

        let now = now_millis();
        if !approved {
            self.conn.execute(
                "UPDATE reports SET status = ?2, verified_at = ?3, verified_by = ?4 WHERE id = ?1",
                params![id, ReportStatus::Rejected, now, "admin"],
            )?;
            report.status = ReportStatus::Rejected;
            report.verified_at = Some(now);
            report.verified_by = Some("admin".to_string());
            log::info!("report rejected: {id}");
            return Ok(report);
        }

        let verified_this_month = self.verified_reports_this_month(&report.zone_id)?;
        let mut breakdown = scoring::calculate_score(&report, verified_this_month, &self.config);
        if let Some(over) = admin_override {
            breakdown = scoring::apply_override(breakdown, over);
        }

        self.conn.execute(
            "UPDATE reports SET status = ?2, score = ?3, breakdown_json = ?4,
                 verified_at = ?5, verified_by = ?6
             WHERE id = ?1",
            params![
                id,
                ReportStatus::Verified,
                breakdown.total as i64,
                to_json(&breakdown, "{}"),
                now,
                "admin",
            ],
        )?;

        if let Some(zone) = self.zone(&report.zone_id)? {
            let gain = breakdown.cleanliness_improvement / self.config.score_gain_divisor.max(1);
            self.update_zone(
                &zone.id,
                ZonePatch {
                    total_points: Some(zone.total_points + u64::from(breakdown.total)),
                    current_score: Some((zone.current_score + gain).min(100)),
                    last_activity_at: Some(now),
                    ..ZonePatch::default()
                },
            )?;

            self.add_notification(NewNotification {
                kind: NotificationKind::ScoreChange,
                title: "Score Updated".to_string(),
                message: format!("Your cleanup earned {} points!", breakdown.total),
                zone_id: Some(zone.id),
                action_url: None,
            })?;
        }

        report.status = ReportStatus::Verified;
        report.score = Some(breakdown.total);
        report.score_breakdown = Some(breakdown);
        report.verified_at = Some(now);
        report.verified_by = Some("admin".to_string());

        log::info!(
            "report verified: {} ({} points for zone {})",
            report.id,
            breakdown.total,
            report.zone_id
        );
        Ok(report)
    }

    fn verified_reports_this_month(&self, zone_id: &str) -> Result<u32> {
        let month_start = window_start(TimePeriod::Monthly, Utc::now());
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM reports
             WHERE zone_id = ?1 AND status = 'verified' AND submitted_at >= ?2",
            params![zone_id, month_start],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }
}

fn to_json<T: serde::Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn report_from_row(row: &Row<'_>) -> rusqlite::Result<CleanupReport> {
    let lat: Option<f64> = row.get(8)?;
    let lng: Option<f64> = row.get(9)?;
    let waste_tags: String = row.get(10)?;
    let breakdown: Option<String> = row.get(13)?;
    let classification: Option<String> = row.get(17)?;

    Ok(CleanupReport {
        id: row.get(0)?,
        zone_id: row.get(1)?,
        zone_name: row.get(2)?,
        before_photo: row.get(3)?,
        after_photo: row.get(4)?,
        trash_bags: row.get::<_, i64>(5)? as u32,
        weight_kg: row.get(6)?,
        cleanup_date: row.get(7)?,
        coordinates: lat.zip(lng).map(|(lat, lng)| Coordinates { lat, lng }),
        waste_tags: serde_json::from_str(&waste_tags).unwrap_or_default(),
        status: row.get(11)?,
        score: row.get::<_, Option<i64>>(12)?.map(|v| v as u32),
        score_breakdown: breakdown.and_then(|raw| serde_json::from_str(&raw).ok()),
        submitted_at: row.get(14)?,
        verified_at: row.get(15)?,
        verified_by: row.get(16)?,
        classification: classification.and_then(|raw| serde_json::from_str(&raw).ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewZone, WasteType};
    use crate::scoring::FixedClassifier;

    fn store() -> Store {
        Store::open_in_memory()
            .expect("open store")
            .with_classifier(Box::new(FixedClassifier::new(40, 80)))
    }

    fn zone(store: &Store, name: &str) -> String {
        store
            .create_zone(NewZone {
                name: name.to_string(),
                location: "Ward 3".to_string(),
                population: 1200,
                baseline_score: 40,
                ..NewZone::default()
            })
            .expect("create zone")
            .id
    }

    fn submit(store: &Store, zone_id: &str, tags: Vec<WasteType>) -> CleanupReport {
        store
            .create_report(NewReport {
                zone_id: zone_id.to_string(),
                before_photo: "before.jpg".to_string(),
                after_photo: "after.jpg".to_string(),
                trash_bags: 5,
                weight_kg: 20.0,
                cleanup_date: "2026-08-30".to_string(),
                coordinates: None,
                waste_tags: tags,
            })
            .expect("create report")
    }

    #[test]
    fn create_report_attaches_classification_and_stays_pending() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::Plastics]);

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.score, None);
        let classification = report.classification.expect("classification");
        assert_eq!(classification.cleanliness_before, 40);
        assert_eq!(classification.cleanliness_after, 80);

        // Submission must not touch the zone.
        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.total_points, 0);
        assert_eq!(zone.current_score, 40);
    }

    #[test]
    fn create_report_for_unknown_zone_is_not_found() {
        let err = store()
            .create_report(NewReport {
                zone_id: "missing".to_string(),
                waste_tags: vec![WasteType::General],
                ..NewReport::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "zone", .. }));
    }

    #[test]
    fn approving_scores_the_report_and_credits_the_zone() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::Plastics]);

        let verified = store
            .verify_report(&report.id, true, None)
            .expect("verify");
        let breakdown = verified.score_breakdown.expect("breakdown");

        // volume: min(35, 5*2 + 20/5) = 14; cleanliness: (80-40)/2 = 20;
        // frequency: no prior verified reports; plastics impact: 3.
        assert_eq!(breakdown.volume_score, 14);
        assert_eq!(breakdown.cleanliness_improvement, 20);
        assert_eq!(breakdown.frequency_bonus, 0);
        assert_eq!(breakdown.waste_type_impact, 3);
        assert_eq!(breakdown.total, 37);
        assert_eq!(verified.score, Some(37));
        assert_eq!(verified.verified_by.as_deref(), Some("admin"));

        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.total_points, 37);
        assert_eq!(zone.current_score, 44); // 40 + floor(20 / 5)
        assert!(zone.last_activity_at.is_some());

        let score_changes: Vec<_> = store
            .notifications(Some(&zone_id))
            .expect("notifications")
            .into_iter()
            .filter(|n| n.kind == NotificationKind::ScoreChange)
            .collect();
        assert_eq!(score_changes.len(), 1);
        assert!(score_changes[0].message.contains("37"));
    }

    #[test]
    fn second_verified_report_earns_a_frequency_bonus() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let first = submit(&store, &zone_id, vec![WasteType::Plastics]);
        let second = submit(&store, &zone_id, vec![WasteType::Plastics]);

        store.verify_report(&first.id, true, None).expect("first");
        let verified = store
            .verify_report(&second.id, true, None)
            .expect("second");

        let breakdown = verified.score_breakdown.expect("breakdown");
        assert_eq!(breakdown.frequency_bonus, 5);
    }

    #[test]
    fn rejection_stamps_the_decision_without_side_effects() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::Plastics]);

        let rejected = store
            .verify_report(&report.id, false, None)
            .expect("reject");
        assert_eq!(rejected.status, ReportStatus::Rejected);
        assert_eq!(rejected.score, None);

        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.total_points, 0);
        assert_eq!(zone.current_score, 40);

        let kinds: Vec<_> = store
            .notifications(Some(&zone_id))
            .expect("notifications")
            .into_iter()
            .map(|n| n.kind)
            .collect();
        assert!(!kinds.contains(&NotificationKind::ScoreChange));
    }

    #[test]
    fn re_verifying_a_decided_report_fails_instead_of_double_awarding() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::Plastics]);

        store.verify_report(&report.id, true, None).expect("first");
        let err = store.verify_report(&report.id, true, None).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));

        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.total_points, 37);
    }

    #[test]
    fn admin_override_recomputes_total_from_final_components() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::Plastics]);

        let verified = store
            .verify_report(
                &report.id,
                true,
                Some(&ScoreOverride {
                    cleanliness_improvement: Some(10),
                    ..ScoreOverride::default()
                }),
            )
            .expect("verify with override");

        let breakdown = verified.score_breakdown.expect("breakdown");
        assert_eq!(breakdown.cleanliness_improvement, 10);
        assert_eq!(breakdown.total, 14 + 10 + 3);

        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.total_points, 27);
        assert_eq!(zone.current_score, 42); // 40 + floor(10 / 5)
    }

    #[test]
    fn current_score_is_clamped_at_one_hundred() {
        let store = Store::open_in_memory()
            .expect("open store")
            .with_classifier(Box::new(FixedClassifier::new(0, 100)));
        let zone_id = store
            .create_zone(NewZone {
                name: "Hilltop".to_string(),
                baseline_score: 95,
                ..NewZone::default()
            })
            .expect("create zone")
            .id;

        let report = submit(&store, &zone_id, vec![WasteType::General]);
        store.verify_report(&report.id, true, None).expect("verify");

        let zone = store.zone(&zone_id).expect("query").expect("exists");
        assert_eq!(zone.current_score, 100);
    }

    #[test]
    fn filters_narrow_by_zone_and_status() {
        let store = store();
        let a = zone(&store, "A");
        let b = zone(&store, "B");
        let ra = submit(&store, &a, vec![WasteType::General]);
        submit(&store, &b, vec![WasteType::General]);

        store.verify_report(&ra.id, true, None).expect("verify");

        let verified = store
            .reports(&ReportFilter {
                status: Some(ReportStatus::Verified),
                ..ReportFilter::default()
            })
            .expect("by status");
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].id, ra.id);

        let for_b = store
            .reports(&ReportFilter {
                zone_id: Some(b.clone()),
                ..ReportFilter::default()
            })
            .expect("by zone");
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].zone_id, b);
    }

    #[test]
    fn zone_rename_keeps_the_report_name_snapshot() {
        let store = store();
        let zone_id = zone(&store, "Riverside");
        let report = submit(&store, &zone_id, vec![WasteType::General]);

        store
            .update_zone(
                &zone_id,
                ZonePatch {
                    name: Some("Riverbend".to_string()),
                    ..ZonePatch::default()
                },
            )
            .expect("rename");

        let loaded = store.report(&report.id).expect("query").expect("exists");
        assert_eq!(loaded.zone_name, "Riverside");
    }
}
