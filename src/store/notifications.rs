use super::Store;
use crate::error::Result;
use crate::models::{NewNotification, Notification};
use crate::scoring::windows::now_millis;
use rusqlite::{params, Row};
use uuid::Uuid;

const NOTIFICATION_COLUMNS: &str =
    "id, kind, title, message, zone_id, read, created_at, action_url";

impl Store {
    /// Newest first. With a zone id, returns that zone's notifications plus
    /// the league-wide ones.
    pub fn notifications(&self, zone_id: Option<&str>) -> Result<Vec<Notification>> {
        let sql = match zone_id {
            Some(_) => format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications
                 WHERE zone_id IS NULL OR zone_id = ?1
                 ORDER BY created_at DESC"
            ),
            None => format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC"
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let notifications = match zone_id {
            Some(zone_id) => stmt
                .query_map(params![zone_id], notification_from_row)?
                .filter_map(|r| r.ok())
                .collect(),
            None => stmt
                .query_map([], notification_from_row)?
                .filter_map(|r| r.ok())
                .collect(),
        };
        Ok(notifications)
    }

    pub fn add_notification(&self, data: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind: data.kind,
            title: data.title,
            message: data.message,
            zone_id: data.zone_id,
            read: false,
            created_at: now_millis(),
            action_url: data.action_url,
        };

        self.conn.execute(
            "INSERT INTO notifications (id, kind, title, message, zone_id, read, created_at, action_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                notification.id,
                notification.kind,
                notification.title,
                notification.message,
                notification.zone_id,
                notification.read,
                notification.created_at,
                notification.action_url,
            ],
        )?;

        Ok(notification)
    }

    /// No-op on unknown ids.
    pub fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    pub fn mark_all_notifications_read(&self) -> Result<()> {
        self.conn.execute("UPDATE notifications SET read = 1", [])?;
        Ok(())
    }
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        kind: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        zone_id: row.get(4)?,
        read: row.get(5)?,
        created_at: row.get(6)?,
        action_url: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn store() -> Store {
        Store::open_in_memory().expect("open store")
    }

    fn notify(store: &Store, title: &str, zone_id: Option<&str>) -> Notification {
        store
            .add_notification(NewNotification {
                kind: NotificationKind::Alert,
                title: title.to_string(),
                message: "test".to_string(),
                zone_id: zone_id.map(str::to_string),
                action_url: None,
            })
            .expect("add notification")
    }

    #[test]
    fn add_notification_defaults_to_unread() {
        let store = store();
        let n = notify(&store, "Heads up", None);
        assert!(!n.read);
        assert!(!n.id.is_empty());
    }

    #[test]
    fn zone_filter_includes_league_wide_entries() {
        let store = store();
        notify(&store, "global", None);
        notify(&store, "for z1", Some("z1"));
        notify(&store, "for z2", Some("z2"));

        let visible = store.notifications(Some("z1")).expect("notifications");
        let titles: Vec<_> = visible.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(visible.len(), 2);
        assert!(titles.contains(&"global"));
        assert!(titles.contains(&"for z1"));
    }

    #[test]
    fn mark_read_flags_one_then_all() {
        let store = store();
        let first = notify(&store, "one", None);
        notify(&store, "two", None);

        store.mark_notification_read(&first.id).expect("mark one");
        let after_one = store.notifications(None).expect("list");
        assert_eq!(after_one.iter().filter(|n| n.read).count(), 1);

        store.mark_all_notifications_read().expect("mark all");
        let after_all = store.notifications(None).expect("list");
        assert!(after_all.iter().all(|n| n.read));
    }

    #[test]
    fn mark_read_on_unknown_id_is_a_no_op() {
        let store = store();
        notify(&store, "one", None);
        store.mark_notification_read("missing").expect("no-op");
        let all = store.notifications(None).expect("list");
        assert!(all.iter().all(|n| !n.read));
    }
}
