use crate::models::sql_text_enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Reminder,
    Alert,
    Announcement,
    ScoreChange,
    Reward,
}

sql_text_enum!(NotificationKind {
    Reminder => "reminder",
    Alert => "alert",
    Announcement => "announcement",
    ScoreChange => "score-change",
    Reward => "reward",
});

/// A lifecycle event surfaced to the presentation layer. Entries without a
/// `zone_id` are league-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub zone_id: Option<String>,
    pub read: bool,
    pub created_at: i64,
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub zone_id: Option<String>,
    pub action_url: Option<String>,
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Announcement
    }
}
