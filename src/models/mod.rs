pub mod leaderboard;
pub mod notification;
pub mod report;
pub mod reward;
pub mod zone;

pub use leaderboard::{AdminStats, LeaderboardEntry, TimePeriod};
pub use notification::{NewNotification, Notification, NotificationKind};
pub use report::{
    AiClassification, CleanupReport, NewReport, ReportFilter, ReportStatus, ScoreBreakdown,
    ScoreOverride, VerificationStatus, WasteType,
};
pub use reward::{Reward, RewardTier, RewardType, Sponsor};
pub use zone::{Coordinates, NewZone, Representative, Zone, ZonePatch, ZoneStatus};

/// Wires a unit enum to its canonical text form: `as_str`, `FromStr`, and the
/// rusqlite conversions, so status/tier/tag columns map straight from rows.
macro_rules! sql_text_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::error::StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::error::StoreError::UnknownValue {
                        kind: stringify!($ty),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl rusqlite::types::ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl rusqlite::types::FromSql for $ty {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse::<$ty>()
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

pub(crate) use sql_text_enum;
