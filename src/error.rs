use crate::models::ReportStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the store. Every failure is per-call; callers recover by
/// re-issuing a corrected request.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("zone name already registered: {0}")]
    DuplicateName(String),

    /// A report may transition out of Pending exactly once; re-verifying
    /// would double-award points.
    #[error("report {id} is already {}, expected pending", .status.as_str())]
    InvalidTransition { id: String, status: ReportStatus },

    #[error("rewards already distributed for period {0}")]
    AlreadyDistributed(String),

    #[error("unrecognized {kind} value: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
