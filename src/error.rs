use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("Invalid email address: {value}")]
    InvalidEmail { value: String },

    #[error("Unknown contact category: {value}")]
    UnknownCategory { value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Missing capability: {capability}")]
    PermissionDenied { capability: String },

    #[error("Invalid or stale token for {scope}")]
    InvalidToken { scope: String },

    #[error("Deletion requires explicit confirmation")]
    ConfirmationRequired,

    #[error("Request aborted: unresolved notices pending")]
    PendingNotices,

    #[error("Failed to delete contact {id}")]
    DeleteFailed {
        id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type CrmResult<T> = Result<T, CrmError>;
