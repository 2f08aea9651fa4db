pub mod schema;
pub mod contact_repo;
pub mod link_repo;
pub mod activity_repo;
pub mod tag_repo;
pub mod listing_repo;

use chrono::{DateTime, Utc};

use crate::error::{CrmError, CrmResult};

/// Timestamps are stored as RFC 3339 text.
pub(crate) fn parse_timestamp(s: &str) -> CrmResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CrmError::Other(format!("Invalid timestamp: {}", e)))
}
