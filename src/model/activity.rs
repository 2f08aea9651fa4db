use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::ids::Id;
use super::listing::Listing;

/// Classifies an activity entry. Open-ended: unknown kinds round-trip
/// through `Custom` so site-registered kinds survive storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Note,
    EmailSent,
    Call,
    ListingAdded,
    Custom(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Note => "note",
            ActivityKind::EmailSent => "email-sent",
            ActivityKind::Call => "call",
            ActivityKind::ListingAdded => "listing-added",
            ActivityKind::Custom(kind) => kind,
        }
    }

    /// Parse from database string representation. Never fails; unrecognized
    /// kinds become `Custom`.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "note" => ActivityKind::Note,
            "email-sent" => ActivityKind::EmailSent,
            "call" => ActivityKind::Call,
            "listing-added" => ActivityKind::ListingAdded,
            other => ActivityKind::Custom(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ActivityKind::Note => "Note",
            ActivityKind::EmailSent => "Email Sent",
            ActivityKind::Call => "Call",
            ActivityKind::ListingAdded => "Listing Added",
            ActivityKind::Custom(kind) => kind,
        }
    }
}

/// An immutable, timestamped log item attached to a contact, optionally
/// linked to a listing. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Id<ActivityEntry>,
    pub contact_id: Id<Contact>,
    pub listing_id: Option<Id<Listing>>,
    pub kind: ActivityKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Sortable columns of the activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivitySort {
    #[default]
    CreatedAt,
    Kind,
}

impl ActivitySort {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            ActivitySort::CreatedAt => "created_at",
            ActivitySort::Kind => "kind",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_db_string_roundtrips() {
        for kind in [
            ActivityKind::Note,
            ActivityKind::EmailSent,
            ActivityKind::Call,
            ActivityKind::ListingAdded,
        ] {
            assert_eq!(ActivityKind::from_db_str(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_kind_becomes_custom() {
        let kind = ActivityKind::from_db_str("open-house");
        assert_eq!(kind, ActivityKind::Custom("open-house".to_string()));
        assert_eq!(kind.as_str(), "open-house");
        assert_eq!(kind.display_name(), "open-house");
    }

    #[test]
    fn default_sort_is_created_at_descending() {
        assert_eq!(ActivitySort::default(), ActivitySort::CreatedAt);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }
}
