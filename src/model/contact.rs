use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Meta key holding the single-valued contact category.
pub const CATEGORY_META_KEY: &str = "contact_category";

/// Request control keys that must never be written through to contact meta,
/// regardless of input.
pub const RESERVED_REQUEST_KEYS: &[&str] = &["_token", "contact_id", "action", "form_submit"];

/// A person/lead record tracked independently of any listing. Extensible
/// attributes (phone, social links, category) live in a side meta table and
/// are surfaced by the query layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id<Contact>,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a contact. `meta` entries with reserved keys are
/// silently dropped.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub meta: BTreeMap<String, String>,
}

impl NewContact {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            meta: BTreeMap::new(),
        }
    }
}

/// Partial update of a contact's top-level fields. `None` leaves the field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
