use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::ids::Id;
use crate::error::CrmResult;

/// Attribute key holding the listing status.
pub const STATUS_ATTR: &str = "listing_status";

/// Attribute key holding the listing type.
pub const TYPE_ATTR: &str = "listing_type";

/// Statuses a contact-created listing starts its life in.
pub const DEFAULT_STATUSES: &[&str] = &["appraisal", "new", "hot"];

/// A property record a contact may be associated with. Listings are owned by
/// the listing subsystem; this crate only records the association.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Id<Listing>,
    pub owner: Option<Id<Contact>>,
    pub title: String,
    pub attributes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a listing on behalf of a contact.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner: Id<Contact>,
    pub title: String,
    pub attributes: BTreeMap<String, String>,
}

impl NewListing {
    pub fn new(owner: Id<Contact>, title: &str) -> Self {
        Self {
            owner,
            title: title.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }
}

/// The external listing subsystem as seen by the contact service.
pub trait ListingStore {
    fn create(&self, listing: &NewListing) -> CrmResult<Listing>;
    fn get(&self, id: Id<Listing>) -> CrmResult<Option<Listing>>;
    fn exists(&self, id: Id<Listing>) -> CrmResult<bool>;
}
