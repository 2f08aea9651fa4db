use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::db::{contact_repo, link_repo, tag_repo};
use crate::error::CrmResult;
use crate::model::{Contact, Id, Listing, Tag, CATEGORY_META_KEY};

/// A contact with its derived views: meta, category, interest listing ids
/// and assigned tags.
#[derive(Debug, Clone)]
pub struct ContactProfile {
    pub contact: Contact,
    pub meta: BTreeMap<String, String>,
    pub category: Option<String>,
    pub listing_ids: Vec<Id<Listing>>,
    pub tags: Vec<Tag>,
}

pub fn profile(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<Option<ContactProfile>> {
    let contact = match contact_repo::find_by_id(conn, contact_id)? {
        Some(contact) => contact,
        None => return Ok(None),
    };

    let meta = contact_repo::all_meta(conn, contact_id)?;
    let category = meta.get(CATEGORY_META_KEY).cloned();

    Ok(Some(ContactProfile {
        contact,
        category,
        meta,
        listing_ids: link_repo::listing_ids(conn, contact_id)?,
        tags: tag_repo::tags_for_contact(conn, contact_id)?,
    }))
}

pub fn get_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<Option<Contact>> {
    contact_repo::find_by_id(conn, contact_id)
}

pub fn all_contacts(conn: &Connection) -> CrmResult<Vec<Contact>> {
    contact_repo::find_all(conn)
}

pub fn search_by_name(conn: &Connection, query: &str) -> CrmResult<Vec<Contact>> {
    contact_repo::search_by_name(conn, query)
}
