use rusqlite::Connection;

use crate::db::{activity_repo, link_repo};
use crate::error::CrmResult;
use crate::model::{
    ActivityEntry, ActivitySort, Contact, Id, Listing, ListingStore, SortDirection,
};

/// A feed row: the entry plus its listing, resolved best-effort. Entries
/// whose listing no longer exists still appear, with `listing` unset.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub entry: ActivityEntry,
    pub listing: Option<Listing>,
}

/// One page of a contact's activity feed, most recent first by default.
pub fn feed(
    conn: &Connection,
    listings: &dyn ListingStore,
    contact_id: Id<Contact>,
    page: u32,
    page_size: u32,
    sort: ActivitySort,
    direction: SortDirection,
) -> CrmResult<Vec<FeedItem>> {
    let entries = activity_repo::list_page(conn, contact_id, page, page_size, sort, direction)?;

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let listing = match entry.listing_id {
            Some(id) => listings.get(id).unwrap_or(None),
            None => None,
        };
        items.push(FeedItem { entry, listing });
    }
    Ok(items)
}

pub fn feed_default(
    conn: &Connection,
    listings: &dyn ListingStore,
    contact_id: Id<Contact>,
    page: u32,
    page_size: u32,
) -> CrmResult<Vec<FeedItem>> {
    feed(
        conn,
        listings,
        contact_id,
        page,
        page_size,
        ActivitySort::default(),
        SortDirection::default(),
    )
}

pub fn activity_count(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<i64> {
    activity_repo::count_for_contact(conn, contact_id)
}

/// The listings a contact is interested in, insertion order. Listings the
/// subsystem no longer knows about are skipped.
pub fn interest_listings(
    conn: &Connection,
    listings: &dyn ListingStore,
    contact_id: Id<Contact>,
) -> CrmResult<Vec<Listing>> {
    let mut found = Vec::new();
    for listing_id in link_repo::listing_ids(conn, contact_id)? {
        if let Some(listing) = listings.get(listing_id)? {
            found.push(listing);
        }
    }
    Ok(found)
}
