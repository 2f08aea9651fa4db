use rusqlite::{params, Connection};

use crate::error::CrmResult;
use crate::model::{Contact, Id, Listing};

/// Record a contact's interest in a listing. Idempotent: re-adding keeps the
/// original insertion slot.
pub fn add_listing(
    conn: &Connection,
    contact_id: Id<Contact>,
    listing_id: Id<Listing>,
) -> CrmResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO contact_listing_link (contact_id, listing_id, position)
         VALUES (?1, ?2,
                 (SELECT COALESCE(MAX(position), 0) + 1
                  FROM contact_listing_link WHERE contact_id = ?1))",
        params![contact_id.value, listing_id.value],
    )?;
    Ok(())
}

/// Remove an association. Removing one that does not exist is a no-op.
pub fn remove_listing(
    conn: &Connection,
    contact_id: Id<Contact>,
    listing_id: Id<Listing>,
) -> CrmResult<()> {
    conn.execute(
        "DELETE FROM contact_listing_link WHERE contact_id = ?1 AND listing_id = ?2",
        params![contact_id.value, listing_id.value],
    )?;
    Ok(())
}

/// A contact's interest listings, in insertion order.
pub fn listing_ids(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<Vec<Id<Listing>>> {
    let mut stmt = conn.prepare(
        "SELECT listing_id FROM contact_listing_link WHERE contact_id = ?1 ORDER BY position",
    )?;

    let ids = stmt
        .query_map(params![contact_id.value], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids.into_iter().map(Id::new).collect())
}

pub fn contains(
    conn: &Connection,
    contact_id: Id<Contact>,
    listing_id: Id<Listing>,
) -> CrmResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM contact_listing_link WHERE contact_id = ?1 AND listing_id = ?2",
        params![contact_id.value, listing_id.value],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Drop every association for a contact. Idempotent; used during deletion.
pub fn clear_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<()> {
    conn.execute(
        "DELETE FROM contact_listing_link WHERE contact_id = ?1",
        params![contact_id.value],
    )?;
    Ok(())
}
