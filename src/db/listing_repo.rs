use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::db::parse_timestamp;
use crate::error::CrmResult;
use crate::model::{Id, Listing, ListingStore, NewListing};

/// Insert a listing with its attributes. The store assigns the id.
pub fn insert(conn: &Connection, listing: &NewListing) -> CrmResult<Listing> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO listings (owner_id, title, created_at) VALUES (?1, ?2, ?3)",
        params![listing.owner.value, listing.title, created_at.to_rfc3339()],
    )?;
    let id = Id::new(conn.last_insert_rowid());

    for (key, value) in &listing.attributes {
        conn.execute(
            "INSERT INTO listing_meta (listing_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
             ON CONFLICT(listing_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value",
            params![id.value, key, value],
        )?;
    }

    Ok(Listing {
        id,
        owner: Some(listing.owner),
        title: listing.title.clone(),
        attributes: listing.attributes.clone(),
        created_at,
    })
}

pub fn find_by_id(conn: &Connection, id: Id<Listing>) -> CrmResult<Option<Listing>> {
    let mut stmt =
        conn.prepare("SELECT id, owner_id, title, created_at FROM listings WHERE id = ?1")?;

    let result = stmt.query_row(params![id.value], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<i64>>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });

    match result {
        Ok((id, owner, title, created_at)) => {
            let id = Id::new(id);
            Ok(Some(Listing {
                id,
                owner: owner.map(Id::new),
                title,
                attributes: attributes_for(conn, id)?,
                created_at: parse_timestamp(&created_at)?,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn exists(conn: &Connection, id: Id<Listing>) -> CrmResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM listings WHERE id = ?1",
        params![id.value],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn attributes_for(conn: &Connection, id: Id<Listing>) -> CrmResult<BTreeMap<String, String>> {
    let mut stmt = conn.prepare(
        "SELECT meta_key, meta_value FROM listing_meta WHERE listing_id = ?1 ORDER BY meta_key",
    )?;

    let rows = stmt
        .query_map(params![id.value], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().collect())
}

/// SQLite-backed implementation of the listing subsystem interface, used by
/// the CLI and tests. A real deployment can substitute its own.
pub struct SqliteListings<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteListings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ListingStore for SqliteListings<'_> {
    fn create(&self, listing: &NewListing) -> CrmResult<Listing> {
        insert(self.conn, listing)
    }

    fn get(&self, id: Id<Listing>) -> CrmResult<Option<Listing>> {
        find_by_id(self.conn, id)
    }

    fn exists(&self, id: Id<Listing>) -> CrmResult<bool> {
        exists(self.conn, id)
    }
}
