use chrono::Utc;
use rusqlite::{params, Connection};

use crate::db::parse_timestamp;
use crate::error::CrmResult;
use crate::model::{ActivityEntry, ActivityKind, ActivitySort, Contact, Id, Listing, SortDirection};

/// Append an entry to the log. Entries are immutable once written.
pub fn append(
    conn: &Connection,
    contact_id: Id<Contact>,
    kind: &ActivityKind,
    content: &str,
    listing_id: Option<Id<Listing>>,
) -> CrmResult<ActivityEntry> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO activity_log (contact_id, listing_id, kind, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            contact_id.value,
            listing_id.map(|l| l.value),
            kind.as_str(),
            content,
            created_at.to_rfc3339(),
        ],
    )?;
    Ok(ActivityEntry {
        id: Id::new(conn.last_insert_rowid()),
        contact_id,
        listing_id,
        kind: kind.clone(),
        content: content.to_string(),
        created_at,
    })
}

/// One page of a contact's log, 1-indexed. The entry id is a secondary sort
/// key so pages partition cleanly even with equal timestamps.
pub fn list_page(
    conn: &Connection,
    contact_id: Id<Contact>,
    page: u32,
    page_size: u32,
    sort: ActivitySort,
    direction: SortDirection,
) -> CrmResult<Vec<ActivityEntry>> {
    let page = page.max(1);
    let offset = (page - 1) * page_size;
    let sql = format!(
        "SELECT id, contact_id, listing_id, kind, content, created_at
         FROM activity_log WHERE contact_id = ?1
         ORDER BY {} {}, id {} LIMIT ?2 OFFSET ?3",
        sort.column(),
        direction.keyword(),
        direction.keyword(),
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows: Vec<(i64, i64, Option<i64>, String, String, String)> = stmt
        .query_map(params![contact_id.value, page_size, offset], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut entries = Vec::new();
    for (id, contact_id, listing_id, kind, content, created_at) in rows {
        entries.push(ActivityEntry {
            id: Id::new(id),
            contact_id: Id::new(contact_id),
            listing_id: listing_id.map(Id::new),
            kind: ActivityKind::from_db_str(&kind),
            content,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(entries)
}

pub fn count_for_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM activity_log WHERE contact_id = ?1",
        params![contact_id.value],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Remove every entry for a contact. Idempotent; used during deletion.
pub fn delete_all_for_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<()> {
    conn.execute(
        "DELETE FROM activity_log WHERE contact_id = ?1",
        params![contact_id.value],
    )?;
    Ok(())
}
