use rusqlite::{params, Connection};

use crate::error::CrmResult;
use crate::model::{Contact, Id, Tag};

/// Insert a tag definition. Callers check for an existing name first.
pub fn insert(conn: &Connection, name: &str) -> CrmResult<Tag> {
    conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])?;
    Ok(Tag {
        id: Id::new(conn.last_insert_rowid()),
        name: name.to_string(),
    })
}

pub fn find_by_id(conn: &Connection, id: Id<Tag>) -> CrmResult<Option<Tag>> {
    let mut stmt = conn.prepare("SELECT id, name FROM tags WHERE id = ?1")?;

    let result = stmt.query_row(params![id.value], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    });

    match result {
        Ok((id, name)) => Ok(Some(Tag {
            id: Id::new(id),
            name,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_name(conn: &Connection, name: &str) -> CrmResult<Option<Tag>> {
    let mut stmt = conn.prepare("SELECT id, name FROM tags WHERE name = ?1 COLLATE NOCASE")?;

    let result = stmt.query_row(params![name], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    });

    match result {
        Ok((id, name)) => Ok(Some(Tag {
            id: Id::new(id),
            name,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn all(conn: &Connection) -> CrmResult<Vec<Tag>> {
    let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY name")?;

    let tags = stmt
        .query_map(params![], |row| {
            Ok(Tag {
                id: Id::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tags)
}

/// Attach a tag to a contact. Idempotent.
pub fn assign(conn: &Connection, contact_id: Id<Contact>, tag_id: Id<Tag>) -> CrmResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO contact_tags (contact_id, tag_id) VALUES (?1, ?2)",
        params![contact_id.value, tag_id.value],
    )?;
    Ok(())
}

/// Detach a tag from a contact. No-op if absent.
pub fn unassign(conn: &Connection, contact_id: Id<Contact>, tag_id: Id<Tag>) -> CrmResult<()> {
    conn.execute(
        "DELETE FROM contact_tags WHERE contact_id = ?1 AND tag_id = ?2",
        params![contact_id.value, tag_id.value],
    )?;
    Ok(())
}

pub fn tag_ids(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<Vec<Id<Tag>>> {
    let mut stmt =
        conn.prepare("SELECT tag_id FROM contact_tags WHERE contact_id = ?1 ORDER BY tag_id")?;

    let ids = stmt
        .query_map(params![contact_id.value], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids.into_iter().map(Id::new).collect())
}

pub fn tags_for_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name FROM tags t
         JOIN contact_tags ct ON ct.tag_id = t.id
         WHERE ct.contact_id = ?1 ORDER BY t.name",
    )?;

    let tags = stmt
        .query_map(params![contact_id.value], |row| {
            Ok(Tag {
                id: Id::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tags)
}

/// Drop every tag assignment for a contact. Idempotent; used during deletion.
pub fn clear_contact(conn: &Connection, contact_id: Id<Contact>) -> CrmResult<()> {
    conn.execute(
        "DELETE FROM contact_tags WHERE contact_id = ?1",
        params![contact_id.value],
    )?;
    Ok(())
}
