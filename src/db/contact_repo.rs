use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::db::parse_timestamp;
use crate::error::CrmResult;
use crate::model::{Contact, Id};

/// Insert a new contact. The store assigns the id.
pub fn insert(conn: &Connection, name: &str, email: &str) -> CrmResult<Contact> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO contacts (name, email, created_at) VALUES (?1, ?2, ?3)",
        params![name, email, created_at.to_rfc3339()],
    )?;
    Ok(Contact {
        id: Id::new(conn.last_insert_rowid()),
        name: name.to_string(),
        email: email.to_string(),
        created_at,
    })
}

pub fn update(conn: &Connection, contact: &Contact) -> CrmResult<()> {
    conn.execute(
        "UPDATE contacts SET name = ?1, email = ?2 WHERE id = ?3",
        params![contact.name, contact.email, contact.id.value],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> CrmResult<Option<Contact>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, created_at FROM contacts WHERE id = ?1")?;

    let result = stmt.query_row(params![id.value], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });

    match result {
        Ok((id, name, email, created_at)) => Ok(Some(Contact {
            id: Id::new(id),
            name,
            email,
            created_at: parse_timestamp(&created_at)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_all(conn: &Connection) -> CrmResult<Vec<Contact>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, created_at FROM contacts ORDER BY name, id")?;
    collect_contacts(&mut stmt, params![])
}

pub fn search_by_name(conn: &Connection, query: &str) -> CrmResult<Vec<Contact>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, created_at FROM contacts
         WHERE name LIKE '%' || ?1 || '%' ORDER BY name, id",
    )?;
    collect_contacts(&mut stmt, params![query])
}

/// Delete the contact record and its meta. Returns false when the record was
/// already gone, which a repeat deletion treats as success.
pub fn delete(conn: &Connection, id: Id<Contact>) -> CrmResult<bool> {
    conn.execute(
        "DELETE FROM contact_meta WHERE contact_id = ?1",
        params![id.value],
    )?;
    let rows = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id.value])?;
    Ok(rows > 0)
}

/// Upsert a meta value. An empty value removes the key.
pub fn set_meta(conn: &Connection, id: Id<Contact>, key: &str, value: &str) -> CrmResult<()> {
    if value.is_empty() {
        conn.execute(
            "DELETE FROM contact_meta WHERE contact_id = ?1 AND meta_key = ?2",
            params![id.value, key],
        )?;
    } else {
        conn.execute(
            "INSERT INTO contact_meta (contact_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
             ON CONFLICT(contact_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value",
            params![id.value, key, value],
        )?;
    }
    Ok(())
}

pub fn get_meta(conn: &Connection, id: Id<Contact>, key: &str) -> CrmResult<Option<String>> {
    let mut stmt = conn
        .prepare("SELECT meta_value FROM contact_meta WHERE contact_id = ?1 AND meta_key = ?2")?;

    let result = stmt.query_row(params![id.value, key], |row| row.get::<_, String>(0));

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn all_meta(conn: &Connection, id: Id<Contact>) -> CrmResult<BTreeMap<String, String>> {
    let mut stmt = conn.prepare(
        "SELECT meta_key, meta_value FROM contact_meta WHERE contact_id = ?1 ORDER BY meta_key",
    )?;

    let rows = stmt
        .query_map(params![id.value], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().collect())
}

fn collect_contacts(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> CrmResult<Vec<Contact>> {
    let rows: Vec<(i64, String, String, String)> = stmt
        .query_map(params, |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut contacts = Vec::new();
    for (id, name, email, created_at) in rows {
        contacts.push(Contact {
            id: Id::new(id),
            name,
            email,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(contacts)
}
