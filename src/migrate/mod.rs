use std::path::Path;

use rusqlite::Connection;
use serde_json::Value;

use crate::db::{activity_repo, contact_repo, schema, tag_repo};
use crate::error::{CrmError, CrmResult};
use crate::model::{ActivityKind, CATEGORY_META_KEY, RESERVED_REQUEST_KEYS};
use crate::validation;

#[derive(Debug)]
pub struct ImportStats {
    pub contacts: usize,
    pub meta_values: usize,
    pub notes: usize,
    pub tags: usize,
}

/// Imports a legacy JSON contact export into a SQLite database. Expects a
/// top-level `contacts` array; each contact carries `name`, optional
/// `email`, `category`, a `meta` object, a `tags` name array and a `notes`
/// array of `{kind, content}` items.
pub fn import_json(json_path: &Path, db_path: &Path) -> CrmResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    import_contacts(&conn, &json)
}

fn import_contacts(conn: &Connection, json: &Value) -> CrmResult<ImportStats> {
    let entries = json["contacts"]
        .as_array()
        .ok_or_else(|| CrmError::Other("Missing contacts array".to_string()))?;

    let mut stats = ImportStats {
        contacts: 0,
        meta_values: 0,
        notes: 0,
        tags: 0,
    };

    for entry in entries {
        let name = entry["name"]
            .as_str()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CrmError::Other("Contact without a name".to_string()))?;

        // Legacy exports carry unvalidated addresses; blank out the broken ones.
        let email = entry["email"]
            .as_str()
            .and_then(|e| validation::optional_email(e).ok())
            .unwrap_or_default();

        let contact = contact_repo::insert(conn, name, &email)?;
        stats.contacts += 1;

        if let Some(meta) = entry["meta"].as_object() {
            for (key, value) in meta {
                if RESERVED_REQUEST_KEYS.contains(&key.as_str()) {
                    continue;
                }
                if let Some(value) = value.as_str() {
                    contact_repo::set_meta(conn, contact.id, key, value)?;
                    stats.meta_values += 1;
                }
            }
        }

        if let Some(category) = entry["category"].as_str() {
            contact_repo::set_meta(conn, contact.id, CATEGORY_META_KEY, category.trim())?;
        }

        if let Some(tags) = entry["tags"].as_array() {
            for tag_name in tags.iter().filter_map(Value::as_str) {
                let tag_name = tag_name.trim();
                if tag_name.is_empty() {
                    continue;
                }
                let tag = match tag_repo::find_by_name(conn, tag_name)? {
                    Some(tag) => tag,
                    None => {
                        stats.tags += 1;
                        tag_repo::insert(conn, tag_name)?
                    }
                };
                tag_repo::assign(conn, contact.id, tag.id)?;
            }
        }

        if let Some(notes) = entry["notes"].as_array() {
            for note in notes {
                let content = note["content"].as_str().map(str::trim).unwrap_or("");
                if content.is_empty() {
                    continue;
                }
                let kind = ActivityKind::from_db_str(note["kind"].as_str().unwrap_or("note"));
                activity_repo::append(conn, contact.id, &kind, content, None)?;
                stats.notes += 1;
            }
        }
    }

    Ok(stats)
}
