use std::path::PathBuf;

use rusqlite::Connection;

use propcrm::db::{activity_repo, contact_repo, tag_repo};
use propcrm::migrate;
use propcrm::model::CATEGORY_META_KEY;
use propcrm::queries::contact_queries;

struct TempPaths {
    json: PathBuf,
    db: PathBuf,
}

impl TempPaths {
    fn new(label: &str) -> Self {
        let dir = std::env::temp_dir();
        let prefix = format!("propcrm-{}-{}", label, std::process::id());
        Self {
            json: dir.join(format!("{}.json", prefix)),
            db: dir.join(format!("{}.db", prefix)),
        }
    }
}

impl Drop for TempPaths {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.json);
        let _ = std::fs::remove_file(&self.db);
    }
}

#[test]
fn import_builds_contacts_with_everything_attached() {
    let paths = TempPaths::new("full");
    std::fs::write(
        &paths.json,
        r#"{
            "contacts": [
                {
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "category": "buyer",
                    "meta": {
                        "contact_phone": "555-1234",
                        "_token": "should-not-land"
                    },
                    "tags": ["hot", "buyer"],
                    "notes": [
                        {"kind": "note", "content": "Met at open home"},
                        {"kind": "call", "content": "Followed up"},
                        {"kind": "note", "content": "   "}
                    ]
                },
                {
                    "name": "John Smith",
                    "email": "not-an-email",
                    "tags": ["hot"]
                }
            ]
        }"#,
    )
    .unwrap();

    let stats = migrate::import_json(&paths.json, &paths.db).unwrap();
    assert_eq!(stats.contacts, 2);
    assert_eq!(stats.meta_values, 1);
    assert_eq!(stats.notes, 2);
    // "hot" is created once and reused for the second contact.
    assert_eq!(stats.tags, 2);

    let conn = Connection::open(&paths.db).unwrap();
    let contacts = contact_repo::find_all(&conn).unwrap();
    assert_eq!(contacts.len(), 2);

    let jane = contacts.iter().find(|c| c.name == "Jane Doe").unwrap();
    let profile = contact_queries::profile(&conn, jane.id).unwrap().unwrap();
    assert_eq!(profile.category.as_deref(), Some("buyer"));
    assert_eq!(profile.meta.get("contact_phone").unwrap(), "555-1234");
    assert!(!profile.meta.contains_key("_token"));
    assert_eq!(profile.tags.len(), 2);
    assert_eq!(activity_repo::count_for_contact(&conn, jane.id).unwrap(), 2);

    // Broken legacy addresses import as blank.
    let john = contacts.iter().find(|c| c.name == "John Smith").unwrap();
    assert_eq!(john.email, "");
    assert_eq!(
        contact_repo::get_meta(&conn, john.id, CATEGORY_META_KEY).unwrap(),
        None
    );
    assert_eq!(tag_repo::all(&conn).unwrap().len(), 2);
}

#[test]
fn import_rejects_missing_contacts_array() {
    let paths = TempPaths::new("empty");
    std::fs::write(&paths.json, r#"{"people": []}"#).unwrap();
    assert!(migrate::import_json(&paths.json, &paths.db).is_err());
}

#[test]
fn import_rejects_nameless_contact() {
    let paths = TempPaths::new("nameless");
    std::fs::write(&paths.json, r#"{"contacts": [{"email": "x@example.com"}]}"#).unwrap();
    assert!(migrate::import_json(&paths.json, &paths.db).is_err());
}
