use rusqlite::{params, Connection};

use propcrm::db::listing_repo::SqliteListings;
use propcrm::db::{activity_repo, contact_repo, link_repo, listing_repo, schema, tag_repo};
use propcrm::model::{
    ActivityKind, ActivitySort, Contact, Id, NewListing, SortDirection, CATEGORY_META_KEY,
};
use propcrm::queries::{activity_queries, contact_queries};

fn setup() -> (Connection, Contact) {
    let conn = schema::test_connection();
    let contact = contact_repo::insert(&conn, "Jane Doe", "jane@example.com").unwrap();
    (conn, contact)
}

// ==========================================================================
// CONTACT QUERY TESTS
// ==========================================================================

#[test]
fn profile_of_missing_contact_is_none() {
    let (conn, _) = setup();
    assert!(contact_queries::profile(&conn, Id::new(404)).unwrap().is_none());
}

#[test]
fn profile_collects_meta_category_links_and_tags() {
    let (conn, contact) = setup();
    contact_repo::set_meta(&conn, contact.id, "contact_phone", "555-1234").unwrap();
    contact_repo::set_meta(&conn, contact.id, CATEGORY_META_KEY, "buyer").unwrap();
    link_repo::add_listing(&conn, contact.id, Id::new(9)).unwrap();
    let tag = tag_repo::insert(&conn, "hot").unwrap();
    tag_repo::assign(&conn, contact.id, tag.id).unwrap();

    let profile = contact_queries::profile(&conn, contact.id).unwrap().unwrap();
    assert_eq!(profile.contact.name, "Jane Doe");
    assert_eq!(profile.meta.get("contact_phone").unwrap(), "555-1234");
    assert_eq!(profile.category.as_deref(), Some("buyer"));
    assert_eq!(profile.listing_ids, vec![Id::new(9)]);
    assert_eq!(profile.tags.len(), 1);
    assert_eq!(profile.tags[0].name, "hot");
}

#[test]
fn profile_without_category_is_none() {
    let (conn, contact) = setup();
    let profile = contact_queries::profile(&conn, contact.id).unwrap().unwrap();
    assert!(profile.category.is_none());
    assert!(profile.listing_ids.is_empty());
    assert!(profile.tags.is_empty());
}

#[test]
fn all_contacts_sorted_by_name() {
    let (conn, _) = setup();
    contact_repo::insert(&conn, "Aaron", "").unwrap();

    let names: Vec<String> = contact_queries::all_contacts(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Aaron", "Jane Doe"]);
}

// ==========================================================================
// FEED TESTS
// ==========================================================================

#[test]
fn feed_resolves_listing_references() {
    let (conn, contact) = setup();
    let listing =
        listing_repo::insert(&conn, &NewListing::new(contact.id, "12 Hill St")).unwrap();
    activity_repo::append(
        &conn,
        contact.id,
        &ActivityKind::ListingAdded,
        "Listing added: 12 Hill St",
        Some(listing.id),
    )
    .unwrap();

    let store = SqliteListings::new(&conn);
    let items = activity_queries::feed_default(&conn, &store, contact.id, 1, 10).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].listing.as_ref().unwrap().title, "12 Hill St");
}

#[test]
fn feed_degrades_when_listing_disappears() {
    let (conn, contact) = setup();
    let listing = listing_repo::insert(&conn, &NewListing::new(contact.id, "Gone")).unwrap();
    activity_repo::append(&conn, contact.id, &ActivityKind::Note, "about the place",
        Some(listing.id))
        .unwrap();

    conn.execute("DELETE FROM listings WHERE id = ?1", params![listing.id.value])
        .unwrap();

    let store = SqliteListings::new(&conn);
    let items = activity_queries::feed_default(&conn, &store, contact.id, 1, 10).unwrap();
    // The entry still shows, just without its listing.
    assert_eq!(items.len(), 1);
    assert!(items[0].listing.is_none());
    assert_eq!(items[0].entry.listing_id, Some(listing.id));
}

#[test]
fn feed_default_is_most_recent_first() {
    let (conn, contact) = setup();
    for i in 1..=3 {
        activity_repo::append(&conn, contact.id, &ActivityKind::Note, &format!("note {}", i), None)
            .unwrap();
    }

    let store = SqliteListings::new(&conn);
    let items = activity_queries::feed_default(&conn, &store, contact.id, 1, 10).unwrap();
    let contents: Vec<&str> = items.iter().map(|i| i.entry.content.as_str()).collect();
    assert_eq!(contents, vec!["note 3", "note 2", "note 1"]);
}

#[test]
fn feed_honors_sort_options() {
    let (conn, contact) = setup();
    activity_repo::append(&conn, contact.id, &ActivityKind::Note, "a note", None).unwrap();
    activity_repo::append(&conn, contact.id, &ActivityKind::Call, "a call", None).unwrap();

    let store = SqliteListings::new(&conn);
    let items = activity_queries::feed(
        &conn,
        &store,
        contact.id,
        1,
        10,
        ActivitySort::Kind,
        SortDirection::Asc,
    )
    .unwrap();
    assert_eq!(items[0].entry.kind, ActivityKind::Call);
    assert_eq!(items[1].entry.kind, ActivityKind::Note);
}

#[test]
fn activity_count_matches_appends() {
    let (conn, contact) = setup();
    assert_eq!(activity_queries::activity_count(&conn, contact.id).unwrap(), 0);
    activity_repo::append(&conn, contact.id, &ActivityKind::Note, "one", None).unwrap();
    assert_eq!(activity_queries::activity_count(&conn, contact.id).unwrap(), 1);
}

// ==========================================================================
// INTEREST LISTING TESTS
// ==========================================================================

#[test]
fn interest_listings_keep_insertion_order_and_skip_missing() {
    let (conn, contact) = setup();
    let first = listing_repo::insert(&conn, &NewListing::new(contact.id, "First")).unwrap();
    let second = listing_repo::insert(&conn, &NewListing::new(contact.id, "Second")).unwrap();
    link_repo::add_listing(&conn, contact.id, first.id).unwrap();
    link_repo::add_listing(&conn, contact.id, second.id).unwrap();
    // A dangling link to a listing that never existed.
    link_repo::add_listing(&conn, contact.id, Id::new(404)).unwrap();

    let store = SqliteListings::new(&conn);
    let listings = activity_queries::interest_listings(&conn, &store, contact.id).unwrap();
    let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
