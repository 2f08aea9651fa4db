use crate::cli::context::CliContext;
use crate::model::listing::{DEFAULT_STATUSES, STATUS_ATTR, TYPE_ATTR};
use crate::model::{ActivityKind, Id, Listing, NewListing};
use crate::ops::{listing_ops, note_ops, scope};
use crate::queries::activity_queries;

const FEED_PAGE_SIZE: u32 = 10;

pub fn add_note(ctx: &CliContext, args: &str) {
    let Some(contact) = ctx.find_contact(args) else {
        return;
    };

    let Some(content) = ctx.prompt("Note: ") else {
        return;
    };
    let kind = match ctx.prompt("Kind [note]: ").unwrap_or_default().as_str() {
        "" => ActivityKind::Note,
        other => ActivityKind::from_db_str(other),
    };
    let listing_id = ctx
        .prompt("Listing id (optional): ")
        .filter(|s| !s.is_empty())
        .and_then(|s| Id::<Listing>::parse(&s).ok());

    let token = ctx.token(scope::ADD_NOTE);
    match ctx.with_service(|svc| {
        note_ops::add_note(svc, &token, contact.id, &content, &kind, listing_id)
    }) {
        Ok(entry) => println!(
            "Logged {} #{}",
            ctx.config.activity_label(&entry.kind),
            entry.id
        ),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn feed(ctx: &CliContext, args: &str) {
    let mut parts = args.splitn(2, ' ');
    let target = parts.next().unwrap_or("");
    let page: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(1);

    let Some(contact) = ctx.find_contact(target) else {
        return;
    };

    let items = match ctx.with_service(|svc| {
        activity_queries::feed_default(svc.conn, svc.listings, contact.id, page, FEED_PAGE_SIZE)
    }) {
        Ok(items) => items,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if items.is_empty() {
        println!("No activity on page {}.", page);
        return;
    }

    let total = activity_queries::activity_count(&ctx.conn, contact.id).unwrap_or(0);
    println!(
        "Activity for {} (page {}, {} total):",
        contact.name, page, total
    );
    for item in &items {
        let label = ctx.config.activity_label(&item.entry.kind);
        let listing = match (&item.listing, item.entry.listing_id) {
            (Some(listing), _) => format!("  [{}]", listing.title),
            (None, Some(_)) => "  [listing removed]".to_string(),
            (None, None) => String::new(),
        };
        println!(
            "  {}  {}  {}{}",
            item.entry.created_at.format("%Y-%m-%d %H:%M"),
            label,
            item.entry.content,
            listing
        );
    }
}

pub fn add_listing(ctx: &CliContext, args: &str) {
    let Some(contact) = ctx.find_contact(args) else {
        return;
    };

    let Some(title) = ctx.prompt("Title: ") else {
        return;
    };

    let status_prompt = format!("Status ({}) [new]: ", DEFAULT_STATUSES.join("/"));
    let mut input = NewListing::new(contact.id, &title);
    for (key, prompt) in [
        ("property_address_street", "Street: "),
        ("property_address_suburb", "Suburb: "),
        (TYPE_ATTR, "Listing type: "),
        (STATUS_ATTR, status_prompt.as_str()),
    ] {
        if let Some(value) = ctx.prompt(prompt) {
            if !value.is_empty() {
                input.attributes.insert(key.to_string(), value);
            }
        }
    }
    input
        .attributes
        .entry(STATUS_ATTR.to_string())
        .or_insert_with(|| "new".to_string());

    let token = ctx.token(scope::ADD_LISTING);
    match ctx.with_service(|svc| listing_ops::add_listing(svc, &token, &input)) {
        Ok(listing) => println!("Added listing {} ({})", listing.title, listing.id),
        Err(e) => ctx.print_error(&e),
    }
}
