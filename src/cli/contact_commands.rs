use std::collections::BTreeMap;

use crate::cli::context::CliContext;
use crate::model::{ContactUpdate, NewContact};
use crate::ops::{contact_ops, scope};
use crate::queries::{activity_queries, contact_queries};
use crate::validation;

pub fn list(ctx: &CliContext) {
    let contacts = contact_queries::all_contacts(&ctx.conn).unwrap_or_default();
    if contacts.is_empty() {
        println!("No contacts yet. Use 'add' to create one.");
        return;
    }

    println!("Contacts ({}):", contacts.len());
    for contact in &contacts {
        let email = if contact.email.is_empty() {
            String::new()
        } else {
            format!("  <{}>", contact.email)
        };
        println!("  {}  {}{}", contact.id, contact.name, email);
    }
}

pub fn show(ctx: &CliContext, args: &str) {
    let Some(contact) = ctx.find_contact(args) else {
        return;
    };

    let profile = match contact_queries::profile(&ctx.conn, contact.id) {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            println!("Contact disappeared.");
            return;
        }
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!("#{}  {}", profile.contact.id, profile.contact.name);
    if !profile.contact.email.is_empty() {
        println!("  email: {}", profile.contact.email);
    }
    if let Some(category) = &profile.category {
        println!("  category: {}", category);
    }
    if !profile.tags.is_empty() {
        let names: Vec<&str> = profile.tags.iter().map(|t| t.name.as_str()).collect();
        println!("  tags: {}", names.join(", "));
    }
    for (key, value) in &profile.meta {
        if key != crate::model::CATEGORY_META_KEY {
            println!("  {}: {}", key, value);
        }
    }

    let listings = ctx.with_service(|svc| {
        activity_queries::interest_listings(svc.conn, svc.listings, contact.id)
    })
    .unwrap_or_default();
    if !listings.is_empty() {
        println!("  listings:");
        for listing in &listings {
            println!("    {}  {}", listing.id, listing.title);
        }
    }
}

pub fn add(ctx: &CliContext, args: &str) {
    let name = if args.trim().is_empty() {
        match ctx.prompt("Name (required): ") {
            Some(name) if !name.is_empty() => name,
            _ => {
                println!("Name is required.");
                return;
            }
        }
    } else {
        args.trim().to_string()
    };

    let email = ctx.prompt("Email: ").unwrap_or_default();

    let mut input = NewContact::new(&name, &email);
    if let Some(phone) = ctx.prompt("Phone: ") {
        if !phone.is_empty() {
            input.meta.insert("contact_phone".to_string(), phone);
        }
    }

    let token = ctx.token(scope::NEW_CONTACT);
    match ctx.with_service(|svc| contact_ops::create_contact(svc, &token, &input)) {
        Ok(contact) => println!("Added contact {} ({})", contact.name, contact.id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CliContext, args: &str) {
    let Some(contact) = ctx.find_contact(args) else {
        return;
    };

    println!("Editing {} (press Enter to keep a field)", contact.name);
    let name = ctx.prompt(&format!("Name [{}]: ", contact.name));
    let email = ctx.prompt(&format!("Email [{}]: ", contact.email));

    let update = ContactUpdate {
        name: validation::trim_optional(name.as_deref()),
        email: validation::trim_optional(email.as_deref()),
    };

    let token = ctx.token(scope::EDIT_CONTACT);
    match ctx.with_service(|svc| contact_ops::edit_contact(svc, &token, contact.id, &update)) {
        Ok(contact) => println!("Updated {}", contact.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn set_meta(ctx: &CliContext, args: &str) {
    let mut parts = args.splitn(3, ' ');
    let (Some(target), Some(key)) = (parts.next(), parts.next()) else {
        println!("Usage: meta <contact> <key> [value]");
        return;
    };
    let value = parts.next().unwrap_or("").trim().to_string();

    let Some(contact) = ctx.find_contact(target) else {
        return;
    };

    let mut fields = BTreeMap::new();
    fields.insert(key.to_string(), value);

    let token = ctx.token(scope::META_CONTACT);
    match ctx.with_service(|svc| contact_ops::update_meta_bulk(svc, &token, contact.id, &fields)) {
        Ok(_) => println!("Saved."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CliContext, args: &str) {
    let Some(contact) = ctx.find_contact(args) else {
        return;
    };

    let answer = ctx
        .prompt(&format!(
            "Delete {} and all their notes? This cannot be undone (y/N): ",
            contact.name
        ))
        .unwrap_or_default();
    let confirmed = answer.eq_ignore_ascii_case("y");

    let token = ctx.token(scope::DELETE_CONTACT);
    match ctx.with_service(|svc| contact_ops::delete_contact(svc, &token, contact.id, confirmed)) {
        Ok(true) => println!("Deleted {}.", contact.name),
        Ok(false) => println!("Contact was already gone."),
        Err(e) => ctx.print_error(&e),
    }
}
