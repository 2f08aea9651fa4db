use crate::cli::context::CliContext;
use crate::db::tag_repo;
use crate::error::CrmError;
use crate::ops::tag_ops;

pub fn list_tags(ctx: &CliContext) {
    let tags = tag_repo::all(&ctx.conn).unwrap_or_default();
    if tags.is_empty() {
        println!("No tags defined.");
        return;
    }
    for tag in &tags {
        println!("  {}  {}  {}", tag.id, tag.name, tag.color_hint());
    }
}

pub fn tag(ctx: &CliContext, args: &str) {
    let mut parts = args.splitn(2, ' ');
    let (Some(target), Some(name)) = (parts.next(), parts.next()) else {
        println!("Usage: tag <contact> <tag-name>");
        return;
    };

    let Some(contact) = ctx.find_contact(target) else {
        return;
    };

    let result = ctx.with_service(|svc| {
        // Create the tag on first use.
        let tag = match tag_repo::find_by_name(svc.conn, name.trim())? {
            Some(tag) => tag,
            None => tag_ops::create_tag(svc, name)?,
        };
        tag_ops::add_tag(svc, contact.id, tag.id)?;
        Ok::<_, CrmError>(tag)
    });

    match result {
        Ok(tag) => println!("Tagged {} with {}", contact.name, tag.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn untag(ctx: &CliContext, args: &str) {
    let mut parts = args.splitn(2, ' ');
    let (Some(target), Some(name)) = (parts.next(), parts.next()) else {
        println!("Usage: untag <contact> <tag-name>");
        return;
    };

    let Some(contact) = ctx.find_contact(target) else {
        return;
    };

    let result = ctx.with_service(|svc| {
        match tag_repo::find_by_name(svc.conn, name.trim())? {
            Some(tag) => tag_ops::remove_tag(svc, contact.id, tag.id),
            // Removing an unknown tag is as much of a no-op as removing an
            // unassigned one.
            None => Ok(()),
        }
    });

    match result {
        Ok(()) => println!("Untagged."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn category(ctx: &CliContext, args: &str) {
    let mut parts = args.splitn(2, ' ');
    let Some(target) = parts.next().filter(|t| !t.is_empty()) else {
        println!("Usage: category <contact> [value]");
        return;
    };
    let value = parts.next().unwrap_or("").trim();

    let Some(contact) = ctx.find_contact(target) else {
        return;
    };

    match ctx.with_service(|svc| tag_ops::set_category(svc, contact.id, value)) {
        Ok(()) if value.is_empty() => println!("Category cleared."),
        Ok(()) => println!("Category set to {}.", value),
        Err(CrmError::UnknownCategory { value }) => {
            println!("Unknown category '{}'. Available:", value);
            for category in &ctx.config.available_categories {
                println!("  {}", category);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
