use std::collections::BTreeMap;

use crate::db::{activity_repo, contact_repo, link_repo, tag_repo};
use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactUpdate, Id, NewContact, RESERVED_REQUEST_KEYS};
use crate::validation;

use super::{require_contact, scope, ServiceContext};

pub fn create_contact(
    ctx: &ServiceContext,
    token: &str,
    input: &NewContact,
) -> CrmResult<Contact> {
    ctx.authorize(token, scope::NEW_CONTACT)?;
    let name = validation::non_blank(&input.name, "name")?;
    let email = validate_email_field(ctx, &input.email)?;

    let contact = contact_repo::insert(ctx.conn, &name, &email)?;
    for (key, value) in &input.meta {
        if is_reserved_key(key) {
            continue;
        }
        contact_repo::set_meta(ctx.conn, contact.id, key, value)?;
    }
    Ok(contact)
}

pub fn edit_contact(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    update: &ContactUpdate,
) -> CrmResult<Contact> {
    ctx.authorize(token, scope::EDIT_CONTACT)?;
    let mut contact = require_contact(ctx.conn, contact_id)?;

    if let Some(name) = &update.name {
        contact.name = validation::non_blank(name, "name")?;
    }
    if let Some(email) = &update.email {
        contact.email = validate_email_field(ctx, email)?;
    }

    contact_repo::update(ctx.conn, &contact)?;
    Ok(contact)
}

/// Delete a contact and everything hanging off it. Interest links, tag
/// assignments and the activity log are cleared before the record itself;
/// each step is idempotent, so the whole operation is safe to repeat and a
/// partially-cleaned contact can be deleted again. Returns whether the
/// record existed this time around.
pub fn delete_contact(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    confirmed: bool,
) -> CrmResult<bool> {
    ctx.authorize(token, scope::DELETE_CONTACT)?;
    if !confirmed {
        ctx.notices.report(
            "contact-delete-no-confirm",
            "Please confirm you want to delete this contact",
        );
        return Err(CrmError::ConfirmationRequired);
    }

    for listing_id in link_repo::listing_ids(ctx.conn, contact_id)? {
        link_repo::remove_listing(ctx.conn, contact_id, listing_id)?;
    }
    activity_repo::delete_all_for_contact(ctx.conn, contact_id)?;
    tag_repo::clear_contact(ctx.conn, contact_id)?;

    match contact_repo::delete(ctx.conn, contact_id) {
        Ok(removed) => Ok(removed),
        Err(CrmError::Database(source)) => Err(CrmError::DeleteFailed {
            id: contact_id.to_string(),
            source,
        }),
        Err(e) => Err(e),
    }
}

/// Route a bag of raw request fields onto a contact: recognized top-level
/// fields update the record, reserved request keys are dropped, and
/// everything else lands in meta. All validation happens before any write.
pub fn update_meta_bulk(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    fields: &BTreeMap<String, String>,
) -> CrmResult<Contact> {
    ctx.authorize(token, scope::META_CONTACT)?;
    let mut contact = require_contact(ctx.conn, contact_id)?;

    let mut meta_writes: Vec<(&str, &str)> = Vec::new();
    for (key, value) in fields {
        if is_reserved_key(key) {
            continue;
        }
        match key.as_str() {
            "name" | "post_title" => contact.name = validation::non_blank(value, "name")?,
            "email" => contact.email = validate_email_field(ctx, value)?,
            _ => meta_writes.push((key, value)),
        }
    }

    for (key, value) in meta_writes {
        contact_repo::set_meta(ctx.conn, contact_id, key, value)?;
    }
    contact_repo::update(ctx.conn, &contact)?;
    Ok(contact)
}

/// Empty emails are allowed; anything else must parse. Failures are also
/// queued on the notice channel for the caller to render.
fn validate_email_field(ctx: &ServiceContext, raw: &str) -> CrmResult<String> {
    match validation::optional_email(raw) {
        Ok(email) => Ok(email),
        Err(e) => {
            ctx.notices
                .report("invalid-email", "Please enter a valid email address.");
            Err(e)
        }
    }
}

fn is_reserved_key(key: &str) -> bool {
    RESERVED_REQUEST_KEYS.contains(&key)
}
