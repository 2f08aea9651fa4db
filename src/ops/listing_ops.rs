use crate::db::{activity_repo, link_repo};
use crate::error::{CrmError, CrmResult};
use crate::model::{ActivityKind, Contact, Id, Listing, NewListing};
use crate::validation;

use super::{require_contact, scope, ServiceContext};

/// Create a listing on behalf of a contact through the listing subsystem,
/// then record the interest link and a `listing-added` log entry. If the
/// subsystem rejects the creation, nothing else is written.
pub fn add_listing(ctx: &ServiceContext, token: &str, input: &NewListing) -> CrmResult<Listing> {
    ctx.authorize(token, scope::ADD_LISTING)?;
    validation::positive(input.owner.value, "owner")?;
    let owner = require_contact(ctx.conn, input.owner)?;
    let title = validation::non_blank(&input.title, "title")?;

    let listing = ctx.listings.create(&NewListing {
        owner: owner.id,
        title: title.clone(),
        attributes: input.attributes.clone(),
    })?;

    link_repo::add_listing(ctx.conn, owner.id, listing.id)?;
    activity_repo::append(
        ctx.conn,
        owner.id,
        &ActivityKind::ListingAdded,
        &format!("Listing added: {}", title),
        Some(listing.id),
    )?;
    Ok(listing)
}

/// Record interest in an existing listing.
pub fn add_interest(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    listing_id: Id<Listing>,
) -> CrmResult<()> {
    ctx.authorize(token, scope::ADD_LISTING)?;
    require_contact(ctx.conn, contact_id)?;
    if !ctx.listings.exists(listing_id)? {
        return Err(CrmError::NotFound {
            entity_type: "Listing".to_string(),
            id: listing_id.to_string(),
        });
    }
    link_repo::add_listing(ctx.conn, contact_id, listing_id)
}

/// Drop an interest link. Idempotent: removing an association that does not
/// exist is a no-op.
pub fn remove_interest(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    listing_id: Id<Listing>,
) -> CrmResult<()> {
    ctx.authorize(token, scope::ADD_LISTING)?;
    require_contact(ctx.conn, contact_id)?;
    link_repo::remove_listing(ctx.conn, contact_id, listing_id)
}
