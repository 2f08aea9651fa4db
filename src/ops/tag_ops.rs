use crate::db::{contact_repo, tag_repo};
use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, Id, Tag, CATEGORY_META_KEY};
use crate::validation;

use super::{require_contact, ServiceContext};

pub fn create_tag(ctx: &ServiceContext, name: &str) -> CrmResult<Tag> {
    ctx.require_capability()?;
    let name = validation::non_blank(name, "name")?;

    if tag_repo::find_by_name(ctx.conn, &name)?.is_some() {
        return Err(CrmError::AlreadyExists {
            entity_type: "Tag".to_string(),
            identifier: name,
        });
    }

    tag_repo::insert(ctx.conn, &name)
}

/// Attach a tag. Adding one already present is a no-op reported as success.
pub fn add_tag(ctx: &ServiceContext, contact_id: Id<Contact>, tag_id: Id<Tag>) -> CrmResult<()> {
    ctx.require_capability()?;
    require_contact(ctx.conn, contact_id)?;
    tag_repo::find_by_id(ctx.conn, tag_id)?.ok_or_else(|| CrmError::NotFound {
        entity_type: "Tag".to_string(),
        id: tag_id.to_string(),
    })?;
    tag_repo::assign(ctx.conn, contact_id, tag_id)
}

/// Detach a tag. Removing one that is absent is a no-op.
pub fn remove_tag(ctx: &ServiceContext, contact_id: Id<Contact>, tag_id: Id<Tag>) -> CrmResult<()> {
    ctx.require_capability()?;
    require_contact(ctx.conn, contact_id)?;
    tag_repo::unassign(ctx.conn, contact_id, tag_id)
}

/// Set the single-valued category. Last write wins; an empty value clears
/// it. Non-empty values are checked against the configured vocabulary when
/// one is configured.
pub fn set_category(ctx: &ServiceContext, contact_id: Id<Contact>, value: &str) -> CrmResult<()> {
    ctx.require_capability()?;
    require_contact(ctx.conn, contact_id)?;

    let value = value.trim();
    if !value.is_empty()
        && !ctx.config.available_categories.is_empty()
        && !ctx.config.available_categories.iter().any(|c| c == value)
    {
        return Err(CrmError::UnknownCategory {
            value: value.to_string(),
        });
    }

    contact_repo::set_meta(ctx.conn, contact_id, CATEGORY_META_KEY, value)
}

/// Seed the configured tag vocabulary, skipping names already defined.
pub fn ensure_configured_tags(ctx: &ServiceContext) -> CrmResult<Vec<Tag>> {
    ctx.require_capability()?;
    let mut tags = Vec::new();
    for name in &ctx.config.available_tags {
        match tag_repo::find_by_name(ctx.conn, name)? {
            Some(tag) => tags.push(tag),
            None => tags.push(tag_repo::insert(ctx.conn, name)?),
        }
    }
    Ok(tags)
}
