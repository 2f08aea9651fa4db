use crate::db::activity_repo;
use crate::error::CrmResult;
use crate::model::{ActivityEntry, ActivityKind, Contact, Id, Listing};
use crate::validation;

use super::{require_contact, scope, ServiceContext};

/// Append a note to a contact's activity log. The listing reference is
/// optional and not required to resolve; the feed degrades gracefully if the
/// listing later disappears.
pub fn add_note(
    ctx: &ServiceContext,
    token: &str,
    contact_id: Id<Contact>,
    content: &str,
    kind: &ActivityKind,
    listing_id: Option<Id<Listing>>,
) -> CrmResult<ActivityEntry> {
    ctx.authorize(token, scope::ADD_NOTE)?;
    let contact = require_contact(ctx.conn, contact_id)?;

    let content = match validation::non_blank(content, "note") {
        Ok(content) => content,
        Err(e) => {
            ctx.notices
                .report("empty-contact-note", "A note is required");
            return Err(e);
        }
    };

    activity_repo::append(ctx.conn, contact.id, kind, &content, listing_id)
}
