pub mod contact_ops;
pub mod listing_ops;
pub mod note_ops;
pub mod tag_ops;

use rusqlite::Connection;

use crate::auth::{AccessPolicy, TokenValidator};
use crate::db::contact_repo;
use crate::error::{CrmError, CrmResult};
use crate::model::{ActivityKind, Contact, Id, ListingStore};
use crate::notice::NoticeChannel;

/// Token scopes bound to each externally-sourced mutation.
pub mod scope {
    pub const NEW_CONTACT: &str = "new-contact";
    pub const EDIT_CONTACT: &str = "edit-contact";
    pub const DELETE_CONTACT: &str = "delete-contact";
    pub const ADD_NOTE: &str = "add-contact-note";
    pub const ADD_LISTING: &str = "add-contact-listing";
    pub const META_CONTACT: &str = "meta-contact";
}

/// Site-configurable knobs, passed in explicitly instead of read from
/// ambient host state.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Capability the caller must hold for any mutating operation.
    pub required_capability: String,
    /// Accepted category values. Empty means any value is accepted.
    pub available_categories: Vec<String>,
    /// Tag names seeded by `tag_ops::ensure_configured_tags`.
    pub available_tags: Vec<String>,
    /// Display-label overrides for activity kinds, keyed by kind string.
    pub activity_labels: Vec<(String, String)>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            required_capability: "manage-contacts".to_string(),
            available_categories: [
                "appraisal",
                "lead",
                "past_customer",
                "contract",
                "buyer",
                "seller",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            available_tags: Vec::new(),
            activity_labels: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Display label for an activity kind: configured override first, then
    /// the kind's built-in name.
    pub fn activity_label(&self, kind: &ActivityKind) -> String {
        self.activity_labels
            .iter()
            .find(|(key, _)| key == kind.as_str())
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| kind.display_name().to_string())
    }
}

/// Everything a service operation needs: the store connection, the
/// configuration, and the external collaborators.
pub struct ServiceContext<'a> {
    pub conn: &'a Connection,
    pub config: &'a ServiceConfig,
    pub access: &'a dyn AccessPolicy,
    pub tokens: &'a dyn TokenValidator,
    pub notices: &'a dyn NoticeChannel,
    pub listings: &'a dyn ListingStore,
}

impl ServiceContext<'_> {
    /// Full request guard, in fixed order: token, then capability, then any
    /// notices queued by an earlier validation pass. Runs before any
    /// business validation or write.
    pub(crate) fn authorize(&self, token: &str, scope: &str) -> CrmResult<()> {
        if !self.tokens.verify(token, scope) {
            return Err(CrmError::InvalidToken {
                scope: scope.to_string(),
            });
        }
        self.require_capability()?;
        if self.notices.has_pending() {
            return Err(CrmError::PendingNotices);
        }
        Ok(())
    }

    pub(crate) fn require_capability(&self) -> CrmResult<()> {
        let capability = &self.config.required_capability;
        if !self.access.has_capability(capability) {
            return Err(CrmError::PermissionDenied {
                capability: capability.clone(),
            });
        }
        Ok(())
    }
}

pub(crate) fn require_contact(conn: &Connection, id: Id<Contact>) -> CrmResult<Contact> {
    contact_repo::find_by_id(conn, id)?.ok_or_else(|| CrmError::NotFound {
        entity_type: "Contact".to_string(),
        id: id.to_string(),
    })
}
