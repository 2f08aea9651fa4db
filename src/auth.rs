use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use uuid::Uuid;

/// Answers whether the current caller holds a named capability. Checked
/// before every mutating operation.
pub trait AccessPolicy {
    fn has_capability(&self, capability: &str) -> bool;
}

/// The capability set granted to the caller of a request.
#[derive(Debug, Clone, Default)]
pub struct RoleSet {
    capabilities: HashSet<String>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, capability: &str) -> Self {
        self.capabilities.insert(capability.to_string());
        self
    }

    pub fn revoke(&mut self, capability: &str) {
        self.capabilities.remove(capability);
    }
}

impl AccessPolicy for RoleSet {
    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Verifies a request token against the scope it was issued for. Required
/// before processing any externally-sourced payload.
pub trait TokenValidator {
    fn verify(&self, token: &str, scope: &str) -> bool;
}

/// In-process token issuer. One live token per scope; issuing a new token
/// for a scope invalidates the previous one.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    live: RefCell<HashMap<String, String>>,
}

impl NonceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, scope: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.live
            .borrow_mut()
            .insert(scope.to_string(), token.clone());
        token
    }
}

impl TokenValidator for NonceRegistry {
    fn verify(&self, token: &str, scope: &str) -> bool {
        self.live
            .borrow()
            .get(scope)
            .map(|live| live == token)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_set_grants_capability() {
        let roles = RoleSet::new().grant("manage-contacts");
        assert!(roles.has_capability("manage-contacts"));
        assert!(!roles.has_capability("manage-options"));
    }

    #[test]
    fn role_set_revokes_capability() {
        let mut roles = RoleSet::new().grant("manage-contacts");
        roles.revoke("manage-contacts");
        assert!(!roles.has_capability("manage-contacts"));
    }

    #[test]
    fn nonce_verifies_for_issued_scope_only() {
        let registry = NonceRegistry::new();
        let token = registry.issue("edit-contact");
        assert!(registry.verify(&token, "edit-contact"));
        assert!(!registry.verify(&token, "delete-contact"));
    }

    #[test]
    fn nonce_rejects_tampered_token() {
        let registry = NonceRegistry::new();
        registry.issue("edit-contact");
        assert!(!registry.verify("forged", "edit-contact"));
    }

    #[test]
    fn reissue_invalidates_previous_token() {
        let registry = NonceRegistry::new();
        let old = registry.issue("edit-contact");
        let new = registry.issue("edit-contact");
        assert!(!registry.verify(&old, "edit-contact"));
        assert!(registry.verify(&new, "edit-contact"));
    }
}
