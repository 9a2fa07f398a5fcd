//! The actor record: the authenticated identity whose permissions are evaluated.

use serde::{Deserialize, Serialize};

use opsdesk_core::{ActorId, DomainError, DomainResult};

use crate::grants::PermissionGrant;
use crate::roles::Role;

/// An authenticated identity.
///
/// Actors are created only at the identity-provider boundary (login) or the
/// deserialization boundary, and are mutated only by whole-object replacement
/// through [`Actor::merged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub active: bool,
    pub grants: Vec<PermissionGrant>,
}

impl Actor {
    /// Build a validated actor with grants seeded from its role.
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("actor name cannot be empty"));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
            department: department.into(),
            active: true,
            grants: role.seed_grants(),
        })
    }

    /// Return a copy with explicit grants instead of the role's seeded ones.
    pub fn with_grants(mut self, grants: Vec<PermissionGrant>) -> Self {
        self.grants = grants;
        self
    }

    /// Produce the replacement actor for a profile update.
    ///
    /// Fields absent from the patch keep their current value. Callers swap
    /// the returned actor in whole; the current one is never edited in place.
    pub fn merged(&self, patch: ActorPatch) -> Actor {
        Actor {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            role: patch.role.unwrap_or(self.role),
            department: patch.department.unwrap_or_else(|| self.department.clone()),
            active: patch.active.unwrap_or(self.active),
            grants: patch.grants.unwrap_or_else(|| self.grants.clone()),
        }
    }
}

/// Partial update applied to the current actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
    pub active: Option<bool>,
    pub grants: Option<Vec<PermissionGrant>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Action, Module};

    fn finance_actor() -> Actor {
        Actor::new(
            ActorId::new(),
            "Fatima Khan",
            "Fatima.Khan@Example.com ",
            Role::FinanceManager,
            "Finance",
        )
        .unwrap()
    }

    #[test]
    fn new_actor_normalizes_email_and_seeds_grants() {
        let actor = finance_actor();
        assert_eq!(actor.email, "fatima.khan@example.com");
        assert!(actor.active);
        assert_eq!(actor.grants, Role::FinanceManager.seed_grants());
    }

    #[test]
    fn new_actor_rejects_invalid_email() {
        let result = Actor::new(ActorId::new(), "X", "not-an-email", Role::Viewer, "Ops");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn new_actor_rejects_blank_name() {
        let result = Actor::new(ActorId::new(), "  ", "a@b.c", Role::Viewer, "Ops");
        assert!(result.is_err());
    }

    #[test]
    fn merged_replaces_only_patched_fields() {
        let actor = finance_actor();
        let updated = actor.merged(ActorPatch {
            department: Some("Treasury".to_string()),
            active: Some(false),
            ..Default::default()
        });

        assert_eq!(updated.id, actor.id);
        assert_eq!(updated.name, actor.name);
        assert_eq!(updated.department, "Treasury");
        assert!(!updated.active);
        assert_eq!(updated.grants, actor.grants);
    }

    #[test]
    fn merged_can_replace_grants() {
        let actor = finance_actor();
        let grants = vec![PermissionGrant::single(Module::Reports, Action::Read)];
        let updated = actor.merged(ActorPatch {
            grants: Some(grants.clone()),
            ..Default::default()
        });
        assert_eq!(updated.grants, grants);
    }

    #[test]
    fn empty_patch_is_identity() {
        let actor = finance_actor();
        assert_eq!(actor.merged(ActorPatch::default()), actor);
    }
}
