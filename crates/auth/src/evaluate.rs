//! Permission evaluation.
//!
//! Deny-by-default resolution of (actor, module, action) to a boolean.
//! There is no negative/deny grant type: a permission is held or it is not.

use crate::actor::Actor;
use crate::catalog::{Action, Module};

/// Resolve whether `actor` may perform `action` on `module`.
///
/// Evaluation order:
/// 1. No actor: deny.
/// 2. `super_admin`: allow, before any grant inspection. An empty or even
///    contradictory grant list cannot revoke the bypass.
/// 3. Any grant whose scope covers the module and whose action set contains
///    the action: allow.
/// 4. Otherwise: deny.
///
/// Pure function of its inputs: no IO, no caching, no writes. Safe to call
/// on every render/request and under concurrent invocation.
pub fn has_permission(actor: Option<&Actor>, module: Module, action: Action) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    if actor.role.is_super_admin() {
        return true;
    }
    actor.grants.iter().any(|g| g.allows(module, action))
}

/// String-keyed variant for callers holding raw route/affordance names.
///
/// Names are matched case-sensitively against the closed catalogs; an
/// unrecognized module or action denies rather than erroring. Unspecified
/// means not permitted.
pub fn has_permission_named(actor: Option<&Actor>, module: &str, action: &str) -> bool {
    let (Ok(module), Ok(action)) = (module.parse::<Module>(), action.parse::<Action>()) else {
        return false;
    };
    has_permission(actor, module, action)
}

/// Route guard: a route is accessible iff its module is readable.
///
/// The `super_admin` bypass inside [`has_permission`] subsumes any separate
/// role check at the routing layer.
pub fn can_access_route(actor: Option<&Actor>, module: Module) -> bool {
    has_permission(actor, module, Action::Read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grants::{ModuleScope, PermissionGrant};
    use crate::roles::Role;
    use opsdesk_core::ActorId;

    fn actor(role: Role, grants: Vec<PermissionGrant>) -> Actor {
        Actor::new(ActorId::new(), "Test Actor", "actor@example.com", role, "QA")
            .unwrap()
            .with_grants(grants)
    }

    #[test]
    fn absent_actor_is_denied_everything() {
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(!has_permission(None, module, action));
            }
        }
    }

    #[test]
    fn super_admin_with_empty_grants_is_allowed_everything() {
        let admin = actor(Role::SuperAdmin, vec![]);
        for module in Module::ALL {
            for action in Action::ALL {
                assert!(has_permission(Some(&admin), module, action));
            }
        }
    }

    #[test]
    fn super_admin_bypass_precedes_grant_inspection() {
        // A contradictory grant list (read-only on one module) changes nothing.
        let admin = actor(
            Role::SuperAdmin,
            vec![PermissionGrant::single(Module::Reports, Action::Read)],
        );
        assert!(has_permission(Some(&admin), Module::Hr, Action::Delete));
    }

    #[test]
    fn scoped_grant_allows_listed_actions_only() {
        // accounting read+update grants read, not delete.
        let grant = PermissionGrant::single(Module::Accounting, Action::Read).with(Action::Update);
        let actor = actor(Role::FinanceManager, vec![grant]);

        assert!(has_permission(Some(&actor), Module::Accounting, Action::Read));
        assert!(has_permission(Some(&actor), Module::Accounting, Action::Update));
        assert!(!has_permission(Some(&actor), Module::Accounting, Action::Delete));
        assert!(!has_permission(Some(&actor), Module::Crm, Action::Read));
    }

    #[test]
    fn wildcard_grant_spans_modules_but_not_actions() {
        // all/read grants hr read, not hr update.
        let grant = PermissionGrant::single(ModuleScope::All, Action::Read);
        let actor = actor(Role::Viewer, vec![grant]);

        assert!(has_permission(Some(&actor), Module::Hr, Action::Read));
        assert!(!has_permission(Some(&actor), Module::Hr, Action::Update));
    }

    #[test]
    fn named_lookup_denies_unknown_names() {
        let admin = actor(Role::SuperAdmin, vec![]);
        assert!(has_permission_named(Some(&admin), "hr", "read"));
        assert!(!has_permission_named(Some(&admin), "payroll", "read"));
        assert!(!has_permission_named(Some(&admin), "hr", "approve"));
        // Case-sensitive: "HR" is not in the catalog.
        assert!(!has_permission_named(Some(&admin), "HR", "read"));
    }

    #[test]
    fn route_guard_requires_read() {
        let sales = actor(Role::SalesRep, Role::SalesRep.seed_grants());
        assert!(can_access_route(Some(&sales), Module::Crm));
        assert!(!can_access_route(Some(&sales), Module::Accounting));
        assert!(!can_access_route(None, Module::Crm));
    }
}
