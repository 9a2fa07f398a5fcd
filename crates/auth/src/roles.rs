//! Role catalog and the default grants seeded for each role.
//!
//! Roles are a closed enumeration with `super_admin` as an explicit arm,
//! so the evaluator's bypass is a match on a variant rather than a string
//! comparison.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use opsdesk_core::DomainError;

use crate::catalog::{Action, Module};
use crate::grants::{ModuleScope, PermissionGrant};

/// Role of an actor within the console.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unconditional access to every action on every module, independent of
    /// the actor's grant list.
    SuperAdmin,
    Admin,
    FinanceManager,
    HrManager,
    SalesRep,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::FinanceManager,
        Role::HrManager,
        Role::SalesRep,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::FinanceManager => "finance_manager",
            Role::HrManager => "hr_manager",
            Role::SalesRep => "sales_rep",
            Role::Viewer => "viewer",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Default grants seeded for an actor of this role at login.
    ///
    /// `SuperAdmin` seeds nothing: the evaluator's bypass makes its grant
    /// list irrelevant. `Admin` and `Viewer` use the `"all"` wildcard scope,
    /// which remains assignable to non-admin roles.
    pub fn seed_grants(&self) -> Vec<PermissionGrant> {
        match self {
            Role::SuperAdmin => vec![],
            Role::Admin => vec![
                PermissionGrant::single(ModuleScope::All, Action::Create)
                    .with(Action::Read)
                    .with(Action::Update)
                    .with(Action::Delete),
            ],
            Role::FinanceManager => vec![
                PermissionGrant::single(Module::Accounting, Action::Create)
                    .with(Action::Read)
                    .with(Action::Update),
                PermissionGrant::single(Module::Cheques, Action::Create)
                    .with(Action::Read)
                    .with(Action::Update),
                PermissionGrant::single(Module::Reports, Action::Read),
            ],
            Role::HrManager => vec![
                PermissionGrant::single(Module::Hr, Action::Create)
                    .with(Action::Read)
                    .with(Action::Update)
                    .with(Action::Delete),
                PermissionGrant::single(Module::Reports, Action::Read),
            ],
            Role::SalesRep => vec![
                PermissionGrant::single(Module::Crm, Action::Create)
                    .with(Action::Read)
                    .with(Action::Update),
            ],
            Role::Viewer => vec![PermissionGrant::single(ModuleScope::All, Action::Read)],
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::unknown_name("role", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("superadmin".parse::<Role>().is_err());
    }

    #[test]
    fn super_admin_is_the_only_bypass_role() {
        assert!(Role::SuperAdmin.is_super_admin());
        for role in Role::ALL.into_iter().filter(|r| *r != Role::SuperAdmin) {
            assert!(!role.is_super_admin());
        }
    }

    #[test]
    fn seeded_grants_are_never_empty_sets() {
        for role in Role::ALL {
            for grant in role.seed_grants() {
                assert!(!grant.actions().is_empty());
            }
        }
    }

    #[test]
    fn finance_manager_seed_covers_cheque_updates() {
        let grants = Role::FinanceManager.seed_grants();
        assert!(grants.iter().any(|g| g.allows(Module::Cheques, Action::Update)));
        assert!(!grants.iter().any(|g| g.allows(Module::Hr, Action::Read)));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        let role: Role = serde_json::from_str("\"finance_manager\"").unwrap();
        assert_eq!(role, Role::FinanceManager);
    }
}
