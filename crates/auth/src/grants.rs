//! Permission grants: (module scope, action set) pairs attached to an actor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use opsdesk_core::{DomainError, DomainResult};

use crate::catalog::{Action, Module};

/// The module a grant applies to: one concrete module, or the `"all"` wildcard.
///
/// Serialized as the plain string the console persists (`"all"`,
/// `"accounting"`, ...), so an unrecognized name fails deserialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleScope {
    /// Applies to every module in the catalog.
    All,
    /// Applies to exactly one module.
    Module(Module),
}

impl ModuleScope {
    /// Whether this scope covers the given module.
    pub fn covers(&self, module: Module) -> bool {
        match self {
            ModuleScope::All => true,
            ModuleScope::Module(m) => *m == module,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleScope::All => "all",
            ModuleScope::Module(m) => m.as_str(),
        }
    }
}

impl core::fmt::Display for ModuleScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ModuleScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ModuleScope::All);
        }
        s.parse::<Module>().map(ModuleScope::Module)
    }
}

impl TryFrom<String> for ModuleScope {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleScope> for String {
    fn from(value: ModuleScope) -> Self {
        value.as_str().to_string()
    }
}

impl From<Module> for ModuleScope {
    fn from(value: Module) -> Self {
        ModuleScope::Module(value)
    }
}

/// A single permission grant.
///
/// # Invariants
/// - The action set is never empty. Enforced at construction and at the
///   deserialization boundary; a persisted grant with no actions is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GrantRecord")]
pub struct PermissionGrant {
    #[serde(rename = "module")]
    scope: ModuleScope,
    actions: BTreeSet<Action>,
}

/// Raw persisted shape of a grant, before invariant validation.
#[derive(Debug, Deserialize)]
struct GrantRecord {
    module: ModuleScope,
    actions: BTreeSet<Action>,
}

impl TryFrom<GrantRecord> for PermissionGrant {
    type Error = DomainError;

    fn try_from(record: GrantRecord) -> Result<Self, Self::Error> {
        PermissionGrant::new(record.module, record.actions)
    }
}

impl PermissionGrant {
    /// Build a grant from a scope and an action set.
    ///
    /// Fails when the action set is empty.
    pub fn new(
        scope: impl Into<ModuleScope>,
        actions: impl IntoIterator<Item = Action>,
    ) -> DomainResult<Self> {
        let actions: BTreeSet<Action> = actions.into_iter().collect();
        if actions.is_empty() {
            return Err(DomainError::invariant("grant action set cannot be empty"));
        }
        Ok(Self {
            scope: scope.into(),
            actions,
        })
    }

    /// Build a single-action grant. Infallible: one action is never empty.
    pub fn single(scope: impl Into<ModuleScope>, action: Action) -> Self {
        Self {
            scope: scope.into(),
            actions: BTreeSet::from([action]),
        }
    }

    /// Return this grant with one more permitted action.
    pub fn with(mut self, action: Action) -> Self {
        self.actions.insert(action);
        self
    }

    pub fn scope(&self) -> ModuleScope {
        self.scope
    }

    pub fn actions(&self) -> &BTreeSet<Action> {
        &self.actions
    }

    /// Whether this grant permits `action` on `module`.
    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.scope.covers(module) && self.actions.contains(&action)
    }
}
