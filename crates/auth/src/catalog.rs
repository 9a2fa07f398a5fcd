//! Closed catalogs for permission scopes and actions.
//!
//! Modules and actions are closed enumerations rather than opaque strings:
//! unrecognized names fail at the parse/deserialize boundary instead of
//! being guessed at during evaluation.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use opsdesk_core::DomainError;

/// A named functional area of the console acting as a permission scope.
///
/// Names are compared case-sensitively; `"Accounting"` is not a module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Accounting,
    Cheques,
    Crm,
    Hr,
    Inventory,
    Reports,
}

impl Module {
    /// Every module in the catalog.
    pub const ALL: [Module; 6] = [
        Module::Accounting,
        Module::Cheques,
        Module::Crm,
        Module::Hr,
        Module::Inventory,
        Module::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Accounting => "accounting",
            Module::Cheques => "cheques",
            Module::Crm => "crm",
            Module::Hr => "hr",
            Module::Inventory => "inventory",
            Module::Reports => "reports",
        }
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::unknown_name("module", s))
    }
}

/// One of the four operations a grant can permit on a module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Every action in the catalog.
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::unknown_name("action", s))
    }
}
