//! `opsdesk-auth` — pure authorization core (policy model + evaluator).
//!
//! This crate is intentionally decoupled from session state and storage.

pub mod actor;
pub mod catalog;
pub mod evaluate;
pub mod grants;
pub mod roles;

pub use actor::{Actor, ActorPatch};
pub use catalog::{Action, Module};
pub use evaluate::{can_access_route, has_permission, has_permission_named};
pub use grants::{ModuleScope, PermissionGrant};
pub use roles::Role;
