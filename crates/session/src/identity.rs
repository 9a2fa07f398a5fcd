//! Identity-provider boundary.
//!
//! Login is an exchange with an external collaborator: credentials go in, an
//! actor (or a failure) comes out. Transport, password hashing, timeouts and
//! retries are the provider's concern, not this crate's.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use opsdesk_auth::{Actor, Role};
use opsdesk_core::{ActorId, DomainResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Bad credentials (or an account that cannot authenticate). Recovered
    /// locally by re-prompting; never fatal.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// External identity collaborator consumed exclusively by the session store.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an actor.
    ///
    /// The exchange is asynchronous and cancellable; implementations must not
    /// produce observable side effects for abandoned calls.
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Actor, IdentityError>;
}

/// In-process provider backed by a static account directory.
///
/// Intended for tests/dev and for seeding demo consoles. Accounts are keyed
/// by email; inactive actors cannot authenticate.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    accounts: HashMap<String, Account>,
}

#[derive(Debug, Clone)]
struct Account {
    secret: String,
    actor: Actor,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account for an existing actor, keyed by its email.
    pub fn register(&mut self, secret: impl Into<String>, actor: Actor) {
        self.accounts.insert(
            actor.email.clone(),
            Account {
                secret: secret.into(),
                actor,
            },
        );
    }

    /// Build, validate and register an actor whose grants are seeded from its
    /// role policy.
    pub fn register_role(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
        role: Role,
        department: impl Into<String>,
    ) -> DomainResult<ActorId> {
        let actor = Actor::new(ActorId::new(), name, email, role, department)?;
        let id = actor.id;
        self.register(secret, actor);
        Ok(id)
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Actor, IdentityError> {
        let account = self
            .accounts
            .get(email)
            .ok_or(IdentityError::AuthenticationFailed)?;
        if account.secret != secret || !account.actor.active {
            return Err(IdentityError::AuthenticationFailed);
        }
        Ok(account.actor.clone())
    }
}
