//! Session state and its persisted shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_auth::Actor;
use opsdesk_core::DomainError;

/// The record of whether an actor is currently authenticated and who they are.
///
/// The `authenticated` flag of the original data model is derived from actor
/// presence here, so "authenticated iff actor present" holds structurally and
/// cannot be violated in memory. The flag reappears on [`SessionRecord`] for
/// the persisted shape, where it is validated on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    actor: Option<Actor>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self { actor: None }
    }

    pub fn authenticated_as(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }
}

/// Persisted session snapshot: `{actor, authenticated, saved_at}`.
///
/// Written after every session mutation under a fixed storage key. A snapshot
/// that fails validation on load is treated as absent, never as authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub actor: Option<Actor>,
    pub authenticated: bool,
    pub saved_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Snapshot the current session for persistence.
    pub fn snapshot(session: &Session) -> Self {
        Self {
            actor: session.actor().cloned(),
            authenticated: session.is_authenticated(),
            saved_at: Utc::now(),
        }
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = DomainError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if record.authenticated != record.actor.is_some() {
            return Err(DomainError::invariant(
                "authenticated flag does not match actor presence",
            ));
        }
        Ok(Self {
            actor: record.actor,
        })
    }
}
