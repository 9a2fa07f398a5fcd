//! The session store: the only component that mutates authorization state.

use thiserror::Error;

use opsdesk_auth::{Actor, ActorPatch};

use crate::identity::{IdentityError, IdentityProvider};
use crate::session::{Session, SessionRecord};
use crate::storage::SessionStorage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Authentication(#[from] IdentityError),

    #[error("no active session")]
    NoActiveSession,
}

/// Holds the current session and persists it across restarts.
///
/// A store is an explicit value injected into whatever serves a request; a
/// backend service creates one per connection rather than process-wide. All
/// mutation goes through `login`/`logout`/`update_actor`, and every mutation
/// is followed by a persistence attempt.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    session: Session,
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Rehydrate from durable storage.
    ///
    /// A missing record, an unreadable record, or a record violating the
    /// session invariants all start the store logged out. Stale records are
    /// discarded (best effort) so the next start is clean. Startup never
    /// fails and never resurrects an invalid session as authenticated.
    pub fn open(storage: S) -> Self {
        let session = match storage.load() {
            Ok(Some(record)) => match Session::try_from(record) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding persisted session that violates invariants");
                    let _ = storage.clear();
                    Session::logged_out()
                }
            },
            Ok(None) => Session::logged_out(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable persisted session");
                let _ = storage.clear();
                Session::logged_out()
            }
        };
        Self { session, storage }
    }

    /// Exchange credentials with the identity provider and, on success,
    /// atomically replace the session.
    ///
    /// The session is not touched until the exchange resolves, so a failed or
    /// abandoned login has no observable effect on session state. Returns an
    /// owned snapshot of the authenticated actor.
    pub async fn login(
        &mut self,
        provider: &dyn IdentityProvider,
        email: &str,
        secret: &str,
    ) -> Result<Actor, SessionError> {
        let actor = provider.authenticate(email, secret).await.map_err(|e| {
            tracing::debug!(email, "login failed");
            e
        })?;
        tracing::info!(actor_id = %actor.id, role = %actor.role, "login succeeded");
        self.session = Session::authenticated_as(actor.clone());
        self.persist();
        Ok(actor)
    }

    /// Reset to logged-out. Idempotent: repeated calls produce the same state.
    pub fn logout(&mut self) {
        if self.session.is_authenticated() {
            tracing::info!("logout");
        }
        self.session = Session::logged_out();
        self.persist();
    }

    /// Read-only snapshot of the current actor.
    pub fn current_actor(&self) -> Option<&Actor> {
        self.session.actor()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Merge a partial profile update into the current actor.
    ///
    /// The stored actor is replaced whole with the merged result; errors with
    /// [`SessionError::NoActiveSession`] when logged out.
    pub fn update_actor(&mut self, patch: ActorPatch) -> Result<(), SessionError> {
        let Some(current) = self.session.actor() else {
            return Err(SessionError::NoActiveSession);
        };
        self.session = Session::authenticated_as(current.merged(patch));
        self.persist();
        Ok(())
    }

    /// Persist the current session.
    ///
    /// A storage failure costs durability only: the in-memory session stays
    /// valid for the rest of the process, and the failure is a warning, not
    /// a crash.
    fn persist(&self) {
        let record = SessionRecord::snapshot(&self.session);
        if let Err(e) = self.storage.save(&record) {
            tracing::warn!(error = %e, "failed to persist session; continuing in memory");
        }
    }
}
