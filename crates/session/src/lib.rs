//! `opsdesk-session` — session lifecycle and durable session state.
//!
//! The session store is an explicit value injected into whatever serves a
//! request, never a process-wide singleton. It is the only component that
//! mutates authorization state; evaluation itself lives in `opsdesk-auth`.

pub mod identity;
pub mod session;
pub mod storage;
pub mod store;

pub use identity::{IdentityError, IdentityProvider, StaticDirectory};
pub use session::{Session, SessionRecord};
pub use storage::{
    InMemoryStorage, JsonFileStorage, SessionStorage, StorageError, SESSION_STORAGE_KEY,
};
pub use store::{SessionError, SessionStore};
