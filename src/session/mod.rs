//! Session State
//!
//! The logged-in user is remembered under two storage keys, exactly as the
//! browser app keeps them in `localStorage`:
//!
//! - `userId`: the user's id as a string
//! - `user`: the login response body as JSON, verbatim
//!
//! There is no expiry, integrity check or revocation. A session exists when
//! both keys are present and `user` is a JSON object.

mod storage;

#[cfg(feature = "native")]
mod sqlite;

pub use storage::{MemoryStorage, Storage};

#[cfg(feature = "native")]
pub use sqlite::SqliteStorage;

use thiserror::Error;

use crate::models::{UserId, UserProfile};

/// Storage key holding the user id
pub const USER_ID_KEY: &str = "userId";

/// Storage key holding the serialized user snapshot
pub const USER_KEY: &str = "user";

/// Errors from the session layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The underlying storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// The login response carried no usable `id`
    #[error("Login response has no user id")]
    MissingId,

    /// The user snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// A logged-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: UserId,
    /// The stored snapshot, as the backend sent it
    pub user: serde_json::Value,
}

impl Session {
    /// Typed view of the snapshot, if it has the expected shape
    pub fn profile(&self) -> Option<UserProfile> {
        serde_json::from_value(self.user.clone()).ok()
    }

    pub fn display_name(&self) -> String {
        self.profile()
            .map(|p| p.display_name().to_string())
            .unwrap_or_else(|| format!("user {}", self.user_id))
    }
}

/// Reads and writes the session keys of a [`Storage`]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current session, if any.
    ///
    /// A `user` value that is not a JSON object counts as logged out; it is
    /// logged and left in place.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let Some(user_id) = self.storage.get_item(USER_ID_KEY)? else {
            return Ok(None);
        };
        let Some(raw) = self.storage.get_item(USER_KEY)? else {
            tracing::debug!("userId present without user snapshot");
            return Ok(None);
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(user @ serde_json::Value::Object(_)) => Ok(Some(Session {
                user_id: UserId::new(user_id),
                user,
            })),
            Ok(_) | Err(_) => {
                tracing::warn!("Stored user snapshot is not a JSON object, treating as logged out");
                Ok(None)
            }
        }
    }

    /// The logged-in flag the router consults
    pub fn is_logged_in(&self) -> bool {
        match self.load() {
            Ok(session) => session.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                false
            }
        }
    }

    /// Store a login response body as the session.
    ///
    /// Nothing is written when the body has no `id`. The `userId` key is
    /// dropped before the snapshot is replaced and written last, so a failed
    /// write leaves the store logged out rather than pairing one user's id
    /// with another user's snapshot.
    pub fn save(&self, user: &serde_json::Value) -> Result<Session, SessionError> {
        let user_id = user
            .get("id")
            .and_then(UserId::from_json)
            .ok_or(SessionError::MissingId)?;
        let raw = serde_json::to_string(user)?;

        self.storage.remove_item(USER_ID_KEY)?;
        self.storage.set_item(USER_KEY, &raw)?;
        self.storage.set_item(USER_ID_KEY, user_id.as_str())?;

        tracing::info!(user_id = %user_id, "Session stored");

        Ok(Session {
            user_id,
            user: user.clone(),
        })
    }

    /// Forget the session (both keys)
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove_item(USER_ID_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}
