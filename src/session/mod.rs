//! Session state: the stored bearer token and the identity derived from it.

pub mod storage;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::constants::{TOKEN_KEY, USERNAME_KEY};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// The persisted credentials of the current user.
///
/// `username` is only ever stored together with the token it was validated for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Where the client is in the sign-in flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Profile fields of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub additional_email: String,
    pub address: String,
    pub mobile: String,
}

/// Single owner of the durable token/username pair.
///
/// Reads come from an in-memory copy; writes go to the durable backend first
/// and then notify every subscriber.
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    current: watch::Sender<Session>,
}

impl SessionStore {
    /// Load the persisted session from a backend.
    ///
    /// A username without a token is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let token = backend.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let username = token
            .as_ref()
            .and(backend.get(USERNAME_KEY)?)
            .filter(|u| !u.is_empty());

        debug!(
            has_token = token.is_some(),
            username = username.as_deref().unwrap_or(""),
            "Session loaded"
        );

        let (current, _) = watch::channel(Session { token, username });
        Ok(Self { backend, current })
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get(&self) -> Session {
        self.current.borrow().clone()
    }

    /// The stored bearer token, read at call time.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current.borrow().token.clone()
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.current.borrow().username.clone()
    }

    /// Persist a validated token together with its username.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn set(&self, token: &str, username: &str) -> Result<(), StorageError> {
        self.backend.set(TOKEN_KEY, token)?;
        self.backend.set(USERNAME_KEY, username)?;
        info!(username = %username, "Session stored");
        self.current.send_replace(Session {
            token: Some(token.to_string()),
            username: Some(username.to_string()),
        });
        Ok(())
    }

    /// Forget the token and username.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(USERNAME_KEY)?;
        info!("Session cleared");
        self.current.send_replace(Session::default());
        Ok(())
    }

    /// Receive every future session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.current.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.current.borrow();
        f.debug_struct("SessionStore")
            .field("has_token", &session.token.is_some())
            .field("username", &session.username)
            .finish_non_exhaustive()
    }
}
