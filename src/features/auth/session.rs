//! Session state machine shared by every page, guard, and the transport.
//!
//! Flow Overview:
//! - `rehydrate()` runs once at start. A stored, unexpired credential with a
//!   decodable profile restores `Authenticated` without a network call; any
//!   partial or stale record is wiped.
//! - `login(session)` is accepted only while `Unauthenticated`; it persists
//!   the credential and profile before publishing the new state.
//! - `logout()` is idempotent and always leaves storage empty.
//! - The transport calls `force_logout_if()` with the credential it sent
//!   when the API answers 401; a late answer for a replaced credential is
//!   ignored.
//!
//! The store is the only writer. Readers get snapshots or a watch receiver,
//! so guards can re-evaluate whenever the state flips.

use crate::app_lib::{
    AppError,
    storage::{SessionStorage, StorageError},
};
use crate::features::auth::{
    role::Role,
    token,
    types::{Session, UserProfile},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const ACCESS_TOKEN_KEY: &str = "access_token";
const AUTHENTICATED_KEY: &str = "is_authenticated";
const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a session is already active; log out first")]
    AlreadyAuthenticated,
    #[error("login response did not include an access token")]
    MissingToken,
    #[error("access token is already expired")]
    Expired,
    #[error("failed to persist session")]
    Storage(#[from] StorageError),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AlreadyAuthenticated => AppError::Validation(
                "You are already signed in. Sign out to switch accounts.".to_string(),
            ),
            SessionError::MissingToken | SessionError::Expired => {
                AppError::Unauthorized(err.to_string())
            }
            SessionError::Storage(_) => AppError::Config(err.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session().map(Session::role)
    }
}

/// Fully-qualified storage keys for one deployment prefix.
#[derive(Clone, Debug)]
struct StorageKeys {
    access_token: String,
    authenticated: String,
    user: String,
}

impl StorageKeys {
    fn new(prefix: &str) -> Self {
        let prefix = prefix.trim().trim_end_matches('.');
        Self {
            access_token: format!("{prefix}.{ACCESS_TOKEN_KEY}"),
            authenticated: format!("{prefix}.{AUTHENTICATED_KEY}"),
            user: format!("{prefix}.{USER_KEY}"),
        }
    }

    fn all(&self) -> [&str; 3] {
        [
            self.access_token.as_str(),
            self.authenticated.as_str(),
            self.user.as_str(),
        ]
    }
}

struct StoreInner {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn SessionStorage>,
    keys: StorageKeys,
}

/// Cloneable handle to the single session container.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Creates an unauthenticated store; call [`SessionStore::rehydrate`] once at start.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, prefix: &str) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            inner: Arc::new(StoreInner {
                state,
                storage,
                keys: StorageKeys::new(prefix),
            }),
        }
    }

    /// Restores a persisted session without a network round trip.
    /// Returns whether the store ended up authenticated.
    pub fn rehydrate(&self) -> bool {
        match self.read_persisted() {
            Some(session) => {
                info!(user_id = session.user_id(), role = %session.role(), "session restored");
                self.publish(SessionState::Authenticated(session));
                true
            }
            None => {
                self.clear_storage();
                self.publish(SessionState::Unauthenticated);
                false
            }
        }
    }

    /// Stores the session and moves to `Authenticated`.
    ///
    /// # Errors
    /// Returns an error if a session is already active, the token is blank or
    /// expired, or storage rejects the write (storage is rolled back).
    pub fn login(&self, session: Session) -> Result<(), SessionError> {
        if self.is_authenticated() {
            return Err(SessionError::AlreadyAuthenticated);
        }
        if session.access_token().trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        if token::is_expired(session.access_token(), token::unix_now()) {
            return Err(SessionError::Expired);
        }

        if let Err(err) = self.write_persisted(&session) {
            self.clear_storage();
            return Err(err);
        }

        info!(user_id = session.user_id(), role = %session.role(), "logged in");
        self.publish(SessionState::Authenticated(session));
        Ok(())
    }

    /// Clears storage and moves to `Unauthenticated`. Safe to call repeatedly.
    pub fn logout(&self) {
        self.clear_storage();
        if self.is_authenticated() {
            info!("logged out");
        }
        self.publish(SessionState::Unauthenticated);
    }

    /// Logout triggered by the API rejecting the credential.
    pub fn force_logout(&self, reason: &str) {
        if self.is_authenticated() {
            warn!(reason, "credential rejected by the API, ending session");
        }
        self.logout();
    }

    /// Forced logout for a rejection of `rejected`, the credential a request
    /// was sent with. Does nothing once the session holds another credential.
    /// Returns whether the session was ended.
    pub fn force_logout_if(&self, rejected: Option<&str>, reason: &str) -> bool {
        let current = self
            .inner
            .state
            .borrow()
            .session()
            .map(|session| session.access_token() == rejected.unwrap_or_default());
        match current {
            Some(true) => {
                self.force_logout(reason);
                true
            }
            Some(false) => {
                debug!("ignoring 401 for a credential that is no longer current");
                false
            }
            None => false,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.inner.state.borrow().role()
    }

    /// Bearer credential for the current session, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .session()
            .map(|session| session.access_token().to_string())
    }

    /// Receiver that wakes on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    fn publish(&self, next: SessionState) {
        self.inner.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn read_persisted(&self) -> Option<Session> {
        let storage = &self.inner.storage;
        let keys = &self.inner.keys;

        if storage.get(&keys.authenticated).as_deref() != Some("true") {
            debug!("no persisted session flag");
            return None;
        }
        let access_token = storage.get(&keys.access_token)?;
        if !token::looks_valid(&access_token, token::unix_now()) {
            debug!("persisted credential is blank or expired");
            return None;
        }
        let user = storage.get(&keys.user)?;
        let user: UserProfile = match serde_json::from_str(&user) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "persisted profile is unreadable");
                return None;
            }
        };

        Some(Session::new(user, access_token))
    }

    fn write_persisted(&self, session: &Session) -> Result<(), SessionError> {
        let storage = &self.inner.storage;
        let keys = &self.inner.keys;
        let user = serde_json::to_string(&session.user).map_err(StorageError::from)?;

        storage.set(&keys.access_token, session.access_token())?;
        storage.set(&keys.user, &user)?;
        storage.set(&keys.authenticated, "true")?;
        Ok(())
    }

    fn clear_storage(&self) {
        for key in self.inner.keys.all() {
            if let Err(err) = self.inner.storage.remove(key) {
                warn!(key, error = %err, "failed to clear persisted session key");
            }
        }
    }
}
