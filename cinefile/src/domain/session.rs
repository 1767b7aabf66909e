//! Authentication and session management.
//!
//! The session service owns the current-user record: login and registration
//! against the persisted credential table, logout, and watchlist mutation.
//! The session copy and the credential table row are committed together on
//! every watchlist change, so the two persisted representations never
//! diverge (assuming a single writer; the store port has no cross-process
//! locking).

use std::sync::{Arc, RwLock};

use mockable::Clock;
use thiserror::Error;

use super::movie::Movie;
use super::ports::{KeyValueStore, KeyValueStoreError};
use super::user::{CredentialRecord, User, UserId, Watchlist, WatchlistAction};

/// Store key holding the JSON-serialised current session.
pub const SESSION_KEY: &str = "movie-explorer-user";

/// Store key holding the JSON-serialised credential table.
pub const USERS_KEY: &str = "movie-explorer-users";

/// Errors surfaced by [`SessionService`] operations.
///
/// `InvalidCredentials` and `EmailTaken` are logical failures the caller
/// renders to the user; the remaining variants report infrastructure
/// problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No credential row matched the supplied email and password.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// A credential row with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,
    /// The key-value store failed.
    #[error("session store failed: {message}")]
    Store {
        /// Store-supplied failure description.
        message: String,
    },
    /// A persisted blob could not be decoded or re-encoded.
    #[error("persisted records could not be decoded: {message}")]
    Decode {
        /// Serde failure description.
        message: String,
    },
    /// Password hashing or verification failed.
    #[error("credential hashing failed: {message}")]
    Hash {
        /// Hasher failure description.
        message: String,
    },
}

impl SessionError {
    /// Helper for store-level failures.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Helper for blob decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Helper for hasher failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

impl From<KeyValueStoreError> for SessionError {
    fn from(error: KeyValueStoreError) -> Self {
        Self::store(error.to_string())
    }
}

/// Session manager over a [`KeyValueStore`].
///
/// Exactly one session is live at a time. The in-memory copy is rehydrated
/// from the session key at construction and kept in step with the store on
/// every mutation.
pub struct SessionService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    session: RwLock<Option<User>>,
}

impl<S: KeyValueStore> SessionService<S> {
    /// Build the service, rehydrating any persisted session.
    ///
    /// A present but unparseable session blob is discarded (the visitor
    /// simply starts signed out) rather than treated as an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the store itself fails.
    pub async fn initialise(store: Arc<S>, clock: Arc<dyn Clock>) -> Result<Self, SessionError> {
        let session = store.get(SESSION_KEY).await?.and_then(|raw| {
            serde_json::from_str::<User>(&raw)
                .inspect_err(|error| {
                    tracing::warn!(%error, "stored session blob unreadable; starting signed out");
                })
                .ok()
        });
        Ok(Self {
            store,
            clock,
            session: RwLock::new(session),
        })
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session_snapshot().ok().flatten()
    }

    /// Authenticate against the credential table.
    ///
    /// On success the session is created and persisted, and the returned
    /// record carries the stored row's watchlist as of this moment.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidCredentials`] when no row matches; store,
    /// decode, and hashing failures are passed through. A failed login
    /// changes no state.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let users = self.load_users().await?;
        let Some(row) = users.iter().find(|row| row.email == email) else {
            return Err(SessionError::InvalidCredentials);
        };
        let verified = bcrypt::verify(password, &row.password_hash)
            .map_err(|error| SessionError::hash(error.to_string()))?;
        if !verified {
            return Err(SessionError::InvalidCredentials);
        }

        let user = row.to_session_user();
        self.persist_session(&user).await?;
        self.replace_session(Some(user.clone()))?;
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(user)
    }

    /// Register a new account and sign it in.
    ///
    /// The row id is derived from the clock (milliseconds since the epoch),
    /// the password is stored as a bcrypt hash, and the watchlist starts
    /// empty.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmailTaken`] when the email is already registered; in
    /// that case the table is left untouched. Store, decode, and hashing
    /// failures are passed through.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let mut users = self.load_users().await?;
        if users.iter().any(|row| row.email == email) {
            return Err(SessionError::EmailTaken);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|error| SessionError::hash(error.to_string()))?;
        let record = CredentialRecord {
            id: UserId::from_timestamp_millis(self.clock.utc().timestamp_millis()),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash,
            watchlist: Watchlist::default(),
        };
        users.push(record.clone());
        self.save_users(&users).await?;

        let user = record.to_session_user();
        self.persist_session(&user).await?;
        self.replace_session(Some(user.clone()))?;
        tracing::info!(user_id = %user.id, "registration succeeded");
        Ok(user)
    }

    /// Sign out unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error only when removing the session key fails.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.replace_session(None)?;
        self.store.remove(SESSION_KEY).await?;
        Ok(())
    }

    /// Apply a watchlist mutation for the signed-in user.
    ///
    /// A no-op when signed out. Adding an already-saved movie is idempotent
    /// and performs no writes; removing an absent movie rewrites the
    /// unchanged list, mirroring the remove-by-filter semantics.
    ///
    /// # Errors
    ///
    /// Store and decode failures are passed through.
    pub async fn update_watchlist(
        &self,
        movie: Movie,
        action: WatchlistAction,
    ) -> Result<(), SessionError> {
        let Some(user) = self.session_snapshot()? else {
            return Ok(());
        };

        let mut watchlist = user.watchlist.clone();
        match action {
            WatchlistAction::Add => {
                if !watchlist.add(movie) {
                    return Ok(());
                }
            }
            WatchlistAction::Remove => {
                watchlist.remove(&movie.imdb_id);
            }
        }
        self.commit_watchlist(&user, watchlist).await
    }

    /// Empty the signed-in user's watchlist; a no-op when signed out.
    ///
    /// # Errors
    ///
    /// Store and decode failures are passed through.
    pub async fn clear_watchlist(&self) -> Result<(), SessionError> {
        let Some(user) = self.session_snapshot()? else {
            return Ok(());
        };
        self.commit_watchlist(&user, Watchlist::default()).await
    }

    /// Commit a new watchlist to the session and the credential table as one
    /// operation.
    ///
    /// A session user with no matching table row (inconsistent store) still
    /// gets the session update; only the table write is skipped.
    async fn commit_watchlist(
        &self,
        user: &User,
        watchlist: Watchlist,
    ) -> Result<(), SessionError> {
        let updated = User {
            watchlist: watchlist.clone(),
            ..user.clone()
        };
        self.persist_session(&updated).await?;
        self.replace_session(Some(updated))?;

        let mut users = self.load_users().await?;
        match users.iter().position(|row| row.id == user.id) {
            Some(index) => {
                if let Some(row) = users.get_mut(index) {
                    row.watchlist = watchlist;
                }
                self.save_users(&users).await?;
            }
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    "session user missing from credential table; table update skipped"
                );
            }
        }
        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<CredentialRecord>, SessionError> {
        self.store.get(USERS_KEY).await?.map_or_else(
            || Ok(Vec::new()),
            |raw| {
                serde_json::from_str(&raw)
                    .map_err(|error| SessionError::decode(format!("credential table: {error}")))
            },
        )
    }

    async fn save_users(&self, users: &[CredentialRecord]) -> Result<(), SessionError> {
        let raw = serde_json::to_string(users)
            .map_err(|error| SessionError::decode(format!("credential table: {error}")))?;
        self.store.set(USERS_KEY, &raw).await?;
        Ok(())
    }

    async fn persist_session(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)
            .map_err(|error| SessionError::decode(format!("session record: {error}")))?;
        self.store.set(SESSION_KEY, &raw).await?;
        Ok(())
    }

    fn session_snapshot(&self) -> Result<Option<User>, SessionError> {
        self.session
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SessionError::store("session lock poisoned"))
    }

    fn replace_session(&self, user: Option<User>) -> Result<(), SessionError> {
        self.session
            .write()
            .map(|mut guard| *guard = user)
            .map_err(|_| SessionError::store("session lock poisoned"))
    }
}
