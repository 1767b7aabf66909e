//! User, watchlist, and credential records.
//!
//! Purpose: model the session-facing user, the ordered duplicate-free
//! watchlist, and the persisted credential table row. Invariants that the
//! session service relies on (watchlist uniqueness, row/session field
//! correspondence) live here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::movie::{ImdbId, Movie};

/// Validation errors returned when constructing [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("user id must not be empty")]
    Empty,
    /// Identifier contains leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Locally generated user identifier.
///
/// Identifiers are derived from the registration timestamp (milliseconds
/// since the Unix epoch, rendered as a string), which keeps them unique per
/// registration within one store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct an identifier from stored input.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is blank or carries surrounding
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Derive an identifier from a registration timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Watchlist mutation requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistAction {
    /// Append the movie unless it is already saved.
    Add,
    /// Drop any saved entry with the same catalogue id.
    Remove,
}

/// Ordered, duplicate-free list of saved movies.
///
/// ## Invariants
/// - No two entries share an [`ImdbId`].
/// - Insertion order is preserved; removal never reorders survivors.
///
/// # Examples
/// ```
/// use cinefile::domain::user::Watchlist;
///
/// let list = Watchlist::default();
/// assert!(list.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist(Vec<Movie>);

impl Watchlist {
    /// True when a movie with this catalogue id is saved.
    #[must_use]
    pub fn contains(&self, id: &ImdbId) -> bool {
        self.0.iter().any(|movie| movie.imdb_id == *id)
    }

    /// Append a movie, refusing duplicates.
    ///
    /// Returns `false` (and leaves the list untouched) when an entry with the
    /// same catalogue id is already saved, making the operation idempotent.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(&movie.imdb_id) {
            return false;
        }
        self.0.push(movie);
        true
    }

    /// Drop any entry with this catalogue id.
    ///
    /// Returns `false` when no entry matched.
    pub fn remove(&mut self, id: &ImdbId) -> bool {
        let before = self.0.len();
        self.0.retain(|movie| movie.imdb_id != *id);
        self.0.len() != before
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of saved movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over saved movies in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.0.iter()
    }

    /// Borrow the saved movies as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Movie] {
        self.0.as_slice()
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Session-facing user record.
///
/// This is the shape persisted under the session key; it deliberately omits
/// any credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Locally generated identifier, shared with the credential table row.
    pub id: UserId,
    /// Email address, unique across all registered users.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Saved movies; defaults to empty when the stored blob predates the
    /// watchlist field.
    #[serde(default)]
    pub watchlist: Watchlist,
}

/// Persisted credential table row, one-to-one with a registered user by id
/// and by email.
///
/// ## Invariants
/// - `email` is unique across the table; registration checks before append.
/// - `password_hash` holds a bcrypt hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Locally generated identifier.
    pub id: UserId,
    /// Display name captured at registration.
    pub name: String,
    /// Email address used to log in.
    pub email: String,
    /// Bcrypt hash of the registration password.
    pub password_hash: String,
    /// Saved movies, kept in step with the session copy on every mutation.
    #[serde(default)]
    pub watchlist: Watchlist,
}

impl CredentialRecord {
    /// Build the session record for this row, copying the stored watchlist.
    #[must_use]
    pub fn to_session_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            watchlist: self.watchlist.clone(),
        }
    }
}
