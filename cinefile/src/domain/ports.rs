//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the remote movie catalogue and the key-value store). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants, and lookup results are tagged enums so downstream code never
//! branches on a wire-level flag string.

use async_trait::async_trait;
use thiserror::Error;

use super::movie::{ImdbId, Movie};

/// Errors surfaced by [`MovieSource`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovieSourceError {
    /// Network-level failure reaching the catalogue.
    #[error("movie source transport failed: {message}")]
    Transport {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The catalogue did not answer within the configured deadline.
    #[error("movie source timed out: {message}")]
    Timeout {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The catalogue throttled the request.
    #[error("movie source rate limited the request: {message}")]
    RateLimited {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The catalogue rejected the request as malformed or unauthorised.
    #[error("movie source rejected the request: {message}")]
    InvalidRequest {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The response body could not be decoded into catalogue records.
    #[error("movie source payload could not be decoded: {message}")]
    Decode {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl MovieSourceError {
    /// Helper for network-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for deadline failures.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for throttled requests.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Helper for rejected requests.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Helper for undecodable payloads.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Result of a free-text catalogue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The catalogue matched at least one movie, in its own ranking order.
    Found(Vec<Movie>),
    /// The catalogue answered but matched nothing.
    NoMatch {
        /// Catalogue-supplied explanation, when one was given.
        message: Option<String>,
    },
}

/// Result of a single-record catalogue lookup (by id or by title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The catalogue matched exactly one movie.
    Found(Movie),
    /// The catalogue answered but matched nothing.
    NoMatch {
        /// Catalogue-supplied explanation, when one was given.
        message: Option<String>,
    },
}

/// Remote movie-information client port.
///
/// One adapter request shape per operation, all against the same upstream
/// endpoint. Implementations own transport details only; outcome tagging
/// happens at this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Search for movies matching the literal query text (first result page).
    async fn search(&self, query: &str) -> Result<SearchOutcome, MovieSourceError>;

    /// Fetch one movie with full plot detail by catalogue id.
    async fn find_by_id(&self, id: &ImdbId) -> Result<LookupOutcome, MovieSourceError>;

    /// Fetch one movie by exact title.
    async fn find_by_title(&self, title: &str) -> Result<LookupOutcome, MovieSourceError>;
}

/// Errors surfaced by [`KeyValueStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyValueStoreError {
    /// The backing store is unavailable or failed mid-operation.
    #[error("key-value store backend failure: {message}")]
    Backend {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Stored content could not be encoded or decoded.
    #[error("key-value store serialisation failed: {message}")]
    Serialization {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl KeyValueStoreError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Helper for serialisation problems.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Opaque string-keyed persistence port.
///
/// Values are JSON blobs owned by the caller; the store itself never
/// interprets them. There is no cross-process locking: concurrent writers can
/// clobber each other, a limitation carried over from the browser-storage
/// substrate this port models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Remove `key`; removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_helpers_build_matching_variants() {
        assert!(matches!(
            MovieSourceError::transport("boom"),
            MovieSourceError::Transport { .. }
        ));
        assert!(matches!(
            MovieSourceError::decode("bad json"),
            MovieSourceError::Decode { .. }
        ));
    }

    #[test]
    fn store_error_messages_name_the_failure() {
        let err = KeyValueStoreError::backend("disk full");
        assert_eq!(
            err.to_string(),
            "key-value store backend failure: disk full"
        );
    }
}
