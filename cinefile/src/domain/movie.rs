//! Movie catalogue records.
//!
//! Purpose: model the records returned by the remote movie catalogue. These
//! types are immutable once fetched; the application never edits catalogue
//! data, it only copies records into watchlists.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned when constructing [`ImdbId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImdbIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("imdb id must not be empty")]
    Empty,
    /// Identifier contains leading or trailing whitespace.
    #[error("imdb id must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// External catalogue identifier (`imdbID`), globally unique upstream.
///
/// # Examples
/// ```
/// use cinefile::domain::movie::ImdbId;
///
/// let id = ImdbId::new("tt0133093").expect("valid id");
/// assert_eq!(id.as_str(), "tt0133093");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImdbId(String);

impl ImdbId {
    /// Validate and construct an identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is blank or carries surrounding
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ImdbIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ImdbIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(ImdbIdValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ImdbId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ImdbId> for String {
    fn from(value: ImdbId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImdbId {
    type Error = ImdbIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Movie record obtained from the remote catalogue.
///
/// ## Invariants
/// - Immutable once fetched; catalogue data is never edited locally.
/// - Extended fields are populated only when a detail lookup has run.
///
/// Serialisation uses camelCase keys; this is the schema persisted inside
/// watchlists and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// External catalogue identifier.
    pub imdb_id: ImdbId,
    /// Release title.
    pub title: String,
    /// Release year as reported upstream (free form, e.g. `2008` or
    /// `2008-2013`).
    pub year: String,
    /// Catalogue item type; always `movie` for the lookups this crate issues.
    pub kind: String,
    /// Poster image URL, or the upstream placeholder `N/A`.
    pub poster: String,
    /// Full plot synopsis; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Director credit; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Principal cast; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    /// Genre listing; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Aggregate rating as reported upstream; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    /// Runtime text such as `136 min`; detail lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

#[cfg(test)]
impl Movie {
    /// Minimal record for tests; extended fields stay empty.
    pub(crate) fn stub(id: &str, title: &str) -> Self {
        Self {
            imdb_id: ImdbId::new(id).expect("stub id must be valid"),
            title: title.to_owned(),
            year: "2008".to_owned(),
            kind: "movie".to_owned(),
            poster: "N/A".to_owned(),
            plot: None,
            director: None,
            actors: None,
            genre: None,
            imdb_rating: None,
            runtime: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn imdb_id_rejects_blank(#[case] value: &str) {
        let err = ImdbId::new(value).expect_err("blank ids rejected");
        assert_eq!(err, ImdbIdValidationError::Empty);
    }

    #[rstest]
    #[case(" tt0468569")]
    #[case("tt0468569 ")]
    fn imdb_id_rejects_whitespace_padding(#[case] value: &str) {
        let err = ImdbId::new(value).expect_err("padded id rejected");
        assert_eq!(err, ImdbIdValidationError::ContainsWhitespace);
    }

    #[test]
    fn movie_round_trips_through_persistence_schema() {
        let movie = Movie {
            plot: Some("A thief who steals corporate secrets.".to_owned()),
            ..Movie::stub("tt1375666", "Inception")
        };

        let raw = serde_json::to_string(&movie).expect("serialise");
        assert!(raw.contains("\"imdbId\":\"tt1375666\""));
        assert!(!raw.contains("director"), "absent fields stay out of the blob");

        let decoded: Movie = serde_json::from_str(&raw).expect("deserialise");
        assert_eq!(decoded, movie);
    }

    #[test]
    fn movie_decodes_without_optional_fields() {
        let raw = r#"{
            "imdbId": "tt0133093",
            "title": "The Matrix",
            "year": "1999",
            "kind": "movie",
            "poster": "N/A"
        }"#;

        let movie: Movie = serde_json::from_str(raw).expect("deserialise");
        assert_eq!(movie.title, "The Matrix");
        assert!(movie.plot.is_none());
    }
}
