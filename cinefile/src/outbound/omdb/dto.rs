//! DTOs for decoding OMDb JSON responses.
//!
//! OMDb answers `200 OK` for both hits and misses and flags the difference
//! with a `"Response"` field of `"True"` or `"False"`. The adapter decodes
//! into these transport DTOs first, then maps the flag into tagged domain
//! outcomes in one pass so nothing downstream ever inspects the flag string.

use serde::Deserialize;

use crate::domain::movie::{ImdbId, Movie};
use crate::domain::ports::{LookupOutcome, SearchOutcome};

/// Fallback for catalogue fields OMDb omits or leaves unset.
const MISSING_FIELD: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(super) enum ResponseFlagDto {
    True,
    False,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(rename = "Response")]
    pub(super) response: ResponseFlagDto,
    #[serde(rename = "Error")]
    pub(super) error: Option<String>,
    #[serde(rename = "Search", default)]
    pub(super) search: Vec<MovieDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    #[serde(rename = "Response")]
    pub(super) response: ResponseFlagDto,
    #[serde(rename = "Error")]
    pub(super) error: Option<String>,
    #[serde(flatten)]
    pub(super) movie: MovieDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MovieDto {
    #[serde(rename = "imdbID")]
    pub(super) imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub(super) title: Option<String>,
    #[serde(rename = "Year")]
    pub(super) year: Option<String>,
    #[serde(rename = "Type")]
    pub(super) kind: Option<String>,
    #[serde(rename = "Poster")]
    pub(super) poster: Option<String>,
    #[serde(rename = "Plot")]
    pub(super) plot: Option<String>,
    #[serde(rename = "Director")]
    pub(super) director: Option<String>,
    #[serde(rename = "Actors")]
    pub(super) actors: Option<String>,
    #[serde(rename = "Genre")]
    pub(super) genre: Option<String>,
    #[serde(rename = "imdbRating")]
    pub(super) imdb_rating: Option<String>,
    #[serde(rename = "Runtime")]
    pub(super) runtime: Option<String>,
}

impl SearchResponseDto {
    pub(super) fn into_outcome(self) -> Result<SearchOutcome, String> {
        if self.response == ResponseFlagDto::False || self.search.is_empty() {
            return Ok(SearchOutcome::NoMatch {
                message: self.error,
            });
        }
        let movies = self
            .search
            .into_iter()
            .map(MovieDto::into_domain_movie)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchOutcome::Found(movies))
    }
}

impl LookupResponseDto {
    pub(super) fn into_outcome(self) -> Result<LookupOutcome, String> {
        if self.response == ResponseFlagDto::False {
            return Ok(LookupOutcome::NoMatch {
                message: self.error,
            });
        }
        Ok(LookupOutcome::Found(self.movie.into_domain_movie()?))
    }
}

impl MovieDto {
    fn into_domain_movie(self) -> Result<Movie, String> {
        let id = self
            .imdb_id
            .ok_or_else(|| "catalogue record missing imdbID".to_owned())?;
        let imdb_id = ImdbId::new(id.clone())
            .map_err(|error| format!("catalogue record id {id:?} invalid: {error}"))?;
        let title = self
            .title
            .ok_or_else(|| "catalogue record missing Title".to_owned())?;

        Ok(Movie {
            imdb_id,
            title,
            year: self.year.unwrap_or_else(|| MISSING_FIELD.to_owned()),
            kind: self.kind.unwrap_or_else(|| MISSING_FIELD.to_owned()),
            poster: self.poster.unwrap_or_else(|| MISSING_FIELD.to_owned()),
            plot: self.plot,
            director: self.director,
            actors: self.actors,
            genre: self.genre,
            imdb_rating: self.imdb_rating,
            runtime: self.runtime,
        })
    }
}
