//! Best-effort loader for the curated popular-movies shelf.
//!
//! A fixed, ordered list of titles is resolved through the [`MovieSource`]
//! port. All lookups fire simultaneously; the loader waits for the whole
//! batch and yields whatever resolved, in the original title order, with
//! failures logged and dropped rather than aborting the batch.

use std::sync::Arc;

use futures_util::future::join_all;

use super::movie::Movie;
use super::ports::{LookupOutcome, MovieSource};

/// Curated titles shown on the home shelf, in display order.
pub const POPULAR_MOVIE_TITLES: [&str; 14] = [
    "The Dark Knight",
    "Inception",
    "Interstellar",
    "The Matrix",
    "Pulp Fiction",
    "The Shawshank Redemption",
    "Forrest Gump",
    "The Godfather",
    "Avengers Endgame",
    "Spider-Man No Way Home",
    "Dune",
    "Top Gun Maverick",
    "Black Panther",
    "Joker",
];

/// Upper bound on how many titles are resolved per load.
const POPULAR_TITLE_LIMIT: usize = 14;

/// Resolves the curated title list into movie records.
pub struct PopularMoviesLoader<S> {
    source: Arc<S>,
}

impl<S: MovieSource> PopularMoviesLoader<S> {
    /// Create a loader over the given movie source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Resolve the curated shelf.
    ///
    /// The returned list preserves the relative order of
    /// [`POPULAR_MOVIE_TITLES`]; titles that failed to resolve are simply
    /// absent, so the output may be shorter than the input.
    pub async fn load(&self) -> Vec<Movie> {
        self.load_titles(&POPULAR_MOVIE_TITLES).await
    }

    /// Resolve an explicit title list, bounded to the first
    /// [`POPULAR_TITLE_LIMIT`] entries.
    pub async fn load_titles(&self, titles: &[&str]) -> Vec<Movie> {
        let lookups = titles.iter().take(POPULAR_TITLE_LIMIT).map(|title| {
            let source = Arc::clone(&self.source);
            async move { (*title, source.find_by_title(title).await) }
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(title, outcome)| match outcome {
                Ok(LookupOutcome::Found(movie)) => Some(movie),
                Ok(LookupOutcome::NoMatch { message }) => {
                    tracing::warn!(title, ?message, "popular title missing upstream");
                    None
                }
                Err(error) => {
                    tracing::warn!(title, %error, "popular title lookup failed");
                    None
                }
            })
            .collect()
    }
}
