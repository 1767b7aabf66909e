//! Core domain: movie records, search and discovery flows, and the session
//! service, expressed against ports rather than concrete adapters.

pub mod debounce;
pub mod movie;
pub mod popular;
pub mod ports;
pub mod search;
pub mod session;
pub mod user;

pub use debounce::Debouncer;
pub use movie::{ImdbId, ImdbIdValidationError, Movie};
pub use popular::{POPULAR_MOVIE_TITLES, PopularMoviesLoader};
pub use ports::{
    KeyValueStore, KeyValueStoreError, LookupOutcome, MovieSource, MovieSourceError, SearchOutcome,
};
pub use search::{SearchHandle, SearchPipeline, SearchState};
pub use session::{SESSION_KEY, SessionError, SessionService, USERS_KEY};
pub use user::{CredentialRecord, User, UserId, Watchlist, WatchlistAction};
