//! Movie discovery and personal watchlist engine.
//!
//! The crate is organised hexagonally:
//!
//! - [`domain`] holds the core flows (debounced search, the popular-movies
//!   shelf, and the authenticated session with its watchlist) expressed
//!   against port traits.
//! - [`outbound`] holds the adapters: a reqwest client for the OMDb
//!   catalogue and key-value stores for session persistence.
//! - [`config`] loads runtime settings through OrthoConfig.
//!
//! A host wires the pieces together: construct an
//! [`outbound::omdb::OmdbHttpSource`] from [`config::OmdbSettings`], spawn a
//! [`domain::SearchPipeline`] over it, and initialise a
//! [`domain::SessionService`] over a store adapter.

pub mod config;
pub mod domain;
pub mod outbound;
