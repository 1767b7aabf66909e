//! OMDb outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `MovieSource` port.

mod dto;
mod http_source;

pub use http_source::OmdbHttpSource;
