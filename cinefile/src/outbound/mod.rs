//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **omdb**: reqwest-backed HTTP client for the OMDb catalogue
//! - **store**: in-memory and file-backed key-value stores
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod omdb;
pub mod store;
