//! Key-value store adapters.
//!
//! Two implementations of the `KeyValueStore` port: an in-memory map for
//! tests and ephemeral runs, and a single-file JSON store for durable
//! sessions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;
