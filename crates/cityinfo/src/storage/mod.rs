//! Persistence adapters implementing [`cityinfo_core::storage::CityStore`].
//!
//! The in-memory store is always available (tests and the default build use
//! it). The SQLite store is compiled in with the `sqlite` feature.

pub mod inmemory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
