//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the store trait that
//! keeps both tables in BTreeMaps behind a single `Arc<RwLock<_>>`. Ids are
//! generated from per-table counters, like an identity column. Data is lost
//! when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use cityinfo::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Seed cities, then build units of work on top of it...
//! ```

mod store;

pub use store::InMemoryStore;
