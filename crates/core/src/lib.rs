//! Functional core for the cityinfo API.
//!
//! Entity model, transfer objects, validation, patch documents and the
//! data-access port. Nothing in this crate performs I/O on its own; the
//! storage port is implemented by adapters in the server crate.

pub mod city;
pub mod serde;
pub mod storage;
