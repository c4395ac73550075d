//! Shared vocabulary for the archive browser: resource kinds, open
//! records, column schemas, and wire payloads.

pub mod domain;
pub mod protocol;
pub mod schema;
