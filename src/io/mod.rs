//! Input helpers.
//!
//! - CSV terminal-list ingest + validation (`ingest`)

pub mod ingest;

pub use ingest::*;
