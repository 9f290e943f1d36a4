//! Closed-form helpers for sizing pin pools.

pub mod pin_count;

pub use pin_count::*;
