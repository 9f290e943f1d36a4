//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the pin engine's value types (`PinPair`, `TerminalGroup`, `Strategy`)
//! - diagram-side inputs (`Terminal`, `InputSource`, `SampleConfig`)
//! - the resolved run configuration (`AssignConfig`)

pub mod types;

pub use types::*;
