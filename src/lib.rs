//! `pin-nets` library crate.
//!
//! The binary (`pins`) is a thin wrapper around this library so that:
//!
//! - the pin engine (`math`, `patterns`, `assign`) is testable without spawning processes
//! - a drawing front-end can call the engine directly and skip the CLI entirely
//!
//! Engine entry points: [`math::minimum_pin_count`],
//! [`patterns::create_pattern_sequence`] and [`assign::assign`].

pub mod app;
pub mod assign;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod nets;
pub mod patterns;
pub mod report;
pub mod tui;
