//! Shared domain types.
//!
//! Everything here is a small value type: cheap to clone, compared by value,
//! and never mutated by the engine after construction.

use std::path::PathBuf;

use clap::ValueEnum;

/// Smallest pool from which a high/low pair can be drawn.
pub const MIN_PIN_COUNT: usize = 2;

/// A terminal's pin assignment: the pin driven high and the pin driven low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinPair {
    pub high: usize,
    pub low: usize,
}

impl PinPair {
    pub const fn new(high: usize, low: usize) -> Self {
        Self { high, low }
    }

    /// The same two pins with the polarity swapped.
    pub const fn reversed(self) -> Self {
        Self {
            high: self.low,
            low: self.high,
        }
    }

    pub fn max_pin(self) -> usize {
        self.high.max(self.low)
    }

    /// True when both pins are distinct and addressable with `pins` pins.
    pub fn fits(self, pins: usize) -> bool {
        self.high != self.low && self.high < pins && self.low < pins
    }
}

impl std::fmt::Display for PinPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}/-{}", self.high, self.low)
    }
}

/// Which pattern generator assigns pin pairs within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Every ordered pair of distinct pins exactly once, widest gap first.
    #[value(alias = "pio")]
    GapWalk,
    /// Triangular-offset lattice; cheap and spread out, no coverage guarantee.
    #[value(alias = "grid")]
    Lattice,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::GapWalk, Strategy::Lattice];

    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::GapWalk => "gap-walk",
            Strategy::Lattice => "lattice",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Strategy::GapWalk => Strategy::Lattice,
            Strategy::Lattice => Strategy::GapWalk,
        }
    }

    /// Parse a strategy name the same way the `--strategy` flag does.
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

/// A bucket of terminals that share a grouping attribute.
///
/// Only the count matters to the engine; the id is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalGroup {
    pub id: String,
    pub count: usize,
}

impl TerminalGroup {
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }
}

/// One connection point in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub id: String,
    /// Grouping attribute (fill colour in the drawings this was built for).
    pub group: String,
}

impl Terminal {
    pub fn new(id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
        }
    }
}

/// Resolved configuration for one assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignConfig {
    pub strategy: Strategy,
    /// Use exactly this many pins for every group instead of solving per group.
    pub pin_override: Option<usize>,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::GapWalk,
            pin_override: None,
        }
    }
}

/// Parameters for the synthetic diagram generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    pub groups: usize,
    pub mean_terminals: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            groups: 4,
            mean_terminals: 8.0,
            seed: 42,
        }
    }
}

/// Where the terminals come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Csv(PathBuf),
    Sample(SampleConfig),
}

impl InputSource {
    pub fn describe(&self) -> String {
        match self {
            InputSource::Csv(path) => path.display().to_string(),
            InputSource::Sample(cfg) => format!(
                "sample (groups={}, mean={:.1}, seed={})",
                cfg.groups, cfg.mean_terminals, cfg.seed
            ),
        }
    }
}
