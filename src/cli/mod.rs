//! Command-line parsing for the pin assignment tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the engine code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Strategy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pins", version, about = "Polarity pin assignment for grouped diagram terminals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the minimum pin count for one or more terminal counts.
    Count(CountArgs),
    /// List the pin pairs a strategy produces for a pin count.
    Pattern(PatternArgs),
    /// Bucket terminals, assign pins per bucket, and print the result.
    Assign(AssignArgs),
    /// Browse buckets and nets interactively.
    ///
    /// Uses the same pipeline as `pins assign`, rendered with Ratatui.
    Tui(AssignArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CountArgs {
    /// Terminal counts.
    #[arg(required = true, value_name = "N")]
    pub counts: Vec<usize>,
}

#[derive(Debug, Parser, Clone)]
pub struct PatternArgs {
    /// Pin count (>= 2).
    #[arg(short = 'p', long)]
    pub pins: usize,

    /// Pattern strategy (defaults to $PINS_STRATEGY, then gap-walk).
    #[arg(short = 's', long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Only list the first K pairs.
    #[arg(short = 'k', long)]
    pub take: Option<usize>,
}

/// Where terminals come from: a CSV file, or a synthetic diagram.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Terminal list CSV (`id,group` columns; `fill` also accepted).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Number of colour groups in the synthetic diagram (ignored with --file).
    #[arg(long, default_value_t = 4)]
    pub sample_groups: usize,

    /// Mean extra terminals per synthetic group.
    #[arg(long, default_value_t = 8.0)]
    pub sample_mean: f64,

    /// Seed for the synthetic diagram.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Debug, Parser, Clone)]
pub struct AssignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pattern strategy (defaults to $PINS_STRATEGY, then gap-walk).
    #[arg(short = 's', long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Use exactly this many pins per bucket instead of the minimum.
    #[arg(short = 'p', long)]
    pub pins: Option<usize>,

    /// Also list the terminals on a net, given as BUCKET:PIN.
    #[arg(long, value_name = "BUCKET:PIN")]
    pub net: Option<String>,
}
