//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - resolves the run configuration (flags > environment > defaults)
//! - dispatches to the command handlers

use clap::Parser;
use log::debug;

use crate::cli::{AssignArgs, Command, CountArgs, InputArgs, PatternArgs};
use crate::domain::{AssignConfig, InputSource, SampleConfig, Strategy};
use crate::error::AppError;
use crate::nets::NetKey;

pub mod pipeline;

/// Environment variable naming the default pattern strategy.
pub const STRATEGY_ENV: &str = "PINS_STRATEGY";

/// Entry point for the `pins` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();

    // `pins` and `pins -f x.csv` should behave like `pins tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Count(args) => handle_count(args),
        Command::Pattern(args) => handle_pattern(args),
        Command::Assign(args) => handle_assign(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_count(args: CountArgs) -> Result<(), AppError> {
    print!("{}", crate::report::format_pin_counts(&args.counts));
    Ok(())
}

fn handle_pattern(args: PatternArgs) -> Result<(), AppError> {
    let strategy = resolve_strategy(args.strategy)?;
    let sequence = crate::patterns::create_pattern_sequence(strategy, args.pins)?;
    let (strategy, pins) = (sequence.strategy(), sequence.pins());
    let pairs: Vec<_> = match args.take {
        Some(k) => sequence.take(k).collect(),
        None => sequence.collect(),
    };
    print!("{}", crate::report::format_pattern(strategy, pins, &pairs));
    Ok(())
}

fn handle_assign(args: AssignArgs) -> Result<(), AppError> {
    let config = assign_config_from_args(&args)?;
    let source = input_source_from_args(&args.input);
    let net = args
        .net
        .as_deref()
        .map(|s| {
            NetKey::parse(s).ok_or_else(|| AppError::new(2, format!("Invalid --net '{s}' (expected BUCKET:PIN).")))
        })
        .transpose()?;

    let run = pipeline::run_assign(&source, &config)?;

    print!("{}", crate::report::format_run_summary(&run, &source.describe()));
    print!("{}", crate::report::format_assignments(&run));
    if let Some(key) = &net {
        print!("{}", crate::report::format_net(&run.overlay, key));
    }

    let failed = run.assignments.failures().count();
    if failed > 0 {
        return Err(AppError::new(4, format!("{failed} bucket(s) could not be assigned.")));
    }
    Ok(())
}

fn handle_tui(args: AssignArgs) -> Result<(), AppError> {
    let config = assign_config_from_args(&args)?;
    let source = input_source_from_args(&args.input);
    crate::tui::run(source, config)
}

pub fn assign_config_from_args(args: &AssignArgs) -> Result<AssignConfig, AppError> {
    let config = AssignConfig {
        strategy: resolve_strategy(args.strategy)?,
        pin_override: args.pins,
    };
    debug!("resolved config: {config:?}");
    Ok(config)
}

pub fn input_source_from_args(args: &InputArgs) -> InputSource {
    match &args.file {
        Some(path) => InputSource::Csv(path.clone()),
        None => InputSource::Sample(SampleConfig {
            groups: args.sample_groups,
            mean_terminals: args.sample_mean,
            seed: args.seed,
        }),
    }
}

/// Flag wins, then `$PINS_STRATEGY`, then gap-walk.
fn resolve_strategy(flag: Option<Strategy>) -> Result<Strategy, AppError> {
    strategy_from(flag, std::env::var(STRATEGY_ENV).ok().as_deref())
}

fn strategy_from(flag: Option<Strategy>, env: Option<&str>) -> Result<Strategy, AppError> {
    if let Some(strategy) = flag {
        return Ok(strategy);
    }
    match env.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Strategy::GapWalk),
        Some(name) => Strategy::parse(name).ok_or_else(|| {
            AppError::new(
                2,
                format!("Invalid {STRATEGY_ENV}='{name}' (expected gap-walk|pio|lattice|grid)."),
            )
        }),
    }
}

/// Rewrite argv so `pins` defaults to `pins tui`.
///
/// Rules:
/// - `pins`                      -> `pins tui`
/// - `pins -f x.csv ...`         -> `pins tui -f x.csv ...`
/// - `pins --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "count" | "pattern" | "assign" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["pins"])), argv(&["pins", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["pins", "-f", "t.csv"])),
            argv(&["pins", "tui", "-f", "t.csv"])
        );
        assert_eq!(rewrite_args(argv(&["pins", "--help"])), argv(&["pins", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["pins", "count", "7"])),
            argv(&["pins", "count", "7"])
        );
    }

    #[test]
    fn strategy_resolution_order() {
        assert_eq!(strategy_from(None, None).unwrap(), Strategy::GapWalk);
        assert_eq!(strategy_from(None, Some("grid")).unwrap(), Strategy::Lattice);
        assert_eq!(
            strategy_from(Some(Strategy::GapWalk), Some("lattice")).unwrap(),
            Strategy::GapWalk
        );
        assert_eq!(strategy_from(None, Some("  ")).unwrap(), Strategy::GapWalk);
        assert_eq!(strategy_from(None, Some("zigzag")).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn cli_parses_assign_flags() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "pins", "assign", "-f", "t.csv", "-s", "pio", "--pins", "5", "--net", "red:1",
        ]));
        let Command::Assign(args) = cli.command else {
            panic!("expected assign");
        };
        assert_eq!(args.strategy, Some(Strategy::GapWalk));
        assert_eq!(args.pins, Some(5));
        assert!(matches!(input_source_from_args(&args.input), InputSource::Csv(_)));
        assert_eq!(assign_config_from_args(&args).unwrap().pin_override, Some(5));
    }
}
