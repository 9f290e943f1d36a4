//! Shared "assign pipeline" logic used by both CLI and TUI front-ends.
//!
//! terminals -> buckets -> per-bucket pin assignment -> marker overlay
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use log::{debug, info};

use crate::assign::{AssignmentSet, assign_with_config};
use crate::domain::{AssignConfig, InputSource, Terminal, TerminalGroup};
use crate::error::AppError;
use crate::io::ingest::RowError;
use crate::nets::{Bucket, Overlay, bucket_terminals};

/// Terminals plus whatever ingest had to skip.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub terminals: Vec<Terminal>,
    pub row_errors: Vec<RowError>,
}

/// All computed outputs of a single assignment run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub config: AssignConfig,
    pub input: LoadedInput,
    pub buckets: Vec<Bucket>,
    pub assignments: AssignmentSet,
    pub overlay: Overlay,
}

impl RunOutput {
    pub fn groups(&self) -> Vec<TerminalGroup> {
        self.buckets.iter().map(Bucket::group).collect()
    }
}

/// Read terminals from a CSV file or generate a synthetic diagram.
pub fn load_input(source: &InputSource) -> Result<LoadedInput, AppError> {
    match source {
        InputSource::Csv(path) => {
            let ingested = crate::io::ingest::load_terminals(path)?;
            info!(
                "read {} terminals from '{}' ({} rows skipped)",
                ingested.terminals.len(),
                path.display(),
                ingested.row_errors.len()
            );
            Ok(LoadedInput {
                terminals: ingested.terminals,
                row_errors: ingested.row_errors,
            })
        }
        InputSource::Sample(sample) => {
            let terminals = crate::data::generate_sample(sample)?;
            info!("generated {} sample terminals", terminals.len());
            Ok(LoadedInput {
                terminals,
                row_errors: Vec::new(),
            })
        }
    }
}

/// Execute the full pipeline from an input source.
pub fn run_assign(source: &InputSource, config: &AssignConfig) -> Result<RunOutput, AppError> {
    let input = load_input(source)?;
    Ok(run_assign_with_input(input, config))
}

/// Execute the pipeline on already-loaded terminals.
///
/// The TUI uses this to re-assign after a strategy switch without re-reading.
pub fn run_assign_with_input(input: LoadedInput, config: &AssignConfig) -> RunOutput {
    let buckets = bucket_terminals(&input.terminals);
    let groups: Vec<TerminalGroup> = buckets.iter().map(Bucket::group).collect();
    debug!("{} buckets, config {:?}", groups.len(), config);

    let assignments = assign_with_config(&groups, config);
    let overlay = Overlay::build(&buckets, &assignments);

    RunOutput {
        config: *config,
        input,
        buckets,
        assignments,
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SampleConfig, Strategy};

    #[test]
    fn sample_run_assigns_every_bucket() {
        let source = InputSource::Sample(SampleConfig::default());
        let config = AssignConfig::default();
        let run = run_assign(&source, &config).unwrap();

        assert!(!run.assignments.has_failures());
        assert_eq!(run.assignments.assigned().count(), run.buckets.len());
        assert_eq!(run.overlay.markers().len(), 2 * run.input.terminals.len());
    }

    #[test]
    fn strategy_switch_reuses_terminals() {
        let input = load_input(&InputSource::Sample(SampleConfig::default())).unwrap();
        let a = run_assign_with_input(input.clone(), &AssignConfig::default());
        let b = run_assign_with_input(
            input,
            &AssignConfig {
                strategy: Strategy::Lattice,
                pin_override: None,
            },
        );
        assert_eq!(a.groups(), b.groups());
        assert!(b.assignments.assigned().all(|g| g.strategy == Strategy::Lattice));
    }
}
