//! Synthetic diagram generation.
//!
//! Produces a terminal list that looks like a flattened drawing: a handful of
//! colour groups of uneven size, with terminals of different colours
//! interleaved in drawing order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Poisson;

use crate::domain::{SampleConfig, Terminal};
use crate::error::AppError;

/// Largest mean group size accepted for a synthetic diagram.
pub const MAX_SAMPLE_MEAN: f64 = 10_000.0;

/// Group ids, reused with a numeric suffix when more groups are requested.
const PALETTE: [&str; 10] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c",
    "#fabebe",
];

pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Terminal>, AppError> {
    if config.groups == 0 {
        return Err(AppError::new(2, "Sample group count must be > 0."));
    }
    if !(config.mean_terminals.is_finite() && config.mean_terminals >= 0.0) {
        return Err(AppError::new(2, "Sample mean terminal count must be finite and >= 0."));
    }
    if config.mean_terminals > MAX_SAMPLE_MEAN {
        return Err(AppError::new(
            2,
            format!("Sample mean terminal count must be <= {MAX_SAMPLE_MEAN}."),
        ));
    }

    let mut rng = StdRng::seed_from_u64(sample_seed(config));

    // Poisson rejects a zero mean; every group then just gets one terminal.
    let poisson = if config.mean_terminals > 0.0 {
        Some(
            Poisson::new(config.mean_terminals)
                .map_err(|e| AppError::new(2, format!("Terminal count distribution error: {e}")))?,
        )
    } else {
        None
    };

    let mut groups: Vec<String> = Vec::new();
    for g in 0..config.groups {
        let extra: f64 = poisson.as_ref().map(|d| d.sample(&mut rng)).unwrap_or(0.0);
        let count = 1 + extra as usize;
        let id = group_name(g);
        groups.extend(std::iter::repeat_n(id, count));
    }

    groups.shuffle(&mut rng);

    let terminals = groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| Terminal::new(format!("t{:03}", i + 1), group))
        .collect();

    Ok(terminals)
}

fn group_name(index: usize) -> String {
    let base = PALETTE[index % PALETTE.len()];
    match index / PALETTE.len() {
        0 => base.to_string(),
        round => format!("{base}-{round}"),
    }
}

fn sample_seed(config: &SampleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.seed.hash(&mut hasher);
    config.groups.hash(&mut hasher);
    config.mean_terminals.to_bits().hash(&mut hasher);
    hasher.finish()
}
