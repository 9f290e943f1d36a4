//! Assignment orchestration.
//!
//! For each group, in the order supplied:
//!
//! 1. size the pin pool (solver result clamped to 2, or the configured override)
//! 2. build a fresh pattern sequence for the configured strategy
//! 3. bind the first `count` pairs to terminal positions `0..count`
//!
//! A group whose sequence runs dry fails on its own; the other groups are
//! still assigned.

use log::{debug, warn};

use crate::domain::{AssignConfig, PinPair, Strategy, TerminalGroup};
use crate::error::PatternError;
use crate::math::group_pin_count;
use crate::patterns::create_pattern_sequence;

/// Pin pairs for one group, indexed by terminal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAssignment {
    pub group_id: String,
    pub strategy: Strategy,
    pub pin_count: usize,
    pub pairs: Vec<PinPair>,
}

impl GroupAssignment {
    /// Highest pin index actually used, if any terminal was assigned.
    pub fn max_pin(&self) -> Option<usize> {
        self.pairs.iter().map(|p| p.max_pin()).max()
    }

    /// True when every pair stays inside `[0, pin_count)`.
    ///
    /// Always true for gap-walk; lattice pairs may overshoot.
    pub fn within_pin_range(&self) -> bool {
        self.pairs.iter().all(|p| p.fits(self.pin_count))
    }
}

/// A group that could not be assigned, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignFailure {
    pub group_id: String,
    pub count: usize,
    pub error: PatternError,
}

/// Result of one orchestration pass, groups kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentSet {
    pub outcomes: Vec<Result<GroupAssignment, AssignFailure>>,
}

impl AssignmentSet {
    pub fn assigned(&self) -> impl Iterator<Item = &GroupAssignment> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssignFailure> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// First successful assignment for `group_id`.
    pub fn get(&self, group_id: &str) -> Option<&GroupAssignment> {
        self.assigned().find(|a| a.group_id == group_id)
    }
}

/// Assign pins to every group with the solver-derived pin counts.
pub fn assign(groups: &[TerminalGroup], strategy: Strategy) -> AssignmentSet {
    assign_with_config(
        groups,
        &AssignConfig {
            strategy,
            pin_override: None,
        },
    )
}

/// Assign pins to every group, honoring a pin override if configured.
pub fn assign_with_config(groups: &[TerminalGroup], config: &AssignConfig) -> AssignmentSet {
    let outcomes = groups
        .iter()
        .map(|group| {
            let pins = config.pin_override.unwrap_or_else(|| group_pin_count(group.count));
            assign_group_with_pins(group, config.strategy, pins).map_err(|error| {
                warn!("group '{}' ({} terminals) not assigned: {error}", group.id, group.count);
                AssignFailure {
                    group_id: group.id.clone(),
                    count: group.count,
                    error,
                }
            })
        })
        .collect();

    AssignmentSet { outcomes }
}

/// Assign one group using the solver-derived pin count.
pub fn assign_group(group: &TerminalGroup, strategy: Strategy) -> Result<GroupAssignment, PatternError> {
    assign_group_with_pins(group, strategy, group_pin_count(group.count))
}

/// Assign one group from a `pins`-pin pattern.
pub fn assign_group_with_pins(
    group: &TerminalGroup,
    strategy: Strategy,
    pins: usize,
) -> Result<GroupAssignment, PatternError> {
    let mut sequence = create_pattern_sequence(strategy, pins)?;
    let pairs = sequence.draw_many(group.count)?;

    let assignment = GroupAssignment {
        group_id: group.id.clone(),
        strategy,
        pin_count: pins,
        pairs,
    };

    debug!(
        "group '{}': {} terminals on {} pins ({})",
        group.id,
        group.count,
        pins,
        strategy.display_name()
    );
    if !assignment.within_pin_range() {
        debug!(
            "group '{}': {} pattern reaches pin {} with only {} pins",
            group.id,
            strategy.display_name(),
            assignment.max_pin().unwrap_or(0),
            pins
        );
    }

    Ok(assignment)
}
