//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{PinPair, Strategy};
use crate::math::{group_pin_count, minimum_pin_count, ordered_pair_capacity};
use crate::nets::{NetKey, Overlay};

/// Table of solver results for the `count` command.
pub fn format_pin_counts(counts: &[usize]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10}  {:>8}  {:>10}  {:>8}\n",
        "terminals", "min_pins", "group_pins", "pairs"
    ));
    for &n in counts {
        let group_pins = group_pin_count(n);
        out.push_str(&format!(
            "{:>10}  {:>8}  {:>10}  {:>8}\n",
            n,
            minimum_pin_count(n),
            group_pins,
            ordered_pair_capacity(group_pins)
        ));
    }
    out
}

/// Numbered listing of a pattern sequence.
pub fn format_pattern(strategy: Strategy, pins: usize, pairs: &[PinPair]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} pattern, {pins} pins: {} of {} pairs\n",
        strategy.display_name(),
        pairs.len(),
        ordered_pair_capacity(pins)
    ));
    let width = pairs.len().max(1).to_string().len();
    for (i, pair) in pairs.iter().enumerate() {
        out.push_str(&format!("{i:>width$}  high={:<3} low={}\n", pair.high, pair.low));
    }
    out
}

/// Header block: input, strategy, counts.
pub fn format_run_summary(run: &RunOutput, source: &str) -> String {
    let mut out = String::new();
    out.push_str("=== pins - polarity pin assignment ===\n");
    out.push_str(&format!("Input: {source}\n"));
    out.push_str(&format!(
        "Strategy: {}{}\n",
        run.config.strategy.display_name(),
        run.config
            .pin_override
            .map(|p| format!(" | pins fixed at {p}"))
            .unwrap_or_default()
    ));
    out.push_str(&format!(
        "Terminals: {} | buckets: {} | assigned: {} | failed: {}\n",
        run.input.terminals.len(),
        run.buckets.len(),
        run.assignments.assigned().count(),
        run.assignments.failures().count()
    ));
    if !run.input.row_errors.is_empty() {
        out.push_str(&format!("Skipped rows: {}\n", run.input.row_errors.len()));
        for e in run.input.row_errors.iter().take(10) {
            out.push_str(&format!(
                "  line {}: {} ({})\n",
                e.line,
                e.message,
                e.id.as_deref().unwrap_or("-")
            ));
        }
    }
    out
}

/// Per-bucket terminal -> pin pair tables, then any failed buckets.
pub fn format_assignments(run: &RunOutput) -> String {
    let mut out = String::new();

    for bucket in &run.buckets {
        let Some(assignment) = run.assignments.get(&bucket.id) else {
            continue;
        };
        out.push_str(&format!(
            "\nBucket {}: {} terminals on {} pins\n",
            bucket.id,
            bucket.terminals.len(),
            assignment.pin_count
        ));
        if !assignment.within_pin_range() {
            out.push_str(&format!(
                "  note: {} pattern uses pins up to {} (indices are not wrapped)\n",
                assignment.strategy.display_name(),
                assignment.max_pin().unwrap_or(0)
            ));
        }
        let width = bucket.terminals.iter().map(String::len).max().unwrap_or(0).max(8);
        for (terminal, pair) in bucket.terminals.iter().zip(&assignment.pairs) {
            out.push_str(&format!("  {terminal:<width$}  +{:<3} -{}\n", pair.high, pair.low));
        }
    }

    let failures: Vec<_> = run.assignments.failures().collect();
    if !failures.is_empty() {
        out.push_str("\nFailed buckets:\n");
        for f in failures {
            out.push_str(&format!("  {} ({} terminals): {}\n", f.group_id, f.count, f.error));
        }
    }

    out
}

/// Markers on one net, i.e. what a hover over any of them highlights.
pub fn format_net(overlay: &Overlay, key: &NetKey) -> String {
    let net = overlay.net(key);
    let mut out = format!("\nNet {key}: {} markers\n", net.len());
    if net.is_empty() {
        out.push_str("  (no markers on this net)\n");
    }
    for m in net {
        out.push_str(&format!("  {}{} {}\n", m.polarity.sign(), m.pin, m.terminal));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{LoadedInput, run_assign_with_input};
    use crate::domain::{AssignConfig, Terminal};

    fn run(config: AssignConfig) -> RunOutput {
        let input = LoadedInput {
            terminals: vec![
                Terminal::new("a1", "red"),
                Terminal::new("a2", "red"),
                Terminal::new("a3", "red"),
                Terminal::new("b1", "blue"),
            ],
            row_errors: Vec::new(),
        };
        run_assign_with_input(input, &config)
    }

    #[test]
    fn pin_count_table_has_a_row_per_count() {
        let table = format_pin_counts(&[0, 7]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].split_whitespace().eq(["0", "1", "2", "2"]));
        assert!(lines[2].split_whitespace().eq(["7", "4", "4", "12"]));
    }

    #[test]
    fn assignments_list_every_terminal() {
        let out = format_assignments(&run(AssignConfig::default()));
        assert!(out.contains("Bucket red: 3 terminals on 3 pins"));
        assert!(out.contains("a1"));
        assert!(out.contains("+2   -0"));
        assert!(!out.contains("Failed buckets"));
    }

    #[test]
    fn failed_buckets_are_reported() {
        let out = format_assignments(&run(AssignConfig {
            pin_override: Some(2),
            ..AssignConfig::default()
        }));
        assert!(out.contains("Failed buckets"));
        assert!(out.contains("red (3 terminals): insufficient pattern"));
        assert!(out.contains("Bucket blue"));
    }

    #[test]
    fn net_listing() {
        let r = run(AssignConfig::default());
        let out = format_net(&r.overlay, &NetKey::parse("red:2").unwrap());
        assert!(out.contains("Net red:2: 3 markers"));
        assert!(out.contains("+2 a1"));
        assert!(out.contains("-2 a2"));
    }
}
