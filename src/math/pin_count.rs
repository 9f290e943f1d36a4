//! Pin count solver.
//!
//! A pool of `p` pins offers `p·(p−1)` ordered (high, low) pairs of distinct
//! pins, so a group of `n` terminals needs the smallest `p` with
//! `p·(p−1) ≥ n`. Solving `p² − p − n = 0` gives
//!
//! `p = ceil((1 + sqrt(1 + 4n)) / 2)`
//!
//! The float result is then nudged against the integer condition so large
//! `n` cannot land one off from rounding.

use crate::domain::MIN_PIN_COUNT;

/// Ordered pairs of distinct pins available from `pins` pins.
pub fn ordered_pair_capacity(pins: usize) -> usize {
    pins.saturating_mul(pins.saturating_sub(1))
}

/// Smallest `p ≥ 1` with `p·(p−1) ≥ terminals`.
///
/// `terminals = 0` yields `1`; use [`group_pin_count`] when a pair must be
/// drawable.
pub fn minimum_pin_count(terminals: usize) -> usize {
    let n = terminals as f64;
    let mut p = ((1.0 + (1.0 + 4.0 * n).sqrt()) / 2.0).ceil() as usize;
    p = p.max(1);

    while p > 1 && ordered_pair_capacity(p - 1) >= terminals {
        p -= 1;
    }
    while ordered_pair_capacity(p) < terminals {
        p += 1;
    }
    p
}

/// Pin count used for a group: the minimum, clamped to [`MIN_PIN_COUNT`].
pub fn group_pin_count(terminals: usize) -> usize {
    minimum_pin_count(terminals).max(MIN_PIN_COUNT)
}
