//! Gap-walk pattern ("pio").
//!
//! Enumerates every ordered pair of distinct pins in `[0, n)` exactly once:
//!
//! ```text
//! for gap in (1..n).rev():
//!     for top in (gap..n).rev():
//!         (top, top - gap), (top - gap, top)
//! ```
//!
//! Widest gaps come first, and each unordered pair is emitted in both
//! orientations back to back. For `n = 4`:
//!
//! `(3,0) (0,3) (3,1) (1,3) (2,0) (0,2) (3,2) (2,3) (2,1) (1,2) (1,0) (0,1)`
//!
//! This is the same order as walking a two-bit mask from `0b1000_0001`-style
//! patterns towards `0b11`, expressed as loops instead of bit tricks.

use std::iter::FusedIterator;

use crate::domain::{MIN_PIN_COUNT, PinPair};
use crate::error::PatternError;
use crate::math::ordered_pair_capacity;

/// Cursor over the gap-walk order for a fixed pin count.
#[derive(Debug, Clone)]
pub struct GapWalk {
    pins: usize,
    gap: usize,
    top: usize,
    /// The forward pair at `(gap, top)` was emitted; its reverse is next.
    mirrored: bool,
    emitted: usize,
}

impl GapWalk {
    pub fn new(pins: usize) -> Result<Self, PatternError> {
        if pins < MIN_PIN_COUNT {
            return Err(PatternError::InvalidPinCount { pins });
        }
        Ok(Self {
            pins,
            gap: pins - 1,
            top: pins - 1,
            mirrored: false,
            emitted: 0,
        })
    }

    pub fn pins(&self) -> usize {
        self.pins
    }

    /// Total pairs this walk produces: `n·(n−1)`.
    pub fn len_total(&self) -> usize {
        ordered_pair_capacity(self.pins)
    }

    fn is_done(&self) -> bool {
        self.emitted >= self.len_total()
    }

    fn advance(&mut self) {
        if self.top > self.gap {
            self.top -= 1;
        } else if self.gap > 1 {
            self.gap -= 1;
            self.top = self.pins - 1;
        }
    }
}

impl Iterator for GapWalk {
    type Item = PinPair;

    fn next(&mut self) -> Option<PinPair> {
        if self.is_done() {
            return None;
        }

        let forward = PinPair::new(self.top, self.top - self.gap);
        self.emitted += 1;

        if !self.mirrored {
            self.mirrored = true;
            return Some(forward);
        }

        self.mirrored = false;
        self.advance();
        Some(forward.reversed())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len_total() - self.emitted;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GapWalk {}

impl FusedIterator for GapWalk {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn pairs(pins: usize) -> Vec<(usize, usize)> {
        GapWalk::new(pins)
            .unwrap()
            .map(|p| (p.high, p.low))
            .collect()
    }

    /// Two-bit mask walk: the msb/lsb of the mask are the pair, the lsb
    /// shifts down until it hits bit 0, then restarts one bit further in.
    fn bit_walk(pins: usize) -> Vec<(usize, usize)> {
        let msb_of = |v: u64| 63 - v.leading_zeros() as usize;
        let mut out = Vec::new();
        let mut pat: u64 = (1 << (pins - 1)) | 1;
        loop {
            let msb = msb_of(pat);
            let lsb = msb_of(pat & pat.wrapping_neg());
            out.push((msb, lsb));
            out.push((lsb, msb));
            if msb == 1 && lsb == 0 {
                return out;
            } else if lsb == 0 {
                pat = (1 << (pins - 1)) | (1 << (pins - msb));
            } else {
                pat >>= 1;
            }
        }
    }

    #[test]
    fn four_pin_order() {
        assert_eq!(
            pairs(4),
            vec![
                (3, 0),
                (0, 3),
                (3, 1),
                (1, 3),
                (2, 0),
                (0, 2),
                (3, 2),
                (2, 3),
                (2, 1),
                (1, 2),
                (1, 0),
                (0, 1),
            ]
        );
    }

    #[test]
    fn covers_every_ordered_pair_once() {
        for n in 2..=9usize {
            let got = pairs(n);
            assert_eq!(got.len(), n * (n - 1), "n={n}");

            let unique: HashSet<_> = got.iter().copied().collect();
            assert_eq!(unique.len(), got.len(), "duplicates for n={n}");

            let expected: HashSet<_> = (0..n)
                .flat_map(|a| (0..n).filter(move |&b| b != a).map(move |b| (a, b)))
                .collect();
            assert_eq!(unique, expected, "n={n}");
        }
    }

    #[test]
    fn reverse_follows_forward() {
        let got = pairs(6);
        for chunk in got.chunks(2) {
            assert_eq!(chunk[0], (chunk[1].1, chunk[1].0));
            assert!(chunk[0].0 > chunk[0].1);
        }
    }

    #[test]
    fn matches_bit_rotation_walk() {
        for n in 2..=16usize {
            assert_eq!(pairs(n), bit_walk(n), "n={n}");
        }
    }

    #[test]
    fn ends_on_one_zero_and_stays_done() {
        let mut walk = GapWalk::new(3).unwrap();
        let all: Vec<_> = walk.by_ref().collect();
        assert_eq!(all[all.len() - 2], PinPair::new(1, 0));
        assert_eq!(all[all.len() - 1], PinPair::new(0, 1));
        assert_eq!(walk.next(), None);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn exact_size_counts_down() {
        let mut walk = GapWalk::new(5).unwrap();
        assert_eq!(walk.len(), 20);
        walk.next();
        walk.next();
        walk.next();
        assert_eq!(walk.len(), 17);
    }

    #[test]
    fn rejects_fewer_than_two_pins() {
        assert_eq!(GapWalk::new(1).unwrap_err(), PatternError::InvalidPinCount { pins: 1 });
        assert!(GapWalk::new(0).is_err());
    }
}
