//! Lattice pattern ("grid").
//!
//! Lays the pins out on a `W × H` lattice with `W = p` and `H = p − 1`, and
//! pairs each cell with the cell below it:
//!
//! `f(x, y) = (T(y) mod W) + x`,  `T(y) = y·(y+1)/2`
//!
//! yielding `(f(x, y), f(x, y+1))` in row-major order, `p·(p−1)` pairs total.
//! The triangular offset keeps consecutive rows from lining up, so the two
//! pins of a pair always differ (`T(y+1) − T(y) = y+1 < W`).
//!
//! The sum is deliberately not reduced mod `W`: pin indices can reach
//! `2W − 2`, and pairs may repeat. Downstream code must not assume
//! `pin < p` for this strategy.

use std::iter::FusedIterator;

use crate::domain::{MIN_PIN_COUNT, PinPair};
use crate::error::PatternError;

#[derive(Debug, Clone)]
pub struct Lattice {
    width: usize,
    height: usize,
    x: usize,
    y: usize,
}

impl Lattice {
    pub fn new(pins: usize) -> Result<Self, PatternError> {
        if pins < MIN_PIN_COUNT {
            return Err(PatternError::InvalidPinCount { pins });
        }
        Ok(Self {
            width: pins,
            height: pins - 1,
            x: 0,
            y: 0,
        })
    }

    pub fn pins(&self) -> usize {
        self.width
    }

    fn cell(&self, x: usize, y: usize) -> usize {
        (y * (y + 1) / 2) % self.width + x
    }
}

impl Iterator for Lattice {
    type Item = PinPair;

    fn next(&mut self) -> Option<PinPair> {
        if self.y >= self.height {
            return None;
        }

        let pair = PinPair::new(self.cell(self.x, self.y), self.cell(self.x, self.y + 1));

        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.y >= self.height {
            0
        } else {
            (self.height - self.y) * self.width - self.x
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Lattice {}

impl FusedIterator for Lattice {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_pin_rows() {
        // T(0)=0, T(1)=1, T(2)=3≡0 (mod 3)
        let got: Vec<_> = Lattice::new(3).unwrap().map(|p| (p.high, p.low)).collect();
        assert_eq!(got, vec![(0, 1), (1, 2), (2, 3), (1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn yields_p_times_p_minus_one_distinct_pairs() {
        for p in 2..=12usize {
            let pairs: Vec<_> = Lattice::new(p).unwrap().collect();
            assert_eq!(pairs.len(), p * (p - 1), "p={p}");
            assert!(pairs.iter().all(|pair| pair.high != pair.low), "p={p}");
        }
    }

    #[test]
    fn indices_are_not_wrapped() {
        let p = 5;
        let max = Lattice::new(p).unwrap().map(PinPair::max_pin).max().unwrap();
        assert!(max >= p, "expected unreduced indices, max={max}");
        assert!(max <= 2 * p - 2);
    }

    #[test]
    fn size_hint_tracks_position() {
        let mut lattice = Lattice::new(4).unwrap();
        assert_eq!(lattice.len(), 12);
        for _ in 0..5 {
            lattice.next();
        }
        assert_eq!(lattice.len(), 7);
        lattice.by_ref().for_each(drop);
        assert_eq!(lattice.len(), 0);
        assert_eq!(lattice.next(), None);
    }

    #[test]
    fn rejects_fewer_than_two_pins() {
        assert_eq!(Lattice::new(1).unwrap_err(), PatternError::InvalidPinCount { pins: 1 });
    }
}
