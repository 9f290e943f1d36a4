//! Pin-pair pattern generators.
//!
//! Both strategies are pull-based, single-use cursors. To replay a sequence,
//! build a new one from the same pin count.
//!
//! - `gap_walk`: exact coverage of every ordered pin pair
//! - `lattice`: cheap triangular-offset layout, no coverage guarantee

pub mod gap_walk;
pub mod lattice;

pub use gap_walk::*;
pub use lattice::*;

use std::iter::FusedIterator;

use crate::domain::{PinPair, Strategy};
use crate::error::PatternError;

#[derive(Debug, Clone)]
enum Cursor {
    GapWalk(GapWalk),
    Lattice(Lattice),
}

/// A pattern sequence for one group, whichever strategy produced it.
#[derive(Debug, Clone)]
pub struct PatternSequence {
    strategy: Strategy,
    drawn: usize,
    cursor: Cursor,
}

/// Build a fresh sequence for `pins` pins using `strategy`.
pub fn create_pattern_sequence(strategy: Strategy, pins: usize) -> Result<PatternSequence, PatternError> {
    let cursor = match strategy {
        Strategy::GapWalk => Cursor::GapWalk(GapWalk::new(pins)?),
        Strategy::Lattice => Cursor::Lattice(Lattice::new(pins)?),
    };
    Ok(PatternSequence {
        strategy,
        drawn: 0,
        cursor,
    })
}

impl PatternSequence {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn pins(&self) -> usize {
        match &self.cursor {
            Cursor::GapWalk(walk) => walk.pins(),
            Cursor::Lattice(lattice) => lattice.pins(),
        }
    }

    /// Pairs handed out so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Take the next pair, or `SequenceExhausted` once the pattern is used up.
    pub fn draw(&mut self) -> Result<PinPair, PatternError> {
        self.next().ok_or(PatternError::SequenceExhausted {
            pins: self.pins(),
            drawn: self.drawn,
        })
    }

    /// Take exactly `count` pairs in order, or fail without returning a prefix.
    pub fn draw_many(&mut self, count: usize) -> Result<Vec<PinPair>, PatternError> {
        if self.len() < count {
            return Err(PatternError::SequenceExhausted {
                pins: self.pins(),
                drawn: self.drawn + self.len(),
            });
        }
        (0..count).map(|_| self.draw()).collect()
    }
}

impl Iterator for PatternSequence {
    type Item = PinPair;

    fn next(&mut self) -> Option<PinPair> {
        let pair = match &mut self.cursor {
            Cursor::GapWalk(walk) => walk.next(),
            Cursor::Lattice(lattice) => lattice.next(),
        }?;
        self.drawn += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.cursor {
            Cursor::GapWalk(walk) => walk.size_hint(),
            Cursor::Lattice(lattice) => lattice.size_hint(),
        }
    }
}

impl ExactSizeIterator for PatternSequence {}

impl FusedIterator for PatternSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_walk_first_six_for_four_pins() {
        let seq = create_pattern_sequence(Strategy::GapWalk, 4).unwrap();
        let got: Vec<_> = seq.take(6).map(|p| (p.high, p.low)).collect();
        assert_eq!(got, vec![(3, 0), (0, 3), (3, 1), (1, 3), (2, 0), (0, 2)]);
    }

    #[test]
    fn drawing_past_the_end_is_exhaustion() {
        let mut seq = create_pattern_sequence(Strategy::GapWalk, 2).unwrap();
        assert_eq!(seq.draw(), Ok(PinPair::new(1, 0)));
        assert_eq!(seq.draw(), Ok(PinPair::new(0, 1)));
        for _ in 0..4 {
            assert_eq!(
                seq.draw(),
                Err(PatternError::SequenceExhausted { pins: 2, drawn: 2 })
            );
        }
    }

    #[test]
    fn lattice_exhausts_too() {
        let mut seq = create_pattern_sequence(Strategy::Lattice, 2).unwrap();
        assert!(seq.draw().is_ok());
        assert!(seq.draw().is_ok());
        assert!(matches!(seq.draw(), Err(PatternError::SequenceExhausted { .. })));
    }

    #[test]
    fn draw_many_refuses_partial_results() {
        let mut seq = create_pattern_sequence(Strategy::GapWalk, 3).unwrap();
        assert_eq!(
            seq.draw_many(7),
            Err(PatternError::SequenceExhausted { pins: 3, drawn: 6 })
        );
        assert_eq!(seq.drawn(), 0);
        assert_eq!(seq.draw_many(6).unwrap().len(), 6);
    }

    #[test]
    fn same_inputs_same_sequence() {
        for strategy in Strategy::ALL {
            for pins in 2..=7 {
                let a: Vec<_> = create_pattern_sequence(strategy, pins).unwrap().collect();
                let b: Vec<_> = create_pattern_sequence(strategy, pins).unwrap().collect();
                assert_eq!(a, b, "{strategy:?} pins={pins}");
            }
        }
    }

    #[test]
    fn reports_its_strategy_and_pins() {
        for strategy in Strategy::ALL {
            let mut seq = create_pattern_sequence(strategy, 5).unwrap();
            seq.next();
            assert_eq!(seq.strategy(), strategy);
            assert_eq!(seq.pins(), 5);
        }
    }

    #[test]
    fn invalid_pin_count_before_any_sequence() {
        for strategy in Strategy::ALL {
            assert_eq!(
                create_pattern_sequence(strategy, 1).unwrap_err(),
                PatternError::InvalidPinCount { pins: 1 }
            );
        }
    }
}
