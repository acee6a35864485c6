//! Evaluation score type.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed evaluation score in Black-to-move convention.
///
/// Stored as a 16-bit integer, matching the reference engine's score unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Score(i16);

impl Score {
    pub const ZERO: Score = Score(0);

    /// One "disc" of evaluation weight.
    pub const SCALE: i32 = 100;

    /// Sentinel used as the search window's outer bound.
    pub const INFINITY: Score = Score(100 * Self::SCALE as i16);

    #[inline]
    pub const fn new(value: i16) -> Score {
        Score(value)
    }

    #[inline]
    pub const fn value(self) -> i16 {
        self.0
    }
}

// Arithmetic wraps rather than panics: the learner's unclamped parameter
// updates (see eval::gradient) can overflow a cell, which the design treats
// as a training misconfiguration rather than a condition to trap on.

impl Add for Score {
    type Output = Score;
    #[inline]
    fn add(self, rhs: Score) -> Score {
        Score(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Score {
    type Output = Score;
    #[inline]
    fn sub(self, rhs: Score) -> Score {
        Score(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Score {
    type Output = Score;
    #[inline]
    fn neg(self) -> Score {
        Score(self.0.wrapping_neg())
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
