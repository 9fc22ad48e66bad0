//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Percentage of `part` over `whole`, rounded down and clamped to 100.
    ///
    /// A zero `whole` yields [`Percentage::ZERO`].
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let pct = part.saturating_mul(100) / whole;
        Self(pct.min(100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn of_rounds_down() {
        assert_eq!(Percentage::of(1, 30).value(), 3);
        assert_eq!(Percentage::of(8, 30).value(), 26);
        assert_eq!(Percentage::of(15, 30).value(), 50);
    }

    #[test]
    fn of_clamps_when_part_exceeds_whole() {
        assert_eq!(Percentage::of(45, 30), Percentage::HUNDRED);
    }

    #[test]
    fn of_zero_whole_is_zero() {
        assert_eq!(Percentage::of(3, 0), Percentage::ZERO);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
    }
}
