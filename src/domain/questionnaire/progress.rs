//! Advisory progress hint for questionnaire screens.

use serde::Serialize;

use crate::domain::foundation::Percentage;

/// Fixed denominator used for the progress bar.
///
/// Real traversals are anywhere from one to eighteen questions long, so
/// this is a display hint, never a promise of how many questions remain.
pub const DISPLAY_TOTAL: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub display_total: usize,
}

impl Progress {
    pub fn new(answered: usize) -> Self {
        Self {
            answered,
            display_total: DISPLAY_TOTAL,
        }
    }

    /// One-based number of the question currently shown.
    pub fn question_number(&self) -> usize {
        self.answered + 1
    }

    /// Share of the display total answered so far, capped at 100%.
    pub fn percentage(&self) -> Percentage {
        Percentage::of(self.answered, self.display_total)
    }
}
