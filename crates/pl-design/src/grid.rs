//! Fixed-increment grids for the design sweep.
//!
//! Points are generated by index, `start + i·step`, so the grid does not drift
//! the way repeated addition of a small increment would. A relative slack of
//! one billionth of a step decides points that land on the end bound.

use crate::error::{DesignError, DesignResult};
use std::fmt;

const BOUND_SLACK: f64 = 1e-9;

/// Largest number of points a single range may hold.
pub const MAX_POINTS: usize = 1_000_000_000;

/// Evenly spaced values from `start` toward `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    /// Closed `[start, end]` when true, half-open `[start, end)` otherwise
    pub include_end: bool,
}

impl SweepRange {
    pub fn half_open(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            include_end: false,
        }
    }

    pub fn closed(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            include_end: true,
        }
    }

    /// A range holding exactly one value.
    pub fn single(value: f64) -> Self {
        Self::closed(value, value, 1.0)
    }

    pub fn check(&self, what: &'static str) -> DesignResult<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(DesignError::InvalidRange {
                what,
                reason: "bounds and step must be finite",
            });
        }
        if self.step <= 0.0 {
            return Err(DesignError::InvalidRange {
                what,
                reason: "step must be positive",
            });
        }
        if self.start + self.step == self.start {
            return Err(DesignError::InvalidRange {
                what,
                reason: "step is below the resolution of the start value",
            });
        }
        if !((self.end - self.start) / self.step < MAX_POINTS as f64) {
            return Err(DesignError::InvalidRange {
                what,
                reason: "too many grid points",
            });
        }
        if self.is_empty() {
            return Err(DesignError::EmptyRange { what });
        }
        Ok(())
    }

    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    fn contains(&self, v: f64) -> bool {
        let slack = self.step * BOUND_SLACK;
        if self.include_end {
            v <= self.end + slack
        } else {
            v < self.end - slack
        }
    }

    /// Number of grid points, capped at [`MAX_POINTS`].
    pub fn len(&self) -> usize {
        if !(self.step > 0.0) || !self.contains(self.start) {
            return 0;
        }
        if self.value(1) == self.start {
            // step lost in the rounding of start; only one distinct point
            return 1;
        }
        let steps = ((self.end - self.start) / self.step).floor().max(0.0);
        if !(steps < MAX_POINTS as f64) {
            return MAX_POINTS;
        }
        let mut n = steps as usize;
        while n > 0 && !self.contains(self.value(n - 1)) {
            n -= 1;
        }
        while n < MAX_POINTS && self.contains(self.value(n)) {
            n += 1;
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.value(i))
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.include_end { ']' } else { ')' };
        write!(
            f,
            "[{}, {}{} step {} ({} points)",
            self.start,
            self.end,
            close,
            self.step,
            self.len()
        )
    }
}

/// Outer diameter grid and inner burial-fraction grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGrid {
    /// Nominal diameters (m)
    pub diameters: SweepRange,
    /// Burial fractions
    pub burial_fractions: SweepRange,
}

impl SweepGrid {
    pub fn check(&self) -> DesignResult<()> {
        self.diameters.check("diameter")?;
        self.burial_fractions.check("burial fraction")?;
        Ok(())
    }

    pub fn total_points(&self) -> usize {
        self.diameters.len() * self.burial_fractions.len()
    }
}
