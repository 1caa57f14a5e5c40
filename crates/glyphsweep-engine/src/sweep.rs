#![forbid(unsafe_code)]

//! The reveal frontier.
//!
//! A sweep moves a column frontier left to right across the grid. Cells at
//! or behind the frontier resolve to their target glyphs; everything ahead
//! keeps flickering noise. Speed is derived once from grid width and fixed
//! for the engine's lifetime; each trigger rewinds the frontier to zero.

/// Reveal progress for one sweep cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepState {
    /// Rightmost resolved column; saturates at the grid width.
    pub front: usize,
    /// False once the frontier reaches the right edge, until the next trigger.
    pub active: bool,
    /// Columns advanced per frame: `max(2, cols / 55)`.
    pub speed: usize,
}

impl SweepState {
    /// Idle sweep for a grid of `cols` columns. Nothing moves until the
    /// first [`SweepState::retrigger`].
    #[must_use]
    pub fn new(cols: usize) -> Self {
        Self {
            front: 0,
            active: false,
            speed: (cols / 55).max(2),
        }
    }

    /// Rewind the frontier and start a fresh sweep, superseding any sweep
    /// already in flight.
    pub fn retrigger(&mut self) {
        self.front = 0;
        self.active = true;
    }

    /// Advance one frame. The frontier clamps to `cols` and the sweep
    /// deactivates exactly when it arrives; it never overshoots.
    pub fn advance(&mut self, cols: usize) {
        if !self.active {
            return;
        }
        self.front += self.speed;
        if self.front >= cols {
            self.front = cols;
            self.active = false;
        }
    }
}
