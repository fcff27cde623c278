//! Per-key scroll state machine
//!
//! ```text
//!   Unseen    --fits-->       Settled
//!   Unseen    --overflows-->  Scrolling (reset to start)
//!   Settled   --overflows-->  Scrolling (reset to start)
//!   Scrolling --fits-->       Settled
//!   Scrolling --overflows-->  Scrolling (advance, dwell or wrap)
//! ```
//!
//! Offsets are the number of pixels the text is shifted left. A scroll
//! cycle runs from the start position to the overflow (text width minus
//! display width), holds there for the dwell, wraps to the start, and
//! holds again before moving.

use crate::config::ScrollConfig;

/// Scroll phase of one stat key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Key never rendered
    Unseen,
    /// Text fits the display; offset pinned to 0
    Settled,
    /// Text overflows and is moving
    Scrolling,
}

/// Whether the rotation just switched to this key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Different key than the previous tick (or the very first tick)
    Entered,
    /// Same key as the previous tick
    Continuing,
}

/// Scroll step parameters, derived from `ScrollConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollParams {
    /// Pixels per tick
    pub speed_px: i32,
    /// Ticks held at each extreme
    pub dwell_ticks: u16,
    /// Offset each cycle starts from (<= 0)
    pub start_px: i32,
}

impl From<&ScrollConfig> for ScrollParams {
    fn from(config: &ScrollConfig) -> Self {
        Self {
            speed_px: i32::from(config.speed_px),
            dwell_ticks: config.dwell_ticks,
            start_px: i32::from(config.start_px),
        }
    }
}

/// Scroll state for one stat key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    phase: ScrollPhase,
    offset_px: i32,
    /// Width of the text seen on the last step
    width_px: u32,
    dwell_remaining: u16,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    /// State of a key that has never been shown
    pub const fn new() -> Self {
        Self {
            phase: ScrollPhase::Unseen,
            offset_px: 0,
            width_px: 0,
            dwell_remaining: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Current offset in pixels
    pub fn offset_px(&self) -> i32 {
        self.offset_px
    }

    /// Cached width of the last measured text
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Ticks left in the current dwell
    pub fn dwell_remaining(&self) -> u16 {
        self.dwell_remaining
    }

    /// Process one tick for text of `width_px` on a display `display_px` wide
    ///
    /// Returns the offset to draw this tick with.
    pub fn step(
        &mut self,
        width_px: u32,
        display_px: u32,
        visit: Visit,
        params: &ScrollParams,
    ) -> i32 {
        let previous = self.phase;
        self.width_px = width_px;

        // Exact fit counts as fitting
        if width_px <= display_px {
            self.phase = ScrollPhase::Settled;
            self.offset_px = 0;
            self.dwell_remaining = 0;
            return 0;
        }

        let overflow = (width_px - display_px) as i32;

        if previous != ScrollPhase::Scrolling {
            self.reset(params);
            return self.offset_px;
        }

        // Text got narrower than the offset reached; treat as landing
        if self.offset_px > overflow {
            self.offset_px = overflow;
            self.dwell_remaining = params.dwell_ticks;
            return self.offset_px;
        }

        // Coming back to a key shows it where it was left
        if visit == Visit::Entered {
            return self.offset_px;
        }

        if self.dwell_remaining > 0 {
            self.dwell_remaining -= 1;
            return self.offset_px;
        }

        if self.offset_px >= overflow {
            // Held at the right extreme; wrap to the start
            self.offset_px = params.start_px;
            self.dwell_remaining = params.dwell_ticks;
        } else {
            let next = self.offset_px.saturating_add(params.speed_px);
            if next >= overflow {
                self.offset_px = overflow;
                self.dwell_remaining = params.dwell_ticks;
            } else {
                self.offset_px = next;
            }
        }

        self.offset_px
    }

    fn reset(&mut self, params: &ScrollParams) {
        self.phase = ScrollPhase::Scrolling;
        self.offset_px = params.start_px;
        self.dwell_remaining = params.dwell_ticks;
    }
}
