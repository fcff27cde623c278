//! Scroll engine
//!
//! Keeps one [`ScrollState`] per stat key and feeds it the measured text
//! width every tick.

use heapless::FnvIndexMap;
use log::trace;

use super::state::{ScrollParams, ScrollPhase, ScrollState, Visit};
use crate::config::{StatlineConfig, MAX_STATS};
use crate::stats::StatKey;
use crate::traits::TextMeasure;

/// Per-key horizontal scroll engine
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    params: ScrollParams,
    /// Font size of the scrolled line
    font_size_px: u8,
    states: FnvIndexMap<StatKey, ScrollState, MAX_STATS>,
}

impl ScrollEngine {
    /// Create an engine for the bottom line described by `config`
    pub fn new(config: &StatlineConfig) -> Self {
        Self {
            params: ScrollParams::from(&config.scroll),
            font_size_px: config.layout.bottom.font_size_px,
            states: FnvIndexMap::new(),
        }
    }

    /// Offset to draw `text` for `key` with this tick
    ///
    /// Measures the text, then steps the key's state machine. Text that fits
    /// `display_width_px` (including an exact fit) always yields 0.
    pub fn offset_for<M: TextMeasure + ?Sized>(
        &mut self,
        measure: &M,
        key: StatKey,
        text: &str,
        display_width_px: u32,
        visit: Visit,
    ) -> i32 {
        let width = measure.measure(text, self.font_size_px);
        let params = self.params;

        let state = match self.state_mut(key) {
            Some(state) => state,
            // Capacity covers every key; nothing to scroll if it ever doesn't
            None => return 0,
        };

        let before = state.phase();
        let offset = state.step(width, display_width_px, visit, &params);

        if before != state.phase() {
            trace!(
                "scroll {}: {:?} -> {:?} (width {}px)",
                key,
                before,
                state.phase(),
                width
            );
        } else if visit == Visit::Entered && before == ScrollPhase::Scrolling {
            trace!("scroll {}: resuming at {}px", key, offset);
        }

        offset
    }

    /// Phase of `key`, `Unseen` if it was never shown
    pub fn phase(&self, key: StatKey) -> ScrollPhase {
        self.states
            .get(&key)
            .map_or(ScrollPhase::Unseen, ScrollState::phase)
    }

    /// Scroll state of `key`, if it was ever shown
    pub fn state(&self, key: StatKey) -> Option<&ScrollState> {
        self.states.get(&key)
    }

    fn state_mut(&mut self, key: StatKey) -> Option<&mut ScrollState> {
        if !self.states.contains_key(&key) {
            self.states.insert(key, ScrollState::new()).ok()?;
        }
        self.states.get_mut(&key)
    }
}
