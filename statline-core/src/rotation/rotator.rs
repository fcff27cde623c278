//! Round-robin stat rotator
//!
//! Owns the rotation order and which stat is currently on screen. The
//! selection only moves when the rotation interval has elapsed; there is no
//! randomness and no skipping.

use heapless::Vec;

use crate::config::{ConfigError, StatlineConfig, MAX_STATS};
use crate::stats::{StatDescriptor, StatKey};

/// Stat rotator
#[derive(Debug, Clone)]
pub struct StatRotator {
    /// Rotation order, fixed for the process lifetime
    stats: Vec<StatDescriptor, MAX_STATS>,
    /// Rotation interval in milliseconds
    interval_ms: u64,
    /// Index of the stat currently shown
    index: usize,
    /// Time of the last rotation (or construction)
    last_rotation_ms: u64,
}

impl StatRotator {
    /// Create a rotator showing the first configured stat from `now_ms`
    pub fn new(config: &StatlineConfig, now_ms: u64) -> Result<Self, ConfigError> {
        if config.stats.is_empty() {
            return Err(ConfigError::EmptyStatList);
        }
        if config.timing.rotate_interval_ms == 0 {
            return Err(ConfigError::NonPositiveInterval("rotate interval"));
        }

        Ok(Self {
            stats: config.stats.clone(),
            interval_ms: u64::from(config.timing.rotate_interval_ms),
            index: 0,
            last_rotation_ms: now_ms,
        })
    }

    /// Advance to the next stat if the interval has elapsed
    ///
    /// Returns the key of the selected stat whether or not it just changed.
    /// A clock reading earlier than the last rotation never advances.
    pub fn advance_if_due(&mut self, now_ms: u64) -> StatKey {
        let elapsed = now_ms.saturating_sub(self.last_rotation_ms);

        if elapsed >= self.interval_ms {
            self.index = (self.index + 1) % self.stats.len();
            self.last_rotation_ms = now_ms;
        }

        self.current().key
    }

    /// Descriptor of the stat currently selected
    pub fn current(&self) -> &StatDescriptor {
        &self.stats[self.index]
    }

    /// Index of the stat currently selected
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stats in the rotation
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Always false: construction rejects an empty rotation
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
