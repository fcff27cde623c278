//! Configuration validation
//!
//! A malformed configuration has no safe runtime fallback, so every check
//! here runs before the render loop touches the display.

use core::fmt;

use super::types::{StatlineConfig, MAX_HEIGHT_PX, MAX_STATS, MAX_WIDTH_PX};
use crate::stats::StatKey;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No stats to rotate through
    EmptyStatList,
    /// More stats than `MAX_STATS`
    TooManyStats,
    /// The same stat appears twice in the rotation
    DuplicateStat(StatKey),
    /// A timing value is zero, negative or not a number
    NonPositiveInterval(&'static str),
    /// Scroll speed of zero would never reveal overflowing text
    ZeroScrollSpeed,
    /// Scroll start must be 0 or a negative lead-in
    PositiveScrollStart,
    /// Geometry is zero, too large, or not a whole number of pages
    InvalidGeometry,
    /// Display reports a geometry different from the configured one
    GeometryMismatch,
    /// A line does not fit vertically on the panel
    LineOutOfBounds,
    /// Label or placeholder longer than the label capacity
    LabelTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyStatList => f.write_str("stat list is empty"),
            ConfigError::TooManyStats => write!(f, "more than {} stats configured", MAX_STATS),
            ConfigError::DuplicateStat(key) => write!(f, "stat '{}' listed more than once", key),
            ConfigError::NonPositiveInterval(what) => write!(f, "{} must be positive", what),
            ConfigError::ZeroScrollSpeed => f.write_str("scroll speed must be at least 1px"),
            ConfigError::PositiveScrollStart => f.write_str("scroll start must be 0 or negative"),
            ConfigError::InvalidGeometry => write!(
                f,
                "display geometry must be at most {}x{} with a height divisible by 8",
                MAX_WIDTH_PX, MAX_HEIGHT_PX
            ),
            ConfigError::GeometryMismatch => {
                f.write_str("display geometry does not match configuration")
            }
            ConfigError::LineOutOfBounds => f.write_str("text line does not fit on the display"),
            ConfigError::LabelTooLong => f.write_str("label or placeholder too long"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl StatlineConfig {
    /// Check the configuration for values the render loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.is_empty() {
            return Err(ConfigError::EmptyStatList);
        }

        for (i, stat) in self.stats.iter().enumerate() {
            if self.stats[..i].iter().any(|earlier| earlier.key == stat.key) {
                return Err(ConfigError::DuplicateStat(stat.key));
            }
        }

        if self.timing.rotate_interval_ms == 0 {
            return Err(ConfigError::NonPositiveInterval("rotate interval"));
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(ConfigError::NonPositiveInterval("tick interval"));
        }

        if self.scroll.speed_px == 0 {
            return Err(ConfigError::ZeroScrollSpeed);
        }
        if self.scroll.start_px > 0 {
            return Err(ConfigError::PositiveScrollStart);
        }

        let g = self.geometry;
        if g.width_px == 0
            || g.height_px == 0
            || g.width_px > MAX_WIDTH_PX
            || g.height_px > MAX_HEIGHT_PX
            || g.height_px % 8 != 0
        {
            return Err(ConfigError::InvalidGeometry);
        }

        for line in [self.layout.top, self.layout.bottom] {
            let bottom_edge = u32::from(line.y_px) + u32::from(line.font_size_px);
            if line.font_size_px == 0 || bottom_edge > u32::from(g.height_px) {
                return Err(ConfigError::LineOutOfBounds);
            }
        }

        Ok(())
    }
}
