//! Configuration type definitions
//!
//! Defaults mirror a 128x32 SSD1306 panel showing two 16px lines.

use heapless::Vec;

use crate::stats::{Label, StatDescriptor};

/// Maximum stats in the rotation
pub const MAX_STATS: usize = 8;

/// Widest supported panel in pixels
pub const MAX_WIDTH_PX: u16 = 128;

/// Tallest supported panel in pixels
pub const MAX_HEIGHT_PX: u16 = 64;

/// Display geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Width in pixels (columns)
    pub width_px: u16,
    /// Height in pixels (rows), a multiple of 8
    pub height_px: u16,
}

impl Geometry {
    /// 128x32 panel
    pub const OLED_128X32: Self = Self {
        width_px: 128,
        height_px: 32,
    };

    /// 128x64 panel
    pub const OLED_128X64: Self = Self {
        width_px: 128,
        height_px: 64,
    };

    /// Number of 8-row pages
    pub const fn pages(&self) -> usize {
        (self.height_px / 8) as usize
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::OLED_128X32
    }
}

/// Loop cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// How long each stat stays on the bottom line
    pub rotate_interval_ms: u32,
    /// Render tick (scroll frame) interval
    pub tick_interval_ms: u32,
    /// Upper bound for blanking the display on shutdown
    pub shutdown_grace_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            rotate_interval_ms: 10_000,
            tick_interval_ms: 50,
            shutdown_grace_ms: 1_000,
        }
    }
}

/// Horizontal scroll behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Pixels advanced per tick
    pub speed_px: u16,
    /// Ticks to hold at each extreme before moving on
    pub dwell_ticks: u16,
    /// Offset a scroll cycle starts from: 0, or negative for a lead-in
    pub start_px: i16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed_px: 4,
            dwell_ticks: 20,
            start_px: 0,
        }
    }
}

/// One text line on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    /// Font size in pixels
    pub font_size_px: u8,
    /// Top edge of the line in pixels
    pub y_px: u16,
}

/// Two-line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Hostname line (never scrolls)
    pub top: LineConfig,
    /// Rotating stat line
    pub bottom: LineConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top: LineConfig {
                font_size_px: 16,
                y_px: 0,
            },
            bottom: LineConfig {
                font_size_px: 16,
                y_px: 16,
            },
        }
    }
}

/// Complete display configuration
///
/// This is the top-level configuration structure handed to the render
/// loop. Build it once, validate it, then share it by reference.
#[derive(Debug, Clone)]
pub struct StatlineConfig {
    /// Panel geometry
    pub geometry: Geometry,
    /// Rotation / tick / shutdown timing
    pub timing: TimingConfig,
    /// Scroll behaviour
    pub scroll: ScrollConfig,
    /// Line placement and font sizes
    pub layout: LayoutConfig,
    /// Rotation order of the bottom-line stats
    pub stats: Vec<StatDescriptor, MAX_STATS>,
    /// Text shown in place of a metric that could not be read
    pub placeholder: Label,
}

impl Default for StatlineConfig {
    fn default() -> Self {
        let mut placeholder = Label::new();
        let _ = placeholder.push_str("N/A");

        Self {
            geometry: Geometry::default(),
            timing: TimingConfig::default(),
            scroll: ScrollConfig::default(),
            layout: LayoutConfig::default(),
            stats: StatDescriptor::defaults(),
            placeholder,
        }
    }
}
