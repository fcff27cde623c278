//! TOML file schema
//!
//! The file speaks in human units (seconds, stat names); conversion turns
//! it into the core `StatlineConfig` plus the host-only settings the core
//! never sees.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use statline_core::config::{
    Geometry, LayoutConfig, LineConfig, ScrollConfig, TimingConfig, MAX_STATS,
};
use statline_core::stats::{Label, MAX_LABEL_LEN};
use statline_core::{ConfigError, StatDescriptor, StatKey, StatlineConfig};
use statline_display::DEFAULT_ADDRESS;

use super::LoadError;

/// Whole configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub display: DisplaySection,
    pub timing: TimingSection,
    pub scroll: ScrollSection,
    pub lines: LinesSection,
    pub stats: StatsSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub width: u16,
    pub height: u16,
    pub i2c_bus: PathBuf,
    pub address: u8,
}

impl Default for DisplaySection {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            width: geometry.width_px,
            height: geometry.height_px,
            i2c_bus: PathBuf::from("/dev/i2c-1"),
            address: DEFAULT_ADDRESS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSection {
    pub rotate_seconds: f64,
    pub tick_seconds: f64,
    pub shutdown_grace_seconds: f64,
}

impl Default for TimingSection {
    fn default() -> Self {
        let timing = TimingConfig::default();
        Self {
            rotate_seconds: f64::from(timing.rotate_interval_ms) / 1000.0,
            tick_seconds: f64::from(timing.tick_interval_ms) / 1000.0,
            shutdown_grace_seconds: f64::from(timing.shutdown_grace_ms) / 1000.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollSection {
    pub speed_px: u16,
    pub dwell_ticks: u16,
    pub start_px: i16,
}

impl Default for ScrollSection {
    fn default() -> Self {
        let scroll = ScrollConfig::default();
        Self {
            speed_px: scroll.speed_px,
            dwell_ticks: scroll.dwell_ticks,
            start_px: scroll.start_px,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinesSection {
    pub top_font_px: u8,
    pub bottom_font_px: u8,
    pub bottom_y: u16,
}

impl Default for LinesSection {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            top_font_px: layout.top.font_size_px,
            bottom_font_px: layout.bottom.font_size_px,
            bottom_y: layout.bottom.y_px,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsSection {
    pub order: Vec<String>,
    pub placeholder: String,
    pub disk_mount: PathBuf,
    pub labels: BTreeMap<String, String>,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            order: StatKey::ALL.iter().map(|key| key.name().to_string()).collect(),
            placeholder: "N/A".to_string(),
            disk_mount: PathBuf::from("/"),
            labels: BTreeMap::new(),
        }
    }
}

/// Settings that only the host binary uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// I2C character device the panel hangs off
    pub i2c_bus: PathBuf,
    /// 7-bit panel address
    pub address: u8,
    /// Mount point reported by the disk stat
    pub disk_mount: PathBuf,
}

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub core: StatlineConfig,
    pub host: HostConfig,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Convert to runtime configuration and validate it
    pub fn into_runtime(self) -> Result<RuntimeConfig, LoadError> {
        let timing = TimingConfig {
            rotate_interval_ms: interval_ms("rotate interval", self.timing.rotate_seconds)?,
            tick_interval_ms: interval_ms("tick interval", self.timing.tick_seconds)?,
            shutdown_grace_ms: grace_ms(self.timing.shutdown_grace_seconds)?,
        };

        let stats = self.stats.descriptors()?;
        let placeholder = label(&self.stats.placeholder)?;

        let core = StatlineConfig {
            geometry: Geometry {
                width_px: self.display.width,
                height_px: self.display.height,
            },
            timing,
            scroll: ScrollConfig {
                speed_px: self.scroll.speed_px,
                dwell_ticks: self.scroll.dwell_ticks,
                start_px: self.scroll.start_px,
            },
            layout: LayoutConfig {
                top: LineConfig {
                    font_size_px: self.lines.top_font_px,
                    y_px: 0,
                },
                bottom: LineConfig {
                    font_size_px: self.lines.bottom_font_px,
                    y_px: self.lines.bottom_y,
                },
            },
            stats,
            placeholder,
        };
        core.validate()?;

        Ok(RuntimeConfig {
            core,
            host: HostConfig {
                i2c_bus: self.display.i2c_bus,
                address: self.display.address,
                disk_mount: self.stats.disk_mount,
            },
        })
    }
}

impl StatsSection {
    fn descriptors(&self) -> Result<heapless::Vec<StatDescriptor, MAX_STATS>, LoadError> {
        for name in self.labels.keys() {
            stat_key(name)?;
        }

        let mut stats = heapless::Vec::new();
        for name in &self.order {
            let key = stat_key(name)?;
            let descriptor = match self.labels.get(name) {
                Some(text) => {
                    StatDescriptor::with_label(key, text).ok_or(ConfigError::LabelTooLong)?
                }
                None => StatDescriptor::new(key),
            };
            stats
                .push(descriptor)
                .map_err(|_| ConfigError::TooManyStats)?;
        }
        Ok(stats)
    }
}

fn stat_key(name: &str) -> Result<StatKey, LoadError> {
    StatKey::from_name(name).ok_or_else(|| LoadError::UnknownStat(name.to_string()))
}

fn label(text: &str) -> Result<Label, LoadError> {
    if text.len() > MAX_LABEL_LEN {
        return Err(ConfigError::LabelTooLong.into());
    }
    let mut out = Label::new();
    out.push_str(text).map_err(|_| ConfigError::LabelTooLong)?;
    Ok(out)
}

/// Seconds to a positive whole number of milliseconds
fn interval_ms(what: &'static str, seconds: f64) -> Result<u32, LoadError> {
    let ms = (seconds * 1000.0).round();
    if !ms.is_finite() || ms < 1.0 || ms > f64::from(u32::MAX) {
        return Err(ConfigError::NonPositiveInterval(what).into());
    }
    Ok(ms as u32)
}

/// Seconds to milliseconds, zero allowed
fn grace_ms(seconds: f64) -> Result<u32, LoadError> {
    let ms = (seconds * 1000.0).round();
    if !ms.is_finite() || ms < 0.0 || ms > f64::from(u32::MAX) {
        return Err(LoadError::InvalidGrace(seconds));
    }
    Ok(ms as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(text: &str) -> Result<RuntimeConfig, LoadError> {
        FileConfig::parse(text).unwrap().into_runtime()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = runtime("").unwrap();
        assert_eq!(config.core.geometry, Geometry::OLED_128X32);
        assert_eq!(config.core.timing.rotate_interval_ms, 10_000);
        assert_eq!(config.core.timing.tick_interval_ms, 50);
        assert_eq!(config.core.scroll.speed_px, 4);
        assert_eq!(config.core.stats.len(), 5);
        assert_eq!(config.core.stats[0].key, StatKey::Uptime);
        assert_eq!(config.core.placeholder.as_str(), "N/A");
        assert_eq!(config.host.address, 0x3C);
        assert_eq!(config.host.i2c_bus, PathBuf::from("/dev/i2c-1"));
        assert_eq!(config.host.disk_mount, PathBuf::from("/"));
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let shipped = runtime(super::super::EMBEDDED_CONFIG).unwrap();
        let defaults = runtime("").unwrap();
        assert_eq!(shipped.core.geometry, defaults.core.geometry);
        assert_eq!(shipped.core.timing, defaults.core.timing);
        assert_eq!(shipped.core.scroll, defaults.core.scroll);
        assert_eq!(shipped.core.stats, defaults.core.stats);
        assert_eq!(shipped.host, defaults.host);
    }

    #[test]
    fn test_full_file() {
        let config = runtime(
            r#"
            [display]
            height = 64
            i2c_bus = "/dev/i2c-3"
            address = 0x3D

            [timing]
            rotate_seconds = 2.5
            tick_seconds = 0.1

            [scroll]
            speed_px = 2
            dwell_ticks = 0
            start_px = -16

            [lines]
            bottom_y = 32

            [stats]
            order = ["ip", "disk"]
            placeholder = "--"
            disk_mount = "/data"

            [stats.labels]
            ip = "Addr "
            "#,
        )
        .unwrap();

        assert_eq!(config.core.geometry, Geometry::OLED_128X64);
        assert_eq!(config.core.timing.rotate_interval_ms, 2_500);
        assert_eq!(config.core.timing.tick_interval_ms, 100);
        assert_eq!(config.core.scroll.start_px, -16);
        assert_eq!(config.core.layout.bottom.y_px, 32);
        assert_eq!(config.core.stats.len(), 2);
        assert_eq!(config.core.stats[0].label.as_str(), "Addr ");
        assert_eq!(config.core.stats[1].label.as_str(), "Disk: ");
        assert_eq!(config.core.placeholder.as_str(), "--");
        assert_eq!(config.host.address, 0x3D);
        assert_eq!(config.host.disk_mount, PathBuf::from("/data"));
    }

    #[test]
    fn test_empty_order_rejected() {
        let err = runtime("[stats]\norder = []\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::EmptyStatList)));
    }

    #[test]
    fn test_unknown_stat_rejected() {
        let err = runtime("[stats]\norder = [\"uptime\", \"temp\"]\n").unwrap_err();
        assert!(matches!(err, LoadError::UnknownStat(ref name) if name == "temp"));

        let err = runtime("[stats.labels]\ncpu = \"C \"\n").unwrap_err();
        assert!(matches!(err, LoadError::UnknownStat(ref name) if name == "cpu"));
    }

    #[test]
    fn test_duplicate_stat_rejected() {
        let err = runtime("[stats]\norder = [\"ip\", \"ip\"]\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ConfigError::DuplicateStat(StatKey::Ip))
        ));
    }

    #[test]
    fn test_intervals_must_be_positive() {
        for text in [
            "[timing]\nrotate_seconds = 0.0\n",
            "[timing]\nrotate_seconds = -1.0\n",
            "[timing]\ntick_seconds = 0.0001\n",
            "[timing]\ntick_seconds = nan\n",
            "[timing]\nrotate_seconds = inf\n",
        ] {
            let err = runtime(text).unwrap_err();
            assert!(
                matches!(err, LoadError::Invalid(ConfigError::NonPositiveInterval(_))),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_grace() {
        let config = runtime("[timing]\nshutdown_grace_seconds = 0.0\n").unwrap();
        assert_eq!(config.core.timing.shutdown_grace_ms, 0);

        let err = runtime("[timing]\nshutdown_grace_seconds = -0.5\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidGrace(_)));
    }

    #[test]
    fn test_bad_geometry_and_lines() {
        let err = runtime("[display]\nheight = 30\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::InvalidGeometry)));

        let err = runtime("[display]\nwidth = 256\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::InvalidGeometry)));

        let err = runtime("[lines]\nbottom_y = 24\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::LineOutOfBounds)));
    }

    #[test]
    fn test_line_offset_at_u16_limit() {
        let err = runtime("[lines]\nbottom_y = 65535\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::LineOutOfBounds)));
    }

    #[test]
    fn test_scroll_limits() {
        let err = runtime("[scroll]\nspeed_px = 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::ZeroScrollSpeed)));

        let err = runtime("[scroll]\nstart_px = 8\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::PositiveScrollStart)));
    }

    #[test]
    fn test_long_labels_rejected() {
        let err = runtime("[stats]\nplaceholder = \"unavailable right now\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::LabelTooLong)));

        let err = runtime("[stats.labels]\nmem = \"Memory in use right now: \"\n").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::LabelTooLong)));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(FileConfig::parse("[display]\nrotation = 180\n").is_err());
        assert!(FileConfig::parse("[fonts]\n").is_err());
    }
}
