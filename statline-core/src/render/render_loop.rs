//! Per-tick render loop
//!
//! Each tick:
//! 1. Let the rotator advance if its interval elapsed
//! 2. Fetch fresh text for the selected stat (placeholder on failure)
//! 3. Step that stat's scroll state
//! 4. Draw the hostname line (hard clipped) and the stat line (scrolled)
//! 5. Push the frame; a failed push is skipped and retried next tick
//!
//! The caller owns the timer and the stop signal; this type only knows
//! what one tick does.

use heapless::FnvIndexMap;
use log::{debug, info, trace, warn};

use super::frame::Frame;
use super::health::LinkHealth;
use crate::config::{ConfigError, StatlineConfig, MAX_STATS};
use crate::rotation::StatRotator;
use crate::scroll::{ScrollEngine, Visit};
use crate::stats::{compose_line, LineText, MetricValue, StatKey};
use crate::traits::{DisplayError, DisplaySink, MetricError, MetricsSource, TextRenderer};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Stat shown on the bottom line
    pub key: StatKey,
    /// Whether the rotation switched stats this tick
    pub entered: bool,
    /// Bottom-line text as drawn
    pub text: LineText,
    /// Horizontal offset the bottom line was drawn with
    pub offset_px: i32,
    /// Whether the stat value was read (false: placeholder shown)
    pub metric_ok: bool,
    /// Whether the frame reached the display
    pub pushed: bool,
}

/// Render loop over a metrics source, a display and a font
pub struct RenderLoop<'c, M, D, T> {
    config: &'c StatlineConfig,
    metrics: M,
    display: D,
    font: T,
    rotator: StatRotator,
    scroll: ScrollEngine,
    /// Key shown on the previous tick
    last_key: Option<StatKey>,
    display_health: LinkHealth,
    hostname_health: LinkHealth,
    metric_health: FnvIndexMap<StatKey, LinkHealth, MAX_STATS>,
}

impl<'c, M, D, T> RenderLoop<'c, M, D, T>
where
    M: MetricsSource,
    D: DisplaySink,
    T: TextRenderer,
{
    /// Create a render loop starting its first rotation interval at `now_ms`
    ///
    /// Validates the configuration and the display geometry; nothing is
    /// sent to the display here.
    pub fn new(
        config: &'c StatlineConfig,
        metrics: M,
        display: D,
        font: T,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if display.geometry() != config.geometry {
            return Err(ConfigError::GeometryMismatch);
        }

        let rotator = StatRotator::new(config, now_ms)?;
        let scroll = ScrollEngine::new(config);

        debug!(
            "render loop ready: {} stats, rotate every {}ms, tick {}ms",
            rotator.len(),
            config.timing.rotate_interval_ms,
            config.timing.tick_interval_ms
        );

        Ok(Self {
            config,
            metrics,
            display,
            font,
            rotator,
            scroll,
            last_key: None,
            display_health: LinkHealth::new(),
            hostname_health: LinkHealth::new(),
            metric_health: FnvIndexMap::new(),
        })
    }

    /// Run one tick at time `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let key = self.rotator.advance_if_due(now_ms);
        let visit = if self.last_key == Some(key) {
            Visit::Continuing
        } else {
            Visit::Entered
        };
        if visit == Visit::Entered {
            debug!("showing {}", key);
        }
        self.last_key = Some(key);

        let metric = self.metrics.get_metric(key);
        let metric_ok = metric.is_ok();
        self.note_metric(key, metric.as_ref().err());
        let value = metric.unwrap_or_else(|_| self.placeholder());
        let text = compose_line(&self.rotator.current().label, &value);

        let hostname = self.metrics.hostname();
        self.note_hostname(hostname.as_ref().err());
        let hostname = hostname.unwrap_or_else(|_| self.placeholder());

        let width = u32::from(self.config.geometry.width_px);
        let offset_px = self
            .scroll
            .offset_for(&self.font, key, &text, width, visit);

        let mut frame = Frame::new(self.config.geometry);
        let top = self.config.layout.top;
        let bottom = self.config.layout.bottom;
        self.font
            .draw(&mut frame, &hostname, top.font_size_px, 0, i32::from(top.y_px));
        self.font.draw(
            &mut frame,
            &text,
            bottom.font_size_px,
            -offset_px,
            i32::from(bottom.y_px),
        );

        let pushed = self.push(&frame);
        trace!("tick {}ms: {} @ {}px", now_ms, text.as_str(), offset_px);

        TickReport {
            key,
            entered: visit == Visit::Entered,
            text,
            offset_px,
            metric_ok,
            pushed,
        }
    }

    /// Blank the display before exit
    pub fn shutdown(&mut self) -> Result<(), DisplayError> {
        info!("Blanking display");
        self.display.clear()
    }

    /// Stat rotator
    pub fn rotator(&self) -> &StatRotator {
        &self.rotator
    }

    /// Scroll engine
    pub fn scroll(&self) -> &ScrollEngine {
        &self.scroll
    }

    #[doc(hidden)]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[doc(hidden)]
    pub fn metrics_mut(&mut self) -> &mut M {
        &mut self.metrics
    }

    /// Display link health
    pub fn display_health(&self) -> LinkHealth {
        self.display_health
    }

    /// Read health of one stat, healthy if it was never fetched
    pub fn metric_health(&self, key: StatKey) -> LinkHealth {
        self.metric_health.get(&key).copied().unwrap_or_default()
    }

    /// Hostname read health
    pub fn hostname_health(&self) -> LinkHealth {
        self.hostname_health
    }

    fn push(&mut self, frame: &Frame) -> bool {
        match self.display.push_frame(frame) {
            Ok(()) => {
                if let Some(missed) = self.display_health.record_success() {
                    info!("Display recovered after {} failed frames", missed);
                }
                true
            }
            Err(e) => {
                if self.display_health.record_failure() {
                    warn!("Frame push failed: {}, retrying next tick", e);
                } else {
                    debug!(
                        "Frame push failed: {} ({} in a row)",
                        e,
                        self.display_health.consecutive_failures()
                    );
                }
                false
            }
        }
    }

    fn note_metric(&mut self, key: StatKey, error: Option<&MetricError>) {
        if !self.metric_health.contains_key(&key) {
            let _ = self.metric_health.insert(key, LinkHealth::new());
        }
        let Some(health) = self.metric_health.get_mut(&key) else {
            return;
        };

        match error {
            None => {
                if let Some(missed) = health.record_success() {
                    info!("{} readable again after {} failures", key, missed);
                }
            }
            Some(e) => {
                if health.record_failure() {
                    warn!("{}: {}, showing placeholder", key, e);
                } else {
                    debug!(
                        "{}: {} ({} in a row)",
                        key,
                        e,
                        health.consecutive_failures()
                    );
                }
            }
        }
    }

    fn note_hostname(&mut self, error: Option<&MetricError>) {
        match error {
            None => {
                if let Some(missed) = self.hostname_health.record_success() {
                    info!("hostname readable again after {} failures", missed);
                }
            }
            Some(e) => {
                if self.hostname_health.record_failure() {
                    warn!("hostname: {}, showing placeholder", e);
                } else {
                    debug!(
                        "hostname: {} ({} in a row)",
                        e,
                        self.hostname_health.consecutive_failures()
                    );
                }
            }
        }
    }

    fn placeholder(&self) -> MetricValue {
        let mut value = MetricValue::new();
        let _ = value.push_str(&self.config.placeholder);
        value
    }
}
