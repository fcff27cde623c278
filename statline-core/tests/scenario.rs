//! End-to-end render loop behaviour with mock collaborators

use statline_core::config::{Geometry, StatlineConfig};
use statline_core::stats::{MetricValue, StatDescriptor, StatKey};
use statline_core::traits::{
    DisplayError, DisplaySink, MetricError, MetricsSource, TextMeasure, TextRenderer,
};
use statline_core::{ConfigError, Frame, RenderLoop, ScrollPhase};

struct Metrics {
    ip_up: bool,
    calls: u32,
}

impl MetricsSource for Metrics {
    fn hostname(&mut self) -> Result<MetricValue, MetricError> {
        let mut v = MetricValue::new();
        v.push_str("rpi").unwrap();
        Ok(v)
    }

    fn get_metric(&mut self, key: StatKey) -> Result<MetricValue, MetricError> {
        self.calls += 1;
        let mut v = MetricValue::new();
        match key {
            StatKey::Uptime => v.push_str("3h7m").unwrap(),
            StatKey::Ip if self.ip_up => v.push_str("192.168.1.10").unwrap(),
            _ => return Err(MetricError::Unavailable),
        }
        Ok(v)
    }
}

#[derive(Default)]
struct CountingDisplay {
    pushes: u32,
    clears: u32,
}

impl DisplaySink for CountingDisplay {
    fn geometry(&self) -> Geometry {
        Geometry::OLED_128X32
    }

    fn push_frame(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
        self.pushes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        Ok(())
    }
}

/// The IP line measures 180px, anything else 8px per character
struct ScenarioFont;

impl TextMeasure for ScenarioFont {
    fn measure(&self, text: &str, _size_px: u8) -> u32 {
        if text.starts_with("IP:") {
            180
        } else {
            text.chars().count() as u32 * 8
        }
    }
}

impl TextRenderer for ScenarioFont {
    fn draw(&self, _frame: &mut Frame, _text: &str, _size_px: u8, _x: i32, _y: i32) {}
}

fn scenario_config(width_px: u16) -> StatlineConfig {
    let mut config = StatlineConfig::default();
    config.geometry = Geometry {
        width_px,
        height_px: 32,
    };
    config.stats.clear();
    config.stats.push(StatDescriptor::new(StatKey::Uptime)).unwrap();
    config.stats.push(StatDescriptor::new(StatKey::Ip)).unwrap();
    config.timing.rotate_interval_ms = 10_000;
    config.timing.tick_interval_ms = 50;
    config.scroll.speed_px = 4;
    config.scroll.dwell_ticks = 0;
    config.scroll.start_px = 0;
    config
}

#[test]
fn rotation_and_scroll_timeline() {
    let config = scenario_config(128);
    let metrics = Metrics {
        ip_up: true,
        calls: 0,
    };
    let mut render = RenderLoop::new(&config, metrics, CountingDisplay::default(), ScenarioFont, 0)
        .unwrap();

    let mut t = 0;
    while t < 10_000 {
        let report = render.tick(t);
        assert_eq!(report.key, StatKey::Uptime);
        assert_eq!(report.offset_px, 0);
        t += 50;
    }

    let report = render.tick(10_000);
    assert_eq!(report.key, StatKey::Ip);
    assert!(report.entered);
    assert_eq!(report.offset_px, 0);

    let mut last = report;
    t = 10_050;
    while t <= 10_500 {
        last = render.tick(t);
        t += 50;
    }
    assert_eq!(last.key, StatKey::Ip);
    assert_eq!(last.offset_px, 40);

    while t < 20_000 {
        render.tick(t);
        t += 50;
    }
    let report = render.tick(20_000);
    assert_eq!(report.key, StatKey::Uptime);
    assert_eq!(report.offset_px, 0);
    assert_eq!(render.scroll().phase(StatKey::Uptime), ScrollPhase::Settled);

    // One push per tick, nothing blanked yet
    assert_eq!(render.display().pushes, 401);
    assert_eq!(render.display().clears, 0);

    render.shutdown().unwrap();
    assert_eq!(render.display().clears, 1);
}

#[test]
fn empty_stat_list_fails_before_display_io() {
    let mut config = scenario_config(128);
    config.stats.clear();
    let metrics = Metrics {
        ip_up: true,
        calls: 0,
    };

    let err = RenderLoop::new(&config, metrics, CountingDisplay::default(), ScenarioFont, 0)
        .err()
        .unwrap();
    assert_eq!(err, ConfigError::EmptyStatList);
}

#[test]
fn exact_fit_boundary() {
    // "Up:3h7m" is 7 chars = 56px
    let mut config = scenario_config(56);
    config.stats.clear();
    config.stats.push(StatDescriptor::new(StatKey::Uptime)).unwrap();

    struct NarrowDisplay;
    impl DisplaySink for NarrowDisplay {
        fn geometry(&self) -> Geometry {
            Geometry {
                width_px: 56,
                height_px: 32,
            }
        }
        fn push_frame(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
            Ok(())
        }
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    let metrics = Metrics {
        ip_up: true,
        calls: 0,
    };
    let mut render = RenderLoop::new(&config, metrics, NarrowDisplay, ScenarioFont, 0).unwrap();
    for i in 0..20 {
        assert_eq!(render.tick(i * 50).offset_px, 0);
    }
    assert_eq!(render.scroll().phase(StatKey::Uptime), ScrollPhase::Settled);
}

#[test]
fn metric_failure_does_not_block_later_ticks() {
    let config = scenario_config(128);
    let metrics = Metrics {
        ip_up: false,
        calls: 0,
    };
    let mut render = RenderLoop::new(&config, metrics, CountingDisplay::default(), ScenarioFont, 0)
        .unwrap();

    let report = render.tick(10_000);
    assert_eq!(report.key, StatKey::Ip);
    assert!(!report.metric_ok);
    assert_eq!(report.text.as_str(), "IP:N/A");
    assert!(report.pushed);

    for i in 1..=5 {
        assert!(render.tick(10_000 + i * 50).pushed);
    }

    render.metrics_mut().ip_up = true;
    let report = render.tick(10_300);
    assert!(report.metric_ok);
    assert_eq!(report.text.as_str(), "IP:192.168.1.10");
    assert_eq!(render.metrics_mut().calls, 7);
    assert_eq!(render.display().pushes, 7);
}
