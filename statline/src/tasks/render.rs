//! Render task
//!
//! Drives the render loop at the tick interval until a stop is requested,
//! then blanks the panel within the shutdown grace period and exits.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use linux_embedded_hal::I2cdev;
use log::{error, info, warn};
use statline_core::{RenderLoop, StatlineConfig};
use statline_display::{MonoTextRenderer, Ssd1306};

use crate::metrics::SysinfoMetrics;
use crate::shutdown::{self, ShutdownError, SHUTDOWN};

/// The concrete render loop the binary runs
pub type StatusRender = RenderLoop<'static, SysinfoMetrics, Ssd1306<I2cdev>, MonoTextRenderer>;

/// Milliseconds on the embassy clock, the time base every tick uses
pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Render task - one frame per tick, stop observed between ticks
#[embassy_executor::task]
pub async fn render_task(mut render: StatusRender, config: &'static StatlineConfig) {
    info!("Render task started");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(
        config.timing.tick_interval_ms,
    )));

    loop {
        render.tick(now_ms());

        if let Either::Second(()) = select(ticker.next(), SHUTDOWN.wait()).await {
            break;
        }
    }

    info!("Stop requested, blanking display");
    let grace = std::time::Duration::from_millis(u64::from(config.timing.shutdown_grace_ms));
    let code = match shutdown::run_with_grace(grace, move || render.shutdown()) {
        Ok(()) => 0,
        Err(e @ ShutdownError::Timeout(_)) => {
            warn!("{}, exiting anyway", e);
            0
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    };

    std::process::exit(code);
}
