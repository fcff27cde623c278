//! statline - hostname and system stats on a small OLED
//!
//! Shows the hostname on the top line of an SSD1306 panel and rotates
//! through uptime, IP address, load, memory and disk usage on the bottom
//! line, scrolling any line too wide for the panel.
//!
//! Exit status: 0 after a clean stop, 1 on runtime setup failure, 2 on an
//! invalid configuration.

use std::path::PathBuf;

use clap::Parser;
use embassy_executor::Executor;
use linux_embedded_hal::I2cdev;
use log::{debug, error, info};
use static_cell::StaticCell;

use statline_core::{RenderLoop, StatlineConfig};
use statline_display::{MonoTextRenderer, Ssd1306};

mod config;
mod metrics;
mod shutdown;
mod tasks;

use crate::metrics::SysinfoMetrics;

/// Exit status for configuration errors
const EXIT_CONFIG: i32 = 2;
/// Exit status for setup failures after the configuration was accepted
const EXIT_SETUP: i32 = 1;

// Both live for the rest of the process
static EXECUTOR: StaticCell<Executor> = StaticCell::new();
static CONFIG: StaticCell<StatlineConfig> = StaticCell::new();

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: /etc/statline.toml, else built-in defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit without touching the display
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (runtime, source) = match config::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.check {
        info!("Configuration from {} is valid", source);
        return;
    }

    info!("statline {} starting", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from {}", source);
    debug!("{:?}", runtime);

    let host = runtime.host;
    let config: &'static StatlineConfig = CONFIG.init(runtime.core);

    if let Err(e) = shutdown::install_handler() {
        error!("Failed to install signal handler: {}", e);
        std::process::exit(EXIT_SETUP);
    }

    let i2c = match I2cdev::new(&host.i2c_bus) {
        Ok(i2c) => i2c,
        Err(e) => {
            error!("Failed to open {}: {}", host.i2c_bus.display(), e);
            std::process::exit(EXIT_SETUP);
        }
    };
    let display = Ssd1306::new(i2c, host.address, config.geometry);
    let metrics = SysinfoMetrics::new(host.disk_mount);

    let render = match RenderLoop::new(
        config,
        metrics,
        display,
        MonoTextRenderer::new(),
        tasks::render::now_ms(),
    ) {
        Ok(render) => render,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    info!(
        "Rotating {} stats every {}ms on {} at 0x{:02X}",
        config.stats.len(),
        config.timing.rotate_interval_ms,
        host.i2c_bus.display(),
        host.address
    );

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(tasks::render_task(render, config)).unwrap();
    });
}
