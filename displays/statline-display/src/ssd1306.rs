//! SSD1306 OLED display driver
//!
//! Driver for 128x32 and 128x64 SSD1306-based OLED panels over blocking
//! I2C. The panel is initialized lazily on the first frame and again after
//! any bus error, so a panel that drops off the bus and comes back is
//! picked up without restarting.

use embedded_hal::i2c::I2c;
use log::{debug, info};
use statline_core::config::Geometry;
use statline_core::traits::{DisplayError, DisplaySink};
use statline_core::Frame;

/// Default SSD1306 I2C address (0x3D on some modules)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Largest page payload: control byte plus one byte per column
const MAX_PAGE_WRITE: usize = 1 + statline_core::config::MAX_WIDTH_PX as usize;

/// I2C control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    geometry: Geometry,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver; no bus traffic happens until the first frame
    pub fn new(i2c: I2C, address: u8, geometry: Geometry) -> Self {
        Self {
            i2c,
            address,
            geometry,
            initialized: false,
        }
    }

    /// Whether the panel has been initialized since the last bus error
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Initialize the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let (mux, com_pins, contrast) = if self.geometry.height_px > 32 {
            (0x3F, 0x12, 0xCF)
        } else {
            (0x1F, 0x02, 0x8F)
        };

        let init_cmds: [u8; 25] = [
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            mux,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x02,                  // Page addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_CONTRAST,
            contrast,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in &init_cmds {
            self.command(c)?;
        }

        self.initialized = true;
        info!(
            "SSD1306 {}x{} initialized at 0x{:02X}",
            self.geometry.width_px, self.geometry.height_px, self.address
        );
        Ok(())
    }

    /// Send a frame to the panel, initializing it first if needed
    fn flush(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if !self.initialized {
            self.init()?;
        }

        let width = usize::from(self.geometry.width_px);
        let mut data = [0u8; MAX_PAGE_WRITE];
        data[0] = CONTROL_DATA;

        for (page, columns) in frame.pages().enumerate() {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            data[1..=width].copy_from_slice(columns);
            self.write(&data[..=width])?;
        }

        Ok(())
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.write(&[CONTROL_COMMAND, c])
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c.write(self.address, bytes).map_err(|e| {
            if self.initialized {
                debug!("SSD1306 write failed: {:?}, will reinitialize", e);
            }
            self.initialized = false;
            DisplayError::Bus
        })
    }
}

impl<I2C: I2c> DisplaySink for Ssd1306<I2C> {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn push_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if frame.geometry() != self.geometry {
            return Err(DisplayError::GeometryMismatch);
        }
        self.flush(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.flush(&Frame::new(self.geometry))
    }
}
