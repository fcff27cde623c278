//! Display side of statline
//!
//! This crate provides:
//! - `MonoTextRenderer`, the `TextRenderer`/`TextMeasure` implementation
//!   over the embedded-graphics monospace fonts
//! - `FrameTarget`, an embedded-graphics `DrawTarget` over a core `Frame`
//! - `Ssd1306`, a blocking I2C driver implementing `DisplaySink`
//!
//! Everything here is `no_std` and only depends on `embedded-hal` traits,
//! so the binary picks the bus implementation.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod font;
pub mod ssd1306;
pub mod target;

pub use font::MonoTextRenderer;
pub use ssd1306::{Ssd1306, DEFAULT_ADDRESS};
pub use target::FrameTarget;
