//! Display sink trait

use core::fmt;

use crate::config::Geometry;
use crate::render::Frame;

/// Errors that can occur pushing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Bus transfer failed (NACK, arbitration loss, device unplugged)
    Bus,
    /// Frame geometry differs from the panel's
    GeometryMismatch,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Bus => f.write_str("display bus error"),
            DisplayError::GeometryMismatch => f.write_str("frame does not match display geometry"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Trait for the physical display
///
/// Failures are expected to be transient; the render loop skips the frame
/// and retries on the next tick.
pub trait DisplaySink {
    /// Panel geometry in pixels
    fn geometry(&self) -> Geometry;

    /// Send a complete frame to the panel
    fn push_frame(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError>;
}
