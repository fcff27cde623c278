//! Font collaborator traits

use crate::render::Frame;

/// Text width measurement
pub trait TextMeasure {
    /// Width of `text` in pixels at `size_px`
    fn measure(&self, text: &str, size_px: u8) -> u32;
}

/// Text rasterization into a frame
pub trait TextRenderer: TextMeasure {
    /// Draw `text` with its top-left corner at (`x`, `y`)
    ///
    /// `x` may be negative (scrolled text); pixels outside the frame are
    /// clipped.
    fn draw(&self, frame: &mut Frame, text: &str, size_px: u8, x: i32, y: i32);
}
