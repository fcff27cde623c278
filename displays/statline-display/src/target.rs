//! embedded-graphics draw target over a core frame

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use statline_core::Frame;

/// Borrowed frame that embedded-graphics can draw into
///
/// Pixels outside the frame are dropped, which is what hard-clips the top
/// line and the scrolled bottom line at the panel edges.
pub struct FrameTarget<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameTarget<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl OriginDimensions for FrameTarget<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.frame.width()), u32::from(self.frame.height()))
    }
}

impl DrawTarget for FrameTarget<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.frame.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
