//! Monochrome frame buffer
//!
//! One bit per pixel, organized in 8-row pages the way SSD1306-class
//! controllers store GDDRAM: byte `page * width + x` holds column `x` of
//! rows `page*8 .. page*8+7`, least significant bit on top. Drivers can
//! send each page as-is.

use crate::config::{Geometry, MAX_HEIGHT_PX, MAX_WIDTH_PX};

/// Bytes needed for the largest supported panel
pub const FRAME_BYTES: usize = MAX_WIDTH_PX as usize * MAX_HEIGHT_PX as usize / 8;

/// Frame buffer for one tick
///
/// Frames are built from scratch every tick and never diffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    geometry: Geometry,
    buffer: [u8; FRAME_BYTES],
}

impl Frame {
    /// Create a blank frame
    ///
    /// Geometry larger than the supported maximum is clamped; configuration
    /// validation rejects it before a frame is ever built.
    pub fn new(geometry: Geometry) -> Self {
        let geometry = Geometry {
            width_px: geometry.width_px.min(MAX_WIDTH_PX),
            height_px: (geometry.height_px.min(MAX_HEIGHT_PX) / 8) * 8,
        };
        Self {
            geometry,
            buffer: [0; FRAME_BYTES],
        }
    }

    /// Frame geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.geometry.width_px
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.geometry.height_px
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set one pixel; coordinates outside the frame are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, bit)) = self.locate(x, y) {
            if on {
                self.buffer[index] |= bit;
            } else {
                self.buffer[index] &= !bit;
            }
        }
    }

    /// Read one pixel; outside the frame reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(index, bit)| self.buffer[index] & bit != 0)
    }

    /// Column bytes of one 8-row page
    pub fn page(&self, page: usize) -> &[u8] {
        let width = self.geometry.width_px as usize;
        if page >= self.geometry.pages() {
            return &[];
        }
        &self.buffer[page * width..(page + 1) * width]
    }

    /// All pages, top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.geometry.pages()).map(move |page| self.page(page))
    }

    /// Whether no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|&b| b == 0)
    }

    /// Number of lit pixels inside the rows `y0..y1`
    #[doc(hidden)]
    pub fn lit_in_rows(&self, y0: i32, y1: i32) -> u32 {
        let mut count = 0;
        for y in y0..y1 {
            for x in 0..i32::from(self.geometry.width_px) {
                if self.pixel(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0
            || y < 0
            || x >= i32::from(self.geometry.width_px)
            || y >= i32::from(self.geometry.height_px)
        {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (y / 8) * self.geometry.width_px as usize + x;
        Some((index, 1 << (y % 8)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_blank() {
        let frame = Frame::new(Geometry::OLED_128X32);
        assert!(frame.is_blank());
        assert_eq!(frame.pages().count(), 4);
        assert!(frame.pages().all(|page| page.len() == 128));
    }

    #[test]
    fn test_page_layout() {
        let mut frame = Frame::new(Geometry::OLED_128X32);
        frame.set_pixel(3, 0, true);
        frame.set_pixel(3, 7, true);
        frame.set_pixel(5, 9, true);

        assert_eq!(frame.page(0)[3], 0b1000_0001);
        assert_eq!(frame.page(1)[5], 0b0000_0010);
        assert!(frame.pixel(5, 9));
        assert!(!frame.pixel(5, 8));
    }

    #[test]
    fn test_clipping() {
        let mut frame = Frame::new(Geometry::OLED_128X32);
        frame.set_pixel(-1, 0, true);
        frame.set_pixel(128, 0, true);
        frame.set_pixel(0, 32, true);
        frame.set_pixel(0, -5, true);
        assert!(frame.is_blank());
        assert!(!frame.pixel(200, 200));
        assert!(frame.page(4).is_empty());
    }

    #[test]
    fn test_set_and_clear_pixel() {
        let mut frame = Frame::new(Geometry::OLED_128X64);
        frame.set_pixel(127, 63, true);
        assert!(frame.pixel(127, 63));
        assert_eq!(frame.lit_in_rows(0, 64), 1);
        frame.set_pixel(127, 63, false);
        assert!(frame.is_blank());

        frame.set_pixel(10, 10, true);
        frame.clear();
        assert!(frame.is_blank());
    }
}
