//! Monospace text rendering
//!
//! Sizes are mapped onto the built-in embedded-graphics ASCII fonts: a
//! requested size picks the tallest font whose glyph height does not
//! exceed it. Text is anchored at its top edge, so a line's `y` is the
//! first pixel row it may light.

use embedded_graphics::mono_font::{ascii, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer as _;
use embedded_graphics::text::{Baseline, Text};
use statline_core::traits::{TextMeasure, TextRenderer};
use statline_core::Frame;

use crate::target::FrameTarget;

/// Built-in fonts, shortest first
static FONTS: [&MonoFont<'static>; 10] = [
    &ascii::FONT_4X6,
    &ascii::FONT_5X7,
    &ascii::FONT_5X8,
    &ascii::FONT_6X9,
    &ascii::FONT_6X10,
    &ascii::FONT_6X12,
    &ascii::FONT_6X13,
    &ascii::FONT_7X14,
    &ascii::FONT_9X15,
    &ascii::FONT_10X20,
];

/// Text renderer over the embedded-graphics monospace fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoTextRenderer;

impl MonoTextRenderer {
    pub const fn new() -> Self {
        Self
    }

    /// Font used for `size_px`
    ///
    /// Sizes below the smallest font still get the smallest font.
    pub fn font_for(size_px: u8) -> &'static MonoFont<'static> {
        FONTS
            .iter()
            .rev()
            .find(|font| font.character_size.height <= u32::from(size_px))
            .copied()
            .unwrap_or(FONTS[0])
    }

    fn style(size_px: u8) -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyle::new(Self::font_for(size_px), BinaryColor::On)
    }
}

impl TextMeasure for MonoTextRenderer {
    fn measure(&self, text: &str, size_px: u8) -> u32 {
        Self::style(size_px)
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width
    }
}

impl TextRenderer for MonoTextRenderer {
    fn draw(&self, frame: &mut Frame, text: &str, size_px: u8, x: i32, y: i32) {
        let mut target = FrameTarget::new(frame);
        // Infallible target
        let _ = Text::with_baseline(text, Point::new(x, y), Self::style(size_px), Baseline::Top)
            .draw(&mut target);
    }
}
