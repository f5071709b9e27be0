//! Monochrome text rendering over any `embedded-graphics` frame buffer.
//!
//! [`TextDisplay`] turns a [`FrameSink`] (a `DrawTarget<Color = BinaryColor>`
//! that can push its frame to the panel) into a [`DisplayPort`].

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::app::ports::{DisplayError, DisplayPort};

/// A buffered monochrome panel.
pub trait FrameSink: DrawTarget<Color = BinaryColor> {
    /// Push the RAM frame to the panel.
    fn flush(&mut self) -> Result<(), DisplayError>;
}

pub struct TextDisplay<T> {
    target: T,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<T: FrameSink> TextDisplay<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            style: MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: FrameSink> DisplayPort for TextDisplay<T> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Bus)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Bus)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.target.flush()
    }

    fn height(&self) -> u32 {
        self.target.bounding_box().size.height
    }
}
