//! SSD1306 128×64 OLED on I²C, via the `ssd1306` driver crate.
//!
//! The panel runs in buffered graphics mode: drawing lands in the driver's
//! RAM frame and [`FrameSink::flush`] pushes the dirty region to the panel.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;
use log::{info, warn};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::adapters::text_display::FrameSink;
use crate::app::ports::DisplayError;
use crate::pins::SSD1306_I2C_ADDR;

pub type OledPanel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Bring the panel up at the board address and blank it.
pub fn open<I2C: I2c>(i2c: I2C) -> Result<OledPanel<I2C>, DisplayError> {
    open_at(i2c, SSD1306_I2C_ADDR)
}

pub fn open_at<I2C: I2c>(i2c: I2C, address: u8) -> Result<OledPanel<I2C>, DisplayError> {
    let interface = I2CDisplayInterface::new_custom_address(i2c, address);
    let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    panel.init().map_err(|e| {
        warn!("oled: init failed: {:?}", e);
        DisplayError::Bus
    })?;
    DrawTarget::clear(&mut panel, BinaryColor::Off).map_err(|_| DisplayError::Bus)?;
    FrameSink::flush(&mut panel)?;
    info!("oled: SSD1306 128x64 up at 0x{:02X}", address);
    Ok(panel)
}

impl<I2C: I2c> FrameSink for OledPanel<I2C> {
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ssd1306::flush(self).map_err(|e| {
            warn!("oled: flush failed: {:?}", e);
            DisplayError::Bus
        })
    }
}
