//! `embedded-hal` 1.0 wrappers over the raw pin helpers in [`hw_init`].
//!
//! The sequencer and the sensor adapter are generic over the embedded-hal
//! traits; these thin types plug the pins configured by `hw_init` into
//! them.  Register writes cannot fail once init succeeded, so every error
//! type is `Infallible`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads/writes GPIO and LEDC registers via hw_init.
//! On host/test: the hw_init stubs turn every call into a no-op.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType as DigitalErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use crate::drivers::hw_init;

// ── Digital input ─────────────────────────────────────────────

pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl DigitalErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}

// ── Digital output ────────────────────────────────────────────

pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl DigitalErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        Ok(())
    }
}

// ── LEDC PWM channel ──────────────────────────────────────────

/// One 8-bit LEDC channel.
pub struct LedcPwm {
    channel: u32,
    duty: u8,
}

impl LedcPwm {
    pub fn new(channel: u32) -> Self {
        Self { channel, duty: 0 }
    }

    /// Last duty written (0–255).
    pub fn duty(&self) -> u8 {
        self.duty
    }
}

impl PwmErrorType for LedcPwm {
    type Error = Infallible;
}

impl SetDutyCycle for LedcPwm {
    fn max_duty_cycle(&self) -> u16 {
        u8::MAX as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty = duty.min(u8::MAX as u16) as u8;
        hw_init::ledc_set(self.channel, duty);
        self.duty = duty;
        Ok(())
    }
}
