//! Collision sensor input.
//!
//! ## Hardware
//!
//! Momentary switch to ground with pull-up (active-low) standing in for
//! the impact sensor.  The GPIO fires on both edges; the ISR raises
//! [`COLLISION_EDGE`] and returns.  The polling loop samples the live level
//! through [`CollisionInput`] and decides transitions itself.

use embedded_hal::digital::{Error as _, InputPin};
use log::debug;

use crate::app::edge::EdgeFlag;
use crate::app::model::SensorState;
use crate::app::ports::{SensorError, SensorPort};

/// Pending-edge flag for the collision sensor GPIO.
/// Written by the ISR, consumed by the controller.
pub static COLLISION_EDGE: EdgeFlag = EdgeFlag::new();

/// ISR handler; register this on the sensor GPIO (any edge).
/// Safe to call from interrupt context (lock-free atomic store).
pub fn collision_isr_handler() {
    COLLISION_EDGE.raise();
}

/// Logical view of the sensor pin: applies the active-level inversion.
pub struct CollisionInput<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> CollisionInput<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

impl<P: InputPin> SensorPort for CollisionInput<P> {
    fn sample(&mut self) -> Result<SensorState, SensorError> {
        let high = self.pin.is_high().map_err(|e| {
            debug!("collision pin read error: {:?}", e.kind());
            SensorError::ReadFailed
        })?;
        Ok(SensorState::from_active(high != self.active_low))
    }
}
