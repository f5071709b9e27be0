//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod alert;
pub mod collision_sensor;
pub mod gpio;
pub mod hw_init;
pub mod oled;
