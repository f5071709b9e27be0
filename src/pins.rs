//! GPIO / peripheral pin assignments for the collision-alert helmet board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Collision sensor (momentary switch standing in for the impact sensor)
// ---------------------------------------------------------------------------

/// Digital input with internal pull-up.  LOW = collision (active-low).
/// Edge interrupt on both edges feeds the pending-edge flag.
pub const COLLISION_SENSOR_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Alert actuators
// ---------------------------------------------------------------------------

/// Passive buzzer driven by an LEDC PWM channel.
pub const BUZZER_GPIO: i32 = 21;
/// Alert LED.  Digital output, HIGH = lit.
pub const LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Status display (SSD1306 128x64 OLED on I²C)
// ---------------------------------------------------------------------------

pub const I2C_SCL_GPIO: i32 = 14;
pub const I2C_SDA_GPIO: i32 = 15;
/// I²C bus clock for the display.
pub const I2C_FREQ_HZ: u32 = 400_000;
/// 7-bit I²C address of the SSD1306 (SA0 tied low).
pub const SSD1306_I2C_ADDR: u8 = 0x3C;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
