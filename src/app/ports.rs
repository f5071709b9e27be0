//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ EventController (domain)
//! ```
//!
//! The first five traits are the controller's collaborators.  The last
//! two ([`DisplayPort`], [`NetworkPort`]) sit one layer further out: the
//! status presenter and the telemetry sender are written against them, so
//! the display controller and the TCP stack can be swapped for fakes too.

use core::fmt;
use core::time::Duration;

use super::model::{AlertOutcome, Coordinates, SensorState, TelemetryReport};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Live, logical level of the collision sensor.
pub trait SensorPort {
    /// Sample the input now.  Active-low inversion is the adapter's job.
    fn sample(&mut self) -> Result<SensorState, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Alert port (domain → buzzer + LED)
// ───────────────────────────────────────────────────────────────

pub trait AlertPort {
    /// Sound the buzzer and blink the LED for `budget`, blocking the caller.
    ///
    /// `cancel` is polled once per blink cycle; returning `true` ends the
    /// sequence early.  Both actuators are off when this returns, however
    /// it exits.
    fn run_alert(&mut self, budget: Duration, cancel: &mut dyn FnMut() -> bool) -> AlertOutcome;

    /// Force buzzer and LED off.  Idempotent.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Status port (domain → display)
// ───────────────────────────────────────────────────────────────

pub trait StatusPort {
    /// Replace the screen content with `text`; `'\n'` separates rows.
    fn show(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (domain → network)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget report delivery.  Implementations log failures; the
/// caller never learns whether the point arrived.
pub trait TelemetryPort {
    fn send(&mut self, report: &TelemetryReport);
}

// ───────────────────────────────────────────────────────────────
// Location port (positioning → domain)
// ───────────────────────────────────────────────────────────────

pub trait LocationPort {
    fn read(&mut self) -> Coordinates;
}

// ───────────────────────────────────────────────────────────────
// Display port (presenter → display controller)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw one line of text with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Push the drawn frame to the panel.
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Panel height in pixels.
    fn height(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Network port (telemetry sender → transport)
// ───────────────────────────────────────────────────────────────

/// Connection-oriented transport.  Write-only from the core's point of
/// view: nothing is ever read back.
pub trait NetworkPort {
    type Connection: Connection;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Connection, TransportError>;
}

pub trait Connection {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SensorPort`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The GPIO driver reported a failure.
    ReadFailed,
}

/// Errors from [`DisplayPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I²C/SPI transfer to the panel failed.
    Bus,
}

/// Errors from [`NetworkPort`] / [`Connection`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Host could not be resolved to an address.
    AddressInvalid,
    /// TCP connect failed or timed out.
    ConnectFailed,
    /// Writing the request failed part-way.
    WriteFailed,
    /// Formatted request exceeded the request buffer.
    RequestTooLong,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "display bus error"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressInvalid => write!(f, "address invalid"),
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::RequestTooLong => write!(f, "request too long"),
        }
    }
}
