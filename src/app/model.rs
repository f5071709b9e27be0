//! Domain values exchanged between the controller and its collaborators.

use core::fmt;

/// Debounced, logical state of the collision sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorState {
    #[default]
    Idle,
    Triggered,
}

impl SensorState {
    /// Map a logical "sensor active" level to a state.
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Triggered } else { Self::Idle }
    }
}

/// A position fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Neutral value sent with "cleared" reports.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// One telemetry point.  Built per transition, serialised immediately and
/// dropped; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryReport {
    pub collision: bool,
    pub position: Coordinates,
}

impl TelemetryReport {
    /// Report for an Idle → Triggered transition.
    pub const fn collision(position: Coordinates) -> Self {
        Self {
            collision: true,
            position,
        }
    }

    /// Report for a Triggered → Idle transition.  No fresh location read is
    /// taken for the clear, so the position is the neutral origin.
    pub const fn cleared() -> Self {
        Self {
            collision: false,
            position: Coordinates::ORIGIN,
        }
    }
}

/// How an alert sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Ran for the full budget.
    Completed,
    /// Stopped early at a blink-cycle boundary by the cancellation probe.
    Cancelled { elapsed_ms: u32 },
}

/// Result of one [`reconcile`](super::controller::EventController::reconcile) poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Level matches the stored state and no edge was pending.
    Unchanged,
    /// An edge was pending but the level matches the stored state.
    GlitchSuppressed,
    /// The debounced state changed.
    Transitioned { from: SensorState, to: SensorState },
}
