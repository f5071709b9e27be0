//! Event controller — the hexagonal core.
//!
//! [`EventController`] owns the debounced sensor state and coordinates the
//! alert, status, telemetry and location collaborators.  All I/O flows
//! through port traits held by value, making the controller testable with
//! mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────┐ ──▶ StatusPort
//!                 │   EventController     │ ──▶ TelemetryPort
//!    EdgeFlag ──▶ │ SensorState · stats   │ ──▶ AlertPort
//!                 └──────────────────────┘ ◀── LocationPort
//! ```
//!
//! Debounce is implicit: a transition is a level change observed between
//! two polls.  The edge flag only records that the ISR fired; a pending edge
//! whose level matches the stored state is counted as a suppressed glitch.

use core::time::Duration;

use log::{debug, info, warn};

use crate::config::SystemConfig;

use super::edge::EdgeFlag;
use super::model::{AlertOutcome, ReconcileOutcome, SensorState, TelemetryReport};
use super::ports::{AlertPort, LocationPort, SensorPort, StatusPort, TelemetryPort};

/// Screen shown when a collision is detected.
pub const COLLISION_MESSAGE: &str = "Colisao detectada!\nEnviando Resgate!";

/// Screen shown while waiting for input.
pub const IDLE_PROMPT: &str = "Pressione o botao A.\nPara simular uma\ncolisao.";

/// The controller's collaborators, owned by value.
pub struct Collaborators<S, A, P, T, L> {
    pub sensor: S,
    pub alert: A,
    pub status: P,
    pub telemetry: T,
    pub location: L,
}

/// Counters for periodic status logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub polls: u64,
    pub transitions: u32,
    pub glitches_suppressed: u32,
    pub read_failures: u32,
    pub alerts_cancelled: u32,
}

// ───────────────────────────────────────────────────────────────
// EventController
// ───────────────────────────────────────────────────────────────

pub struct EventController<S, A, P, T, L> {
    io: Collaborators<S, A, P, T, L>,
    edge: &'static EdgeFlag,
    state: SensorState,
    alert_budget: Duration,
    cancel_on_clear: bool,
    stats: ControllerStats,
}

impl<S, A, P, T, L> EventController<S, A, P, T, L>
where
    S: SensorPort,
    A: AlertPort,
    P: StatusPort,
    T: TelemetryPort,
    L: LocationPort,
{
    /// Build the controller in the Idle state.
    ///
    /// Does **not** touch any collaborator; call [`start`](Self::start) next.
    pub fn new(
        config: &SystemConfig,
        edge: &'static EdgeFlag,
        io: Collaborators<S, A, P, T, L>,
    ) -> Self {
        Self {
            io,
            edge,
            state: SensorState::Idle,
            alert_budget: config.alert_duration(),
            cancel_on_clear: config.cancel_alert_on_clear,
            stats: ControllerStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the outputs in their idle state: prompt on screen, actuators off.
    pub fn start(&mut self) {
        self.io.alert.stop();
        self.io.status.show(IDLE_PROMPT);
        info!(
            "EventController started in {:?} (alert={}ms, cancel_on_clear={})",
            self.state,
            self.alert_budget.as_millis(),
            self.cancel_on_clear
        );
    }

    // ── Per-poll reconciliation ───────────────────────────────

    /// Compare the live sensor level with the stored state and act on a
    /// change.  Called from the polling loop; blocks for the whole alert
    /// sequence on an Idle → Triggered transition.
    pub fn reconcile(&mut self) -> ReconcileOutcome {
        self.stats.polls += 1;
        let edge_pending = self.edge.take();

        let level = match self.io.sensor.sample() {
            Ok(level) => level,
            Err(e) => {
                self.stats.read_failures += 1;
                warn!("Sensor read failed ({}), keeping {:?}", e, self.state);
                return ReconcileOutcome::Unchanged;
            }
        };

        if level == self.state {
            if edge_pending {
                self.stats.glitches_suppressed += 1;
                debug!("Edge without level change, still {:?}", self.state);
                return ReconcileOutcome::GlitchSuppressed;
            }
            return ReconcileOutcome::Unchanged;
        }

        let from = self.state;
        info!("STATE | {:?} -> {:?}", from, level);
        match level {
            SensorState::Triggered => self.on_triggered(),
            SensorState::Idle => self.on_cleared(),
        }
        self.state = level;
        self.stats.transitions += 1;

        ReconcileOutcome::Transitioned { from, to: level }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current debounced state.
    pub fn state(&self) -> SensorState {
        self.state
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Borrow the collaborators (diagnostics and tests).
    pub fn collaborators(&self) -> &Collaborators<S, A, P, T, L> {
        &self.io
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators<S, A, P, T, L> {
        &mut self.io
    }

    // ── Internal ──────────────────────────────────────────────

    fn on_triggered(&mut self) {
        let position = self.io.location.read();
        self.io.status.show(COLLISION_MESSAGE);
        self.io.telemetry.send(&TelemetryReport::collision(position));

        let cancel_on_clear = self.cancel_on_clear;
        let sensor = &mut self.io.sensor;
        let stats = &mut self.stats;
        let mut cleared = || {
            if !cancel_on_clear {
                return false;
            }
            match sensor.sample() {
                Ok(level) => level == SensorState::Idle,
                Err(e) => {
                    stats.read_failures += 1;
                    warn!("Sensor read failed during alert ({}), not cancelling", e);
                    false
                }
            }
        };

        match self.io.alert.run_alert(self.alert_budget, &mut cleared) {
            AlertOutcome::Completed => debug!("Alert sequence completed"),
            AlertOutcome::Cancelled { elapsed_ms } => {
                self.stats.alerts_cancelled += 1;
                info!("Alert cancelled after {}ms, sensor cleared", elapsed_ms);
            }
        }

        // Whatever the sequence did, leave the outputs dark.
        self.io.alert.stop();
    }

    fn on_cleared(&mut self) {
        self.io.status.show(IDLE_PROMPT);
        self.io.telemetry.send(&TelemetryReport::cleared());
        self.io.alert.stop();
    }
}
