//! Mock collaborators for integration tests.
//!
//! Port-level mocks record every call so tests can assert on the full
//! history; the embedded-hal mocks stand in for the real pins under the
//! production drivers.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

use collision_alert::app::controller::{Collaborators, EventController};
use collision_alert::app::edge::EdgeFlag;
use collision_alert::app::model::{AlertOutcome, Coordinates, SensorState, TelemetryReport};
use collision_alert::app::ports::{
    AlertPort, LocationPort, SensorError, SensorPort, StatusPort, TelemetryPort,
};
use collision_alert::config::SystemConfig;

pub const FIX: Coordinates = Coordinates::new(-23.551_234, -46.632_001);

/// A fresh, never-shared edge flag (the controller wants `&'static`).
pub fn edge_flag() -> &'static EdgeFlag {
    Box::leak(Box::new(EdgeFlag::new()))
}

// ── Sensor ────────────────────────────────────────────────────

/// Shared handle on the simulated sensor level.
#[derive(Clone, Default)]
pub struct SensorLine(Rc<Cell<SensorState>>);

#[allow(dead_code)]
impl SensorLine {
    pub fn set(&self, level: SensorState) {
        self.0.set(level);
    }

    pub fn get(&self) -> SensorState {
        self.0.get()
    }
}

pub struct MockSensor {
    pub line: SensorLine,
    /// Upcoming reads that fail before the level is reported again.
    pub fail_reads: u32,
    /// Every read from this sample number on fails.
    pub fail_from: Option<u32>,
    pub samples: u32,
}

impl SensorPort for MockSensor {
    fn sample(&mut self) -> Result<SensorState, SensorError> {
        self.samples += 1;
        if self.fail_from.is_some_and(|n| self.samples >= n) {
            return Err(SensorError::ReadFailed);
        }
        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            return Err(SensorError::ReadFailed);
        }
        Ok(self.line.get())
    }
}

// ── Alert ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertCall {
    Run { budget_ms: u64 },
    Stop,
}

/// Simulates blink cycles without sleeping.
pub struct MockAlert {
    pub calls: Vec<AlertCall>,
    pub outcomes: Vec<AlertOutcome>,
    pub cycle_ms: u32,
    pub active: bool,
    /// Runs after each simulated cycle with the cycle index.
    pub on_cycle: Option<Box<dyn FnMut(u32)>>,
}

#[allow(dead_code)]
impl MockAlert {
    pub fn new(cycle_ms: u32) -> Self {
        Self {
            calls: Vec::new(),
            outcomes: Vec::new(),
            cycle_ms,
            active: false,
            on_cycle: None,
        }
    }

    pub fn runs(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, AlertCall::Run { .. })).count()
    }
}

impl AlertPort for MockAlert {
    fn run_alert(&mut self, budget: Duration, cancel: &mut dyn FnMut() -> bool) -> AlertOutcome {
        let budget_ms = budget.as_millis() as u64;
        self.calls.push(AlertCall::Run { budget_ms });
        self.active = true;

        let mut elapsed_ms: u64 = 0;
        let mut cycle = 0;
        let outcome = loop {
            if elapsed_ms >= budget_ms {
                break AlertOutcome::Completed;
            }
            if cancel() {
                break AlertOutcome::Cancelled { elapsed_ms: elapsed_ms as u32 };
            }
            elapsed_ms += u64::from(self.cycle_ms);
            if let Some(hook) = self.on_cycle.as_mut() {
                hook(cycle);
            }
            cycle += 1;
        };

        self.active = false;
        self.outcomes.push(outcome);
        outcome
    }

    fn stop(&mut self) {
        self.active = false;
        self.calls.push(AlertCall::Stop);
    }
}

// ── Status / telemetry / location ─────────────────────────────

#[derive(Default)]
pub struct MockStatus {
    pub shown: Vec<String>,
}

#[allow(dead_code)]
impl MockStatus {
    pub fn current(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }
}

impl StatusPort for MockStatus {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

#[derive(Default)]
pub struct MockTelemetry {
    pub reports: Vec<TelemetryReport>,
}

impl TelemetryPort for MockTelemetry {
    fn send(&mut self, report: &TelemetryReport) {
        self.reports.push(*report);
    }
}

pub struct MockLocation {
    pub fix: Coordinates,
    pub reads: u32,
}

impl LocationPort for MockLocation {
    fn read(&mut self) -> Coordinates {
        self.reads += 1;
        self.fix
    }
}

// ── Controller fixture ────────────────────────────────────────

pub type MockController =
    EventController<MockSensor, MockAlert, MockStatus, MockTelemetry, MockLocation>;

pub struct Rig {
    pub controller: MockController,
    pub line: SensorLine,
    pub edge: &'static EdgeFlag,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(config: &SystemConfig) -> Self {
        let line = SensorLine::default();
        let edge = edge_flag();
        let io = Collaborators {
            sensor: MockSensor { line: line.clone(), fail_reads: 0, fail_from: None, samples: 0 },
            alert: MockAlert::new(config.blink_half_period_ms * 2),
            status: MockStatus::default(),
            telemetry: MockTelemetry::default(),
            location: MockLocation { fix: FIX, reads: 0 },
        };
        let mut controller = EventController::new(config, edge, io);
        controller.start();
        Self { controller, line, edge }
    }

    /// Drive the sensor to `level` and raise the edge, as the ISR would.
    pub fn press(&self, level: SensorState) {
        self.line.set(level);
        self.edge.raise();
    }

    pub fn alert(&self) -> &MockAlert {
        &self.controller.collaborators().alert
    }

    pub fn status(&self) -> &MockStatus {
        &self.controller.collaborators().status
    }

    pub fn reports(&self) -> &[TelemetryReport] {
        &self.controller.collaborators().telemetry.reports
    }

    pub fn location(&self) -> &MockLocation {
        &self.controller.collaborators().location
    }
}

// ── embedded-hal pin mocks ────────────────────────────────────

/// What the physical outputs are doing right now.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputLevels {
    pub buzzer_duty: u16,
    pub led_on: bool,
    pub led_toggles: u32,
    pub waited_ms: u64,
}

pub type Outputs = Rc<RefCell<OutputLevels>>;

pub struct PwmPin(pub Outputs);
pub struct LedPin(pub Outputs);
pub struct FakeDelay(pub Outputs);

impl embedded_hal::pwm::ErrorType for PwmPin {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for PwmPin {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.borrow_mut().buzzer_duty = duty;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for LedPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for LedPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().led_on = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut out = self.0.borrow_mut();
        out.led_on = true;
        out.led_toggles += 1;
        Ok(())
    }
}

impl embedded_hal::delay::DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().waited_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().waited_ms += u64::from(ms);
    }
}
