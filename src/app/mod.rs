//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the collision alert:
//! sensor-state reconciliation, alert orchestration and telemetry reports.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod controller;
pub mod edge;
pub mod model;
pub mod ports;
