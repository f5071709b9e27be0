//! Collision-alert firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(feature = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;

// Hardware-facing layers; each module carries host simulation stubs so the
// crate builds and tests on x86_64.
pub mod adapters;
pub mod drivers;
