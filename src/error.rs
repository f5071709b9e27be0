//! Unified error types for the collision-alert firmware.
//!
//! Only the bootstrap path is allowed to fail: the control loop logs and
//! swallows every runtime fault (telemetry, display, actuators).  This enum
//! collects the startup failures so `main` can surface them in one place.
//! All variants are `Copy`.

use core::fmt;

use crate::adapters::wifi::ConnectivityError;
use crate::app::ports::DisplayError;
use crate::config::ConfigError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is malformed or failed validation.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The status display could not be brought up.
    Display(DisplayError),
    /// Wi-Fi station bring-up failed.
    Connectivity(ConnectivityError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Connectivity(e) => write!(f, "wifi: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Connectivity(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
