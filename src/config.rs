//! System configuration parameters
//!
//! All tunable parameters for the collision-alert system.  Configuration is
//! process-lifetime only: defaults can be overridden at build time by
//! embedding a JSON document in the `COLLISION_ALERT_CONFIG` environment
//! variable (fields left out keep their defaults).

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::utils::is_query_safe;
use crate::adapters::wifi::validate_credentials;
use crate::error::Result;

/// Errors from loading or validating a [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The embedded JSON override could not be parsed.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Polling cadence of the control loop (milliseconds)
    pub poll_interval_ms: u32,
    /// Length of one alert sequence (milliseconds)
    pub alert_duration_ms: u32,
    /// LED on-time (and off-time) within one blink cycle (milliseconds)
    pub blink_half_period_ms: u32,

    // --- Actuators ---
    /// Buzzer tone frequency (Hz)
    pub buzzer_freq_hz: u32,
    /// Buzzer PWM duty cycle while sounding (1-100%)
    pub buzzer_duty_percent: u8,

    // --- Sensor ---
    /// Electrical LOW means "collision" (switch to ground with pull-up)
    pub sensor_active_low: bool,
    /// Abort a running alert at the next blink cycle once the sensor clears
    pub cancel_alert_on_clear: bool,

    // --- Display ---
    /// Vertical distance between text rows (pixels)
    pub display_line_height_px: u32,

    // --- Location ---
    /// Reference point for the simulated position fix (degrees)
    pub reference_latitude: f64,
    pub reference_longitude: f64,

    // --- Network ---
    pub telemetry: TelemetryConfig,
    pub wifi: WifiConfig,
}

/// Remote telemetry endpoint and request layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Address the TCP connection is opened to (IP literal or hostname)
    pub server_addr: String,
    pub port: u16,
    /// Value of the HTTP `Host:` header
    pub host_header: String,
    /// Request path, must start with `/`
    pub path: String,
    /// Write key; omitted from the query string when empty
    pub api_key: String,
    pub collision_field: String,
    pub latitude_field: String,
    pub longitude_field: String,
    /// Upper bound for connect and write (milliseconds)
    pub connect_timeout_ms: u32,
}

/// Station-mode Wi-Fi credentials.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: String,
    /// How long to wait for association + DHCP at boot (milliseconds)
    pub connect_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            poll_interval_ms: 500,
            alert_duration_ms: 5_000,
            blink_half_period_ms: 500, // 1 Hz blink

            // Actuators
            buzzer_freq_hz: 1_000,
            buzzer_duty_percent: 50, // loudest for a passive buzzer

            // Sensor
            sensor_active_low: true,
            cancel_alert_on_clear: false,

            // Display
            display_line_height_px: 10,

            // Location (São Paulo)
            reference_latitude: -23.550_520,
            reference_longitude: -46.633_308,

            telemetry: TelemetryConfig::default(),
            wifi: WifiConfig::default(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            server_addr: "184.106.153.149".into(),
            port: 80,
            host_header: "api.thingspeak.com".into(),
            path: "/update".into(),
            api_key: option_env!("TELEMETRY_API_KEY").unwrap_or("").into(),
            collision_field: "field1".into(),
            latitude_field: "field2".into(),
            longitude_field: "field3".into(),
            connect_timeout_ms: 3_000,
        }
    }
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: option_env!("WIFI_SSID").unwrap_or("").into(),
            password: option_env!("WIFI_PASS").unwrap_or("").into(),
            connect_timeout_ms: 10_000,
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for WifiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiConfig")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl SystemConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall the loop or produce a broken request.
    ///
    /// Wi-Fi credentials are checked separately by [`WifiConfig::validate`]
    /// because host builds run without them.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        let fail = |msg| Err(ConfigError::ValidationFailed(msg));

        if self.poll_interval_ms == 0 {
            return fail("poll_interval_ms must be non-zero");
        }
        if self.alert_duration_ms == 0 {
            return fail("alert_duration_ms must be non-zero");
        }
        if self.blink_half_period_ms == 0 {
            return fail("blink_half_period_ms must be non-zero");
        }
        if self.blink_half_period_ms > self.alert_duration_ms {
            return fail("blink_half_period_ms must not exceed alert_duration_ms");
        }
        if self.buzzer_freq_hz == 0 {
            return fail("buzzer_freq_hz must be non-zero");
        }
        if self.buzzer_duty_percent == 0 || self.buzzer_duty_percent > 100 {
            return fail("buzzer_duty_percent must be 1-100");
        }
        if self.display_line_height_px == 0 {
            return fail("display_line_height_px must be non-zero");
        }
        if !(-90.0..=90.0).contains(&self.reference_latitude) {
            return fail("reference_latitude out of range");
        }
        if !(-180.0..=180.0).contains(&self.reference_longitude) {
            return fail("reference_longitude out of range");
        }
        self.telemetry.validate()
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.alert_duration_ms as u64)
    }
}

impl TelemetryConfig {
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        let fail = |msg| Err(ConfigError::ValidationFailed(msg));

        if self.server_addr.is_empty() {
            return fail("telemetry.server_addr must not be empty");
        }
        if self.port == 0 {
            return fail("telemetry.port must be non-zero");
        }
        if self.host_header.is_empty() {
            return fail("telemetry.host_header must not be empty");
        }
        if !self.path.starts_with('/') {
            return fail("telemetry.path must start with '/'");
        }
        if self.collision_field.is_empty()
            || self.latitude_field.is_empty()
            || self.longitude_field.is_empty()
        {
            return fail("telemetry field names must not be empty");
        }
        if ![&self.collision_field, &self.latitude_field, &self.longitude_field]
            .iter()
            .all(|f| is_query_safe(f))
        {
            return fail("telemetry field names must be URL-safe");
        }
        if !is_query_safe(&self.api_key) {
            return fail("telemetry.api_key must be URL-safe");
        }
        if self.connect_timeout_ms == 0 {
            return fail("telemetry.connect_timeout_ms must be non-zero");
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms as u64)
    }
}

impl WifiConfig {
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if validate_credentials(&self.ssid, &self.password).is_err() {
            return Err(ConfigError::ValidationFailed(
                "wifi credentials invalid (SSID 1-32 printable ASCII, password empty or 8-64 bytes)",
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "wifi.connect_timeout_ms must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Configuration baked into this build: the JSON override when present,
/// defaults otherwise.
pub fn load_build_config() -> Result<SystemConfig> {
    match option_env!("COLLISION_ALERT_CONFIG") {
        Some(json) => SystemConfig::from_json(json),
        None => {
            let config = SystemConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}
