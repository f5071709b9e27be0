//! WiFi station-mode bring-up.
//!
//! Telemetry needs the station associated before the control loop starts;
//! failure here aborts startup.  There is no reconnect loop: a dropped
//! link shows up later as failed (and logged) telemetry sends.
//!
//! ## cfg gating
//!
//! - **`feature = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **host builds**: credential validation only.

use core::fmt;

use super::utils::is_printable_ascii;

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    /// Driver init, start or association failed.
    ConnectionFailed,
    /// Association did not complete within the configured timeout.
    Timeout,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::Timeout => write!(f, "WiFi association timed out"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() {
        return Err(ConnectivityError::NoCredentials);
    }
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

/// Check station credentials before touching the radio.
/// An empty password selects an open network.
pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), ConnectivityError> {
    validate_ssid(ssid)?;
    validate_password(password)
}

// ───────────────────────────────────────────────────────────────
// Station bring-up (ESP-IDF)
// ───────────────────────────────────────────────────────────────

#[cfg(feature = "espidf")]
pub use station::connect_station;

#[cfg(feature = "espidf")]
mod station {
    use std::time::{Duration, Instant};

    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{error, info};

    use super::{ConnectivityError, validate_credentials};
    use crate::config::WifiConfig;

    const POLL_STEP: Duration = Duration::from_millis(100);

    /// Start the station, associate and wait for an IP.
    ///
    /// The returned handle must be kept alive for as long as the network is
    /// needed; dropping it stops the driver.
    pub fn connect_station(
        config: &WifiConfig,
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<BlockingWifi<EspWifi<'static>>, ConnectivityError> {
        validate_credentials(&config.ssid, &config.password)?;

        let fail = |what: &str, e: esp_idf_svc::sys::EspError| {
            error!("WiFi: {} failed: {}", what, e);
            ConnectivityError::ConnectionFailed
        };

        let driver = EspWifi::new(modem, sysloop.clone(), Some(nvs)).map_err(|e| fail("driver init", e))?;
        let mut wifi = BlockingWifi::wrap(driver, sysloop).map_err(|e| fail("event wrap", e))?;

        let client = ClientConfiguration {
            ssid: config
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: config
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method: if config.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        };
        wifi.set_configuration(&Configuration::Client(client))
            .map_err(|e| fail("set_configuration", e))?;
        wifi.start().map_err(|e| fail("start", e))?;

        info!("WiFi: connecting to '{}'", config.ssid);
        wifi.wifi_mut().connect().map_err(|e| fail("connect", e))?;

        let deadline = Instant::now() + Duration::from_millis(u64::from(config.connect_timeout_ms));
        loop {
            if wifi.is_connected().unwrap_or(false) {
                break;
            }
            if Instant::now() >= deadline {
                error!("WiFi: no association after {} ms", config.connect_timeout_ms);
                return Err(ConnectivityError::Timeout);
            }
            std::thread::sleep(POLL_STEP);
        }

        wifi.wait_netif_up().map_err(|e| fail("netif up", e))?;
        match wifi.wifi().sta_netif().get_ip_info() {
            Ok(ip) => info!("WiFi: connected, ip={}", ip.ip),
            Err(_) => info!("WiFi: connected"),
        }
        Ok(wifi)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
