//! Fire-and-forget telemetry over plain HTTP.
//!
//! Each report becomes one `GET` against a ThingSpeak-style update endpoint:
//!
//! ```text
//! GET /update?api_key=KEY&field1=1&field2=-23.550520&field3=-46.633308 HTTP/1.1
//! Host: api.thingspeak.com
//! Connection: close
//! ```
//!
//! The request is written and the connection dropped.  Nothing is read
//! back and nothing is retried; failures are logged and counted.

use core::fmt::Write as _;

use log::{info, warn};

use crate::app::model::TelemetryReport;
use crate::app::ports::{Connection, NetworkPort, TelemetryPort, TransportError};
use crate::config::TelemetryConfig;

/// Upper bound for one rendered request.
pub const REQUEST_CAP: usize = 512;

pub type Request = heapless::String<REQUEST_CAP>;

/// Render `report` as a complete HTTP/1.1 request.
pub fn format_request(
    report: &TelemetryReport,
    config: &TelemetryConfig,
) -> Result<Request, TransportError> {
    let mut req = Request::new();
    let overflow = |_| TransportError::RequestTooLong;

    write!(req, "GET {}?", config.path).map_err(overflow)?;
    if !config.api_key.is_empty() {
        write!(req, "api_key={}&", config.api_key).map_err(overflow)?;
    }
    write!(
        req,
        "{}={}&{}={:.6}&{}={:.6} HTTP/1.1\r\n",
        config.collision_field,
        u8::from(report.collision),
        config.latitude_field,
        report.position.latitude,
        config.longitude_field,
        report.position.longitude,
    )
    .map_err(overflow)?;
    write!(req, "Host: {}\r\nConnection: close\r\n\r\n", config.host_header).map_err(overflow)?;
    Ok(req)
}

pub struct TelemetrySender<N> {
    network: N,
    config: TelemetryConfig,
    sent: u32,
    failed: u32,
}

impl<N: NetworkPort> TelemetrySender<N> {
    pub fn new(network: N, config: TelemetryConfig) -> Self {
        Self {
            network,
            config,
            sent: 0,
            failed: 0,
        }
    }

    /// Requests fully written to a connection.
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Reports dropped on formatting, connect or write failure.
    pub fn failed(&self) -> u32 {
        self.failed
    }

    fn deliver(&mut self, report: &TelemetryReport) -> Result<(), TransportError> {
        let request = format_request(report, &self.config)?;
        let mut conn = self.network.connect(
            &self.config.server_addr,
            self.config.port,
            self.config.connect_timeout(),
        )?;
        conn.write_all(request.as_bytes())
    }
}

impl<N: NetworkPort> TelemetryPort for TelemetrySender<N> {
    fn send(&mut self, report: &TelemetryReport) {
        match self.deliver(report) {
            Ok(()) => {
                self.sent = self.sent.wrapping_add(1);
                info!(
                    "TELEM | sent collision={} pos={} -> {}:{}",
                    u8::from(report.collision),
                    report.position,
                    self.config.server_addr,
                    self.config.port
                );
            }
            Err(e) => {
                self.failed = self.failed.wrapping_add(1);
                warn!("TELEM | dropped report (collision={}): {}", u8::from(report.collision), e);
            }
        }
    }
}
