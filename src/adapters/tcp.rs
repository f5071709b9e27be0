//! `std::net` TCP transport for telemetry.
//!
//! Works unchanged on host and on ESP-IDF (lwIP behind the std socket API).

use core::time::Duration;
use std::io::Write as _;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use log::debug;

use crate::app::ports::{Connection, NetworkPort, TransportError};

/// Opens one TCP connection per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpNetwork;

impl TcpNetwork {
    pub fn new() -> Self {
        Self
    }
}

/// A connected stream; closed on drop.
pub struct TcpConnection {
    stream: TcpStream,
}

impl NetworkPort for TcpNetwork {
    type Connection = TcpConnection;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<TcpConnection, TransportError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|_| TransportError::AddressInvalid)?
            .next()
            .ok_or(TransportError::AddressInvalid)?;

        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
            debug!("tcp: connect {} failed: {}", addr, e);
            TransportError::ConnectFailed
        })?;
        // Writes get the same budget as the connect.
        if let Err(e) = stream.set_write_timeout(Some(timeout)) {
            debug!("tcp: set_write_timeout failed: {}", e);
        }
        Ok(TcpConnection { stream })
    }
}

impl Connection for TcpConnection {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.stream
            .write_all(bytes)
            .and_then(|()| self.stream.flush())
            .map_err(|e| {
                debug!("tcp: write failed: {}", e);
                TransportError::WriteFailed
            })
    }
}

impl Drop for TcpConnection {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
