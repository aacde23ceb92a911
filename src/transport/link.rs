//! The single serial connection owned by a session.
//!
//! Every transport failure is swallowed here and surfaced only as the
//! `connected` flag plus a display string. Callers write unconditionally;
//! with no open port the write is a documented no-op, which is what keeps
//! the whole session usable in simulation mode.

use std::{io::Write, thread, time::Duration};

use anyhow::{Context, Result};
use serialport::SerialPort;

pub const DEFAULT_BAUD: u32 = 9600;

/// Grace period after a successful open. Arduino-class boards reset when
/// the port is opened (DTR toggle) and drop bytes sent before the
/// bootloader hands over, so the channel only counts as usable afterwards.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

const IO_TIMEOUT: Duration = Duration::from_millis(200);

/// Best-effort serial link. At most one open handle per session.
pub struct SerialLink {
    handle: Option<Box<dyn SerialPort>>,
    endpoint: Option<String>,
    baud: u32,
    connected: bool,
    last_error: Option<String>,
}

impl SerialLink {
    pub fn new(baud: u32) -> Self {
        Self {
            handle: None,
            endpoint: None,
            baud,
            connected: false,
            last_error: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }

    /// Last endpoint that was successfully opened, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Human-readable cause of the most recent failure, for the dashboard.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open `endpoint`, closing any previous port first.
    ///
    /// On failure the link is left disconnected and the recorded endpoint
    /// is not updated; the returned error is informational only — callers
    /// read `is_connected` and keep going.
    pub fn open(&mut self, endpoint: &str) -> Result<()> {
        self.close();
        match serialport::new(endpoint, self.baud)
            .timeout(IO_TIMEOUT)
            .open()
        {
            Ok(handle) => {
                thread::sleep(SETTLE_DELAY);
                self.handle = Some(handle);
                self.endpoint = Some(endpoint.to_string());
                self.connected = true;
                self.last_error = None;
                log::info!("serial link open on {endpoint} at {} baud", self.baud);
                Ok(())
            }
            Err(err) => {
                self.connected = false;
                self.last_error = Some(err.to_string());
                log::warn!("failed to open {endpoint}: {err}");
                Err(err).with_context(|| format!("opening serial port {endpoint}"))
            }
        }
    }

    /// Send one protocol line, best-effort.
    ///
    /// Disconnected: silent no-op (simulation mode). A write error flips
    /// the link to disconnected and drops the message; there is no retry
    /// and no queue, the next write simply no-ops.
    pub fn write_line(&mut self, line: &str) {
        if !self.connected {
            log::debug!("simulation: dropping \"{line}\"");
            return;
        }
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        if let Err(err) = handle
            .write_all(line.as_bytes())
            .and_then(|_| handle.write_all(b"\n"))
            .and_then(|_| handle.flush())
        {
            log::warn!("write failed on {:?}: {err}", self.endpoint);
            self.last_error = Some(err.to_string());
            self.connected = false;
            self.handle = None;
        }
    }

    /// Idempotent; safe when already disconnected.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            drop(handle);
            log::info!("serial link closed ({:?})", self.endpoint);
        }
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_link_starts_disconnected() {
        let link = SerialLink::new(DEFAULT_BAUD);
        assert!(!link.is_connected());
        assert_eq!(link.endpoint(), None);
        assert_eq!(link.last_error(), None);
    }

    #[test]
    fn write_while_disconnected_is_a_noop() {
        let mut link = SerialLink::new(DEFAULT_BAUD);
        link.write_line("SERVO1:95");
        link.write_line("START");
        assert!(!link.is_connected());
    }

    #[test]
    fn open_failure_keeps_endpoint_and_records_cause() {
        let mut link = SerialLink::new(DEFAULT_BAUD);
        let result = link.open("/dev/definitely-not-a-port");
        assert!(result.is_err());
        assert!(!link.is_connected());
        assert_eq!(link.endpoint(), None);
        assert!(link.last_error().is_some());
    }

    #[test]
    fn close_is_idempotent() {
        let mut link = SerialLink::new(DEFAULT_BAUD);
        link.close();
        link.close();
        assert!(!link.is_connected());
    }
}
