//! Candidate port discovery.
//!
//! Enumerates serial devices whose names match the conventions USB-serial
//! adapters and Arduino-class boards use (`ttyUSB*`, `ttyACM*`, `ttyAMA*`,
//! `cu.usbserial*`, `cu.usbmodem*`, plus Arduino-labelled stable aliases
//! under `/dev/serial/by-id`). The result is de-duplicated and sorted so
//! two scans over the same devices always agree.

use std::{collections::BTreeSet, fs, thread, time::Duration};

use crate::transport::link::{DEFAULT_BAUD, SETTLE_DELAY};

const BY_ID_DIR: &str = "/dev/serial/by-id";
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Scan for candidate endpoints. Empty result means "nothing found", never
/// an error; the caller falls back to manual entry.
pub fn discover() -> Vec<String> {
    let mut names: Vec<String> = serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.port_name)
        .collect();
    names.extend(arduino_by_id_aliases());
    filter_candidates(names)
}

/// Try a timed open/close cycle against `endpoint`.
///
/// The settle sleep lets the board finish its open-triggered reset before
/// we call it reachable. The port is never left open, whichever way the
/// probe goes.
pub fn probe(endpoint: &str) -> bool {
    match serialport::new(endpoint, DEFAULT_BAUD)
        .timeout(PROBE_TIMEOUT)
        .open()
    {
        Ok(handle) => {
            thread::sleep(SETTLE_DELAY);
            drop(handle);
            true
        }
        Err(err) => {
            log::debug!("probe of {endpoint} failed: {err}");
            false
        }
    }
}

/// Keep names matching the platform conventions, drop duplicates, sort
/// deterministically.
pub(crate) fn filter_candidates(names: Vec<String>) -> Vec<String> {
    let unique: BTreeSet<String> = names
        .into_iter()
        .filter(|name| matches_convention(name))
        .collect();
    unique.into_iter().collect()
}

fn matches_convention(path: &str) -> bool {
    if path.contains("/serial/by-id/") && path.contains("Arduino") {
        return true;
    }
    let base = path.rsplit('/').next().unwrap_or(path);
    ["ttyUSB", "ttyACM", "ttyAMA", "cu.usbserial", "cu.usbmodem"]
        .iter()
        .any(|prefix| base.starts_with(prefix))
}

fn arduino_by_id_aliases() -> Vec<String> {
    let Ok(entries) = fs::read_dir(BY_ID_DIR) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains("Arduino"))
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .collect()
}
