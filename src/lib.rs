//! Servoctl — interactive serial dashboard for dual-servo sweep controllers
//!
//! This crate drives an Arduino-class sweep controller over a serial line.
//! Keyboard input (live keystrokes or a numbered menu) is translated into a
//! small newline-terminated ASCII command protocol; the session keeps
//! running in a degraded "simulation" mode whenever no serial device is
//! reachable, so the state machine can be exercised without hardware.
//!
//! The modules split along the session's seams: `core` holds the pure
//! session state and its transition rules, `protocol` the wire encoding,
//! `transport` the serial link and port discovery, and `tui` the
//! interactive engine that ties them together.

pub mod boot;
pub mod cli;
pub mod core;
pub mod protocol;
pub mod transport;
pub mod tui;
