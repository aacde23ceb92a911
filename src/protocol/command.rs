//! Wire commands understood by the sweep controller firmware.
//!
//! The protocol is ASCII, one command per line, newline-terminated, with no
//! response from the device. Encoding is total: every command value has
//! exactly one wire form.

use std::fmt;

/// One line of the serial protocol, before the terminator is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the autonomous sweep on the device.
    Start,
    /// Halt the autonomous sweep. Also sent on shutdown.
    Stop,
    /// Inter-step delay in milliseconds (15, 100 or 333).
    Speed(u16),
    /// Sweep direction polarity.
    Reverse(bool),
    /// Absolute position of servo 1, degrees in [0, 180].
    Servo1(u8),
    /// Absolute position of servo 2, degrees in [0, 180].
    Servo2(u8),
}

impl Command {
    /// Render the command as the exact line the firmware expects,
    /// without the trailing newline.
    pub fn encode(&self) -> String {
        match self {
            Command::Start => "START".to_string(),
            Command::Stop => "STOP".to_string(),
            Command::Speed(ms) => format!("SPEED:{ms}"),
            Command::Reverse(on) => format!("REVERSE:{}", u8::from(*on)),
            Command::Servo1(deg) => format!("SERVO1:{deg}"),
            Command::Servo2(deg) => format!("SERVO2:{deg}"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
