//! Session state and its transition rules.
//!
//! This is the single authoritative record of what the controller believes
//! the device is doing. It is pure data: all I/O lives in the transport and
//! TUI layers. Positions reflect last-sent intent only — the firmware never
//! acknowledges, so the state is optimistic by design.

use crate::protocol::Command;

/// Servo travel limits, degrees.
pub const SERVO_MIN: u8 = 0;
pub const SERVO_MAX: u8 = 180;
/// Degrees moved per keypress.
pub const SERVO_STEP: u8 = 5;

/// Which interaction surface currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Mode {
    Live,
    Menu,
}

/// Inter-step delay presets for the autonomous sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Speed {
    Fast,
    Medium,
    Slow,
}

impl Speed {
    /// Delay in milliseconds as the firmware expects it.
    pub fn millis(self) -> u16 {
        match self {
            Speed::Fast => 15,
            Speed::Medium => 100,
            Speed::Slow => 333,
        }
    }
}

/// One user-facing action over the session state.
///
/// `Start`/`Stop` are the menu's absolute forms; `ToggleRun` is the live
/// surface's spacebar. All three drive the same `running` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleRun,
    Start,
    Stop,
    Servo1Up,
    Servo1Down,
    Servo2Up,
    Servo2Down,
    SetSpeed(Speed),
    ToggleReverse,
}

/// The mutable session record. One instance per process, owned by the
/// interaction engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub running: bool,
    pub speed: Speed,
    pub reverse: bool,
    pub servo1: u8,
    pub servo2: u8,
    pub mode: Mode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            running: false,
            speed: Speed::Fast,
            reverse: false,
            servo1: 90,
            servo2: 90,
            mode: Mode::Live,
        }
    }
}

impl SessionState {
    /// Apply one action and return the command to transmit.
    ///
    /// Every action yields exactly one command. Servo steps clamp to
    /// [`SERVO_MIN`, `SERVO_MAX`]; stepping past a boundary leaves the
    /// position unchanged and still encodes the (unchanged) value.
    pub fn apply(&mut self, action: Action) -> Command {
        match action {
            Action::ToggleRun => {
                self.running = !self.running;
                self.run_command()
            }
            Action::Start => {
                self.running = true;
                Command::Start
            }
            Action::Stop => {
                self.running = false;
                Command::Stop
            }
            Action::Servo1Up => {
                self.servo1 = step_up(self.servo1);
                Command::Servo1(self.servo1)
            }
            Action::Servo1Down => {
                self.servo1 = step_down(self.servo1);
                Command::Servo1(self.servo1)
            }
            Action::Servo2Up => {
                self.servo2 = step_up(self.servo2);
                Command::Servo2(self.servo2)
            }
            Action::Servo2Down => {
                self.servo2 = step_down(self.servo2);
                Command::Servo2(self.servo2)
            }
            Action::SetSpeed(speed) => {
                self.speed = speed;
                Command::Speed(speed.millis())
            }
            Action::ToggleReverse => {
                self.reverse = !self.reverse;
                Command::Reverse(self.reverse)
            }
        }
    }

    fn run_command(&self) -> Command {
        if self.running {
            Command::Start
        } else {
            Command::Stop
        }
    }
}

fn step_up(pos: u8) -> u8 {
    pos.saturating_add(SERVO_STEP).min(SERVO_MAX)
}

fn step_down(pos: u8) -> u8 {
    pos.saturating_sub(SERVO_STEP).max(SERVO_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_power_on_state() {
        let s = SessionState::default();
        assert!(!s.running);
        assert!(!s.reverse);
        assert_eq!(s.speed, Speed::Fast);
        assert_eq!((s.servo1, s.servo2), (90, 90));
        assert_eq!(s.mode, Mode::Live);
    }

    #[test]
    fn toggle_run_round_trips() {
        let mut s = SessionState::default();
        assert_eq!(s.apply(Action::ToggleRun), Command::Start);
        assert!(s.running);
        assert_eq!(s.apply(Action::ToggleRun), Command::Stop);
        assert!(!s.running);
    }

    #[test]
    fn toggle_reverse_tracks_flag() {
        let mut s = SessionState::default();
        assert_eq!(s.apply(Action::ToggleReverse), Command::Reverse(true));
        assert_eq!(s.apply(Action::ToggleReverse), Command::Reverse(false));
        assert!(!s.reverse);
    }

    #[test]
    fn speed_presets_echo_their_literal() {
        let mut s = SessionState::default();
        for (speed, ms) in [(Speed::Fast, 15), (Speed::Medium, 100), (Speed::Slow, 333)] {
            assert_eq!(s.apply(Action::SetSpeed(speed)), Command::Speed(ms));
            assert_eq!(s.speed.millis(), ms);
        }
    }

    #[test]
    fn servo_steps_clamp_at_travel_limits() {
        let mut s = SessionState::default();
        for _ in 0..40 {
            s.apply(Action::Servo1Up);
        }
        assert_eq!(s.servo1, SERVO_MAX);
        // at the limit the step is a no-op on state but still encodes
        assert_eq!(s.apply(Action::Servo1Up), Command::Servo1(SERVO_MAX));

        for _ in 0..40 {
            s.apply(Action::Servo2Down);
        }
        assert_eq!(s.servo2, SERVO_MIN);
        assert_eq!(s.apply(Action::Servo2Down), Command::Servo2(SERVO_MIN));
    }

    #[test]
    fn up_up_right_toggle_emits_expected_sequence() {
        let mut s = SessionState::default();
        let emitted: Vec<String> = [
            Action::Servo1Up,
            Action::Servo1Up,
            Action::Servo2Up,
            Action::ToggleRun,
        ]
        .into_iter()
        .map(|a| s.apply(a).encode())
        .collect();
        assert_eq!(emitted, ["SERVO1:95", "SERVO1:100", "SERVO2:95", "START"]);
        assert_eq!(s.servo1, 100);
        assert_eq!(s.servo2, 95);
        assert!(s.running);
    }

    #[test]
    fn absolute_start_stop_are_idempotent_on_state() {
        let mut s = SessionState::default();
        assert_eq!(s.apply(Action::Start), Command::Start);
        assert_eq!(s.apply(Action::Start), Command::Start);
        assert!(s.running);
        assert_eq!(s.apply(Action::Stop), Command::Stop);
        assert!(!s.running);
    }

    #[test]
    fn mode_switch_preserves_other_fields() {
        let mut s = SessionState::default();
        s.apply(Action::Servo1Up);
        s.apply(Action::ToggleReverse);
        s.mode = Mode::Menu;
        assert_eq!(s.servo1, 95);
        assert!(s.reverse);
        s.mode = Mode::Live;
        assert_eq!(s.servo1, 95);
    }
}
