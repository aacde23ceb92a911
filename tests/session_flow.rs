// End-to-end state machine scenarios: session transitions, command
// encoding and the disconnected-link contract, exercised together the way
// the interactive engine drives them.

use servoctl::core::{Action, Mode, SessionState, Speed};
use servoctl::transport::link::DEFAULT_BAUD;
use servoctl::transport::SerialLink;
use servoctl::tui::input::{parse_choice, MenuChoice};

/// Apply an action and push the encoded command the way the engine does:
/// transition first, then encode, then (best-effort) transmit.
fn drive(
    session: &mut SessionState,
    link: &mut SerialLink,
    action: Action,
    log: &mut Vec<String>,
) {
    let command = session.apply(action);
    let line = command.encode();
    link.write_line(&line);
    log.push(line);
}

#[test]
fn dashboard_scenario_emits_commands_in_order() {
    let mut session = SessionState::default();
    let mut link = SerialLink::new(DEFAULT_BAUD);
    let mut log = Vec::new();

    for action in [
        Action::Servo1Up,
        Action::Servo1Up,
        Action::Servo2Up,
        Action::ToggleRun,
    ] {
        drive(&mut session, &mut link, action, &mut log);
    }

    assert_eq!(log, ["SERVO1:95", "SERVO1:100", "SERVO2:95", "START"]);
    assert_eq!(session.servo1, 100);
    assert_eq!(session.servo2, 95);
    assert!(session.running);
}

#[test]
fn positions_stay_in_bounds_under_any_step_sequence() {
    let mut session = SessionState::default();
    let mut link = SerialLink::new(DEFAULT_BAUD);
    let mut log = Vec::new();

    // walk far past the upper limit, then far past the lower one
    for _ in 0..40 {
        drive(&mut session, &mut link, Action::Servo1Up, &mut log);
        assert!(session.servo1 <= 180);
    }
    assert_eq!(session.servo1, 180);
    assert_eq!(log.last().map(String::as_str), Some("SERVO1:180"));

    for _ in 0..60 {
        drive(&mut session, &mut link, Action::Servo1Down, &mut log);
    }
    assert_eq!(session.servo1, 0);
    // the boundary no-op still encodes the unchanged value
    assert_eq!(log.last().map(String::as_str), Some("SERVO1:0"));
}

#[test]
fn session_keeps_updating_while_disconnected() {
    let mut session = SessionState::default();
    let mut link = SerialLink::new(DEFAULT_BAUD);
    assert!(!link.is_connected());

    let mut log = Vec::new();
    drive(&mut session, &mut link, Action::ToggleRun, &mut log);
    drive(&mut session, &mut link, Action::ToggleReverse, &mut log);
    drive(
        &mut session,
        &mut link,
        Action::SetSpeed(Speed::Slow),
        &mut log,
    );

    // every write silently no-oped, but the state machine advanced
    assert!(session.running);
    assert!(session.reverse);
    assert_eq!(session.speed, Speed::Slow);
    assert_eq!(log, ["START", "REVERSE:1", "SPEED:333"]);
}

#[test]
fn toggle_pairs_emit_matching_command_order() {
    let mut session = SessionState::default();
    let mut link = SerialLink::new(DEFAULT_BAUD);
    let mut log = Vec::new();

    drive(&mut session, &mut link, Action::ToggleRun, &mut log);
    drive(&mut session, &mut link, Action::ToggleRun, &mut log);
    drive(&mut session, &mut link, Action::ToggleReverse, &mut log);
    drive(&mut session, &mut link, Action::ToggleReverse, &mut log);

    assert_eq!(log, ["START", "STOP", "REVERSE:1", "REVERSE:0"]);
    assert_eq!(session, SessionState::default());
}

#[test]
fn invalid_menu_selection_changes_nothing() {
    let mut session = SessionState::default();
    session.mode = Mode::Menu;
    let before = session.clone();

    assert_eq!(parse_choice("9"), None);
    // the engine reports and re-prompts; nothing was applied
    assert_eq!(session, before);
    assert_eq!(session.mode, Mode::Menu);
}

#[test]
fn menu_selections_map_to_the_coarse_action_set() {
    let mut session = SessionState::default();
    session.mode = Mode::Menu;

    let Some(MenuChoice::Act(start)) = parse_choice("1") else {
        panic!("expected start action");
    };
    assert_eq!(session.apply(start).encode(), "START");
    assert!(session.running);

    let Some(MenuChoice::Act(slow)) = parse_choice("5") else {
        panic!("expected speed action");
    };
    assert_eq!(session.apply(slow).encode(), "SPEED:333");

    // menu interaction never moved the servos or left menu mode
    assert_eq!((session.servo1, session.servo2), (90, 90));
    assert_eq!(session.mode, Mode::Menu);
    assert_eq!(parse_choice("8"), Some(MenuChoice::Back));
}

#[test]
fn failed_reopen_does_not_corrupt_session_state() {
    let mut session = SessionState::default();
    session.apply(Action::Servo1Up);
    session.apply(Action::SetSpeed(Speed::Medium));
    let before = session.clone();

    let mut link = SerialLink::new(DEFAULT_BAUD);
    assert!(link.open("/dev/no-such-device").is_err());
    assert!(!link.is_connected());
    assert_eq!(link.endpoint(), None);

    assert_eq!(session, before);
}
