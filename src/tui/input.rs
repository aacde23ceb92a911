//! Input mapping for both interaction surfaces.
//!
//! The live surface consumes single keypresses; the menu surface consumes
//! whole lines typed while the terminal stays in raw mode. Both translate
//! into the abstract events the engine dispatches on — nothing in here
//! touches session state.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, style::Print};

use crate::core::{Action, Speed};

/// Event produced by the live control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEvent {
    Act(Action),
    EnterMenu,
    Quit,
}

/// Parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Act(Action),
    ChangePort,
    Back,
}

/// Block until a keypress maps to a live event. Unrecognized keys are
/// ignored outright — no state change, no command.
pub fn next_live_event() -> Result<LiveEvent> {
    loop {
        if let Event::Key(key) = crossterm::event::read()? {
            if let Some(event) = map_key(key) {
                return Ok(event);
            }
        }
    }
}

/// Translate one key event into a live event, if it is bound.
///
/// Ctrl-C is treated as quit: raw mode swallows the signal and delivers
/// the chord as a key event, and the quit path still sends STOP.
pub fn map_key(key: KeyEvent) -> Option<LiveEvent> {
    if key.kind != KeyEventKind::Press {
        return None; // repeat / release
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(LiveEvent::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(LiveEvent::Act(Action::ToggleRun)),
        KeyCode::Up => Some(LiveEvent::Act(Action::Servo1Up)),
        KeyCode::Down => Some(LiveEvent::Act(Action::Servo1Down)),
        KeyCode::Right => Some(LiveEvent::Act(Action::Servo2Up)),
        KeyCode::Left => Some(LiveEvent::Act(Action::Servo2Down)),
        KeyCode::Char('1') => Some(LiveEvent::Act(Action::SetSpeed(Speed::Fast))),
        KeyCode::Char('2') => Some(LiveEvent::Act(Action::SetSpeed(Speed::Medium))),
        KeyCode::Char('3') => Some(LiveEvent::Act(Action::SetSpeed(Speed::Slow))),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(LiveEvent::Act(Action::ToggleReverse)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(LiveEvent::EnterMenu),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(LiveEvent::Quit),
        _ => None,
    }
}

/// Map a typed menu line to a choice. `None` means invalid selection; the
/// caller reports it and re-prompts without touching any state.
pub fn parse_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Act(Action::Start)),
        "2" => Some(MenuChoice::Act(Action::Stop)),
        "3" => Some(MenuChoice::Act(Action::SetSpeed(Speed::Fast))),
        "4" => Some(MenuChoice::Act(Action::SetSpeed(Speed::Medium))),
        "5" => Some(MenuChoice::Act(Action::SetSpeed(Speed::Slow))),
        "6" => Some(MenuChoice::Act(Action::ToggleReverse)),
        "7" => Some(MenuChoice::ChangePort),
        "8" => Some(MenuChoice::Back),
        _ => None,
    }
}

/// Read one line of input while the terminal is in raw mode, echoing as
/// we go. Enter finishes the line; Esc cancels it (returns empty).
pub fn read_line() -> Result<String> {
    let mut stdout = io::stdout();
    let mut buffer = String::new();
    loop {
        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Esc => {
                    buffer.clear();
                    break;
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        execute!(stdout, Print("\u{8} \u{8}"))?;
                    }
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    buffer.push(c);
                    execute!(stdout, Print(c))?;
                }
                _ => {}
            }
        }
    }
    execute!(stdout, Print("\r\n"))?;
    stdout.flush()?;
    Ok(buffer)
}
