//! The interactive engine.
//!
//! Single-threaded by design: one input event is carried to completion
//! (state transition, encode, transmit, re-render, in that order) before
//! the next is read. The write always happens before the screen update,
//! so the display never claims a state the device was not at least told
//! about.

pub mod input;
pub mod ui;

use anyhow::Result;

use crate::core::{Action, Mode, SessionState};
use crate::protocol::Command;
use crate::transport::SerialLink;
use input::{LiveEvent, MenuChoice};

pub fn start(link: &mut SerialLink) -> Result<()> {
    log::info!("interactive session starting");
    crossterm::terminal::enable_raw_mode()?;
    let res = run(link);
    crossterm::terminal::disable_raw_mode()?;
    res
}

fn run(link: &mut SerialLink) -> Result<()> {
    let mut session = SessionState::default();
    loop {
        match session.mode {
            Mode::Live => {
                ui::draw_dashboard(&session, link)?;
                match input::next_live_event()? {
                    LiveEvent::Act(action) => dispatch(&mut session, link, action),
                    LiveEvent::EnterMenu => session.mode = Mode::Menu,
                    LiveEvent::Quit => {
                        shutdown(link);
                        return Ok(());
                    }
                }
            }
            Mode::Menu => {
                ui::draw_menu(link)?;
                ui::prompt("Enter choice (1-8): ")?;
                let line = input::read_line()?;
                match input::parse_choice(&line) {
                    Some(MenuChoice::Act(action)) => {
                        dispatch(&mut session, link, action);
                        ui::notice(&menu_confirmation(&session, action))?;
                    }
                    Some(MenuChoice::ChangePort) => change_port(link)?,
                    Some(MenuChoice::Back) => session.mode = Mode::Live,
                    None => ui::notice("Invalid choice! Please enter 1-8")?,
                }
            }
        }
    }
}

/// Transition, encode, transmit. Rendering follows on the next loop pass.
fn dispatch(session: &mut SessionState, link: &mut SerialLink, action: Action) {
    let command = session.apply(action);
    link.write_line(&command.encode());
}

/// The change-port sub-flow. A failed open leaves the link disconnected
/// with its previous endpoint on record; session state is untouched
/// either way.
fn change_port(link: &mut SerialLink) -> Result<()> {
    ui::draw_change_port(link)?;
    ui::prompt("Enter new port (e.g. /dev/ttyUSB0): ")?;
    let entry = input::read_line()?;
    let entry = entry.trim();
    if entry.is_empty() {
        return Ok(());
    }
    match link.open(entry) {
        Ok(()) => ui::notice(&format!("Connected to {entry}"))?,
        Err(err) => ui::notice(&format!("Could not connect to {entry}: {err:#}"))?,
    }
    Ok(())
}

fn menu_confirmation(session: &SessionState, action: Action) -> String {
    match action {
        Action::Start => "Sweep started!".to_string(),
        Action::Stop => "Sweep stopped!".to_string(),
        Action::SetSpeed(speed) => format!("Speed set to {}ms", speed.millis()),
        Action::ToggleReverse if session.reverse => "Reverse mode ON".to_string(),
        Action::ToggleReverse => "Reverse mode OFF".to_string(),
        _ => String::new(),
    }
}

/// Best-effort: tell the device to stop, then release the port. A failed
/// send is dropped, not retried.
fn shutdown(link: &mut SerialLink) {
    log::info!("shutting down, sending final stop");
    link.write_line(&Command::Stop.encode());
    link.close();
}
