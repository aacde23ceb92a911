//! Screen rendering for the dashboard and menu.
//!
//! Raw mode is active while these run, so every line break is an explicit
//! `\r\n`. The screens are fixed text blocks; the session snapshot plus
//! the link's connection status is everything they need.

use std::io::{self, Write};
use std::{thread, time::Duration};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::core::SessionState;
use crate::transport::SerialLink;

const RULE: &str = "------------------------------------------------------------";

pub fn draw_dashboard(state: &SessionState, link: &SerialLink) -> Result<()> {
    let mut lines: Vec<String> = vec![
        "============================================================".into(),
        "       SERVO CONTROL DASHBOARD".into(),
        "============================================================".into(),
        String::new(),
        format!(
            "Status: {}",
            if state.running { "RUNNING" } else { "STOPPED" }
        ),
        connection_line(link),
        format!(
            "Speed: {} ({}ms delay)",
            state.speed,
            state.speed.millis()
        ),
        format!(
            "Reverse Mode: {}",
            if state.reverse { "ON" } else { "OFF" }
        ),
        format!("Servo 1 Position: {} degrees", state.servo1),
        format!("Servo 2 Position: {} degrees", state.servo2),
        String::new(),
        RULE.into(),
        "CONTROLS:".into(),
        RULE.into(),
        "  [SPACE]    Start/Stop Auto Sweep".into(),
        "  [UP]       Move Servo 1 Forward (+5 degrees)".into(),
        "  [DOWN]     Move Servo 1 Backward (-5 degrees)".into(),
        "  [RIGHT]    Move Servo 2 Forward (+5 degrees)".into(),
        "  [LEFT]     Move Servo 2 Backward (-5 degrees)".into(),
        "  [1]        Set Fast Speed (15ms)".into(),
        "  [2]        Set Medium Speed (100ms)".into(),
        "  [3]        Set Slow Speed (333ms)".into(),
        "  [R]        Toggle Reverse Mode".into(),
        "  [M]        Menu Mode".into(),
        "  [Q]        Quit".into(),
        RULE.into(),
        String::new(),
        "Press any key for control...".into(),
    ];
    if let Some(cause) = link.last_error() {
        lines.push(String::new());
        lines.push(format!("Last transport error: {cause}"));
    }
    draw_screen(&lines)
}

pub fn draw_menu(link: &SerialLink) -> Result<()> {
    let lines = [
        "==================================================".to_string(),
        "    MENU MODE".into(),
        "==================================================".into(),
        String::new(),
        "  1. Start Sweep".into(),
        "  2. Stop Sweep".into(),
        "  3. Set Fast Speed (15ms)".into(),
        "  4. Set Medium Speed (100ms)".into(),
        "  5. Set Slow Speed (333ms)".into(),
        "  6. Toggle Reverse Mode".into(),
        "  7. Change Port".into(),
        "  8. Back to Control Mode".into(),
        RULE.into(),
        connection_line(link),
        String::new(),
    ];
    draw_screen(&lines)
}

pub fn draw_change_port(link: &SerialLink) -> Result<()> {
    let lines = [
        format!(
            "Current port: {}",
            link.endpoint().unwrap_or("(none)")
        ),
        String::new(),
    ];
    draw_screen(&lines)
}

/// Print a prompt without a trailing newline and flush.
pub fn prompt(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Print(text))?;
    stdout.flush()?;
    Ok(())
}

/// Show a one-line confirmation and hold it briefly so the user sees it
/// before the next screen wipes it away.
pub fn notice(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Print(text), Print("\r\n"))?;
    stdout.flush()?;
    thread::sleep(Duration::from_secs(1));
    Ok(())
}

fn connection_line(link: &SerialLink) -> String {
    if link.is_connected() {
        format!(
            "Connection: Connected ({})",
            link.endpoint().unwrap_or("?")
        )
    } else {
        "Connection: Disconnected (simulation mode)".to_string()
    }
}

fn draw_screen(lines: &[String]) -> Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in lines {
        queue!(stdout, Print(line), Print("\r\n"))?;
    }
    stdout.flush()?;
    Ok(())
}
