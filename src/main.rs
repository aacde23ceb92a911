use std::io::{self, Write};

use anyhow::Result;

use servoctl::transport::{link::DEFAULT_BAUD, scan, SerialLink};
use servoctl::{boot, cli, tui};

fn main() -> Result<()> {
    boot::init_logging();
    let matches = cli::parse_args();

    if matches.get_flag("list-ports") {
        let ports = scan::discover();
        if ports.is_empty() {
            println!("No serial devices found");
        }
        for port in ports {
            let status = if scan::probe(&port) { "OK" } else { "?" };
            println!("{port} [{status}]");
        }
        return Ok(());
    }

    let baud = matches
        .get_one::<u32>("baud")
        .copied()
        .unwrap_or(DEFAULT_BAUD);
    let endpoint = match matches.get_one::<String>("port") {
        Some(port) => port.clone(),
        None => select_endpoint()?,
    };

    let mut link = SerialLink::new(baud);
    if link.open(&endpoint).is_ok() {
        println!("Connected to {endpoint}");
    } else {
        println!("Could not connect to {endpoint}");
        println!("Running in simulation mode");
    }

    tui::start(&mut link)
}

/// Startup endpoint selection: discover candidates, show each with its
/// probe status, let the user pick by number or auto-select the first
/// reachable one. Falls back to manual entry when discovery comes up
/// empty.
fn select_endpoint() -> Result<String> {
    println!("Searching for the sweep controller...");
    println!();

    let candidates = scan::discover();
    if candidates.is_empty() {
        println!("No serial devices found!");
        println!();
        let entry = prompt_line("Enter port manually: ")?;
        return Ok(if entry.is_empty() {
            "/dev/ttyUSB0".to_string()
        } else {
            entry
        });
    }

    println!("Found serial devices:");
    let probed: Vec<bool> = candidates.iter().map(|p| scan::probe(p)).collect();
    for (i, (port, ok)) in candidates.iter().zip(&probed).enumerate() {
        let status = if *ok { "OK" } else { "?" };
        println!("  {}. {port} [{status}]", i + 1);
    }
    println!();

    let choice = prompt_line(&format!(
        "Select port (1-{}) or Enter for auto: ",
        candidates.len()
    ))?;

    let port = match choice.parse::<usize>() {
        Ok(n) if (1..=candidates.len()).contains(&n) => candidates[n - 1].clone(),
        Ok(_) => candidates[0].clone(),
        Err(_) => {
            // auto: first candidate that probed reachable, else the first
            let idx = probed.iter().position(|ok| *ok).unwrap_or(0);
            candidates[idx].clone()
        }
    };

    println!();
    println!("Using port: {port}");
    Ok(port)
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
