//! Logger bring-up.
//!
//! Defaults to `env_logger` on stderr (silent unless `RUST_LOG` is set,
//! which keeps the dashboard clean). Setting `SERVOCTL_LOG_FILE` routes
//! everything to an append-mode file instead, which is the useful option
//! while the terminal is in raw mode.

use std::io::{self, Write};

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

pub fn init_logging() {
    if let Ok(path) = std::env::var("SERVOCTL_LOG_FILE") {
        if let Err(err) = init_file_logger(&path) {
            eprintln!("Failed to initialize file logger at '{path}': {err}");
            env_logger::init();
        }
    } else {
        env_logger::init();
    }
}

fn init_file_logger(path: &str) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .init();

    log::info!("File logger initialized at {path}");

    Ok(())
}
