use clap::{Arg, ArgMatches, Command};

/// Parse command line arguments.
pub fn parse_args() -> ArgMatches {
    Command::new("servoctl")
        .about("Interactive serial dashboard for dual-servo sweep controllers")
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PATH")
                .help("Serial port to use, skipping discovery"),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .short('b')
                .value_name("RATE")
                .value_parser(clap::value_parser!(u32))
                .default_value("9600")
                .help("Baud rate for the whole session"),
        )
        .arg(
            Arg::new("list-ports")
                .long("list-ports")
                .help("List candidate serial ports with probe status, then exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches()
}
