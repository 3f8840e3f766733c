use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use tracing::{error, info};

use highway_planner::command::{CommandError, Session};
use highway_planner::config::HighwayConfig;
use highway_planner::highway::Highway;
use highway_planner::logging::init_logger;

fn main() -> ExitCode {
    if let Err(err) = init_logger() {
        eprintln!("failed to install tracing subscriber - {err}");
    }

    let config = match HighwayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        max_cars = config.max_cars,
        scan_deadline_ms = ?config.scan_deadline_ms,
        "highway planner starting"
    );

    let output = BufWriter::new(io::stdout().lock());
    let mut session = Session::new(Highway::new(config), output);

    // Commands come from the file named on the command line, or stdin
    let result = match std::env::args_os().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => session.run(BufReader::new(file)),
            Err(err) => {
                error!(path = %path.to_string_lossy(), %err, "failed to open input");
                Err(CommandError::Io(err))
            }
        },
        None => session.run(io::stdin().lock()),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(line = session.line(), %err, "session aborted");
            ExitCode::from(err.exit_code())
        }
    }
}
