//! check_dht - monitoring plugin for a DHT22/AM2302 sensor board
//!
//! Reads one line of JSON telemetry from the board's serial port, checks
//! it against the thresholds and exits with the monitoring-plugin status.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: /dev/ttyACM0 at 115200 baud, temperature 30/40, humidity 40/50
//! check_dht
//!
//! # Custom port and thresholds
//! check_dht --port /dev/ttyUSB0 -w 15:28 -c 10:32 \
//!     --humidity-warning 30:60 --humidity-critical 20:70
//! ```
//!
//! ## Exit codes
//!
//! - `0` OK
//! - `1` WARNING
//! - `2` CRITICAL (threshold exceeded or the board reports a fault)
//! - `3` UNKNOWN (port, telemetry or argument problem)

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dht_check::{check, CheckConfig, Cli, ProbeError, Report};

fn init_tracing(verbose: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the status line only
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            let message = err
                .to_string()
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            let report = Report::from_error(&ProbeError::Config(message));
            println!("{report}");
            return ExitCode::from(report.exit_code());
        }
    };

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("failed to initialize logging: {err}");
    }

    let report = match CheckConfig::try_from(&cli) {
        Ok(config) => Report::from_outcome(&check::check_serial(&config)),
        Err(err) => Report::from_error(&err),
    };

    tracing::info!(severity = %report.severity(), exit_code = report.exit_code(), "check finished");
    println!("{report}");
    ExitCode::from(report.exit_code())
}
