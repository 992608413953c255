//! Command-line configuration
//!
//! Thresholds are taken as text and validated into ranges before the port
//! is touched, so a bad threshold never costs a serial round trip.

use clap::{ArgAction, Parser};

use crate::domain::{Range, Threshold, Thresholds};
use crate::error::{ProbeError, Result};

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "check_dht",
    version,
    about = "Monitoring plugin for DHT22/AM2302 sensor boards on a serial port",
    after_help = "Ranges: N (0..N), N: (N..), ~:N (..N), A:B, @A:B (alert inside A..B)"
)]
pub struct Cli {
    /// Serial device to read from
    #[arg(short, long, default_value = DEFAULT_PORT)]
    pub port: String,

    /// Baud rate of the serial port
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Return WARNING if a temperature is outside RANGE
    #[arg(
        short,
        long,
        value_name = "RANGE",
        default_value = "30",
        allow_hyphen_values = true
    )]
    pub warning: String,

    /// Return CRITICAL if a temperature is outside RANGE
    #[arg(
        short,
        long,
        value_name = "RANGE",
        default_value = "40",
        allow_hyphen_values = true
    )]
    pub critical: String,

    /// Return WARNING if humidity is outside RANGE (percent)
    #[arg(
        long,
        value_name = "RANGE",
        default_value = "40",
        allow_hyphen_values = true
    )]
    pub humidity_warning: String,

    /// Return CRITICAL if humidity is outside RANGE (percent)
    #[arg(
        long,
        value_name = "RANGE",
        default_value = "50",
        allow_hyphen_values = true
    )]
    pub humidity_critical: String,

    /// Seconds to wait for a line before giving up
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Increase log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated settings for one check run
#[derive(Clone, Debug, PartialEq)]
pub struct CheckConfig {
    pub port: String,
    pub baud: u32,
    pub timeout_secs: u64,
    pub thresholds: Thresholds,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud: DEFAULT_BAUD,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            thresholds: Thresholds::default(),
        }
    }
}

fn threshold(name: &str, warning: &str, critical: &str) -> Result<Threshold> {
    let labeled = |flag: &str, err: ProbeError| match err {
        ProbeError::Config(msg) => ProbeError::Config(format!("{flag}: {msg}")),
        other => other,
    };
    let warning: Range = warning
        .parse()
        .map_err(|err| labeled(&format!("--{}warning", name), err))?;
    let critical: Range = critical
        .parse()
        .map_err(|err| labeled(&format!("--{}critical", name), err))?;
    Threshold::new(warning, critical)
}

impl TryFrom<&Cli> for CheckConfig {
    type Error = ProbeError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let temperature = threshold("", &cli.warning, &cli.critical)?;
        let humidity = threshold("humidity-", &cli.humidity_warning, &cli.humidity_critical)?;

        Ok(Self {
            port: cli.port.clone(),
            baud: cli.baud,
            timeout_secs: cli.timeout,
            thresholds: Thresholds {
                temperature,
                humidity,
            },
        })
    }
}
