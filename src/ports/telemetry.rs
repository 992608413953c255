//! Telemetry port - abstraction for fetching one line from a sensor board
//!
//! The check only needs "give me the next line". Keeping that behind a
//! trait lets the pipeline run against a serial port in production and
//! against canned lines in tests.

use crate::error::Result;

/// Port for acquiring one raw telemetry line
///
/// # Example Implementation
///
/// ```ignore
/// struct Canned(Vec<u8>);
///
/// impl TelemetrySource for Canned {
///     fn read_line(&mut self) -> Result<Vec<u8>> {
///         Ok(std::mem::take(&mut self.0))
///     }
///
///     fn name(&self) -> &str { "canned" }
/// }
/// ```
pub trait TelemetrySource {
    /// Block until one newline-terminated line is available and return it
    /// without the terminator.
    ///
    /// A timeout or a closed connection is an error; implementations do not
    /// retry.
    fn read_line(&mut self) -> Result<Vec<u8>>;

    /// Human-readable name of the source (device path for serial ports)
    fn name(&self) -> &str;
}
