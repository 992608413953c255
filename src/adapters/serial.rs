//! Serial port telemetry adapter
//!
//! This adapter implements the TelemetrySource port for a sensor board
//! attached as a USB CDC / UART serial device.

use std::io;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::adapters::line::LineReader;
use crate::error::{ProbeError, Result};
use crate::ports::TelemetrySource;
use crate::protocol::MAX_LINE_LEN;

/// Serial port connection to the sensor board.
///
/// The port is closed when this value is dropped.
pub struct SerialSource {
    path: String,
    timeout: Duration,
    reader: LineReader<Box<dyn SerialPort>>,
}

impl SerialSource {
    /// Open the port (8N1, no flow control) and assert DTR
    ///
    /// # Arguments
    ///
    /// * `path` - device path, e.g. `/dev/ttyACM0` or `COM3`
    /// * `baud` - baud rate
    /// * `timeout` - how long a read may block before failing
    pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
        // On Windows, COM ports >= 10 need the \\.\COMxx format
        #[cfg(target_os = "windows")]
        let device = if path.starts_with("COM") && !path.starts_with(r"\\") {
            format!(r"\\.\{}", path)
        } else {
            path.to_string()
        };
        #[cfg(not(target_os = "windows"))]
        let device = path.to_string();

        tracing::debug!(
            port = %device,
            baud,
            timeout_ms = timeout.as_millis() as u64,
            "opening serial port"
        );

        let mut port = serialport::new(&device, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()
            .map_err(|err| {
                ProbeError::io(format!("cannot open serial port {path}"), io::Error::from(err))
            })?;

        // Some CDC firmware holds its output until the host raises DTR
        if let Err(err) = port.write_data_terminal_ready(true) {
            tracing::warn!(port = %path, error = %err, "failed to set DTR");
        }

        Ok(Self {
            path: path.to_string(),
            timeout,
            reader: LineReader::new(port, MAX_LINE_LEN),
        })
    }
}

/// Name the failure of a read from `path`; a timeout is not retried
fn read_error(path: &str, timeout: Duration, err: io::Error) -> ProbeError {
    let context = if err.kind() == io::ErrorKind::TimedOut {
        format!("no line received from {} within {}s", path, timeout.as_secs())
    } else {
        format!("cannot read from {}", path)
    };
    ProbeError::io(context, err)
}

impl TelemetrySource for SerialSource {
    fn read_line(&mut self) -> Result<Vec<u8>> {
        self.reader
            .read_line()
            .map_err(|err| read_error(&self.path, self.timeout, err))
    }

    fn name(&self) -> &str {
        &self.path
    }
}
