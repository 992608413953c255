//! Ports (interfaces) defining the boundaries of the check
//!
//! - **TelemetrySource**: how one line of sensor output is obtained
//!   (serial port, in-memory buffer)

pub mod telemetry;

pub use telemetry::TelemetrySource;
