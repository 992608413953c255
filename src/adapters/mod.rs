//! Adapters - concrete implementations of ports
//!
//! # Available Adapters
//!
//! - **serial**: sensor board on a serial device, via `serialport`
//! - **line**: newline framing shared by byte-stream sources

pub mod line;
pub mod serial;

pub use line::LineReader;
pub use serial::SerialSource;
