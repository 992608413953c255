//! DHT22/AM2302 Serial Check Library
//!
//! This library reads one line of telemetry from a sensor board on a serial
//! port and turns it into a monitoring-plugin status line and exit code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - Record / Measurement entities                                 │
//! │  - Range, Threshold, Severity                                    │
//! │  - DeviceFault (errno lookup)                                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - TelemetrySource: fetch one raw line                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - SerialSource: serialport device                               │
//! │  - LineReader: newline framing over any byte stream              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`check::run`] composes the pieces: probe the source, evaluate the
//! record, and hand the outcome to [`report::Report`].

// ============================================================================
// Wire format
// ============================================================================

pub mod protocol;

pub use protocol::{decode, TelemetryLine, MAX_LINE_LEN};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure check logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

// ============================================================================
// Pipeline and surface
// ============================================================================

pub mod check;
pub mod config;
pub mod error;
pub mod report;

pub use adapters::{LineReader, SerialSource};
pub use check::{evaluate, probe, run, Evaluation, MeasurementResult};
pub use config::{CheckConfig, Cli};
pub use domain::{
    DeviceFault, Measurement, MeasurementKind, Range, Record, Severity, Threshold, Thresholds,
};
pub use error::{ProbeError, Result};
pub use ports::TelemetrySource;
pub use report::Report;
