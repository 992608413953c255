//! Domain layer - pure check logic independent of serial I/O
//!
//! This module contains the telemetry record, the severity scale, the
//! threshold ranges and the device fault lookup.

pub mod fault;
pub mod record;
pub mod severity;
pub mod threshold;

pub use fault::DeviceFault;
pub use record::{Measurement, MeasurementKind, Record, ThresholdContext};
pub use severity::Severity;
pub use threshold::{Range, Threshold, Thresholds};
