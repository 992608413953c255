//! The check pipeline
//!
//! ```text
//! open port -> read line -> decode -> device fault? -> evaluate -> report
//! ```
//!
//! Every step either hands its output to the next one or ends the check
//! with a [`ProbeError`]. Nothing is retried.

use std::time::Duration;

use crate::adapters::SerialSource;
use crate::config::CheckConfig;
use crate::domain::{DeviceFault, Measurement, Record, Severity, Threshold, Thresholds};
use crate::error::{ProbeError, Result};
use crate::ports::TelemetrySource;
use crate::protocol;

/// One measurement with the threshold it was checked against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementResult {
    pub measurement: Measurement,
    pub threshold: Threshold,
    pub severity: Severity,
}

/// Outcome of checking every measurement of a record
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Worst severity across all measurements
    pub severity: Severity,
    pub results: Vec<MeasurementResult>,
}

/// Acquire one record from `source`.
///
/// A nonzero device status code ends the probe with
/// [`ProbeError::DeviceFault`], whatever the other fields say.
pub fn probe<S: TelemetrySource + ?Sized>(source: &mut S) -> Result<Record> {
    let line = source.read_line()?;
    tracing::debug!(
        source = source.name(),
        line = %String::from_utf8_lossy(&line),
        "telemetry line received"
    );

    let record = protocol::decode(&line)?;

    if let Some(fault) = DeviceFault::from_code(record.error_code()) {
        tracing::debug!(code = fault.code, "device reports fault");
        return Err(ProbeError::DeviceFault(fault));
    }

    Ok(record)
}

/// Classify every measurement of `record` and keep the worst severity
pub fn evaluate(record: &Record, thresholds: &Thresholds) -> Evaluation {
    let results: Vec<MeasurementResult> = record
        .measurements()
        .into_iter()
        .map(|measurement| {
            let threshold = *thresholds.for_context(measurement.kind.context());
            let severity = threshold.classify(measurement.value);
            tracing::debug!(
                measurement = measurement.kind.as_str(),
                value = measurement.value,
                severity = %severity,
                "measurement classified"
            );
            MeasurementResult {
                measurement,
                threshold,
                severity,
            }
        })
        .collect();

    let severity = results
        .iter()
        .map(|result| result.severity)
        .max()
        .unwrap_or_default();

    Evaluation { severity, results }
}

/// Probe `source` once and evaluate the record
pub fn run<S: TelemetrySource + ?Sized>(
    source: &mut S,
    thresholds: &Thresholds,
) -> Result<Evaluation> {
    let record = probe(source)?;
    Ok(evaluate(&record, thresholds))
}

/// Run the check against the serial port named in `config`.
///
/// The port is closed before this returns, on success and on error.
pub fn check_serial(config: &CheckConfig) -> Result<Evaluation> {
    let mut source = SerialSource::open(
        &config.port,
        config.baud,
        Duration::from_secs(config.timeout_secs),
    )?;
    run(&mut source, &config.thresholds)
}
