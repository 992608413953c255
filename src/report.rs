//! Status line and exit code
//!
//! Output follows the monitoring-plugin convention:
//!
//! ```text
//! WARNING - onboard=35°C | onboard=35;30;40
//! ```
//!
//! The text before `|` is for humans, the performance data after it is
//! `label=value[uom];warn;crit[;min;max]` for graphing.

use core::fmt;
use std::fmt::Write as _;

use crate::check::{Evaluation, MeasurementResult};
use crate::domain::Severity;
use crate::error::{ProbeError, Result};

/// What the check prints and how it exits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    severity: Severity,
    text: String,
}

impl Report {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let summary = evaluation
            .results
            .iter()
            .map(|result| {
                let m = &result.measurement;
                format!("{}={}{}", m.kind.as_str(), m.value, m.kind.unit())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let perfdata = evaluation
            .results
            .iter()
            .map(perfdata)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            severity: evaluation.severity,
            text: format!("{summary} | {perfdata}"),
        }
    }

    /// A device fault is CRITICAL; every other error leaves the state
    /// UNKNOWN.
    pub fn from_error(err: &ProbeError) -> Self {
        let severity = match err {
            ProbeError::DeviceFault(_) => Severity::Critical,
            ProbeError::Io { .. } | ProbeError::Decode(_) | ProbeError::Config(_) => {
                Severity::Unknown
            }
        };
        Self {
            severity,
            text: err.to_string(),
        }
    }

    pub fn from_outcome(outcome: &Result<Evaluation>) -> Self {
        match outcome {
            Ok(evaluation) => Self::from_evaluation(evaluation),
            Err(err) => Self::from_error(err),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn exit_code(&self) -> u8 {
        self.severity.exit_code()
    }
}

fn perfdata(result: &MeasurementResult) -> String {
    let m = &result.measurement;
    let mut out = format!(
        "{}={}{};{};{}",
        m.kind.as_str(),
        m.value,
        m.kind.perfdata_uom(),
        result.threshold.warning,
        result.threshold.critical
    );
    if let Some((min, max)) = m.kind.valid_range() {
        let _ = write!(out, ";{min};{max}");
    }
    out
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.severity, self.text)
    }
}
