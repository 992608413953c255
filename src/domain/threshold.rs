//! Threshold ranges and classification
//!
//! Ranges use the usual monitoring-plugin notation:
//!
//! | Text      | Accepted values        |
//! |-----------|------------------------|
//! | `30`      | `0 ..= 30`             |
//! | `10:30`   | `10 ..= 30`            |
//! | `10:`     | `10 ..`                |
//! | `~:30`    | `.. = 30`              |
//! | `@10:30`  | anything but `10..=30` |
//!
//! A value the range does not accept raises the alert tied to that range.

use core::fmt;
use core::str::FromStr;

use crate::domain::record::ThresholdContext;
use crate::domain::severity::Severity;
use crate::error::{ProbeError, Result};

/// Inclusive numeric range, optionally inverted with a leading `@`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    pub inverted: bool,
}

impl Range {
    /// `0 ..= end`, the meaning of a bare number
    pub const fn up_to(end: f64) -> Self {
        Self {
            start: 0.0,
            end,
            inverted: false,
        }
    }

    /// Whether `value` stays clear of the alert this range guards
    pub fn accepts(&self, value: f64) -> bool {
        let inside = self.start <= value && value <= self.end;
        inside != self.inverted
    }

    /// Whether every value inside `other` is also inside `self`
    fn covers(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

fn parse_bound(text: &str, range: &str) -> Result<f64> {
    let value = text.parse::<f64>().map_err(|_| {
        ProbeError::Config(format!("'{range}' is not a valid range: '{text}' is not a number"))
    })?;
    if !value.is_finite() {
        return Err(ProbeError::Config(format!(
            "'{range}' is not a valid range: bounds must be finite"
        )));
    }
    Ok(value)
}

impl FromStr for Range {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (inverted, body) = match text.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        if body.is_empty() {
            return Err(ProbeError::Config(format!("'{s}' is not a valid range")));
        }

        let (start, end) = match body.split_once(':') {
            Some((start, end)) => {
                let start = match start {
                    "~" => f64::NEG_INFINITY,
                    "" => 0.0,
                    other => parse_bound(other, s)?,
                };
                let end = match end {
                    "" => f64::INFINITY,
                    other => parse_bound(other, s)?,
                };
                (start, end)
            }
            None => (0.0, parse_bound(body, s)?),
        };

        if start > end {
            return Err(ProbeError::Config(format!(
                "'{s}' is inverted: start {start} is greater than end {end}"
            )));
        }

        Ok(Self {
            start,
            end,
            inverted,
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }
        if self.start == 0.0 && self.end.is_finite() {
            return write!(f, "{}", self.end);
        }
        if self.start == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else {
            write!(f, "{}:", self.start)?;
        }
        if self.end.is_finite() {
            write!(f, "{}", self.end)?;
        }
        Ok(())
    }
}

/// Warning and critical ranges for one threshold context
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub warning: Range,
    pub critical: Range,
}

impl Threshold {
    /// Pair two ranges, rejecting a warning range wider than the critical one.
    ///
    /// Inverted ranges are not compared, since their accepted sets are not
    /// intervals.
    pub fn new(warning: Range, critical: Range) -> Result<Self> {
        if !warning.inverted && !critical.inverted && !critical.covers(&warning) {
            return Err(ProbeError::Config(format!(
                "warning range '{warning}' is not inside critical range '{critical}'"
            )));
        }
        Ok(Self { warning, critical })
    }

    pub fn classify(&self, value: f64) -> Severity {
        if !self.critical.accepts(value) {
            Severity::Critical
        } else if !self.warning.accepts(value) {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}

/// Thresholds for every context the check knows about
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub temperature: Threshold,
    pub humidity: Threshold,
}

impl Thresholds {
    pub fn for_context(&self, context: ThresholdContext) -> &Threshold {
        match context {
            ThresholdContext::Temperature => &self.temperature,
            ThresholdContext::Humidity => &self.humidity,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: Threshold {
                warning: Range::up_to(30.0),
                critical: Range::up_to(40.0),
            },
            humidity: Threshold {
                warning: Range::up_to(40.0),
                critical: Range::up_to(50.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> Range {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(range("30"), Range::up_to(30.0));
        assert_eq!(
            range("10:30"),
            Range { start: 10.0, end: 30.0, inverted: false }
        );
        assert_eq!(range("10:").end, f64::INFINITY);
        assert_eq!(range("~:30").start, f64::NEG_INFINITY);
        assert!(range("@10:30").inverted);
        assert_eq!(range(" -5.5:20 ").start, -5.5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "@", "abc", "10:x", "inf", "NaN:3", "30:10"] {
            let err = bad.parse::<Range>().unwrap_err();
            assert!(matches!(err, ProbeError::Config(_)), "{bad}: {err:?}");
        }
    }

    #[test]
    fn test_accepts_is_inclusive() {
        let r = range("10:30");
        assert!(r.accepts(10.0));
        assert!(r.accepts(30.0));
        assert!(!r.accepts(30.01));
        assert!(!r.accepts(9.99));

        let inv = range("@10:30");
        assert!(!inv.accepts(20.0));
        assert!(inv.accepts(31.0));
    }

    #[test]
    fn test_display_round_trips_canonical_text() {
        for text in ["30", "10:30", "10:", "~:30", "@10:30", "-5:2.5"] {
            assert_eq!(range(text).to_string(), text);
        }
    }

    #[test]
    fn test_classify_bands() {
        let t = Threshold::new(range("30"), range("40")).unwrap();
        assert_eq!(t.classify(25.0), Severity::Ok);
        assert_eq!(t.classify(30.0), Severity::Ok);
        assert_eq!(t.classify(35.0), Severity::Warning);
        assert_eq!(t.classify(40.0), Severity::Warning);
        assert_eq!(t.classify(40.5), Severity::Critical);
        assert_eq!(t.classify(-1.0), Severity::Critical);
    }

    #[test]
    fn test_warning_wider_than_critical_is_rejected() {
        let err = Threshold::new(range("40"), range("30")).unwrap_err();
        assert!(matches!(err, ProbeError::Config(_)));

        // inverted ranges are not compared
        assert!(Threshold::new(range("@0:5"), range("40")).is_ok());
    }

    #[test]
    fn test_defaults() {
        let t = Thresholds::default();
        assert_eq!(t.temperature.warning.to_string(), "30");
        assert_eq!(t.temperature.critical.to_string(), "40");
        assert_eq!(t.humidity.warning.to_string(), "40");
        assert_eq!(t.humidity.critical.to_string(), "50");
    }
}
