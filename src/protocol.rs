//! Wire format of the sensor board's telemetry line
//!
//! The board prints one JSON object per line over its USB serial port.
//! Two shapes exist in the field:
//!
//! ```text
//! {"onboard": 24.3}
//! {"temperature": 21.8, "onboard": 24.3, "humidity": 48.1, "error": 0}
//! ```
//!
//! The first comes from older firmware that only reads the
//! microcontroller's own temperature sensor. Once any of the DHT fields
//! appear, all four are required.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::domain::{MeasurementKind, Record};
use crate::error::{ProbeError, Result};

/// Longest line accepted from the device, terminator excluded
pub const MAX_LINE_LEN: usize = 4096;

/// Raw shape of a telemetry line before field validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryLine {
    pub temperature: Option<f64>,
    pub onboard: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "status_code")]
    pub error: Option<i64>,
}

/// Status codes are integers, but some firmware prints them as `5.0`
fn status_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let integral = |v: &f64| v.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(v);
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(integral).map(|v| v as i64))
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("status code {number} is not an integer")))
}

impl TelemetryLine {
    /// Parse one line. Unknown keys are ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ProbeError::Decode("empty line".to_string()));
        }

        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(ProbeError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        Ok(serde_json::from_value(value)?)
    }

    fn is_full(&self) -> bool {
        self.temperature.is_some() || self.humidity.is_some() || self.error.is_some()
    }

    /// Check required fields and valid ranges, producing a domain record
    pub fn into_record(self) -> Result<Record> {
        let record = if self.is_full() {
            match (self.temperature, self.onboard, self.humidity, self.error) {
                (Some(temperature), Some(onboard), Some(humidity), Some(error)) => {
                    Record::Full {
                        temperature,
                        onboard,
                        humidity,
                        error,
                    }
                }
                _ => {
                    let missing: Vec<&str> = [
                        ("temperature", self.temperature.is_none()),
                        ("onboard", self.onboard.is_none()),
                        ("humidity", self.humidity.is_none()),
                        ("error", self.error.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    return Err(ProbeError::Decode(format!(
                        "missing field(s): {}",
                        missing.join(", ")
                    )));
                }
            }
        } else {
            let onboard = self
                .onboard
                .ok_or_else(|| ProbeError::Decode("missing field(s): onboard".to_string()))?;
            Record::Onboard { onboard }
        };

        for measurement in record.measurements() {
            if let Some((min, max)) = measurement.kind.valid_range() {
                if !(min..=max).contains(&measurement.value) {
                    return Err(out_of_range(measurement.kind, measurement.value, min, max));
                }
            }
        }

        Ok(record)
    }
}

fn out_of_range(kind: MeasurementKind, value: f64, min: f64, max: f64) -> ProbeError {
    ProbeError::Decode(format!(
        "{} value {value}{} is outside the valid range {min}..{max}",
        kind.as_str(),
        kind.unit()
    ))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Decode one raw line into a validated record
pub fn decode(bytes: &[u8]) -> Result<Record> {
    TelemetryLine::parse(bytes)?.into_record()
}
