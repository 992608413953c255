//! Telemetry record domain entity
//!
//! One record is decoded from one line of sensor output. It knows nothing
//! about how the line was framed or which port it came from.

/// Which threshold pair a measurement is checked against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdContext {
    Temperature,
    Humidity,
}

/// The measurements a sensor board can report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasurementKind {
    /// Air temperature from the DHT22/AM2302
    Temperature,
    /// Temperature of the microcontroller itself
    Onboard,
    /// Relative humidity from the DHT22/AM2302
    Humidity,
}

impl MeasurementKind {
    /// Field name on the wire and label in the report
    pub const fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Onboard => "onboard",
            MeasurementKind::Humidity => "humidity",
        }
    }

    /// Unit shown in the summary
    pub const fn unit(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature | MeasurementKind::Onboard => "°C",
            MeasurementKind::Humidity => "%",
        }
    }

    /// Unit of measure in performance data (temperatures carry none)
    pub const fn perfdata_uom(&self) -> &'static str {
        match self {
            MeasurementKind::Temperature | MeasurementKind::Onboard => "",
            MeasurementKind::Humidity => "%",
        }
    }

    /// Physically possible values, if bounded
    pub const fn valid_range(&self) -> Option<(f64, f64)> {
        match self {
            MeasurementKind::Humidity => Some((0.0, 100.0)),
            MeasurementKind::Temperature | MeasurementKind::Onboard => None,
        }
    }

    pub const fn context(&self) -> ThresholdContext {
        match self {
            MeasurementKind::Temperature | MeasurementKind::Onboard => {
                ThresholdContext::Temperature
            }
            MeasurementKind::Humidity => ThresholdContext::Humidity,
        }
    }
}

/// A named value with its unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub kind: MeasurementKind,
    pub value: f64,
}

impl Measurement {
    pub const fn new(kind: MeasurementKind, value: f64) -> Self {
        Self { kind, value }
    }
}

/// A decoded telemetry line.
///
/// Older firmware only sends the microcontroller temperature; current
/// firmware sends every field including a status code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Record {
    Onboard {
        onboard: f64,
    },
    Full {
        temperature: f64,
        onboard: f64,
        humidity: f64,
        error: i64,
    },
}

impl Record {
    /// Device status code, 0 when the board reports no error
    pub const fn error_code(&self) -> i64 {
        match self {
            Record::Onboard { .. } => 0,
            Record::Full { error, .. } => *error,
        }
    }

    /// Measurements in report order
    pub fn measurements(&self) -> Vec<Measurement> {
        match *self {
            Record::Onboard { onboard } => {
                vec![Measurement::new(MeasurementKind::Onboard, onboard)]
            }
            Record::Full {
                temperature,
                onboard,
                humidity,
                ..
            } => vec![
                Measurement::new(MeasurementKind::Temperature, temperature),
                Measurement::new(MeasurementKind::Onboard, onboard),
                Measurement::new(MeasurementKind::Humidity, humidity),
            ],
        }
    }
}
