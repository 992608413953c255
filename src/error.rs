use thiserror::Error;

use crate::domain::fault::DeviceFault;

/// Everything that can end a check before a threshold evaluation is made.
///
/// Every variant is terminal for the invocation; the reporter maps each one
/// to a severity and a message.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Serial port could not be opened, or the line could not be read
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Line is not a well-formed telemetry record
    #[error("invalid telemetry: {0}")]
    Decode(String),

    /// Sensor firmware answered, but reported a nonzero status code
    #[error("{0}")]
    DeviceFault(DeviceFault),

    /// Threshold or argument rejected before any I/O
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ProbeError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
