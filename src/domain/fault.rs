//! Device-reported faults
//!
//! The sensor board reports failures of its own (bus timeouts, checksum
//! errors, missing sensor) as POSIX errno values in the `error` field.
//! Names and descriptions come from the host's errno table.

use core::fmt;

/// Nonzero status code reported by the sensor firmware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceFault {
    pub code: i64,
}

impl DeviceFault {
    /// `None` for the "no error" code 0
    pub fn from_code(code: i64) -> Option<Self> {
        (code != 0).then_some(Self { code })
    }

    /// Symbolic errno name from the system table, e.g. `EIO`
    #[cfg(unix)]
    pub fn name(&self) -> Option<String> {
        match self.errno()? {
            nix::errno::Errno::UnknownErrno => None,
            errno => Some(format!("{errno:?}")),
        }
    }

    #[cfg(not(unix))]
    pub fn name(&self) -> Option<String> {
        None
    }

    /// Human-readable description of the code
    #[cfg(unix)]
    pub fn description(&self) -> String {
        match self.errno() {
            Some(errno) if errno != nix::errno::Errno::UnknownErrno => errno.desc().to_string(),
            _ => "unknown error".to_string(),
        }
    }

    #[cfg(not(unix))]
    pub fn description(&self) -> String {
        match i32::try_from(self.code) {
            Ok(raw) => std::io::Error::from_raw_os_error(raw).to_string(),
            Err(_) => "unknown error".to_string(),
        }
    }

    #[cfg(unix)]
    fn errno(&self) -> Option<nix::errno::Errno> {
        i32::try_from(self.code)
            .ok()
            .map(nix::errno::Errno::from_raw)
    }
}

impl fmt::Display for DeviceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connection to sensor board successful, but device reports error {} (",
            self.code
        )?;
        if let Some(name) = self.name() {
            write!(f, "{name}: ")?;
        }
        write!(f, "{})", self.description())?;
        f.write_str("\nPlease ensure all header pins are securely connected!")
    }
}
