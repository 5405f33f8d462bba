use std::io;
use std::path::PathBuf;

use crate::collector::procfs::ParseError;

/// Why a collector could not produce a reading.
///
/// Any of these ends the collector: the scheduler logs it once and the
/// collector's field disappears from the bar.
#[derive(Debug)]
pub enum CollectError {
    /// A source file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Other I/O failure (syscalls, process spawning).
    Io(io::Error),
    /// Source content did not have the expected shape.
    Parse(String),
    /// Device discovery found nothing usable.
    NotFound(String),
    /// An external command ran but reported failure.
    Command(String),
    /// HTTP request or response problem.
    Http(String),
    /// The collector is not available in this build or on this platform.
    Unsupported(String),
}

impl CollectError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectError::Read {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
            CollectError::NotFound(msg) => write!(f, "{}", msg),
            CollectError::Command(msg) => write!(f, "command failed: {}", msg),
            CollectError::Http(msg) => write!(f, "HTTP error: {}", msg),
            CollectError::Unsupported(msg) => write!(f, "unsupported: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Read { source, .. } => Some(source),
            CollectError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CollectError {
    fn from(e: io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_read_error_names_path() {
        let err = CollectError::read(
            "/sys/class/power_supply/BAT0/charge_now",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to read /sys/class/power_supply/BAT0/charge_now: gone"
        );
    }

    #[test]
    fn test_from_parse_error() {
        let err: CollectError = ParseError::new("invalid load1").into();
        assert_eq!(err.to_string(), "parse error: invalid load1");
    }
}
