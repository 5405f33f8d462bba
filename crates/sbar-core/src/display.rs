//! Where the rendered line goes.

use std::fmt;
use std::io::{self, Write};
use std::process::Command;

#[derive(Debug)]
pub enum DisplayError {
    Io(io::Error),
    /// The title setter ran but reported failure.
    Command(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Io(e) => write!(f, "Failed to write status: {}", e),
            DisplayError::Command(msg) => write!(f, "Failed to set root window title: {}", msg),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DisplayError::Io(e) => Some(e),
            DisplayError::Command(_) => None,
        }
    }
}

impl From<io::Error> for DisplayError {
    fn from(e: io::Error) -> Self {
        DisplayError::Io(e)
    }
}

/// A surface showing one line of status text.
pub trait Display {
    fn set_title(&mut self, line: &str) -> Result<(), DisplayError>;
}

/// Sets the X root window name, which dwm-style bars display.
#[derive(Debug, Default, Clone, Copy)]
pub struct RootWindowTitle;

impl Display for RootWindowTitle {
    fn set_title(&mut self, line: &str) -> Result<(), DisplayError> {
        let output = Command::new("xsetroot").args(["-name", line]).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DisplayError::Command(format!(
                "xsetroot exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Writes each line followed by a newline, for bars reading a pipe.
#[derive(Debug)]
pub struct StdoutLine<W: Write = io::Stdout> {
    out: W,
}

impl StdoutLine {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutLine {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutLine<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for StdoutLine<W> {
    fn set_title(&mut self, line: &str) -> Result<(), DisplayError> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}
