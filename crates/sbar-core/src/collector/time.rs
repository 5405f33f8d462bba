//! Wall clock with a blinking colon.

use std::fmt::Write;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use crate::collector::{CollectError, Collector, Reading, Severity};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant; used by tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Builds a clock at `hour:minute` on 2024-01-01 local time.
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(2024, 1, 1, hour, minute, 0)
            .single()
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Formats the clock with a strftime pattern; every other frame hides the
/// first `:` to show the bar is alive.
///
/// The blink follows the routine's own ticks, so it is once per second only
/// with a 1 s interval; a 60 s interval toggles the colon once a minute.
pub struct TimeCollector {
    format: String,
    clock: Arc<dyn Clock>,
    blink: bool,
}

impl TimeCollector {
    pub fn new(format: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            format: format.into(),
            clock,
            blink: true,
        }
    }
}

/// Replaces the first `:` with a space.
fn blink_colon(text: &mut String) {
    if let Some(idx) = text.find(':') {
        text.replace_range(idx..idx + 1, " ");
    }
}

impl TimeCollector {
    fn render(&self) -> Result<String, CollectError> {
        // chrono reports bad specifiers as a fmt::Error at display time.
        let mut text = String::new();
        write!(text, "{}", self.clock.now().format(&self.format)).map_err(|_| {
            CollectError::Parse(format!("invalid time format {:?}", self.format))
        })?;
        Ok(text)
    }
}

impl Collector for TimeCollector {
    fn setup(&mut self) -> Result<(), CollectError> {
        self.render().map(|_| ())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        self.blink = !self.blink;

        let mut text = self.render()?;
        if self.blink {
            blink_colon(&mut text);
        }

        Ok(Reading::new(text, Severity::Normal))
    }
}
