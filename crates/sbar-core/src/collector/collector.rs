//! The [`Collector`] contract every status source implements.

use crate::collector::CollectError;

/// Classification of the latest reading; picks the field's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Error,
}

/// One formatted fragment plus its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub text: String,
    pub severity: Severity,
}

impl Reading {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// A periodic source of one status field.
///
/// The scheduler calls [`setup`](Collector::setup) once on the collector's own
/// thread, then [`collect`](Collector::collect) every interval. Any error ends
/// the collector for the rest of the process lifetime.
pub trait Collector: Send {
    /// Discovers devices and primes counters. Defaults to a no-op.
    fn setup(&mut self) -> Result<(), CollectError> {
        Ok(())
    }

    /// Produces the current reading.
    fn collect(&mut self) -> Result<Reading, CollectError>;
}
