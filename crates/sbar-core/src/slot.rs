//! Per-routine shared state between one collector thread and the renderer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::collector::{Reading, Severity};
use crate::config::Colors;
use crate::fmt::truncate_to_boundary;
use crate::registry::RoutineKind;

/// Upper bound of a published fragment in bytes.
pub const MAX_FRAGMENT_LEN: usize = 256;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SlotState {
    fragment: String,
    severity: Severity,
}

/// The latest reading of one routine.
///
/// Only the owning collector thread writes; the renderer reads. The fragment
/// and its severity always change together under the slot's lock.
#[derive(Debug)]
pub struct Slot {
    kind: RoutineKind,
    interval: Duration,
    colors: Colors,
    state: Mutex<SlotState>,
    active: AtomicBool,
}

impl Slot {
    pub fn new(kind: RoutineKind, interval: Duration, colors: Colors) -> Self {
        Self {
            kind,
            interval,
            colors,
            state: Mutex::new(SlotState::default()),
            active: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> RoutineKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    /// Color for a severity.
    pub fn color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Normal => &self.colors.normal,
            Severity::Warning => &self.colors.warning,
            Severity::Error => &self.colors.error,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Permanently hides the slot; collectors never come back.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // A panicking writer can only leave behind a complete String.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces the fragment and severity, truncating long text.
    pub fn publish(&self, reading: Reading) {
        let Reading {
            mut text,
            severity,
        } = reading;
        truncate_to_boundary(&mut text, MAX_FRAGMENT_LEN);

        let mut state = self.lock();
        state.fragment = text;
        state.severity = severity;
    }

    /// Copy of the current fragment and severity.
    pub fn read(&self) -> (String, Severity) {
        let state = self.lock();
        (state.fragment.clone(), state.severity)
    }

    /// Runs `f` on the current fragment without copying it.
    pub fn with_fragment<R>(&self, f: impl FnOnce(&str, Severity) -> R) -> R {
        let state = self.lock();
        f(&state.fragment, state.severity)
    }
}
