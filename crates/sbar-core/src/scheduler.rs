//! One thread per collector: setup once, then collect and publish on an
//! interval until shutdown or the first failure.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, error};

use crate::collector::Collector;
use crate::registry::RoutineKind;
use crate::shutdown::ShutdownToken;
use crate::slot::Slot;

/// A slot paired with the collector that feeds it.
pub struct Routine {
    pub slot: Arc<Slot>,
    pub collector: Box<dyn Collector>,
}

/// Drives one collector on the calling thread.
///
/// Setup failure leaves the slot inactive; a collect failure deactivates it.
/// Either way the error is logged once and the loop ends for good.
pub fn run_routine(slot: &Slot, collector: &mut dyn Collector, shutdown: &ShutdownToken) {
    let name = slot.name();
    debug!("{} routine: starting, interval {:?}", name, slot.interval());

    if let Err(e) = collector.setup() {
        error!("{} routine: {}", name, e);
        return;
    }
    slot.activate();

    while !shutdown.is_triggered() {
        let start = Instant::now();

        match collector.collect() {
            Ok(reading) => slot.publish(reading),
            Err(e) => {
                error!("{} routine: {}", name, e);
                slot.deactivate();
                return;
            }
        }

        let remaining = slot.interval().saturating_sub(start.elapsed());
        if !shutdown.sleep(remaining) {
            break;
        }
    }

    debug!("{} routine: stopped", name);
}

/// Handles of every spawned collector thread.
#[derive(Default)]
pub struct Scheduler {
    handles: Vec<(RoutineKind, JoinHandle<()>)>,
}

impl Scheduler {
    /// Spawns a thread named `sbar-<kind>` per routine.
    pub fn spawn(routines: Vec<Routine>, shutdown: &ShutdownToken) -> Self {
        let mut handles = Vec::with_capacity(routines.len());

        for Routine {
            slot,
            mut collector,
        } in routines
        {
            let kind = slot.kind();
            let token = shutdown.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("sbar-{}", kind))
                .spawn(move || run_routine(&slot, collector.as_mut(), &token));

            match spawned {
                Ok(handle) => handles.push((kind, handle)),
                Err(e) => error!("{} routine: Failed to spawn thread: {}", kind.name(), e),
            }
        }

        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every collector thread to finish.
    pub fn join(self) {
        for (kind, handle) in self.handles {
            if handle.join().is_err() {
                error!("{} routine: thread panicked", kind.name());
            }
        }
    }
}
