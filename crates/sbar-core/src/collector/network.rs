//! Upload/download throughput of the active network interface.

use std::path::PathBuf;
use std::time::Duration;

use crate::collector::sysfs::read_number;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::{scale_magnitude, unit_rank};

/// `ARPHRD_LOOPBACK` as reported in `/sys/class/net/<iface>/type`.
const LOOPBACK_TYPE: &str = "772";

#[derive(Debug, Default)]
struct Counter {
    path: PathBuf,
    last: u64,
}

pub struct NetworkCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
    interface: Option<String>,
    interval: Duration,
    tx: Counter,
    rx: Counter,
}

impl<F: FileSystem> NetworkCollector<F> {
    /// `interface` pins a device name; `None` picks the first running
    /// non-loopback interface. Rates are per second over `interval`.
    pub fn new(
        fs: F,
        sys_path: impl Into<PathBuf>,
        interface: Option<String>,
        interval: Duration,
    ) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
            interface,
            interval,
            tx: Counter::default(),
            rx: Counter::default(),
        }
    }

    fn find_interface(&self) -> Result<PathBuf, CollectError> {
        let base = self.sys_path.join("class/net");
        if let Some(name) = &self.interface {
            let dir = base.join(name);
            if !self.fs.exists(&dir) {
                return Err(CollectError::NotFound(format!(
                    "Interface {} not found",
                    name
                )));
            }
            return Ok(dir);
        }

        let entries = self
            .fs
            .read_dir(&base)
            .map_err(|e| CollectError::read(&base, e))?;

        entries
            .into_iter()
            .find(|dir| {
                let up = self
                    .fs
                    .read_attr(&dir.join("operstate"))
                    .is_ok_and(|s| s == "up");
                let loopback = self
                    .fs
                    .read_attr(&dir.join("type"))
                    .is_ok_and(|s| s == LOOPBACK_TYPE);
                up && !loopback
            })
            .ok_or_else(|| CollectError::NotFound("No active network interfaces found".into()))
    }

    fn read_counter(&self, counter: &Counter) -> Result<u64, CollectError> {
        let value = read_number(&self.fs, &counter.path)?;
        u64::try_from(value)
            .map_err(|_| CollectError::Parse(format!("negative byte counter {}", value)))
    }

    fn per_second(&self, delta: u64) -> u64 {
        let secs = self.interval.as_secs_f64().max(1.0);
        (delta as f64 / secs) as u64
    }
}

/// `(value, unit)` truncated to an integer for the fixed-width fragment.
fn scaled(rate: u64) -> (u64, char) {
    let (value, unit) = scale_magnitude(rate);
    (value.trunc() as u64, unit)
}

fn classify(unit: char) -> Severity {
    match unit_rank(unit) {
        0 | 1 => Severity::Normal,
        2 => Severity::Warning,
        _ => Severity::Error,
    }
}

impl<F: FileSystem> Collector for NetworkCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        let dir = self.find_interface()?;
        let stats = dir.join("statistics");
        self.tx.path = stats.join("tx_bytes");
        self.rx.path = stats.join("rx_bytes");

        // Prime the counters so the first reading is a real rate.
        self.tx.last = self.read_counter(&self.tx)?;
        self.rx.last = self.read_counter(&self.rx)?;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let tx_now = self.read_counter(&self.tx)?;
        let rx_now = self.read_counter(&self.rx)?;

        let up = self.per_second(tx_now.saturating_sub(self.tx.last));
        let down = self.per_second(rx_now.saturating_sub(self.rx.last));
        self.tx.last = tx_now;
        self.rx.last = rx_now;

        let (up_value, up_unit) = scaled(up);
        let (down_value, down_unit) = scaled(down);
        let severity = classify(up_unit).max(classify(down_unit));

        Ok(Reading::new(
            format!(
                "{:>3}{} up/{:>3}{} down",
                up_value, up_unit, down_value, down_unit
            ),
            severity,
        ))
    }
}
