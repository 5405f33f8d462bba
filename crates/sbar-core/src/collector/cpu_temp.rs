//! CPU package temperature from `/sys/class/hwmon`.

use std::path::PathBuf;

use crate::collector::sysfs::{find_device, find_entry, is_indexed_attr, read_number};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};

pub struct CpuTempCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
    sensor: String,
    input: PathBuf,
}

impl<F: FileSystem> CpuTempCollector<F> {
    /// `sensor` is the hwmon `name` to look for, usually `coretemp` or `k10temp`.
    pub fn new(fs: F, sys_path: impl Into<PathBuf>, sensor: impl Into<String>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
            sensor: sensor.into(),
            input: PathBuf::new(),
        }
    }
}

impl<F: FileSystem> Collector for CpuTempCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        let base = self.sys_path.join("class/hwmon");
        let dir = find_device(&self.fs, &base, "name", &self.sensor)?;
        self.input = find_entry(&self.fs, &dir, |n| is_indexed_attr(n, "temp", "_input"))
            .ok_or_else(|| CollectError::NotFound("Failed to find temperature monitor".into()))?;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let millis = read_number(&self.fs, &self.input)?;
        if millis < 0 {
            return Err(CollectError::Parse("Failed to read temperature".into()));
        }

        let celsius = millis / 1000;
        let severity = if celsius < 75 {
            Severity::Normal
        } else if celsius < 100 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(format!("{} °C", celsius), severity))
    }
}
