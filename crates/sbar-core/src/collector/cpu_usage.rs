//! Aggregate CPU utilization from `/proc/stat`.

use std::path::{Path, PathBuf};

use crate::collector::procfs::parser::parse_cpu_times;
use crate::collector::procfs::CpuTimes;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::percent;

/// Busy share of CPU time since the previous reading.
pub struct CpuUsageCollector<F: FileSystem> {
    fs: F,
    stat_path: PathBuf,
    previous: CpuTimes,
}

impl<F: FileSystem> CpuUsageCollector<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            stat_path: proc_path.as_ref().join("stat"),
            previous: CpuTimes::default(),
        }
    }

    fn read_times(&self) -> Result<CpuTimes, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.stat_path)
            .map_err(|e| CollectError::read(&self.stat_path, e))?;
        Ok(parse_cpu_times(&content)?)
    }
}

/// Busy percentage between two samples; 0 if no time has passed.
pub fn usage_between(old: &CpuTimes, new: &CpuTimes) -> u8 {
    let busy = new.busy().saturating_sub(old.busy());
    let total = new.total().saturating_sub(old.total());
    percent(busy as i64, total as i64)
}

impl<F: FileSystem> Collector for CpuUsageCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        self.previous = self.read_times()?;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let current = self.read_times()?;
        let perc = usage_between(&self.previous, &current);
        self.previous = current;

        let severity = if perc < 75 {
            Severity::Normal
        } else if perc < 90 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(format!("{:>2}% CPU", perc), severity))
    }
}
