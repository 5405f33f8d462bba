//! Free space on configured mount points.

use std::io;
use std::path::{Path, PathBuf};

use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::{format_magnitude, percent};

/// Capacity of one mounted filesystem, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsUsage {
    pub total: u64,
    pub available: u64,
}

/// Source of per-mount capacity numbers.
pub trait MountStats: Send {
    fn usage(&self, path: &Path) -> io::Result<FsUsage>;
}

/// `statvfs(3)` backed mount statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct Statvfs;

#[cfg(unix)]
impl MountStats for Statvfs {
    fn usage(&self, path: &Path) -> io::Result<FsUsage> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: `st` is plain old data that statvfs fills in, and `c_path`
        // is a valid NUL-terminated string for the duration of the call.
        let mut st: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut st) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }

        let frsize = st.f_frsize as u128;
        let total = (st.f_blocks as u128).saturating_mul(frsize);
        let available = (st.f_bavail as u128).saturating_mul(frsize);

        Ok(FsUsage {
            total: total.min(u64::MAX as u128) as u64,
            available: available.min(u64::MAX as u128) as u64,
        })
    }
}

#[cfg(not(unix))]
impl MountStats for Statvfs {
    fn usage(&self, _path: &Path) -> io::Result<FsUsage> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "statvfs is not available on this platform",
        ))
    }
}

/// One mount point to report, with the label shown in the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub path: PathBuf,
    pub name: String,
}

pub struct DiskCollector<S: MountStats> {
    stats: S,
    mounts: Vec<Mount>,
}

impl<S: MountStats> DiskCollector<S> {
    pub fn new(stats: S, mounts: Vec<Mount>) -> Self {
        Self { stats, mounts }
    }
}

fn classify(used_perc: u8) -> Severity {
    if used_perc >= 90 {
        Severity::Error
    } else if used_perc >= 75 {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

impl<S: MountStats> Collector for DiskCollector<S> {
    fn setup(&mut self) -> Result<(), CollectError> {
        if self.mounts.is_empty() {
            return Err(CollectError::NotFound("No filesystems configured".into()));
        }
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let mut parts = Vec::with_capacity(self.mounts.len());
        let mut severity = Severity::Normal;

        for mount in &self.mounts {
            let usage = self.stats.usage(&mount.path).map_err(|e| {
                CollectError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to get stats for {}: {}", mount.path.display(), e),
                ))
            })?;

            let used = usage.total.saturating_sub(usage.available);
            let used_perc = percent(used as i64, usage.total as i64);
            severity = severity.max(classify(used_perc));

            parts.push(format!(
                "{}: {}/{}",
                mount.name,
                format_magnitude(usage.available),
                format_magnitude(usage.total)
            ));
        }

        Ok(Reading::new(parts.join(", "), severity))
    }
}
