//! SSID of the wireless link.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::collector::procfs::parser::parse_wireless_interfaces;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};

pub const NOT_CONNECTED: &str = "Not Connected";

/// Looks up the ESSID an interface is associated with.
pub trait EssidQuery: Send {
    /// `Ok(None)` when the interface is not associated.
    fn essid(&mut self, interface: &str) -> Result<Option<String>, CollectError>;
}

/// Queries the ESSID through `iwgetid <iface> --raw`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Iwgetid;

impl EssidQuery for Iwgetid {
    fn essid(&mut self, interface: &str) -> Result<Option<String>, CollectError> {
        let output = Command::new("iwgetid")
            .args([interface, "--raw"])
            .output()?;

        // iwgetid exits non-zero when the interface has no association.
        if !output.status.success() {
            return Ok(None);
        }

        let essid = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!essid.is_empty()).then_some(essid))
    }
}

pub struct WifiCollector<F: FileSystem, Q: EssidQuery> {
    fs: F,
    wireless_path: PathBuf,
    query: Q,
    interface: Option<String>,
}

impl<F: FileSystem, Q: EssidQuery> WifiCollector<F, Q> {
    /// `interface` pins a device; `None` takes the first one listed in
    /// `<proc>/net/wireless`.
    pub fn new(fs: F, proc_path: impl AsRef<Path>, query: Q, interface: Option<String>) -> Self {
        Self {
            fs,
            wireless_path: proc_path.as_ref().join("net/wireless"),
            query,
            interface,
        }
    }
}

impl<F: FileSystem, Q: EssidQuery> Collector for WifiCollector<F, Q> {
    fn setup(&mut self) -> Result<(), CollectError> {
        if self.interface.is_none() {
            let content = self
                .fs
                .read_to_string(&self.wireless_path)
                .map_err(|e| CollectError::read(&self.wireless_path, e))?;
            self.interface = parse_wireless_interfaces(&content).into_iter().next();
        }

        let Some(interface) = &self.interface else {
            return Err(CollectError::NotFound(
                "No wireless interfaces found".into(),
            ));
        };

        // Make sure the query tool works before entering the loop.
        self.query.essid(interface)?;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let interface = self
            .interface
            .as_deref()
            .ok_or_else(|| CollectError::NotFound("No wireless interfaces found".into()))?;

        Ok(match self.query.essid(interface)? {
            Some(essid) => Reading::new(essid, Severity::Normal),
            None => Reading::new(NOT_CONNECTED, Severity::Warning),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[derive(Default)]
    struct FakeQuery {
        essid: Option<String>,
        asked: Vec<String>,
    }

    impl EssidQuery for FakeQuery {
        fn essid(&mut self, interface: &str) -> Result<Option<String>, CollectError> {
            self.asked.push(interface.to_string());
            Ok(self.essid.clone())
        }
    }

    #[test]
    fn test_wifi_connected() {
        let query = FakeQuery {
            essid: Some("HomeNet".into()),
            ..Default::default()
        };
        let mut c = WifiCollector::new(MockFs::laptop(), "/proc", query, None);
        c.setup().unwrap();

        let r = c.collect().unwrap();
        assert_eq!(r.text, "HomeNet");
        assert_eq!(r.severity, Severity::Normal);
        assert_eq!(c.query.asked, ["wlan0", "wlan0"]);
    }

    #[test]
    fn test_wifi_not_connected() {
        let mut c = WifiCollector::new(MockFs::laptop(), "/proc", FakeQuery::default(), None);
        c.setup().unwrap();

        let r = c.collect().unwrap();
        assert_eq!(r.text, NOT_CONNECTED);
        assert_eq!(r.severity, Severity::Warning);
    }

    #[test]
    fn test_wifi_no_wireless_interfaces() {
        let fs = MockFs::new();
        fs.add_file("/proc/net/wireless", "header\nheader\n");
        let mut c = WifiCollector::new(fs, "/proc", FakeQuery::default(), None);
        assert!(matches!(c.setup(), Err(CollectError::NotFound(_))));

        let mut c = WifiCollector::new(MockFs::headless(), "/proc", FakeQuery::default(), None);
        assert!(matches!(c.setup(), Err(CollectError::Read { .. })));
    }

    #[test]
    fn test_wifi_pinned_interface_skips_discovery() {
        let mut c = WifiCollector::new(
            MockFs::headless(),
            "/proc",
            FakeQuery::default(),
            Some("wlp3s0".into()),
        );
        c.setup().unwrap();
        c.collect().unwrap();
        assert_eq!(c.query.asked, ["wlp3s0", "wlp3s0"]);
    }
}
