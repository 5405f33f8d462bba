//! Status sources for the bar.
//!
//! Each collector reads one kind of system state and turns it into a short
//! [`Reading`]. Collectors never touch the bar directly; the scheduler owns
//! them and publishes their readings into slots.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Collector (trait)                       │
//! │  battery  cpu_temp  fan  network   │  load  cpu_usage  ram   │
//! │         (/sys/class/*)             │      (/proc/*)          │
//! │                 └────────────┬─────┘                         │
//! │                       ┌──────▼──────┐                        │
//! │                       │  FileSystem │ (trait)                │
//! │                       └──────┬──────┘                        │
//! │  disk ── MountStats   volume ── Mixer   wifi ── EssidQuery   │
//! │  weather ── HttpFetch   time ── Clock   todo ── FileSystem   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//!              ┌─────────────────┼─────────────────┐
//!       ┌──────▼──────┐   ┌──────▼──────┐   ┌──────▼──────┐
//!       │   RealFs    │   │   MockFs    │   │  Scenarios  │
//!       │ (Linux)     │   │ (Testing)   │   │ (Fixtures)  │
//!       └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use sbar_core::collector::{Collector, LoadCollector, MockFs};
//!
//! let mut load = LoadCollector::new(MockFs::laptop(), "/proc");
//! load.setup().unwrap();
//! assert_eq!(load.collect().unwrap().text, "0.50, 0.60, 0.70");
//! ```

pub mod battery;
#[allow(clippy::module_inception)]
mod collector;
pub mod cpu_temp;
pub mod cpu_usage;
pub mod disk;
mod error;
pub mod fan;
pub mod load;
pub mod mock;
pub mod network;
pub mod procfs;
pub mod ram;
pub mod sysfs;
pub mod time;
pub mod todo;
pub mod traits;
pub mod volume;
pub mod weather;
pub mod wifi;

pub use battery::BatteryCollector;
pub use collector::{Collector, Reading, Severity};
pub use cpu_temp::CpuTempCollector;
pub use cpu_usage::CpuUsageCollector;
pub use disk::{DiskCollector, Mount, MountStats, Statvfs};
pub use error::CollectError;
pub use fan::FanCollector;
pub use load::LoadCollector;
pub use mock::MockFs;
pub use network::NetworkCollector;
pub use ram::RamCollector;
pub use time::{Clock, FixedClock, SystemClock, TimeCollector};
pub use todo::TodoCollector;
pub use traits::{FileSystem, RealFs};
pub use volume::{Amixer, Mixer, VolumeCollector};
pub use weather::{HttpClient, HttpFetch, WeatherCollector};
pub use wifi::{EssidQuery, Iwgetid, WifiCollector};
