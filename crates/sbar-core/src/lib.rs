//! sbar-core: building blocks of the sbar status line daemon.
//!
//! Provides:
//! - `collector`: status sources (battery, load, network, clock, ...)
//! - `registry`: routine kinds and the factory building their collectors
//! - `slot`: per-routine latest reading shared with the renderer
//! - `routine_list`: the fixed left-to-right layout of the bar
//! - `scheduler`: one thread per collector with interval pacing
//! - `aggregator`: the once-per-second render loop
//! - `display`: X root window title and stdout surfaces
//! - `config`: TOML configuration with built-in defaults
//! - `fmt`: shared formatting helpers (magnitudes, percentages)
//!
//! With `weather` feature (default):
//! - HTTP-backed forecast collector (`reqwest`, `serde_json`)

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod display;
pub mod fmt;
pub mod registry;
pub mod routine_list;
pub mod scheduler;
pub mod shutdown;
pub mod slot;

pub use aggregator::Aggregator;
pub use config::{Config, ConfigError};
pub use display::{Display, DisplayError, RootWindowTitle, StdoutLine};
pub use registry::{CollectorFactory, RoutineKind, SystemFactory};
pub use routine_list::{Entry, RoutineList};
pub use scheduler::{Routine, Scheduler};
pub use shutdown::ShutdownToken;
pub use slot::Slot;
