//! Parsers for the Linux `/proc` filesystem.

pub mod parser;

pub use parser::{CpuTimes, LoadAvg, MemInfo, ParseError};
