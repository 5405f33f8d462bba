//! Mock filesystem used by collector tests.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
