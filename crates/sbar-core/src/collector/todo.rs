//! Preview of the top of a plain-text to-do list.

use std::path::PathBuf;

use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};

/// Shown when the list has no tasks.
pub const NO_TASKS: &str = "Finished";

const BLANKS: [char; 2] = [' ', '\t'];

/// Summarizes the first two lines of a to-do file.
///
/// - no first task: [`NO_TASKS`]
/// - no second task: the first task alone
/// - indented second task (a subtask): `"first -> second"`
/// - otherwise (a sibling task): `"first | second"`
pub fn format_todo(content: &str) -> String {
    let mut lines = content.lines();

    let first = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim(),
        _ => return NO_TASKS.to_string(),
    };

    match lines.next() {
        Some(second) if !second.trim().is_empty() => {
            let separator = if second.starts_with(BLANKS) {
                " -> "
            } else {
                " | "
            };
            format!("{}{}{}", first, separator, second.trim())
        }
        _ => first.to_string(),
    }
}

pub struct TodoCollector<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> TodoCollector<F> {
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl<F: FileSystem> Collector for TodoCollector<F> {
    fn collect(&mut self) -> Result<Reading, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| CollectError::read(&self.path, e))?;
        Ok(Reading::new(format_todo(&content), Severity::Normal))
    }
}
