//! The render loop: combines every active slot into one line per tick.

use std::time::{Duration, Instant};

use tracing::{trace, warn};

use crate::config::Config;
use crate::display::{Display, DisplayError};
use crate::routine_list::{Entry, RoutineList};
use crate::shutdown::ShutdownToken;

pub struct Aggregator<D: Display> {
    list: RoutineList,
    display: D,
    color_text: bool,
    max_length: usize,
    period: Duration,
}

impl<D: Display> Aggregator<D> {
    pub fn new(list: RoutineList, display: D, config: &Config) -> Self {
        Self {
            list,
            display,
            color_text: config.color_text,
            max_length: config.max_length,
            period: config.render_interval(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Builds the current line.
    ///
    /// Fields look like `[text]`, or `[^c#RRGGBB^text^d^]` with color markup.
    /// Neighbouring fields are separated by one space; delimiters are pasted
    /// in as-is. Inactive and empty slots are left out. The walk stops at the
    /// first piece that would exceed `max_length`.
    pub fn render(&self) -> String {
        let mut line = String::new();
        let mut piece = String::new();
        let mut after_field = false;

        for entry in self.list.entries() {
            piece.clear();

            match entry {
                Entry::Delimiter(glyph) => {
                    piece.push_str(glyph);
                }
                Entry::Routine(slot) => {
                    if !slot.is_active() {
                        continue;
                    }
                    let written = slot.with_fragment(|fragment, severity| {
                        if fragment.is_empty() {
                            return false;
                        }
                        if after_field {
                            piece.push(' ');
                        }
                        piece.push('[');
                        if self.color_text {
                            piece.push_str("^c");
                            piece.push_str(slot.color(severity));
                            piece.push('^');
                        }
                        piece.push_str(fragment);
                        if self.color_text {
                            piece.push_str("^d^");
                        }
                        piece.push(']');
                        true
                    });
                    if !written {
                        continue;
                    }
                }
            }

            if line.len() + piece.len() > self.max_length {
                warn!("Print: Exceeded max output length");
                break;
            }
            line.push_str(&piece);
            after_field = matches!(entry, Entry::Routine(_));
        }

        line
    }

    /// Renders and publishes once per period until shutdown.
    ///
    /// A display failure ends the loop and is returned.
    pub fn run(&mut self, shutdown: &ShutdownToken) -> Result<(), DisplayError> {
        while !shutdown.is_triggered() {
            let start = Instant::now();

            let line = self.render();
            trace!("render: {} bytes", line.len());
            self.display.set_title(&line)?;

            if !shutdown.sleep(self.period.saturating_sub(start.elapsed())) {
                break;
            }
        }
        Ok(())
    }
}
