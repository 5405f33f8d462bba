//! Master playback volume.

use std::process::Command;

use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::{normalize_percent, round_to_ten};

/// Playback state of one mixer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerState {
    pub percent: u8,
    pub muted: bool,
}

/// Audio mixer query.
pub trait Mixer: Send {
    fn state(&mut self) -> Result<MixerState, CollectError>;
}

/// Queries ALSA through `amixer get <control>`.
#[derive(Debug, Clone)]
pub struct Amixer {
    card: Option<String>,
    control: String,
}

impl Amixer {
    pub fn new(card: Option<String>, control: impl Into<String>) -> Self {
        Self {
            card,
            control: control.into(),
        }
    }
}

impl Mixer for Amixer {
    fn state(&mut self) -> Result<MixerState, CollectError> {
        let mut cmd = Command::new("amixer");
        if let Some(card) = &self.card {
            cmd.args(["-c", card]);
        }
        let output = cmd.args(["get", &self.control]).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectError::Command(format!(
                "amixer get {}: {}",
                self.control,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_amixer(&stdout).ok_or_else(|| {
            CollectError::Parse(format!(
                "Element {} does not have playback volume",
                self.control
            ))
        })
    }
}

/// Extracts the first channel's `[NN%]` and `[on]/[off]` from `amixer get`.
pub fn parse_amixer(output: &str) -> Option<MixerState> {
    for line in output.lines() {
        if !line.contains("Playback") {
            continue;
        }

        let mut percent = None;
        let mut muted = false;
        for field in line.split('[').skip(1) {
            let Some(value) = field.split(']').next() else {
                continue;
            };
            if let Some(num) = value.strip_suffix('%') {
                percent = num.parse::<i64>().ok();
            } else if value == "off" {
                muted = true;
            }
        }

        if let Some(p) = percent {
            return Some(MixerState {
                percent: normalize_percent(p),
                muted,
            });
        }
    }
    None
}

pub struct VolumeCollector<M: Mixer> {
    mixer: M,
}

impl<M: Mixer> VolumeCollector<M> {
    pub fn new(mixer: M) -> Self {
        Self { mixer }
    }
}

impl<M: Mixer> Collector for VolumeCollector<M> {
    fn setup(&mut self) -> Result<(), CollectError> {
        self.mixer.state().map(|_| ())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let state = self.mixer.state()?;
        if state.muted {
            return Ok(Reading::new("mute", Severity::Normal));
        }

        let perc = round_to_ten(state.percent);
        let severity = if perc < 80 {
            Severity::Normal
        } else if perc < 100 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(format!("Vol {}%", perc), severity))
    }
}
