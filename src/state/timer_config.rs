//! Timer configuration and the notification tone palette

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimerError};

/// Longest countdown a timer may be configured with (300 minutes)
pub const MAX_DURATION_SECONDS: f64 = 300.0 * 60.0;

/// Notification tones a timer can be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Tone {
    A4,
    C5,
    E5,
    G5,
    A5,
    C6,
    D6,
    E6,
}

impl Tone {
    /// The full palette, lowest note first
    pub const ALL: [Tone; 8] = [
        Tone::A4,
        Tone::C5,
        Tone::E5,
        Tone::G5,
        Tone::A5,
        Tone::C6,
        Tone::D6,
        Tone::E6,
    ];

    pub fn frequency_hz(self) -> u32 {
        match self {
            Tone::A4 => 440,
            Tone::C5 => 523,
            Tone::E5 => 659,
            Tone::G5 => 783,
            Tone::A5 => 880,
            Tone::C6 => 1047,
            Tone::D6 => 1175,
            Tone::E6 => 1319,
        }
    }

    pub fn note_name(self) -> &'static str {
        match self {
            Tone::A4 => "A4",
            Tone::C5 => "C5",
            Tone::E5 => "E5",
            Tone::G5 => "G5",
            Tone::A5 => "A5",
            Tone::C6 => "C6",
            Tone::D6 => "D6",
            Tone::E6 => "E6",
        }
    }

    /// Look up a palette tone by its frequency
    pub fn from_hz(hz: u32) -> Result<Self> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.frequency_hz() == hz)
            .ok_or(TimerError::UnknownTone { hz })
    }
}

impl TryFrom<u32> for Tone {
    type Error = TimerError;

    fn try_from(hz: u32) -> Result<Self> {
        Tone::from_hz(hz)
    }
}

impl From<Tone> for u32 {
    fn from(tone: Tone) -> u32 {
        tone.frequency_hz()
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}Hz)", self.note_name(), self.frequency_hz())
    }
}

/// User-editable settings of one timer slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub name: String,
    pub duration_seconds: f64,
    pub tone: Tone,
}

impl TimerConfig {
    pub fn new(name: impl Into<String>, duration_seconds: f64, tone: Tone) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
            tone,
        }
    }

    /// Build a config from a duration in minutes, the unit the timers are edited in
    pub fn from_minutes(name: impl Into<String>, minutes: f64, tone: Tone) -> Self {
        Self::new(name, minutes * 60.0, tone)
    }

    /// Check the name and duration without touching any timer
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TimerError::InvalidName);
        }
        validate_duration(self.duration_seconds)
    }

    pub fn minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

pub(crate) fn validate_duration(seconds: f64) -> Result<()> {
    if seconds.is_finite() && seconds > 0.0 && seconds <= MAX_DURATION_SECONDS {
        Ok(())
    } else {
        Err(TimerError::InvalidDuration {
            seconds,
            max: MAX_DURATION_SECONDS,
        })
    }
}
