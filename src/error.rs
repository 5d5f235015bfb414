//! Error types for timer and tone operations

use thiserror::Error;

/// Errors returned by the timer registry and the tone synthesizer.
///
/// Every variant is recoverable: a failed call leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    #[error("unknown timer {index}")]
    UnknownTimer { index: usize },

    #[error("invalid duration {seconds}s: must be positive, finite and at most {max}s")]
    InvalidDuration { seconds: f64, max: f64 },

    #[error("timer name must not be empty")]
    InvalidName,

    #[error("unknown tone {hz}Hz")]
    UnknownTone { hz: u32 },

    #[error("invalid timer count {count}: must be between 1 and {max}")]
    InvalidTimerCount { count: usize, max: usize },

    #[error("synthesis unavailable: {reason}")]
    SynthesisUnavailable { reason: String },
}

impl TimerError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TimerError::UnknownTimer { .. } => "unknown_timer",
            TimerError::InvalidDuration { .. } => "invalid_duration",
            TimerError::InvalidName => "invalid_name",
            TimerError::UnknownTone { .. } => "unknown_tone",
            TimerError::InvalidTimerCount { .. } => "invalid_timer_count",
            TimerError::SynthesisUnavailable { .. } => "synthesis_unavailable",
        }
    }

    pub(crate) fn synthesis(reason: impl Into<String>) -> Self {
        TimerError::SynthesisUnavailable { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;
