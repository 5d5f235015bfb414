//! State management module
//!
//! This module contains the timer model, the registry that owns it, and the
//! shared application state the HTTP shell works against.

pub mod app_state;
pub mod clock;
pub mod presets;
pub mod registry;
pub mod timer_config;
pub mod timer_state;

#[cfg(test)]
mod registry_tests;

// Re-export main types
pub use app_state::{AppState, Notification, StateError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{format_clock, ConfigureOutcome, TimerRegistry, TimerView};
pub use timer_config::{TimerConfig, Tone, MAX_DURATION_SECONDS};
pub use timer_state::{TimerState, TimerStatus};
