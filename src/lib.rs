//! Exam Timer - A state-managed HTTP server running independent countdown timers
//!
//! This library provides a registry of countdown timers with a poll-driven
//! completion check, and a tone synthesizer for the notification sounds.

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use audio::{synthesize, ToneSynthesizer, WavBuffer};
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerConfig, TimerRegistry, TimerStatus, Tone};
pub use utils::signals::shutdown_signal;
