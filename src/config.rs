//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::{
    audio::ToneSynthesizer,
    error::Result,
    state::{presets, TimerConfig, TimerRegistry},
};

/// Which preset timers the registry starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Standard time plus the 5, 10 and 15 min/hr extensions
    Exam,
    /// The exam timers plus two custom slots
    Full,
}

impl Preset {
    pub fn configs(self) -> Vec<TimerConfig> {
        match self {
            Preset::Exam => presets::exam_timers(),
            Preset::Full => presets::full_palette(),
        }
    }
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "exam-timer")]
#[command(about = "A state-managed HTTP server running independent countdown timers")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Preset timer set to load
    #[arg(long, value_enum, default_value = "full")]
    pub preset: Preset,

    /// Number of timers shown initially
    #[arg(short, long, default_value = "4")]
    pub timers: usize,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Sample rate of notification tones
    #[arg(long, default_value = "44100")]
    pub sample_rate: u32,

    /// Length of notification tones in seconds
    #[arg(long, default_value = "1.0")]
    pub tone_seconds: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Build the registry from the chosen preset, showing `timers` of them
    pub fn registry(&self) -> Result<TimerRegistry> {
        let mut registry = TimerRegistry::new(self.preset.configs())?;
        registry.set_active_count(self.timers)?;
        Ok(registry)
    }

    pub fn synthesizer(&self) -> ToneSynthesizer {
        ToneSynthesizer::new(self.sample_rate, self.tone_seconds)
    }
}
