//! Preset timer sets
//!
//! The exam variant runs four timers: standard time plus the three common
//! extra-time allowances (5, 10 and 15 minutes per hour). The configurable
//! variant adds two free slots on top.

use super::{Tone, TimerConfig};

/// Largest number of timer slots a preset set provides
pub const MAX_TIMERS: usize = 6;

/// The four exam timers
pub fn exam_timers() -> Vec<TimerConfig> {
    vec![
        TimerConfig::from_minutes("Standard Time", 75.0, Tone::A4),
        TimerConfig::from_minutes("5 min/hr ext", 81.25, Tone::C5),
        TimerConfig::from_minutes("10 min/hr ext", 87.5, Tone::E5),
        TimerConfig::from_minutes("15 min/hr ext", 93.75, Tone::G5),
    ]
}

/// The exam timers followed by two custom slots
pub fn full_palette() -> Vec<TimerConfig> {
    let mut configs = exam_timers();
    configs.push(TimerConfig::from_minutes("Custom Timer 5", 60.0, Tone::A5));
    configs.push(TimerConfig::from_minutes("Custom Timer 6", 90.0, Tone::C6));
    configs
}
