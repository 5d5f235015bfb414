//! Sine tone synthesis for timer notifications

use std::f64::consts::PI;

use super::WavBuffer;
use crate::{
    error::{Result, TimerError},
    state::Tone,
};

/// Length of the linear fade at each end of a tone
pub const FADE_SECONDS: f64 = 0.01;
/// Longest tone that will be rendered
pub const MAX_TONE_SECONDS: f64 = 10.0;
/// Highest sample rate accepted for rendering
pub const MAX_SAMPLE_RATE: u32 = 192_000;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_TONE_SECONDS: f64 = 1.0;

/// Render a faded sine tone as a 16-bit mono WAV file.
///
/// The output depends only on the arguments, so equal inputs give
/// byte-identical buffers.
pub fn synthesize(frequency_hz: u32, duration_seconds: f64, sample_rate_hz: u32) -> Result<WavBuffer> {
    if sample_rate_hz == 0 || sample_rate_hz > MAX_SAMPLE_RATE {
        return Err(TimerError::synthesis(format!(
            "sample rate {}Hz outside (0, {}]",
            sample_rate_hz, MAX_SAMPLE_RATE
        )));
    }
    if frequency_hz == 0 || frequency_hz as u64 * 2 >= sample_rate_hz as u64 {
        return Err(TimerError::synthesis(format!(
            "{}Hz cannot be rendered at {}Hz",
            frequency_hz, sample_rate_hz
        )));
    }
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 || duration_seconds > MAX_TONE_SECONDS {
        return Err(TimerError::synthesis(format!(
            "tone length {}s outside (0, {}]",
            duration_seconds, MAX_TONE_SECONDS
        )));
    }

    let rate = sample_rate_hz as f64;
    let total = (duration_seconds * rate).round() as usize;
    let fade = ((FADE_SECONDS * rate) as usize).min(total / 2);
    let step = 2.0 * PI * frequency_hz as f64 / rate;

    let samples: Vec<i16> = (0..total)
        .map(|i| {
            let gain = if i < fade {
                ramp(i, fade)
            } else if i >= total - fade {
                ramp(total - 1 - i, fade)
            } else {
                1.0
            };
            ((i as f64 * step).sin() * gain * i16::MAX as f64) as i16
        })
        .collect();

    WavBuffer::from_pcm(&samples, sample_rate_hz)
}

/// Position `i` of an inclusive 0..=1 ramp over `len` samples
fn ramp(i: usize, len: usize) -> f64 {
    if len <= 1 {
        0.0
    } else {
        i as f64 / (len - 1) as f64
    }
}

/// Something that can turn a palette tone into a playable buffer
pub trait Synthesizer: Send + Sync {
    fn render(&self, tone: Tone) -> Result<WavBuffer>;
}

/// Notification tone generator with fixed length and sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSynthesizer {
    pub sample_rate_hz: u32,
    pub tone_seconds: f64,
}

impl ToneSynthesizer {
    pub fn new(sample_rate_hz: u32, tone_seconds: f64) -> Self {
        Self {
            sample_rate_hz,
            tone_seconds,
        }
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_TONE_SECONDS)
    }
}

impl Synthesizer for ToneSynthesizer {
    fn render(&self, tone: Tone) -> Result<WavBuffer> {
        synthesize(tone.frequency_hz(), self.tone_seconds, self.sample_rate_hz)
    }
}
