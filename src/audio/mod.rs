//! Notification audio
//!
//! Tones are generated in memory and packaged as WAV files the shell can
//! hand straight to an audio player.

pub mod synth;
pub mod wav;

pub use synth::{synthesize, Synthesizer, ToneSynthesizer};
pub use wav::WavBuffer;
