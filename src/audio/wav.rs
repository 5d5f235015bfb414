//! In-memory WAV container for 16-bit mono PCM

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Result, TimerError};

const HEADER_LEN: usize = 44;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// A complete, playable WAV file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBuffer {
    bytes: Vec<u8>,
    sample_rate: u32,
}

impl WavBuffer {
    /// Package mono 16-bit samples behind a canonical RIFF/WAVE header.
    ///
    /// Fails when the sizes or the byte rate do not fit the header's 32-bit fields.
    pub fn from_pcm(samples: &[i16], sample_rate: u32) -> Result<Self> {
        let block_align = CHANNELS * (BITS_PER_SAMPLE / 8);
        let data_size = samples
            .len()
            .checked_mul(block_align as usize)
            .and_then(|size| u32::try_from(size).ok())
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| TimerError::synthesis(format!("{} samples do not fit a WAV file", samples.len())))?;
        let byte_rate = sample_rate
            .checked_mul(block_align as u32)
            .ok_or_else(|| TimerError::synthesis(format!("{}Hz does not fit a WAV header", sample_rate)))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + samples.len() * 2);

        // RIFF header
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");

        // fmt chunk
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&CHANNELS.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_size.to_le_bytes());
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(Self { bytes, sample_rate })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> usize {
        (self.bytes.len() - HEADER_LEN) / 2
    }

    /// Decode the PCM payload back into samples
    pub fn samples(&self) -> Vec<i16> {
        self.bytes[HEADER_LEN..]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// `data:` URI suitable for an HTML audio element
    pub fn to_data_uri(&self) -> String {
        format!("data:audio/wav;base64,{}", STANDARD.encode(&self.bytes))
    }
}
