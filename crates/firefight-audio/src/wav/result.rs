//! Encoded WAV output.

use serde::Serialize;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16, write_wav_to_vec};
use crate::buffer::SampleBuffer;

/// A buffer encoded as a WAV file, with its PCM hash.
#[derive(Debug, Clone, Serialize)]
pub struct WavResult {
    /// Complete WAV file bytes.
    #[serde(skip)]
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes a sample buffer.
    pub fn from_buffer(buffer: &SampleBuffer) -> Self {
        let pcm = samples_to_pcm16(buffer.as_slice());
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(buffer.sample_rate()), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate: buffer.sample_rate(),
            num_samples: buffer.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}
