//! Deterministic WAV encoding.
//!
//! Buffers are written as 16-bit mono PCM with a fixed 44-byte header and no
//! timestamps or optional chunks, so identical samples always produce identical
//! files. The BLAKE3 hash of the PCM payload identifies a render independently
//! of the container.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav_to_vec};
