//! Firefight Audio
//!
//! Deterministic offline synthesis of the sounds of a small shooter game:
//! gunshots in three grades, shell casings, zombie groans, the heartbeat and
//! labored-breathing health loops, and an ambient music bed.
//!
//! # Overview
//!
//! Every sound is a pure function of a small [`SoundRequest`] and a
//! [`SynthConfig`]. Synthesizers sum time-gated layers built from a handful
//! of primitives (envelopes, additive sine stacks, seeded white noise), run
//! the sum through an asymmetric soft clip and one or two one-pole smoothing
//! passes, and return a mono [`SampleBuffer`] in [-1, 1].
//!
//! # Determinism
//!
//! All randomness comes from PCG32 generators seeded from the request, with
//! per-component seeds derived via BLAKE3. The same request always yields
//! bit-identical samples.
//!
//! # Example
//!
//! ```
//! use firefight_audio::{generate, Grade, SoundRequest, SynthConfig};
//!
//! let request = SoundRequest::gunshot(Grade::EnemySuper, 7);
//! let buffer = generate(&request, &SynthConfig::with_sample_rate(8000))?;
//! assert_eq!(buffer.len(), 16_000);
//! assert!(buffer.peak() <= 1.0);
//! # Ok::<(), firefight_audio::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Request to samples, with optional recorded assets
//! - [`synthesis`] - The individual synthesizers
//! - [`cache`] - Process-wide lazy buffer cache
//! - [`playback`] - Host playback contract and the game's cues
//! - [`health`] - Heartbeat / breathing loop selection from health
//! - [`analysis`] - Level, band energy and onset measurements
//! - [`wav`] - Deterministic WAV writer

pub mod analysis;
pub mod assets;
pub mod buffer;
pub mod cache;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod generate;
pub mod groan_scheduler;
pub mod health;
pub mod noise;
pub mod oscillator;
pub mod playback;
pub mod request;
pub mod rng;
pub mod shaping;
pub mod synthesis;
pub mod wav;

pub use assets::{AssetLookup, DirectoryAssets, NoAssets};
pub use buffer::SampleBuffer;
pub use cache::SoundCache;
pub use error::{AudioError, AudioResult};
pub use generate::{generate, generate_or_load};
pub use playback::{Cue, PlayOptions, Playback};
pub use request::{SoundKey, SoundKind, SoundRequest};
pub use synthesis::gunshot::Grade;
pub use synthesis::{SynthConfig, MAX_DURATION_SECONDS};
pub use wav::WavResult;
