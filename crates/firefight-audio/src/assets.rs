//! Pre-recorded sound lookup.
//!
//! A game may ship recorded clips for some sounds. The lookup is injected
//! into the generator so the core never reaches for global asset storage:
//! a hit replaces synthesis, a miss (or an unreadable file) falls back to it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};

use crate::buffer::SampleBuffer;
use crate::error::AudioResult;
use crate::request::{SoundKey, SoundKind};
use crate::synthesis::gunshot::Grade;

/// Source of pre-recorded buffers.
pub trait AssetLookup: Send + Sync {
    /// Returns a recorded buffer for `key`, or `None` to synthesize it.
    fn lookup(&self, key: &SoundKey) -> AudioResult<Option<SampleBuffer>>;
}

/// Lookup with no assets; everything is synthesized.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetLookup for NoAssets {
    fn lookup(&self, _key: &SoundKey) -> AudioResult<Option<SampleBuffer>> {
        Ok(None)
    }
}

/// Loads `<root>/<name>.wav` files registered per kind and grade.
///
/// Seeds are ignored: one recording stands in for every actor.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
    names: HashMap<(SoundKind, Option<Grade>), String>,
}

impl DirectoryAssets {
    /// An empty registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: HashMap::new(),
        }
    }

    /// The game's stock clip names: `gun-shot` for the player's rifle and
    /// `gun-shot-enemy` for the standard enemy rifle.
    pub fn with_game_names(root: impl Into<PathBuf>) -> Self {
        Self::new(root)
            .with_name(SoundKind::Gunshot, Some(Grade::Player), "gun-shot")
            .with_name(SoundKind::Gunshot, Some(Grade::EnemyStandard), "gun-shot-enemy")
    }

    /// Registers a clip name (without extension).
    pub fn with_name(
        mut self,
        kind: SoundKind,
        grade: Option<Grade>,
        name: impl Into<String>,
    ) -> Self {
        self.names.insert((kind, grade), name.into());
        self
    }

    /// Path that would be loaded for `key`.
    pub fn path_for(&self, key: &SoundKey) -> Option<PathBuf> {
        self.names
            .get(&(key.kind, key.grade))
            .map(|name| self.root.join(format!("{}.wav", name)))
    }
}

impl AssetLookup for DirectoryAssets {
    fn lookup(&self, key: &SoundKey) -> AudioResult<Option<SampleBuffer>> {
        let Some(path) = self.path_for(key) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }
        match load_wav(&path) {
            Ok(buffer) => {
                tracing::debug!(%key, path = %path.display(), "loaded recorded asset");
                Ok(Some(buffer))
            }
            Err(err) => {
                tracing::warn!(
                    %key,
                    path = %path.display(),
                    error = %err,
                    "asset could not be decoded, synthesizing instead"
                );
                Ok(None)
            }
        }
    }
}

/// Decodes a WAV file into a mono buffer.
///
/// Integer PCM of any depth and 32-bit float are accepted. Multi-channel
/// files keep only their first channel.
pub fn load_wav(path: &Path) -> AudioResult<SampleBuffer> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = interleaved.into_iter().step_by(channels).collect();
    Ok(SampleBuffer::new(spec.sample_rate, mono))
}
