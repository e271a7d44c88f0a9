//! Entry point from a [`SoundRequest`] to samples.

use crate::assets::AssetLookup;
use crate::buffer::SampleBuffer;
use crate::error::AudioResult;
use crate::request::{SoundKind, SoundRequest};
use crate::synthesis::gunshot::{self, Grade};
use crate::synthesis::{breathing, groan, heartbeat, music, shell_casing, SynthConfig};

/// Renders the sound a request describes.
///
/// # Arguments
/// * `request` - What to render; validated first
/// * `config` - Sample rate override
///
/// # Returns
/// A fresh buffer. Identical requests and configs give identical buffers.
pub fn generate(request: &SoundRequest, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    request.validate()?;
    let key = request.key();
    let seed = key.seed.unwrap_or_default();

    match request.kind {
        SoundKind::Gunshot => {
            gunshot::synthesize(key.grade.unwrap_or(Grade::Player), seed, config)
        }
        SoundKind::ShellCasing => shell_casing::synthesize(seed, config),
        SoundKind::Groan => match key.duration() {
            Some(duration) => {
                let params = groan::GroanParams::from_seed(seed).with_duration(duration);
                groan::synthesize_with(&params, seed, config)
            }
            None => groan::synthesize(seed, config),
        },
        SoundKind::Heartbeat => {
            heartbeat::synthesize(key.bpm().unwrap_or(heartbeat::DEFAULT_BPM), config)
        }
        SoundKind::Breathing => breathing::synthesize(seed, config),
        SoundKind::Music => music::synthesize(
            seed,
            key.duration().unwrap_or(music::DEFAULT_DURATION),
            config,
        ),
    }
}

/// Returns a recorded asset for the request if one exists, else renders it.
pub fn generate_or_load(
    request: &SoundRequest,
    config: &SynthConfig,
    assets: &dyn AssetLookup,
) -> AudioResult<SampleBuffer> {
    request.validate()?;
    if let Some(buffer) = assets.lookup(&request.key())? {
        return Ok(buffer);
    }
    generate(request, config)
}
