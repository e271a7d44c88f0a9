//! Batch command implementation
//!
//! Renders every entry of a JSON batch file:
//!
//! ```json
//! {
//!   "sample_rate": 22050,
//!   "requests": [
//!     { "request": { "kind": "gunshot", "grade": "enemy_super", "seed": 4 }, "output": "sfx/super.wav" },
//!     { "request": { "kind": "heartbeat", "bpm": 140 }, "output": "loops/heart_140.wav" }
//!   ]
//! }
//! ```
//!
//! Relative outputs are resolved against the output root. Entries that share
//! a sound key are rendered once.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use firefight_audio::{NoAssets, SoundCache, SoundRequest, SynthConfig, WavResult};
use serde::{Deserialize, Serialize};

use super::json_output::{self, RenderedSound};
use super::render::write_rendered;

/// Parsed batch file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    /// Sample rate override applied to every entry.
    #[serde(default)]
    pub sample_rate: Option<u32>,
    pub requests: Vec<BatchEntry>,
}

/// One sound to render and where to put it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    pub request: SoundRequest,
    pub output: PathBuf,
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub rendered: Vec<RenderedSound>,
    /// Number of distinct sounds actually synthesized.
    pub unique_sounds: usize,
}

/// Run the batch command
///
/// # Arguments
/// * `file` - Path to the batch JSON file
/// * `out_root` - Directory relative outputs are resolved against (default: current directory)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(file: &str, out_root: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let outcome = load_batch(Path::new(file))
        .and_then(|batch| render_batch(&batch, Path::new(out_root.unwrap_or("."))));
    if json_output {
        return json_output::report(outcome);
    }

    let report = outcome?;
    for rendered in &report.rendered {
        println!(
            "{} {} {} {}",
            "Rendered:".green().bold(),
            rendered.sound,
            "->".dimmed(),
            rendered.output
        );
    }
    println!(
        "\n{} {} files from {} unique sounds",
        "Done:".cyan().bold(),
        report.rendered.len(),
        report.unique_sounds
    );
    Ok(ExitCode::SUCCESS)
}

/// Reads and parses a batch file.
pub fn load_batch(path: &Path) -> Result<BatchFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
    parse_batch(&text).with_context(|| format!("Failed to parse batch file: {}", path.display()))
}

/// Parses batch JSON and validates every request before anything is rendered.
pub fn parse_batch(text: &str) -> Result<BatchFile> {
    let batch: BatchFile = serde_json::from_str(text)?;
    for (index, entry) in batch.requests.iter().enumerate() {
        entry
            .request
            .validate()
            .with_context(|| format!("Invalid request at requests[{}]", index))?;
    }
    Ok(batch)
}

/// Renders every entry of `batch` under `out_root`.
pub fn render_batch(batch: &BatchFile, out_root: &Path) -> Result<BatchReport> {
    let config = SynthConfig {
        sample_rate: batch.sample_rate,
    };
    let cache = SoundCache::new(config, Arc::new(NoAssets));

    let mut rendered = Vec::with_capacity(batch.requests.len());
    for entry in &batch.requests {
        let buffer = cache
            .get(&entry.request)
            .with_context(|| format!("Failed to render {}", entry.request))?;
        let output = out_root.join(&entry.output);
        rendered.push(write_rendered(
            &entry.request,
            &WavResult::from_buffer(&buffer),
            &output,
        )?);
    }

    tracing::info!(
        files = rendered.len(),
        unique = cache.len(),
        "batch rendered"
    );
    Ok(BatchReport {
        rendered,
        unique_sounds: cache.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use firefight_audio::AudioError;
    use pretty_assertions::assert_eq;

    const BATCH: &str = r#"{
        "sample_rate": 8000,
        "requests": [
            { "request": { "kind": "shell_casing" }, "output": "a/casing.wav" },
            { "request": { "kind": "shell_casing", "seed": 99 }, "output": "b/casing.wav" },
            { "request": { "kind": "gunshot", "grade": "enemy_standard", "seed": 5 }, "output": "shot.wav" }
        ]
    }"#;

    #[test]
    fn test_parse_batch() {
        let batch = parse_batch(BATCH).expect("parses");
        assert_eq!(batch.sample_rate, Some(8000));
        assert_eq!(batch.requests.len(), 3);
        assert_eq!(batch.requests[2].output, PathBuf::from("shot.wav"));
    }

    #[test]
    fn test_invalid_entry_fails_before_rendering() {
        let text = r#"{ "requests": [
            { "request": { "kind": "groan", "duration_hint": -1.0 }, "output": "g.wav" }
        ] }"#;
        let err = parse_batch(text).unwrap_err();
        assert!(format!("{:#}", err).contains("requests[0]"), "{:#}", err);
    }

    #[test]
    fn test_huge_duration_entry_is_rejected() {
        let text = r#"{ "requests": [
            { "request": { "kind": "music", "duration_hint": 1e13 }, "output": "m.wav" }
        ] }"#;
        let err = parse_batch(text).unwrap_err();
        assert!(err.chain().any(|c| matches!(
            c.downcast_ref::<AudioError>(),
            Some(AudioError::InvalidDuration { .. })
        )));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let text = r#"{ "requests": [ { "request": { "kind": "kazoo" }, "output": "k.wav" } ] }"#;
        assert!(parse_batch(text).is_err());
    }

    #[test]
    fn test_render_batch_shares_identical_sounds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let batch = parse_batch(BATCH).expect("parses");

        let report = render_batch(&batch, dir.path()).expect("renders");

        assert_eq!(report.rendered.len(), 3);
        assert_eq!(report.unique_sounds, 2);
        assert_eq!(report.rendered[0].pcm_hash, report.rendered[1].pcm_hash);
        assert_eq!(report.rendered[2].num_samples, 8000);
        assert!(dir.path().join("a/casing.wav").is_file());
        assert!(dir.path().join("b/casing.wav").is_file());
        assert!(dir.path().join("shot.wav").is_file());
    }
}
