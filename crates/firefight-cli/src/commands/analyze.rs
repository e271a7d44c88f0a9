//! Analyze command implementation
//!
//! Reads a WAV file and reports its level, length, low-band energy and PCM hash.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use firefight_audio::analysis::{peak, BufferStats};
use firefight_audio::assets::load_wav;
use firefight_audio::wav::compute_pcm_hash;
use serde::Serialize;

use super::json_output;

/// Length of the edge windows checked for loop clicks.
const EDGE_SECONDS: f64 = 0.001;

/// Analysis of one WAV file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResult {
    pub input: String,
    /// BLAKE3 hash of the PCM payload; absent if the data chunk cannot be located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    #[serde(flatten)]
    pub stats: BufferStats,
    /// Largest absolute sample in the first and last millisecond.
    pub edge_peak: f32,
}

/// Run the analyze command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let outcome = analyze(Path::new(input));
    if json_output {
        return json_output::report(outcome);
    }

    let result = outcome?;
    let stats = &result.stats;
    println!("{} {}", "Analyzing:".cyan().bold(), result.input);
    if let Some(hash) = &result.pcm_hash {
        println!("{} {}", "PCM hash:".dimmed(), &hash[..16]);
    }
    println!(
        "  {:<16} {} samples @ {} Hz ({:.3}s)",
        "Length:",
        stats.samples,
        stats.sample_rate,
        stats.duration_seconds
    );
    println!("  {:<16} {:.4}", "Peak:", stats.peak);
    println!("  {:<16} {:.4}", "RMS:", stats.rms);
    println!("  {:<16} {:.4}", "50-300 Hz energy:", stats.low_band_energy);
    println!("  {:<16} {:.5}", "Edge peak:", result.edge_peak);
    Ok(ExitCode::SUCCESS)
}

/// Analyzes the WAV file at `path`.
pub fn analyze(path: &Path) -> Result<AnalyzeResult> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let buffer =
        load_wav(path).with_context(|| format!("Failed to decode WAV: {}", path.display()))?;

    let samples = buffer.as_slice();
    let edge = ((buffer.sample_rate() as f64 * EDGE_SECONDS).round() as usize)
        .max(1)
        .min(samples.len());
    let edge_peak = peak(&samples[..edge]).max(peak(&samples[samples.len() - edge..]));

    Ok(AnalyzeResult {
        input: path.display().to_string(),
        pcm_hash: compute_pcm_hash(&data),
        stats: BufferStats::measure(&buffer),
        edge_peak,
    })
}
