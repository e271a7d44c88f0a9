//! Render command implementation
//!
//! Renders a single sound to a 16-bit mono WAV file.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use firefight_audio::{
    generate, AudioError, Grade, SoundKind, SoundRequest, SynthConfig, WavResult,
};

use super::json_output::{self, RenderedSound};

/// Knobs of a single render, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    pub kind: String,
    pub grade: Option<String>,
    pub seed: Option<u32>,
    pub duration: Option<f64>,
    pub bpm: Option<f64>,
    pub sample_rate: Option<u32>,
    pub output: String,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on an invalid request, 2 on a render or I/O failure
pub fn run(args: &RenderArgs, json_output: bool) -> Result<ExitCode> {
    let outcome = render(args);
    if json_output {
        return json_output::report(outcome);
    }

    let rendered = outcome?;
    println!("{} {}", "Rendered:".green().bold(), rendered.sound);
    println!("  {} {}", "Output:".dimmed(), rendered.output);
    println!(
        "  {} {} samples @ {} Hz ({:.3}s)",
        "Length:".dimmed(),
        rendered.num_samples,
        rendered.sample_rate,
        rendered.duration_seconds
    );
    println!("  {} {}", "PCM hash:".dimmed(), &rendered.pcm_hash[..16]);
    Ok(ExitCode::SUCCESS)
}

fn render(args: &RenderArgs) -> Result<RenderedSound> {
    let request = build_request(args)?;
    let config = SynthConfig {
        sample_rate: args.sample_rate,
    };
    render_to_file(&request, &config, Path::new(&args.output))
}

/// Turns command-line arguments into a validated request.
pub fn build_request(args: &RenderArgs) -> Result<SoundRequest> {
    let kind: SoundKind = args.kind.parse()?;
    let mut request = SoundRequest::new(kind);

    if let Some(grade) = &args.grade {
        if !kind.takes_grade() {
            return Err(AudioError::invalid_param(
                "grade",
                format!("{} does not take a grade", kind),
            )
            .into());
        }
        request = request.with_grade(grade.parse::<Grade>()?);
    }
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }
    if let Some(duration) = args.duration {
        request = request.with_duration(duration);
    }
    if let Some(bpm) = args.bpm {
        request = request.with_bpm(bpm);
    }

    request.validate()?;
    if args.duration.is_some() && request.resolved_duration().is_none() {
        tracing::warn!(%kind, "--duration has no effect on this sound");
    }
    if args.bpm.is_some() && request.resolved_bpm().is_none() {
        tracing::warn!(%kind, "--bpm has no effect on this sound");
    }
    Ok(request)
}

/// Renders `request` and writes it to `output`, creating parent directories.
pub fn render_to_file(
    request: &SoundRequest,
    config: &SynthConfig,
    output: &Path,
) -> Result<RenderedSound> {
    let buffer =
        generate(request, config).with_context(|| format!("Failed to render {}", request))?;
    write_rendered(request, &WavResult::from_buffer(&buffer), output)
}

pub(crate) fn write_rendered(
    request: &SoundRequest,
    wav: &WavResult,
    output: &Path,
) -> Result<RenderedSound> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(output, &wav.wav_data)
        .with_context(|| format!("Failed to write to: {}", output.display()))?;
    Ok(RenderedSound::new(request, output, wav))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(kind: &str) -> RenderArgs {
        RenderArgs {
            kind: kind.to_string(),
            output: "out.wav".to_string(),
            ..RenderArgs::default()
        }
    }

    #[test]
    fn test_build_request_with_grade_and_seed() {
        let request = build_request(&RenderArgs {
            grade: Some("enemy_super".to_string()),
            seed: Some(3),
            ..args("gunshot")
        })
        .expect("valid request");
        assert_eq!(request.resolved_grade(), Some(Grade::EnemySuper));
        assert_eq!(request.resolved_seed(), Some(1002));
    }

    #[test]
    fn test_grade_on_non_gunshot_is_rejected() {
        let err = build_request(&RenderArgs {
            grade: Some("player".to_string()),
            ..args("music")
        })
        .unwrap_err();
        assert!(err.to_string().contains("does not take a grade"), "{}", err);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = build_request(&args("kazoo")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AudioError>(),
            Some(AudioError::UnknownSoundKind { .. })
        ));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let err = build_request(&RenderArgs {
            duration: Some(-2.0),
            ..args("groan")
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AudioError>(),
            Some(AudioError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_huge_duration_is_rejected_before_rendering() {
        let err = build_request(&RenderArgs {
            duration: Some(1e13),
            ..args("music")
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AudioError>(),
            Some(AudioError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_render_to_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("sfx").join("casing.wav");
        let request = SoundRequest::new(SoundKind::ShellCasing);

        let rendered = render_to_file(&request, &SynthConfig::with_sample_rate(8000), &output)
            .expect("renders");

        assert_eq!(rendered.num_samples, 2000);
        assert_eq!(rendered.sample_rate, 8000);
        assert_eq!(rendered.sound, "shell_casing seed=99");
        let bytes = fs::read(&output).expect("file written");
        assert_eq!(bytes.len(), 44 + 2000 * 2);
    }
}
