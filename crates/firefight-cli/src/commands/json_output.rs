//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. On success the command prints a
//! [`CommandOutput`] with `success: true` and its result; on failure it prints
//! the same envelope with a list of [`JsonError`]s and no result.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use firefight_audio::{AudioError, SoundRequest, WavResult};
use serde::Serialize;

use super::exit_status_for;

/// Error codes for CLI-level failures.
///
/// Library failures keep their own `AUDIO_xxx` codes.
pub mod error_codes {
    /// Batch file is not valid JSON or does not match the batch schema
    pub const JSON_PARSE: &str = "CLI_001";
    /// File could not be read or written
    pub const IO: &str = "CLI_002";
    /// Any other failure
    pub const OTHER: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "AUDIO_002")
    pub code: String,
    /// Human-readable error message, including its context chain
    pub message: String,
    /// File involved in the failure (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Builds an error from an `anyhow` chain, picking the most specific code.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let code = err
            .chain()
            .find_map(|cause| {
                if let Some(audio) = cause.downcast_ref::<AudioError>() {
                    Some(audio.code())
                } else if cause.downcast_ref::<serde_json::Error>().is_some() {
                    Some(error_codes::JSON_PARSE)
                } else if cause.downcast_ref::<std::io::Error>().is_some() {
                    Some(error_codes::IO)
                } else {
                    None
                }
            })
            .unwrap_or(error_codes::OTHER);
        Self::new(code, format!("{:#}", err))
    }
}

/// Envelope printed by every command in `--json` mode.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T> {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// One sound written to disk.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedSound {
    /// Cache identity of the sound, e.g. `gunshot/enemy_super seed=1002`.
    pub sound: String,
    pub output: String,
    pub sample_rate: u32,
    pub num_samples: usize,
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

impl RenderedSound {
    pub fn new(request: &SoundRequest, output: &Path, wav: &WavResult) -> Self {
        Self {
            sound: request.key().to_string(),
            output: output.display().to_string(),
            sample_rate: wav.sample_rate,
            num_samples: wav.num_samples,
            duration_seconds: wav.duration_seconds(),
            pcm_hash: wav.pcm_hash.clone(),
        }
    }
}

/// Prints the outcome of a command as a JSON envelope and picks the exit code.
pub fn report<T: Serialize>(outcome: Result<T>) -> Result<ExitCode> {
    let (output, code) = match outcome {
        Ok(result) => (CommandOutput::success(result), ExitCode::SUCCESS),
        Err(err) => (
            CommandOutput::failure(vec![JsonError::from_error(&err)]),
            ExitCode::from(exit_status_for(&err)),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_audio_code_survives_context() {
        let err = Err::<(), _>(AudioError::UnknownSoundKind {
            name: "kazoo".to_string(),
        })
        .context("Invalid request")
        .unwrap_err();
        let json = JsonError::from_error(&err);
        assert_eq!(json.code, "AUDIO_004");
        assert!(json.message.starts_with("Invalid request: "));
    }

    #[test]
    fn test_io_and_other_codes() {
        let io = anyhow::Error::new(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(JsonError::from_error(&io).code, error_codes::IO);

        let other = anyhow::anyhow!("something else");
        assert_eq!(JsonError::from_error(&other).code, error_codes::OTHER);
    }

    #[test]
    fn test_failure_envelope_omits_result() {
        let output: CommandOutput<u32> =
            CommandOutput::failure(vec![JsonError::new("CLI_002", "nope").with_file("a.wav")]);
        let value = serde_json::to_value(&output).expect("serializes");
        assert_eq!(
            value,
            serde_json::json!({
                "success": false,
                "errors": [{ "code": "CLI_002", "message": "nope", "file": "a.wav" }],
            })
        );
    }
}
