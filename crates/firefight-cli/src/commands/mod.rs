//! CLI command implementations

pub mod analyze;
pub mod batch;
pub mod json_output;
pub mod list;
pub mod render;

use std::process::ExitCode;

use firefight_audio::AudioError;

/// Exit code for a request the user got wrong.
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for a failure while rendering or touching the filesystem.
pub const EXIT_FAILURE: u8 = 2;

/// Maps an error to the process exit code.
///
/// Invalid requests and unparsable batch files exit with 1; everything else
/// (synthesis, WAV decoding, I/O) exits with 2.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status_for(err))
}

pub(crate) fn exit_status_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(audio) = cause.downcast_ref::<AudioError>() {
            return if audio.is_invalid_input() {
                EXIT_INVALID_INPUT
            } else {
                EXIT_FAILURE
            };
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}
