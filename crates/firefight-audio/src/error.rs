//! Error types for the audio crate.

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while building or loading sounds.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A sound kind name that is not in the catalogue.
    #[error("unknown sound kind: {name}")]
    UnknownSoundKind {
        /// The name that failed to resolve.
        name: String,
    },

    /// WAV decoding error from an asset file.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::InvalidDuration { .. } => "AUDIO_002",
            AudioError::InvalidParameter { .. } => "AUDIO_003",
            AudioError::UnknownSoundKind { .. } => "AUDIO_004",
            AudioError::Wav(_) => "AUDIO_005",
            AudioError::Io(_) => "AUDIO_006",
        }
    }

    /// Returns true for errors caused by the caller's request rather than the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AudioError::InvalidSampleRate { .. }
                | AudioError::InvalidDuration { .. }
                | AudioError::InvalidParameter { .. }
                | AudioError::UnknownSoundKind { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("bpm", "must be positive");
        assert!(err.to_string().contains("bpm"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "AUDIO_003");
    }

    #[test]
    fn test_unknown_kind_is_invalid_input() {
        let err = AudioError::UnknownSoundKind {
            name: "kazoo".to_string(),
        };
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("kazoo"));
    }

    #[test]
    fn test_io_is_not_invalid_input() {
        let err = AudioError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!err.is_invalid_input());
        assert_eq!(err.code(), "AUDIO_006");
    }
}
