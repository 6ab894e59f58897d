//! Core error types for focusflow-core.
//!
//! Audio failures are absorbed and logged at the audio engine boundary;
//! nothing in this crate is fatal to timer correctness.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Audio subsystem errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Audio-specific errors.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output device could be opened
    #[error("Failed to initialize audio output: {0}")]
    Stream(#[from] rodio::StreamError),

    /// A playback sink could not be created
    #[error("Failed to play audio: {0}")]
    Play(#[from] rodio::PlayError),

    /// An ambient sound file could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An ambient sound file could not be decoded
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
