//! Error types for the kitchen assistant

use thiserror::Error;

/// Result type alias for kitchen assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the kitchen assistant
///
/// None of these reach the dialogue engine: the voice and catalog
/// boundaries log them and collapse to empty results
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Recipe catalog has an unexpected shape
    #[error("catalog error: {0}")]
    Catalog(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
