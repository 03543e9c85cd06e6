//! Error types for the JanSamvaad voice core

use thiserror::Error;

/// Result type alias for voice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while matching or playing spoken replies
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (bad phrase table, unreadable config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Asset locator unreachable or not decodable
    #[error("playback load error: {0}")]
    PlaybackLoad(String),

    /// Output device refused to start playback
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// Audio processing error
    #[error("audio error: {0}")]
    Audio(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error came out of a playback attempt
    #[must_use]
    pub const fn is_playback(&self) -> bool {
        matches!(self, Self::PlaybackLoad(_) | Self::PlaybackRejected(_))
    }
}
