//! Error types for viva.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VivaError {
    // Session credential errors
    #[error("Session token request failed ({status}): {message}")]
    TokenRequest { status: u16, message: String },

    #[error("Session token missing from server response")]
    TokenMissing,

    // Realtime channel errors
    #[error("Realtime connection failed: {message}")]
    ChannelConnect { message: String },

    #[error("Realtime channel closed: {message}")]
    ChannelClosed { message: String },

    // Session lifecycle errors
    #[error("An interview session is already active")]
    SessionActive,

    // Audio capture errors
    #[error("Audio device not found: {device}")]
    AudioDeviceNotFound { device: String },

    #[error("Audio capture failed: {message}")]
    AudioCapture { message: String },

    // Analysis errors
    #[error("Analysis request failed ({status}): {message}")]
    AnalysisRequest { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VivaError>;
