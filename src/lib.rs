//! viva - Voice mock interviews in the terminal, scored
//!
//! Runs a spoken mock interview over a realtime speech API, assembles an
//! ordered transcript from the event stream, and submits it to an
//! interview server for scoring.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod api;
pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod realtime;
#[cfg(feature = "cli")]
pub mod report;
pub mod session;
pub mod transcript;

// Core traits (audio in → events routed → turns out)
pub use api::token::TokenProvider;
pub use audio::source::AudioSource;
pub use realtime::channel::EventChannel;
pub use transcript::{Transcript, Turn, TurnAccumulator, TurnSink};

// Session lifecycle
pub use session::{InterviewSession, SessionState};

// Error handling
pub use error::{Result, VivaError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
