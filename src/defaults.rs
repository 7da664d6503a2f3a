//! Default configuration constants for viva.
//!
//! Shared constants used across configuration types and the realtime
//! session setup, kept in one place to avoid drift between them.

/// Default interview server base URL.
///
/// The interview server issues short-lived realtime session tokens and
/// hosts the transcript analysis endpoint.
pub const SERVER_URL: &str = "http://127.0.0.1:8006";

/// Base URL of the realtime speech API.
pub const REALTIME_URL: &str = "wss://api.openai.com/v1/realtime";

/// Default realtime conversation model.
pub const REALTIME_MODEL: &str = "gpt-4o-realtime-preview";

/// Model used for candidate speech transcription.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Interview language. The remote interviewer is instructed to speak
/// English only, and candidate transcription is pinned to match.
pub const LANGUAGE: &str = "en";

/// Server-side turn detection silence threshold in milliseconds.
///
/// 800ms of silence ends the candidate's turn. Short enough to keep the
/// interview moving, long enough for natural mid-answer pauses.
pub const SILENCE_DURATION_MS: u32 = 800;

/// Default interview topic.
pub const DEFAULT_TOPIC: &str = "Product Designer";

/// Audio sample rate in Hz for microphone capture.
///
/// 16kHz mono PCM is what the realtime API's input transcription expects.
pub const SAMPLE_RATE: u32 = 16000;

/// Bounds for the last-resort transcript scan, in characters.
///
/// When no structured extraction path matches, the serialized event is
/// scanned for a quoted `"transcript"` value. The length bounds keep the
/// scan from picking up ids (too short) or entire nested payloads (too
/// long).
pub const SCAN_MIN_CHARS: usize = 5;
pub const SCAN_MAX_CHARS: usize = 400;
