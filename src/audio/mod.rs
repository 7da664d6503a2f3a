//! Microphone capture.
//!
//! [`AudioSource`] is the seam between the session controller and the
//! hardware; [`CpalAudioSource`] is the real implementation behind the
//! `cpal-audio` feature, and [`MockAudioSource`] drives tests.

#[cfg(feature = "cpal-audio")]
pub mod capture;
pub mod source;

#[cfg(feature = "cpal-audio")]
pub use capture::{CpalAudioSource, list_devices, suppress_audio_warnings};
pub use source::{AudioSource, MockAudioSource};
