//! Real microphone capture using CPAL (Cross-Platform Audio Library).

use crate::audio::source::AudioSource;
use crate::defaults;
use crate::error::{Result, VivaError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Chunks of captured audio buffered between the device callback and the
/// reader. At ~10ms per callback this is well over a second of slack.
const CHUNK_QUEUE_DEPTH: usize = 128;

/// Suppress noisy JACK/ALSA messages that occur during audio backend probing.
/// These are harmless but confusing to users.
///
/// # Safety
/// This modifies environment variables which is safe when called before
/// spawning threads.
pub fn suppress_audio_warnings() {
    // SAFETY: Called at startup before any threads are spawned
    unsafe {
        std::env::set_var("JACK_NO_START_SERVER", "1");
        std::env::set_var("JACK_NO_AUDIO_RESERVATION", "1");
        std::env::set_var("PIPEWIRE_DEBUG", "0");
        std::env::set_var("ALSA_DEBUG", "0");
        std::env::set_var("PW_LOG", "0");
    }
}

/// Preferred device names for desktop PipeWire/PulseAudio environments.
const PREFERRED_DEVICES: &[&str] = &["pipewire", "pulse", "PulseAudio"];

/// Device name patterns that are never useful for voice input.
const FILTERED_PATTERNS: &[&str] = &[
    "surround",
    "front:",
    "rear:",
    "center:",
    "side:",
    "Digital Output",
    "HDMI",
    "S/PDIF",
];

fn should_filter_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    FILTERED_PATTERNS
        .iter()
        .any(|pattern| lower.contains(&pattern.to_lowercase()))
}

fn is_preferred_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    PREFERRED_DEVICES
        .iter()
        .any(|pref| lower.contains(&pref.to_lowercase()))
}

/// List available audio input devices with filtering and recommendations.
///
/// Preferred devices are marked with "\[recommended\]"; obviously unusable
/// devices (surround channels, HDMI, etc.) are filtered out.
///
/// # Errors
/// Returns `VivaError::AudioCapture` if device enumeration fails.
pub fn list_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| VivaError::AudioCapture {
            message: format!("Failed to enumerate input devices: {}", e),
        })?;

    let mut device_names = Vec::new();
    for device in devices {
        if let Ok(name) = device.name() {
            if should_filter_device(&name) {
                continue;
            }
            if is_preferred_device(&name) {
                device_names.push(format!("{} [recommended]", name));
            } else {
                device_names.push(name);
            }
        }
    }

    Ok(device_names)
}

/// Get the best default input device, preferring PipeWire/PulseAudio so the
/// desktop's device selection is respected.
///
/// # Errors
/// Returns `VivaError::AudioDeviceNotFound` if no input device is available.
fn get_best_default_device() -> Result<cpal::Device> {
    let host = cpal::default_host();

    if let Ok(devices) = host.input_devices() {
        for device in devices {
            if let Ok(name) = device.name()
                && is_preferred_device(&name)
            {
                return Ok(device);
            }
        }
    }

    host.default_input_device()
        .ok_or_else(|| VivaError::AudioDeviceNotFound {
            device: "default".to_string(),
        })
}

/// Wrapper for cpal::Stream to make it Send.
///
/// SAFETY: The stream is only accessed from a single thread at a time through
/// the Mutex wrapper in CpalAudioSource. The stream methods are called
/// synchronously and don't cross thread boundaries unsafely.
struct SendableStream(cpal::Stream);

unsafe impl Send for SendableStream {}

/// Real microphone capture using CPAL.
///
/// Captures 16-bit PCM mono at 16kHz, the format the realtime transcription
/// endpoint expects. Tries i16 first, then falls back to f32 with conversion
/// for devices that only expose float formats.
///
/// The device callback hands sample chunks to the reader over a bounded
/// channel; if the reader stalls long enough to fill it, the oldest audio is
/// simply lost rather than blocking the callback.
pub struct CpalAudioSource {
    device: cpal::Device,
    stream: Arc<Mutex<Option<SendableStream>>>,
    chunk_tx: Sender<Vec<i16>>,
    chunk_rx: Receiver<Vec<i16>>,
    sample_rate: u32,
}

impl CpalAudioSource {
    /// Create a new CPAL audio source.
    ///
    /// # Arguments
    /// * `device_name` - Optional device name. If None, uses the best default
    ///   input device.
    ///
    /// # Errors
    /// Returns an error if the device is not found or enumeration fails.
    pub fn new(device_name: Option<&str>) -> Result<Self> {
        let device = match device_name {
            Some(name) => {
                let host = cpal::default_host();
                let devices = host
                    .input_devices()
                    .map_err(|e| VivaError::AudioCapture {
                        message: format!("Failed to enumerate devices: {}", e),
                    })?;

                let mut found_device = None;
                for dev in devices {
                    if let Ok(dev_name) = dev.name()
                        && dev_name == name
                    {
                        found_device = Some(dev);
                        break;
                    }
                }

                found_device.ok_or_else(|| VivaError::AudioDeviceNotFound {
                    device: name.to_string(),
                })?
            }
            None => get_best_default_device()?,
        };

        let (chunk_tx, chunk_rx) = crossbeam_channel::bounded(CHUNK_QUEUE_DEPTH);

        Ok(Self {
            device,
            stream: Arc::new(Mutex::new(None)),
            chunk_tx,
            chunk_rx,
            sample_rate: defaults::SAMPLE_RATE,
        })
    }

    /// Build the input stream, preferring i16/16kHz/mono and falling back to
    /// f32 with software conversion. PipeWire and PulseAudio convert rate and
    /// channel count transparently.
    fn build_stream(&self) -> Result<cpal::Stream> {
        let config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_callback = |err| {
            eprintln!("Audio stream error: {}", err);
        };

        let tx = self.chunk_tx.clone();
        if let Ok(stream) = self.device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                push_chunk(&tx, data.to_vec());
            },
            err_callback,
            None,
        ) {
            return Ok(stream);
        }

        let tx = self.chunk_tx.clone();
        self.device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let chunk = data
                        .iter()
                        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                        .collect();
                    push_chunk(&tx, chunk);
                },
                err_callback,
                None,
            )
            .map_err(|e| VivaError::AudioCapture {
                message: format!(
                    "Device does not support 16kHz mono capture: {}. \
                     Try specifying a device with --device.",
                    e
                ),
            })
    }
}

/// Hand one captured chunk to the reader. Runs on the realtime audio thread,
/// so it must never block; a full queue drops the chunk.
fn push_chunk(tx: &Sender<Vec<i16>>, chunk: Vec<i16>) {
    tx.try_send(chunk).ok();
}

impl AudioSource for CpalAudioSource {
    fn start(&mut self) -> Result<()> {
        {
            let stream_guard = self.stream.lock().map_err(|e| VivaError::AudioCapture {
                message: format!("Failed to lock stream: {}", e),
            })?;
            if stream_guard.is_some() {
                return Ok(()); // Already started
            }
        }

        let stream = self.build_stream()?;
        stream.play().map_err(|e| VivaError::AudioCapture {
            message: format!("Failed to start audio stream: {}", e),
        })?;

        let mut stream_guard = self.stream.lock().map_err(|e| VivaError::AudioCapture {
            message: format!("Failed to lock stream: {}", e),
        })?;
        *stream_guard = Some(SendableStream(stream));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut stream_guard = self.stream.lock().map_err(|e| VivaError::AudioCapture {
            message: format!("Failed to lock stream: {}", e),
        })?;

        if let Some(sendable_stream) = stream_guard.take() {
            sendable_stream
                .0
                .pause()
                .map_err(|e| VivaError::AudioCapture {
                    message: format!("Failed to stop audio stream: {}", e),
                })?;
        }
        Ok(())
    }

    fn read_samples(&mut self) -> Result<Vec<i16>> {
        let mut samples = Vec::new();
        while let Ok(chunk) = self.chunk_rx.try_recv() {
            samples.extend_from_slice(&chunk);
        }
        Ok(samples)
    }
}
