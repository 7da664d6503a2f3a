//! Outbound messages sent over the realtime channel.
//!
//! The core only ever sends three message kinds: the session
//! configuration, the kickoff instruction that starts the interview, and
//! microphone audio frames. The instruction text asks the remote peer to
//! mirror every spoken question as plain text — that mirror is what makes
//! transcript extraction possible at all.

use crate::config::InterviewConfig;
use crate::error::{Result, VivaError};
use base64::Engine;
use serde::Serialize;

fn encode_frame<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| VivaError::Other(format!("encode frame: {}", e)))
}

/// `session.update`: declares modalities, server-driven turn detection and
/// candidate transcription settings.
#[derive(Debug, Serialize)]
pub struct SessionUpdate {
    #[serde(rename = "type")]
    kind: &'static str,
    session: SessionSettings,
}

#[derive(Debug, Serialize)]
struct SessionSettings {
    modalities: [&'static str; 2],
    turn_detection: TurnDetection,
    input_audio_transcription: InputAudioTranscription,
}

#[derive(Debug, Serialize)]
struct TurnDetection {
    #[serde(rename = "type")]
    kind: &'static str,
    silence_duration_ms: u32,
}

#[derive(Debug, Serialize)]
struct InputAudioTranscription {
    model: String,
    language: String,
}

impl SessionUpdate {
    pub fn new(interview: &InterviewConfig) -> Self {
        Self {
            kind: "session.update",
            session: SessionSettings {
                modalities: ["audio", "text"],
                turn_detection: TurnDetection {
                    kind: "server_vad",
                    silence_duration_ms: interview.silence_duration_ms,
                },
                input_audio_transcription: InputAudioTranscription {
                    model: interview.transcription_model.clone(),
                    language: interview.language.clone(),
                },
            },
        }
    }

    pub fn to_frame(&self) -> Result<String> {
        encode_frame(self)
    }
}

/// `response.create`: the kickoff instruction that makes the interviewer
/// greet the candidate and begin questioning.
#[derive(Debug, Serialize)]
pub struct ResponseCreate {
    #[serde(rename = "type")]
    kind: &'static str,
    response: ResponseSpec,
}

#[derive(Debug, Serialize)]
struct ResponseSpec {
    modalities: [&'static str; 2],
    instructions: String,
}

impl ResponseCreate {
    pub fn kickoff() -> Self {
        Self {
            kind: "response.create",
            response: ResponseSpec {
                modalities: ["audio", "text"],
                instructions: "Greet briefly and ask the candidate to introduce themselves \
                               and relate it to the selected topic. For every spoken \
                               question, also output the same text as output_text. \
                               English only."
                    .to_string(),
            },
        }
    }

    pub fn to_frame(&self) -> Result<String> {
        encode_frame(self)
    }
}

/// `input_audio_buffer.append`: one base64-encoded chunk of 16-bit PCM
/// microphone audio.
#[derive(Debug, Serialize)]
pub struct InputAudioAppend {
    #[serde(rename = "type")]
    kind: &'static str,
    audio: String,
}

impl InputAudioAppend {
    pub fn from_samples(samples: &[i16]) -> Self {
        let mut bytes = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        Self {
            kind: "input_audio_buffer.append",
            audio: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn to_frame(&self) -> Result<String> {
        encode_frame(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(frame: &str) -> Value {
        serde_json::from_str(frame).unwrap()
    }

    #[test]
    fn session_update_declares_modalities_and_vad() {
        let frame = SessionUpdate::new(&InterviewConfig::default())
            .to_frame()
            .unwrap();
        let msg = parse(&frame);

        assert_eq!(msg["type"], "session.update");
        assert_eq!(msg["session"]["modalities"][0], "audio");
        assert_eq!(msg["session"]["modalities"][1], "text");
        assert_eq!(msg["session"]["turn_detection"]["type"], "server_vad");
        assert_eq!(msg["session"]["turn_detection"]["silence_duration_ms"], 800);
        assert_eq!(
            msg["session"]["input_audio_transcription"]["language"],
            "en"
        );
    }

    #[test]
    fn session_update_honors_configured_silence_threshold() {
        let interview = InterviewConfig {
            silence_duration_ms: 1200,
            ..Default::default()
        };
        let msg = parse(&SessionUpdate::new(&interview).to_frame().unwrap());
        assert_eq!(msg["session"]["turn_detection"]["silence_duration_ms"], 1200);
    }

    #[test]
    fn kickoff_requests_text_mirror() {
        let msg = parse(&ResponseCreate::kickoff().to_frame().unwrap());
        assert_eq!(msg["type"], "response.create");
        let instructions = msg["response"]["instructions"].as_str().unwrap();
        // The text mirror instruction is what makes extraction possible
        assert!(instructions.contains("output the same text"));
    }

    #[test]
    fn audio_append_encodes_little_endian_pcm() {
        let msg = parse(&InputAudioAppend::from_samples(&[1i16, -2]).to_frame().unwrap());
        assert_eq!(msg["type"], "input_audio_buffer.append");
        let audio = msg["audio"].as_str().unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(audio)
            .unwrap();
        assert_eq!(decoded, vec![0x01, 0x00, 0xFE, 0xFF]);
    }
}
