//! Interview session lifecycle.
//!
//! One session covers one interview: open the realtime channel, configure
//! it, pump microphone audio up and route events down until the user or
//! the remote peer ends it. The controller owns every stateful part so a
//! session ends exactly once no matter who triggers it.

use crate::audio::AudioSource;
use crate::config::{InterviewConfig, ServerConfig};
use crate::error::{Result, VivaError};
use crate::realtime::{
    EventChannel, InputAudioAppend, ResponseCreate, SessionUpdate, WsChannel, handle_frame,
};
use crate::api::TokenProvider;
use crate::transcript::{Transcript, TurnAccumulator, TurnSink};
use std::time::Duration;

/// How often buffered microphone samples are drained and sent upstream.
const AUDIO_PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Lifecycle of one interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Ended,
}

/// Fetch a session token and open the realtime channel.
pub async fn open_channel(
    server: &ServerConfig,
    interview: &InterviewConfig,
    tokens: &dyn TokenProvider,
) -> Result<WsChannel> {
    let token = tokens.fetch_token(&interview.topic).await?;
    WsChannel::connect(&server.realtime_url, &server.realtime_model, &token).await
}

/// Drives one interview from start to end.
pub struct InterviewSession {
    interview: InterviewConfig,
    state: SessionState,
    accumulator: TurnAccumulator,
    channel: Option<Box<dyn EventChannel>>,
    audio: Option<Box<dyn AudioSource>>,
}

impl InterviewSession {
    pub fn new(interview: InterviewConfig) -> Self {
        Self {
            interview,
            state: SessionState::Idle,
            accumulator: TurnAccumulator::new(),
            channel: None,
            audio: None,
        }
    }

    /// Attach an observer that hears interviewer questions as they commit.
    pub fn with_sink(mut self, sink: Box<dyn TurnSink>) -> Self {
        self.accumulator = TurnAccumulator::new().with_sink(sink);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Begin the interview over an already-open channel.
    ///
    /// Sends the session configuration and the kickoff instruction, then
    /// starts the microphone. A failure at any step releases what was
    /// acquired and leaves the session idle, so a retry is possible.
    ///
    /// # Errors
    /// Returns `VivaError::SessionActive` if an interview is already
    /// running.
    pub async fn start(
        &mut self,
        mut channel: Box<dyn EventChannel>,
        mut audio: Box<dyn AudioSource>,
    ) -> Result<()> {
        if self.state == SessionState::Active {
            return Err(VivaError::SessionActive);
        }

        self.accumulator.reset();

        let configure = async {
            channel.send(SessionUpdate::new(&self.interview).to_frame()?).await?;
            channel.send(ResponseCreate::kickoff().to_frame()?).await?;
            audio.start()
        };
        if let Err(e) = configure.await {
            channel.close().await;
            let _ = audio.stop();
            self.state = SessionState::Idle;
            return Err(e);
        }

        self.channel = Some(channel);
        self.audio = Some(audio);
        self.state = SessionState::Active;
        Ok(())
    }

    /// Route events and pump microphone audio until the channel closes or
    /// a transport error occurs. Returns once the remote peer hangs up;
    /// the caller still ends the session.
    pub async fn run(&mut self) -> Result<()> {
        if self.state != SessionState::Active {
            return Ok(());
        }
        let Some(channel) = self.channel.as_mut() else {
            return Ok(());
        };
        let accumulator = &mut self.accumulator;
        let mut audio = self.audio.as_mut();

        enum Step {
            Frame(Option<String>),
            PumpAudio,
        }

        let mut tick = tokio::time::interval(AUDIO_PUMP_INTERVAL);
        loop {
            // Biased so a backlog of inbound frames cannot starve the
            // microphone pump.
            let step = tokio::select! {
                biased;
                _ = tick.tick() => Step::PumpAudio,
                frame = channel.recv() => Step::Frame(frame),
            };
            match step {
                Step::Frame(Some(raw)) => handle_frame(&raw, accumulator),
                Step::Frame(None) => return Ok(()),
                Step::PumpAudio => {
                    if let Some(source) = audio.as_deref_mut() {
                        let samples = source.read_samples()?;
                        if !samples.is_empty() {
                            let frame = InputAudioAppend::from_samples(&samples).to_frame()?;
                            channel.send(frame).await?;
                        }
                    }
                }
            }
        }
    }

    /// End the interview. Idempotent; each held resource is released
    /// independently, so a microphone failure cannot leak the channel.
    /// Ending a session that never started is a no-op.
    pub async fn end(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close().await;
        }
        if let Some(mut audio) = self.audio.take() {
            if let Err(e) = audio.stop() {
                eprintln!("viva: failed to stop audio capture: {}", e);
            }
        }
        if self.state == SessionState::Active {
            self.state = SessionState::Ended;
        }
    }

    /// Export what has been said so far.
    pub fn transcript(&self) -> Transcript {
        self.accumulator.transcript(&self.interview.topic)
    }
}
