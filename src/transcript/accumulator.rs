//! Ordered accumulation of finalized interview turns.
//!
//! The accumulator owns the two transcripts and the in-flight streaming
//! buffer. It is the only component that mutates them; the event router
//! drives it, and a [`TurnSink`] observer hears about committed
//! interviewer turns so they can be shown live.

use crate::transcript::dedupe::DedupeGate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who produced a finalized utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Interviewer,
    Candidate,
}

/// One finalized, attributed utterance. Immutable once committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Observer notified when an interviewer turn is committed.
///
/// This is the seam where the original rendered the question on screen;
/// swap in a collector for tests or a printer for the terminal.
pub trait TurnSink: Send {
    /// Called once per committed interviewer turn.
    fn on_turn(&mut self, turn: &Turn);

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Prints committed interviewer turns to stdout as they arrive.
pub struct PrintSink;

impl TurnSink for PrintSink {
    fn on_turn(&mut self, turn: &Turn) {
        println!("{}", turn.text);
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

/// A completed session's transcripts, in the shape the analysis service
/// consumes. Insertion order is significant: it is used to pair
/// question/answer rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub interviewer: Vec<String>,
    #[serde(default)]
    pub candidate: Vec<String>,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.interviewer.is_empty() && self.candidate.is_empty()
    }

    /// Write the transcript as pretty JSON.
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::VivaError::Other(format!("serialize transcript: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a transcript previously written by [`Transcript::save`].
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| crate::error::VivaError::Other(format!("parse transcript: {}", e)))
    }
}

/// Owns the two ordered turn sequences and the in-flight streaming buffer.
pub struct TurnAccumulator {
    interviewer: Vec<Turn>,
    candidate: Vec<Turn>,
    pending: String,
    gate: DedupeGate,
    sink: Option<Box<dyn TurnSink>>,
}

impl Default for TurnAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnAccumulator {
    pub fn new() -> Self {
        Self {
            interviewer: Vec::new(),
            candidate: Vec::new(),
            pending: String::new(),
            gate: DedupeGate::new(),
            sink: None,
        }
    }

    /// Attach an observer for committed interviewer turns.
    pub fn with_sink(mut self, sink: Box<dyn TurnSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Start a new pending buffer for a streamed utterance.
    pub fn begin_stream(&mut self) {
        self.pending.clear();
    }

    /// Append a streaming delta fragment (possibly empty) to the pending
    /// buffer. Never fails.
    pub fn append_delta(&mut self, fragment: &str) {
        self.pending.push_str(fragment);
    }

    /// Trim and return the pending buffer, resetting it to empty.
    /// Used at a stream's completion boundary.
    pub fn flush_pending(&mut self) -> String {
        let text = self.pending.trim().to_string();
        self.pending.clear();
        text
    }

    /// Commit an interviewer utterance through the de-dupe gate.
    ///
    /// Returns true if the turn was recorded.
    pub fn commit_interviewer_turn(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if !self.gate.admit(trimmed) {
            return false;
        }
        let turn = Turn {
            speaker: Speaker::Interviewer,
            text: trimmed.to_string(),
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.on_turn(&turn);
        }
        self.interviewer.push(turn);
        true
    }

    /// Commit a candidate utterance. Trimmed; empty text is dropped;
    /// no de-duplication — candidate speech arrives once per turn.
    pub fn commit_candidate_turn(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.candidate.push(Turn {
            speaker: Speaker::Candidate,
            text: trimmed.to_string(),
        });
        true
    }

    /// Clear both transcripts, the pending buffer and the de-dupe state.
    /// Called at the start of every new session.
    pub fn reset(&mut self) {
        self.interviewer.clear();
        self.candidate.clear();
        self.pending.clear();
        self.gate.reset();
    }

    pub fn interviewer_turns(&self) -> &[Turn] {
        &self.interviewer
    }

    pub fn candidate_turns(&self) -> &[Turn] {
        &self.candidate
    }

    pub fn is_empty(&self) -> bool {
        self.interviewer.is_empty() && self.candidate.is_empty()
    }

    /// Export both transcripts for analysis.
    pub fn transcript(&self, topic: &str) -> Transcript {
        Transcript {
            topic: topic.to_string(),
            interviewer: self.interviewer.iter().map(|t| t.text.clone()).collect(),
            candidate: self.candidate.iter().map(|t| t.text.clone()).collect(),
        }
    }
}
