//! Inbound event routing.
//!
//! The remote service's event naming has changed across protocol
//! generations and the discriminators overlap in ambiguous ways, so events
//! are classified by an ordered first-match-wins chain rather than a tagged
//! dispatch: specific shapes first, the permissive response-family
//! catch-all strictly last. Unmatched events are silently ignored, as are
//! frames that fail to parse.

use crate::transcript::{TurnAccumulator, extract_text};
use serde_json::Value;

/// Handle one raw text frame from the channel.
///
/// A frame that is not valid JSON is a no-op, not an error.
pub fn handle_frame(raw: &str, acc: &mut TurnAccumulator) {
    let Ok(event) = serde_json::from_str::<Value>(raw) else {
        return;
    };
    route_event(&event, acc);
}

/// Classify one parsed event and drive the accumulator accordingly.
pub fn route_event(event: &Value, acc: &mut TurnAccumulator) {
    let kind = event.get("type").and_then(Value::as_str).unwrap_or("");

    // Streaming delta, current generation: fragment nested in a typed
    // delta object.
    if kind == "response.delta"
        && event
            .get("delta")
            .and_then(|d| d.get("type"))
            .and_then(Value::as_str)
            == Some("output_text")
    {
        let fragment = event
            .get("delta")
            .and_then(|d| d.get("text"))
            .and_then(Value::as_str)
            .unwrap_or("");
        acc.append_delta(fragment);
        return;
    }

    // Streaming completion, current generation.
    if kind == "response.completed" {
        let text = acc.flush_pending();
        if !text.is_empty() {
            acc.commit_interviewer_turn(&text);
        }
        return;
    }

    // Streaming delta, legacy generation: fragment carried directly.
    if kind == "response.output_text.delta" {
        let fragment = event.get("delta").and_then(Value::as_str).unwrap_or("");
        acc.append_delta(fragment);
        return;
    }

    // Streaming completion, legacy generation.
    if kind == "response.output_text.completed" {
        let text = acc.flush_pending();
        if !text.is_empty() {
            acc.commit_interviewer_turn(&text);
        }
        return;
    }

    // Whole-message output: text arrives complete, bypass the pending
    // buffer.
    if kind == "response.output" && event.get("output").is_some_and(Value::is_array) {
        let text = extract_text(event);
        if !text.is_empty() {
            acc.commit_interviewer_turn(&text);
        }
        return;
    }

    // Response-created envelope wrapping output under `response`.
    if kind == "response.created"
        && let Some(response) = event.get("response")
        && response.get("output").is_some_and(Value::is_array)
    {
        let text = extract_text(response);
        if !text.is_empty() {
            acc.commit_interviewer_turn(&text);
        }
        return;
    }

    // Candidate transcription completed, under any of its three known
    // spellings. The shape is simple and fixed; no general extraction.
    if matches!(
        kind,
        "conversation.item.input_audio_transcription.completed"
            | "input_audio_transcription.completed"
            | "response.input_audio_transcription.completed"
    ) {
        let text = event
            .get("transcript")
            .and_then(Value::as_str)
            .or_else(|| event.get("text").and_then(Value::as_str))
            .unwrap_or("");
        acc.commit_candidate_turn(text);
        return;
    }

    // Conversation item created: branch on the item's role.
    if kind == "conversation.item.created"
        && let Some(item) = event.get("item")
    {
        match item.get("role").and_then(Value::as_str) {
            Some("assistant") => {
                let text = extract_text(event);
                if !text.is_empty() {
                    acc.commit_interviewer_turn(&text);
                }
            }
            Some("user") => {
                let text = extract_text(event);
                acc.commit_candidate_turn(&text);
            }
            _ => {}
        }
        return;
    }

    // Catch-all: anything in the response family, or anything carrying an
    // assistant role marker, that still smells like assistant text.
    // Must stay last so it never pre-empts the specific cases above.
    if kind.starts_with("response")
        || event.get("role").and_then(Value::as_str) == Some("assistant")
    {
        let text = extract_text(event);
        if !text.is_empty() {
            acc.commit_interviewer_turn(&text);
        }
    }
}
