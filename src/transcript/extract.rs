//! Best-effort text extraction from realtime protocol events.
//!
//! The remote service has shipped at least two generations of its event
//! schema, and the same utterance can arrive wrapped in several different
//! shapes. [`extract_text`] tries the known shapes in priority order and
//! degrades to an empty string instead of failing — a missing or malformed
//! field is never an error here.

use crate::defaults::{SCAN_MAX_CHARS, SCAN_MIN_CHARS};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[^>]+(>|$)").expect("markup pattern is valid")
});

#[allow(clippy::expect_used)]
static TRANSCRIPT_SCAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)"transcript"\s*:\s*"([^"]{{{SCAN_MIN_CHARS},{SCAN_MAX_CHARS}}})""#
    ))
    .expect("transcript scan pattern is valid")
});

/// Extract the best-effort plain-text payload from a protocol event.
///
/// Shapes are tried in priority order until one yields non-empty text:
/// 1. a top-level `output` array of items with `content` chunk arrays,
/// 2. the same shape nested under a `response` envelope,
/// 3. an `item` object (conversation item events), including item-level
///    `text`/`transcript` fields,
/// 4. a bare top-level `text` string,
/// 5. a bounded scan of the serialized event for a quoted `"transcript"`
///    value — a deliberately lossy net for shapes we have never seen.
///
/// All text is stripped of markup before being returned; it may end up
/// rendered verbatim and must never carry tags.
pub fn extract_text(event: &Value) -> String {
    if let Some(items) = event.get("output").and_then(Value::as_array) {
        let text = collect_output_items(items);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(items) = event
        .get("response")
        .and_then(|r| r.get("output"))
        .and_then(Value::as_array)
    {
        let text = collect_output_items(items);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(item) = event.get("item") {
        let text = collect_item(item);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(text) = event.get("text").and_then(Value::as_str) {
        let stripped = strip_markup(text);
        if !stripped.is_empty() {
            return stripped;
        }
    }

    scan_serialized(event)
}

/// Remove anything resembling an HTML/markup tag, then trim.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").trim().to_string()
}

/// Text carried by one content chunk, under any of its known field names.
fn chunk_text(chunk: &Value) -> Option<String> {
    if let Some(t) = chunk.get("text").and_then(Value::as_str) {
        if !t.trim().is_empty() {
            return Some(t.trim().to_string());
        }
    }
    if let Some(v) = chunk.get("value").and_then(Value::as_str) {
        if !v.trim().is_empty() {
            return Some(v.trim().to_string());
        }
    }
    // transcript may be a bare string or a { text: ... } object
    match chunk.get("transcript") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(obj) => obj
            .get("text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from),
        None => None,
    }
}

/// Concatenate all chunk texts found in an `output` item array.
fn collect_output_items(items: &[Value]) -> String {
    let chunks: Vec<String> = items
        .iter()
        .filter_map(|o| o.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(chunk_text)
        .collect();
    strip_markup(&chunks.join(" "))
}

/// Collect text from a conversation item: its content chunks plus the
/// item-level `text` and `transcript` fields some generations use.
fn collect_item(item: &Value) -> String {
    let mut chunks: Vec<String> = Vec::new();

    if let Some(content) = item.get("content").and_then(Value::as_array) {
        chunks.extend(content.iter().filter_map(chunk_text));
    }

    if let Some(t) = item.get("text").and_then(Value::as_str)
        && !t.trim().is_empty()
    {
        chunks.push(t.trim().to_string());
    }

    match item.get("transcript") {
        Some(Value::String(s)) if !s.trim().is_empty() => chunks.push(s.trim().to_string()),
        Some(obj) => {
            if let Some(t) = obj.get("text").and_then(Value::as_str)
                && !t.trim().is_empty()
            {
                chunks.push(t.trim().to_string());
            }
        }
        None => {}
    }

    strip_markup(&chunks.join(" "))
}

/// Last-resort scan of the serialized event for a plausible transcript.
fn scan_serialized(event: &Value) -> String {
    let Ok(serialized) = serde_json::to_string(event) else {
        return String::new();
    };
    TRANSCRIPT_SCAN
        .captures(&serialized)
        .and_then(|c| c.get(1))
        .map(|m| strip_markup(m.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_from_output_array() {
        let event = json!({
            "type": "response.output",
            "output": [
                { "content": [ { "type": "output_text", "text": "What is a netlist?" } ] }
            ]
        });
        assert_eq!(extract_text(&event), "What is a netlist?");
    }

    #[test]
    fn joins_multiple_chunks_with_spaces() {
        let event = json!({
            "output": [
                { "content": [ { "text": "First part." }, { "value": "Second part." } ] },
                { "content": [ { "text": "Third part." } ] }
            ]
        });
        assert_eq!(extract_text(&event), "First part. Second part. Third part.");
    }

    #[test]
    fn extracts_from_response_envelope() {
        let event = json!({
            "type": "response.created",
            "response": {
                "output": [ { "content": [ { "text": "Describe your design process." } ] } ]
            }
        });
        assert_eq!(extract_text(&event), "Describe your design process.");
    }

    #[test]
    fn extracts_from_item_content_chunks() {
        let event = json!({
            "item": {
                "role": "assistant",
                "content": [ { "transcript": "Tell me about impedance matching." } ]
            }
        });
        assert_eq!(extract_text(&event), "Tell me about impedance matching.");
    }

    #[test]
    fn extracts_from_item_transcript_object() {
        let event = json!({
            "item": {
                "content": [ { "transcript": { "text": "Walk me through a failure." } } ]
            }
        });
        assert_eq!(extract_text(&event), "Walk me through a failure.");
    }

    #[test]
    fn extracts_item_level_direct_fields() {
        let event = json!({
            "item": { "text": "Direct item text", "transcript": "and transcript" }
        });
        assert_eq!(extract_text(&event), "Direct item text and transcript");
    }

    #[test]
    fn falls_back_to_bare_text_field() {
        let event = json!({ "type": "something", "text": "Bare text here" });
        assert_eq!(extract_text(&event), "Bare text here");
    }

    #[test]
    fn scan_finds_buried_transcript() {
        let event = json!({
            "type": "totally.unknown.event",
            "payload": { "deep": { "transcript": "My answer about tolerances" } }
        });
        assert_eq!(extract_text(&event), "My answer about tolerances");
    }

    #[test]
    fn scan_ignores_too_short_values() {
        // 3 chars is below the scan's lower bound — likely an id, not speech
        let event = json!({ "payload": { "transcript": "abc" } });
        assert_eq!(extract_text(&event), "");
    }

    #[test]
    fn strips_markup_from_chunk_text() {
        let event = json!({
            "output": [ { "content": [ { "text": "<b>Score</b>: 9" } ] } ]
        });
        assert_eq!(extract_text(&event), "Score: 9");
    }

    #[test]
    fn empty_event_yields_empty_string() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({ "type": "noise" })), "");
    }

    #[test]
    fn malformed_shapes_degrade_to_empty() {
        // output is not an array, content is not an array, text is a number
        assert_eq!(extract_text(&json!({ "output": "nope" })), "");
        assert_eq!(extract_text(&json!({ "output": [ { "content": 7 } ] })), "");
        assert_eq!(extract_text(&json!({ "text": 42 })), "");
    }

    #[test]
    fn priority_prefers_output_over_bare_text() {
        let event = json!({
            "output": [ { "content": [ { "text": "from output" } ] } ],
            "text": "from bare field"
        });
        assert_eq!(extract_text(&event), "from output");
    }

    #[test]
    fn strip_markup_removes_tags_and_trims() {
        assert_eq!(strip_markup("  <i>hello</i> world  "), "hello world");
        assert_eq!(strip_markup("no tags"), "no tags");
        assert_eq!(strip_markup("<unclosed"), "");
    }
}
