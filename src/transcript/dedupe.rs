//! Consecutive-repeat suppression for interviewer text.
//!
//! The upstream protocol frequently delivers the same logical utterance
//! through several overlapping event shapes (a streaming completion and a
//! conversation-item event for the same turn, for example). The gate
//! suppresses exact consecutive repeats only — a phrase repeated later in
//! the interview, after other text intervened, is admitted again.

/// Gate deciding whether an interviewer text should be committed.
#[derive(Debug, Default)]
pub struct DedupeGate {
    last_admitted: Option<String>,
}

impl DedupeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `text` should be committed.
    ///
    /// Rules, in order: trim; reject empty; reject an exact repeat of the
    /// last admitted text; otherwise admit and remember.
    pub fn admit(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.last_admitted.as_deref() == Some(trimmed) {
            return false;
        }
        self.last_admitted = Some(trimmed.to_string());
        true
    }

    /// Forget the last admitted text. Called at session start.
    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_first_text() {
        let mut gate = DedupeGate::new();
        assert!(gate.admit("Tell me about yourself."));
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        let mut gate = DedupeGate::new();
        assert!(!gate.admit(""));
        assert!(!gate.admit("   \n\t "));
    }

    #[test]
    fn rejects_consecutive_repeat() {
        let mut gate = DedupeGate::new();
        assert!(gate.admit("Same question"));
        assert!(!gate.admit("Same question"));
        assert!(!gate.admit("  Same question  ")); // trim before comparing
    }

    #[test]
    fn readmits_after_intervening_text() {
        let mut gate = DedupeGate::new();
        assert!(gate.admit("Question A"));
        assert!(gate.admit("Question B"));
        // Not a set: A is admissible again once B intervened
        assert!(gate.admit("Question A"));
    }

    #[test]
    fn near_duplicates_are_admitted() {
        // Exact-match only; similar-but-different text passes
        let mut gate = DedupeGate::new();
        assert!(gate.admit("Tell me about yourself"));
        assert!(gate.admit("Tell me about yourself."));
    }

    #[test]
    fn reset_clears_last_admitted() {
        let mut gate = DedupeGate::new();
        assert!(gate.admit("Repeated"));
        gate.reset();
        assert!(gate.admit("Repeated"));
    }
}
