//! Conversation transcript data model.
//!
//! The transcript is the ordered log of messages shown to the user. It is
//! append-only: entries are mutated in place only while a reply is still
//! streaming, never reordered, and removed only by a full `/clear`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Ai,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque, time-derived, unique identifier.
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    /// True while more fragments are expected for this message.
    #[serde(default)]
    pub is_typing: bool,
    /// True if the caller should render an embedded contact form
    /// instead of plain text.
    #[serde(default)]
    pub is_custom_ui: bool,
}

/// Generates a unique, time-derived message ID.
///
/// Millisecond timestamps alone can collide when messages are created in
/// quick succession, so a process-wide counter is appended.
fn next_message_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{seq}", chrono::Utc::now().timestamp_millis())
}

impl ChatMessage {
    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: next_message_id(),
            role,
            text: text.into(),
            is_typing: false,
            is_custom_ui: false,
        }
    }
}

/// Ordered log of conversation messages.
///
/// Invariant: at most one message has `is_typing = true` (the in-flight AI
/// reply); all other messages are finalized.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Returns the in-flight AI reply, if one is still streaming.
    pub fn typing_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.is_typing)
    }

    /// Appends a finalized user message and returns its ID.
    pub fn push_user(&mut self, text: impl Into<String>) -> String {
        let message = ChatMessage::new(MessageRole::User, text);
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Appends a finalized system message and returns its ID.
    pub fn push_system(&mut self, text: impl Into<String>) -> String {
        let message = ChatMessage::new(MessageRole::System, text);
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Appends a system message flagged for custom UI rendering (the
    /// embedded contact form) and returns its ID.
    pub fn push_system_custom_ui(&mut self, text: impl Into<String>) -> String {
        let mut message = ChatMessage::new(MessageRole::System, text);
        message.is_custom_ui = true;
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Begins an AI reply: appends an empty placeholder with the typing
    /// flag set and returns its ID.
    ///
    /// The caller must finalize (or abort) the previous reply first; the
    /// single-typing invariant is enforced by finalizing any stale entry.
    pub fn begin_reply(&mut self) -> String {
        self.finalize_reply();
        let mut message = ChatMessage::new(MessageRole::Ai, "");
        message.is_typing = true;
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Appends a streamed fragment to the message with the given ID.
    ///
    /// Fragments only ever append; text is never truncated or replaced.
    /// Returns false if no such message exists (the fragment is dropped).
    pub fn append_fragment(&mut self, id: &str, fragment: &str) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.text.push_str(fragment);
                true
            }
            None => false,
        }
    }

    /// Flips the typing flag off on the in-flight reply, if any.
    ///
    /// After this the message is immutable. Idempotent.
    pub fn finalize_reply(&mut self) {
        for message in &mut self.messages {
            message.is_typing = false;
        }
    }

    /// Replaces the entire transcript with a single fresh system message.
    pub fn clear_with(&mut self, banner: impl Into<String>) {
        self.messages.clear();
        self.push_system(banner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique() {
        let mut transcript = Transcript::new();
        let a = transcript.push_user("one");
        let b = transcript.push_user("two");
        let c = transcript.begin_reply();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_begin_reply_creates_typing_placeholder() {
        let mut transcript = Transcript::new();
        let id = transcript.begin_reply();

        let typing = transcript.typing_message().unwrap();
        assert_eq!(typing.id, id);
        assert_eq!(typing.role, MessageRole::Ai);
        assert_eq!(typing.text, "");
        assert!(typing.is_typing);
    }

    #[test]
    fn test_at_most_one_typing_message() {
        let mut transcript = Transcript::new();
        transcript.begin_reply();
        transcript.begin_reply();

        let typing_count = transcript
            .messages()
            .iter()
            .filter(|m| m.is_typing)
            .count();
        assert_eq!(typing_count, 1);
    }

    #[test]
    fn test_fragments_only_append() {
        let mut transcript = Transcript::new();
        let id = transcript.begin_reply();

        let mut last_len = 0;
        for fragment in ["Acc", "ess ", "Granted."] {
            transcript.append_fragment(&id, fragment);
            let text = &transcript.typing_message().unwrap().text;
            assert!(text.len() >= last_len, "text must never shrink");
            last_len = text.len();
        }

        transcript.finalize_reply();
        let reply = transcript.last().unwrap();
        assert_eq!(reply.text, "Access Granted.");
        assert!(!reply.is_typing);
    }

    #[test]
    fn test_append_fragment_unknown_id_is_dropped() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        assert!(!transcript.append_fragment("no-such-id", "x"));
    }

    #[test]
    fn test_clear_reduces_to_single_system_message() {
        let mut transcript = Transcript::new();
        transcript.push_system("online");
        transcript.push_user("hello");
        transcript.begin_reply();

        transcript.clear_with("wiped");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().role, MessageRole::System);
        assert_eq!(transcript.last().unwrap().text, "wiped");

        // Clearing again yields the same single-message shape.
        transcript.clear_with("wiped");
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_custom_ui_flag_set_only_on_signal_messages() {
        let mut transcript = Transcript::new();
        transcript.push_system("plain");
        transcript.push_system_custom_ui("form");

        assert!(!transcript.messages()[0].is_custom_ui);
        assert!(transcript.messages()[1].is_custom_ui);
    }
}
