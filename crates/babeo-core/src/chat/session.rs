//! Chat session controller: transcript, input buffer and loading flag.
//!
//! Submitting is split in two halves so the owner can run the gateway call in
//! the background: [`ChatSession::submit`] records the user message and hands
//! back a [`PendingReply`] ticket; [`ChatSession::complete`] appends the
//! assistant reply for that ticket. Each ticket carries a sequence number and
//! only the outstanding one is accepted, so a reply that arrives after a
//! [`ChatSession::reset`] is dropped.

use serde::Serialize;
use tracing::debug;

use super::gateway::ChatGateway;

pub const GREETING: &str =
    "Hi there! I'm Babeo. How can I support you and your little one today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Ticket for a gateway call started by [`ChatSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub seq: u64,
    pub utterance: String,
}

impl PendingReply {
    pub async fn resolve(self, gateway: &ChatGateway) -> ChatReply {
        let text = gateway.respond(&self.utterance).await;
        ChatReply {
            seq: self.seq,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub seq: u64,
    pub text: String,
}

pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    input: String,
    loading: bool,
    open: bool,
    next_seq: u64,
    outstanding: Option<u64>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            input: String::new(),
            loading: false,
            open: false,
            next_seq: 1,
            outstanding: None,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a submit right now would be accepted.
    pub fn can_submit(&self, text: &str) -> bool {
        !self.loading && !text.trim().is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel. An in-flight reply still lands in the transcript.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Record a user message and start a reply. Returns `None` for blank text
    /// and while another reply is outstanding.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        if !self.can_submit(text) {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transcript.push(ChatMessage::user(text));
        self.input.clear();
        self.loading = true;
        self.outstanding = Some(seq);
        Some(PendingReply {
            seq,
            utterance: text.to_string(),
        })
    }

    /// Submit the current input buffer.
    pub fn submit_input(&mut self) -> Option<PendingReply> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Append the reply for the outstanding ticket. Returns false (and drops
    /// the reply) when the ticket is stale.
    pub fn complete(&mut self, reply: ChatReply) -> bool {
        if self.outstanding != Some(reply.seq) {
            debug!("chat: dropping stale reply #{}", reply.seq);
            return false;
        }
        self.outstanding = None;
        self.loading = false;
        self.transcript.push(ChatMessage::assistant(reply.text));
        true
    }

    /// Back to a fresh greeting-only session; any outstanding reply becomes
    /// stale.
    pub fn reset(&mut self) {
        self.transcript = vec![ChatMessage::assistant(GREETING)];
        self.input.clear();
        self.loading = false;
        self.outstanding = None;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::gateway::RESTING_REPLY;

    #[test]
    fn starts_with_greeting() {
        let chat = ChatSession::new();
        assert_eq!(chat.transcript(), [ChatMessage::assistant(GREETING)]);
        assert!(!chat.is_loading());
        assert!(!chat.is_open());
    }

    #[test]
    fn blank_submits_are_ignored() {
        let mut chat = ChatSession::new();
        assert!(chat.submit("").is_none());
        assert!(chat.submit("   ").is_none());
        assert!(chat.submit("\t\n").is_none());
        assert_eq!(chat.transcript().len(), 1);
        assert!(!chat.is_loading());
    }

    #[test]
    fn submit_then_complete_orders_messages() {
        let mut chat = ChatSession::new();
        chat.set_input("When can I start solids?");

        let pending = chat.submit_input().unwrap();
        assert_eq!(pending.utterance, "When can I start solids?");
        assert!(chat.is_loading());
        assert_eq!(chat.input(), "");
        assert_eq!(chat.transcript().len(), 2);
        assert_eq!(
            chat.transcript()[1],
            ChatMessage::user("When can I start solids?")
        );

        assert!(chat.complete(ChatReply {
            seq: pending.seq,
            text: "Around six months.".into(),
        }));
        assert!(!chat.is_loading());
        let roles: Vec<ChatRole> = chat.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, [ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
        assert_eq!(chat.transcript()[2].text, "Around six months.");
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut chat = ChatSession::new();
        let _first = chat.submit("one").unwrap();
        assert!(chat.submit("two").is_none());
        assert_eq!(chat.transcript().len(), 2);
    }

    #[test]
    fn reply_after_reset_is_dropped() {
        let mut chat = ChatSession::new();
        let pending = chat.submit("hello").unwrap();
        chat.reset();

        assert!(!chat.complete(ChatReply {
            seq: pending.seq,
            text: "late".into(),
        }));
        assert_eq!(chat.transcript(), [ChatMessage::assistant(GREETING)]);
        assert!(!chat.is_loading());

        // a fresh submit gets a new, accepted ticket
        let next = chat.submit("again").unwrap();
        assert_ne!(next.seq, pending.seq);
        assert!(chat.complete(ChatReply {
            seq: next.seq,
            text: "ok".into(),
        }));
    }

    #[test]
    fn closing_panel_keeps_in_flight_reply() {
        let mut chat = ChatSession::new();
        chat.open();
        let pending = chat.submit("hello").unwrap();
        chat.close();
        assert!(chat.complete(ChatReply {
            seq: pending.seq,
            text: "hi".into(),
        }));
        assert_eq!(chat.transcript().len(), 3);
    }

    #[tokio::test]
    async fn resolved_ticket_completes_without_credentials() {
        let mut chat = ChatSession::new();
        let gateway = ChatGateway::new(None);
        let pending = chat.submit("When can I start solids?").unwrap();
        let reply = pending.resolve(&gateway).await;
        assert!(chat.complete(reply));
        assert_eq!(chat.transcript().len(), 3);
        assert_eq!(chat.transcript()[2], ChatMessage::assistant(RESTING_REPLY));
        assert!(!chat.is_loading());
    }
}
