use std::time::Duration;

use crate::errors::CoreError;
use crate::models::chat::{ChatMessage, ChatSender};

/// Opening message the advisor greets the user with.
const GREETING: &str = "Hello! I'm your portfolio advisor. How can I help you today?";

/// Canned replies, cycled in order. The advisor is scripted — there is
/// no model call and no context awareness.
const CANNED_REPLIES: [&str; 2] = [
    "Based on your portfolio, you're well-diversified with strong positions in \
     technology. Your 5.2% gain reflects solid performance, and your tech \
     allocation at 73.8% is aggressive but suitable for growth-focused investors.",
    "I understand your question about your portfolio. Based on your current \
     holdings, I recommend reviewing your asset allocation and considering \
     diversification strategies.",
];

/// Suggested prompts shown as quick-select chips under the input.
const STARTER_QUESTIONS: [&str; 3] = [
    "How's my portfolio performing?",
    "Am I too concentrated in tech?",
    "Suggest hedging strategies",
];

/// The scripted advisor chat.
///
/// `send` appends the user's message and stages the next canned reply;
/// `deliver_reply` waits the configured delay and appends it. The delay
/// is an owned future, not an ambient timer: dropping it (or the whole
/// service) before it elapses delivers nothing, so a torn-down chat
/// never receives a stale update. While a reply is staged the chat is
/// "typing" and further sends are rejected.
pub struct AdvisorService {
    messages: Vec<ChatMessage>,
    pending_reply: Option<String>,
    next_reply: usize,
    reply_delay: Duration,
}

impl AdvisorService {
    /// A fresh chat, greeting already in the log, with the default
    /// one-second reply delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(1000))
    }

    /// A fresh chat with a custom reply delay (tests use ~1 ms).
    pub fn with_delay(reply_delay: Duration) -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatSender::Advisor, GREETING)],
            pending_reply: None,
            next_reply: 0,
            reply_delay,
        }
    }

    /// Suggested prompts for the quick-select chips.
    #[must_use]
    pub fn starter_questions() -> &'static [&'static str] {
        &STARTER_QUESTIONS
    }

    /// Change the reply delay for subsequent deliveries.
    pub fn set_delay(&mut self, reply_delay: Duration) {
        self.reply_delay = reply_delay;
    }

    /// The full message log, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply is staged but not yet delivered.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Append the user's message and stage the next canned reply.
    ///
    /// Rejects empty/whitespace-only text, and rejects sends while a
    /// reply is pending (the send control is disabled while typing).
    pub fn send(&mut self, text: &str) -> Result<&ChatMessage, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Chat message must not be empty".into(),
            ));
        }
        if self.is_typing() {
            return Err(CoreError::ValidationError(
                "The advisor is still composing a reply".into(),
            ));
        }

        self.messages
            .push(ChatMessage::new(ChatSender::User, trimmed));

        let reply = CANNED_REPLIES[self.next_reply % CANNED_REPLIES.len()];
        self.next_reply += 1;
        self.pending_reply = Some(reply.to_string());

        Ok(self.messages.last().expect("message was just pushed"))
    }

    /// Wait the reply delay, then append the staged reply to the log.
    ///
    /// Returns the delivered message, or `None` when nothing is staged.
    /// The staged reply is only consumed after the delay completes, so
    /// cancelling the future leaves the chat ready to deliver later.
    pub async fn deliver_reply(&mut self) -> Option<&ChatMessage> {
        let reply = self.pending_reply.clone()?;
        tokio::time::sleep(self.reply_delay).await;

        self.pending_reply = None;
        self.messages
            .push(ChatMessage::new(ChatSender::Advisor, reply));
        self.messages.last()
    }
}

impl Default for AdvisorService {
    fn default() -> Self {
        Self::new()
    }
}
