use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatSender {
    User,
    Advisor,
}

impl std::fmt::Display for ChatSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatSender::User => write!(f, "user"),
            ChatSender::Advisor => write!(f, "advisor"),
        }
    }
}

/// One entry in the advisor chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier
    pub id: Uuid,

    /// User or Advisor
    pub sender: ChatSender,

    /// Message body
    pub text: String,

    /// When the message was appended to the log
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}
