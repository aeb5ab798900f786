use super::ids::{MessageId, UserId};

/// Body of a chat message: plain text or a named sticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Sticker(String),
}

impl MessageContent {
    /// Returns the display content: sticker label, or the raw text.
    pub fn display(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Sticker(name) if name.is_empty() => "[Sticker]".to_owned(),
            MessageContent::Sticker(name) => format!("[Sticker] {}", name),
        }
    }

    /// Returns the searchable text of the message, empty for stickers.
    pub fn text(&self) -> &str {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Sticker(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub content: MessageContent,
    pub sent_at_unix_ms: i64,
    /// Sender avatar as delivered by the service. Carried for parity with
    /// the wire record; the terminal renderer has no use for it.
    #[cfg_attr(not(test), allow(dead_code))]
    pub avatar_url: Option<String>,
    /// Whether the local account authored this message. Stamped by the
    /// shell from the session once the message crosses the adapter
    /// boundary; adapters always deliver it as `false`.
    pub is_mine: bool,
}

/// One row of an in-conversation search response. Results only reference
/// messages; jumping back into the transcript goes through the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub message_id: MessageId,
    pub sender_name: String,
    pub content: String,
    pub sent_at_unix_ms: i64,
}
