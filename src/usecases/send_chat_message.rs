//! Use case for sending a message into the open conversation.
//!
//! This module provides the `ChatMessageSender` trait and the
//! `send_chat_message` function. Delivery is fire-and-forget: the hub
//! broadcasts the stored message back to every participant, so the
//! sender's transcript is updated by that echo rather than locally.

use crate::domain::ids::ConversationId;

/// Command to send a message into a conversation, if one is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendChatCommand {
    pub conversation: Option<ConversationId>,
    pub text: String,
}

/// Errors that can occur at the source level (the hub channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSendSourceError {
    /// The websocket is not connected.
    NotConnected,
    /// The outbound queue is gone; the monitor has shut down.
    ChannelClosed,
}

/// Domain-level errors for the send operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendChatError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// No conversation is open on the current page.
    NoConversationOpen,
    /// The websocket is not connected.
    NotConnected,
    /// The hub monitor has shut down.
    ChannelClosed,
}

/// Trait for pushing invocations onto the hub's outbound queue.
pub trait ChatMessageSender {
    /// Queues a message for the given conversation.
    ///
    /// # Errors
    /// Returns `ChatSendSourceError` if the invocation cannot be queued.
    fn send_chat(&self, conversation: ConversationId, text: &str)
        -> Result<(), ChatSendSourceError>;
}

impl<T: ChatMessageSender + ?Sized> ChatMessageSender for &T {
    fn send_chat(
        &self,
        conversation: ConversationId,
        text: &str,
    ) -> Result<(), ChatSendSourceError> {
        (*self).send_chat(conversation, text)
    }
}

/// Sends a message into the open conversation.
///
/// Validates that a conversation is open and that the text is non-empty
/// after trimming, then delegates to the `ChatMessageSender`.
///
/// # Errors
/// Returns `SendChatError::EmptyMessage` for whitespace-only text and
/// `SendChatError::NoConversationOpen` when nothing is selected. Maps
/// source errors to domain errors otherwise.
pub fn send_chat_message(
    sender: &dyn ChatMessageSender,
    command: SendChatCommand,
) -> Result<(), SendChatError> {
    let text = command.text.trim();
    if text.is_empty() {
        return Err(SendChatError::EmptyMessage);
    }

    let conversation = command
        .conversation
        .ok_or(SendChatError::NoConversationOpen)?;

    sender
        .send_chat(conversation, text)
        .map_err(map_source_error)
}

fn map_source_error(error: ChatSendSourceError) -> SendChatError {
    match error {
        ChatSendSourceError::NotConnected => SendChatError::NotConnected,
        ChatSendSourceError::ChannelClosed => SendChatError::ChannelClosed,
    }
}
