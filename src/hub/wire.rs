use serde::{Deserialize, Serialize};

use crate::domain::events::{
    HubEvent, InboundDirectMessage, InboundGroupMessage, MembershipChange,
};
use crate::domain::ids::{ConversationId, GroupId, MessageId, UserId};
use crate::domain::message::{ChatMessage, MessageContent, SearchHit};

/// Ids arrive as JSON numbers or as numeric strings depending on which
/// server path produced the frame. They are parsed exactly once, here;
/// everything past this module works with typed ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn parse(&self, field: &'static str) -> Result<i64, DecodeError> {
        match self {
            RawId::Number(value) => Ok(*value),
            RawId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| DecodeError::InvalidId(field)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InboundFrame {
    Connected {
        user_id: RawId,
    },
    MessageReceived {
        message_id: RawId,
        sender_id: RawId,
        recipient_id: RawId,
        sender_name: String,
        content: String,
        sent_at: i64,
        #[serde(default)]
        avatar_url: Option<String>,
    },
    GroupMessageReceived {
        message_id: RawId,
        group_id: RawId,
        sender_id: RawId,
        sender_name: String,
        content: String,
        sent_at: i64,
        #[serde(default)]
        avatar_url: Option<String>,
    },
    GroupStickerReceived {
        message_id: RawId,
        group_id: RawId,
        sender_id: RawId,
        sender_name: String,
        sticker: String,
        sent_at: i64,
        #[serde(default)]
        avatar_url: Option<String>,
    },
    MemberAdded {
        group_id: RawId,
        user_id: RawId,
        display_name: String,
    },
    MemberRemoved {
        group_id: RawId,
        user_id: RawId,
        display_name: String,
    },
    SearchResults {
        #[serde(default)]
        friend_id: Option<RawId>,
        #[serde(default)]
        group_id: Option<RawId>,
        results: Vec<SearchResultRecord>,
    },
    /// Frame types this client does not understand. Skipped, never an
    /// error: the server is free to grow its vocabulary.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct SearchResultRecord {
    message_id: RawId,
    sender_name: String,
    content: String,
    sent_at: i64,
}

#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    InvalidId(&'static str),
    /// A search_results frame naming neither a friend nor a group.
    MissingSearchTarget,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Json(source) => write!(f, "malformed frame: {source}"),
            DecodeError::InvalidId(field) => write!(f, "non-numeric id in field {field}"),
            DecodeError::MissingSearchTarget => {
                f.write_str("search_results frame without a conversation")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes one text frame. `Ok(None)` means the frame was understood as
/// something this client deliberately ignores.
pub fn decode_frame(raw: &str) -> Result<Option<HubEvent>, DecodeError> {
    let frame: InboundFrame = serde_json::from_str(raw).map_err(DecodeError::Json)?;

    let event = match frame {
        InboundFrame::Connected { user_id } => HubEvent::SessionConfirmed {
            user_id: UserId(user_id.parse("user_id")?),
        },
        InboundFrame::MessageReceived {
            message_id,
            sender_id,
            recipient_id,
            sender_name,
            content,
            sent_at,
            avatar_url,
        } => {
            let sender = UserId(sender_id.parse("sender_id")?);
            HubEvent::DirectMessage(InboundDirectMessage {
                sender_id: sender,
                recipient_id: UserId(recipient_id.parse("recipient_id")?),
                message: ChatMessage {
                    id: MessageId(message_id.parse("message_id")?),
                    sender_id: sender,
                    sender_name,
                    content: MessageContent::Text(content),
                    sent_at_unix_ms: sent_at,
                    avatar_url,
                    is_mine: false,
                },
            })
        }
        InboundFrame::GroupMessageReceived {
            message_id,
            group_id,
            sender_id,
            sender_name,
            content,
            sent_at,
            avatar_url,
        } => HubEvent::GroupMessage(InboundGroupMessage {
            group_id: GroupId(group_id.parse("group_id")?),
            message: ChatMessage {
                id: MessageId(message_id.parse("message_id")?),
                sender_id: UserId(sender_id.parse("sender_id")?),
                sender_name,
                content: MessageContent::Text(content),
                sent_at_unix_ms: sent_at,
                avatar_url,
                is_mine: false,
            },
        }),
        InboundFrame::GroupStickerReceived {
            message_id,
            group_id,
            sender_id,
            sender_name,
            sticker,
            sent_at,
            avatar_url,
        } => HubEvent::GroupMessage(InboundGroupMessage {
            group_id: GroupId(group_id.parse("group_id")?),
            message: ChatMessage {
                id: MessageId(message_id.parse("message_id")?),
                sender_id: UserId(sender_id.parse("sender_id")?),
                sender_name,
                content: MessageContent::Sticker(sticker),
                sent_at_unix_ms: sent_at,
                avatar_url,
                is_mine: false,
            },
        }),
        InboundFrame::MemberAdded {
            group_id,
            user_id,
            display_name,
        } => HubEvent::MemberAdded(MembershipChange {
            group_id: GroupId(group_id.parse("group_id")?),
            user_id: UserId(user_id.parse("user_id")?),
            display_name,
        }),
        InboundFrame::MemberRemoved {
            group_id,
            user_id,
            display_name,
        } => HubEvent::MemberRemoved(MembershipChange {
            group_id: GroupId(group_id.parse("group_id")?),
            user_id: UserId(user_id.parse("user_id")?),
            display_name,
        }),
        InboundFrame::SearchResults {
            friend_id,
            group_id,
            results,
        } => {
            let conversation = match (friend_id, group_id) {
                (Some(id), _) => ConversationId::Friend(UserId(id.parse("friend_id")?)),
                (None, Some(id)) => ConversationId::Group(GroupId(id.parse("group_id")?)),
                (None, None) => return Err(DecodeError::MissingSearchTarget),
            };
            let mut hits = Vec::with_capacity(results.len());
            for record in results {
                hits.push(SearchHit {
                    message_id: MessageId(record.message_id.parse("message_id")?),
                    sender_name: record.sender_name,
                    content: record.content,
                    sent_at_unix_ms: record.sent_at,
                });
            }
            HubEvent::SearchResults { conversation, hits }
        }
        InboundFrame::Unknown => return Ok(None),
    };

    Ok(Some(event))
}

/// Client-to-server invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    SendMessage {
        #[serde(skip_serializing_if = "Option::is_none")]
        friend_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_id: Option<i64>,
        content: String,
    },
    SearchMessages {
        #[serde(skip_serializing_if = "Option::is_none")]
        friend_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_id: Option<i64>,
        query: String,
    },
}

pub fn send_message_frame(conversation: ConversationId, content: &str) -> OutboundFrame {
    match conversation {
        ConversationId::Friend(UserId(id)) => OutboundFrame::SendMessage {
            friend_id: Some(id),
            group_id: None,
            content: content.to_owned(),
        },
        ConversationId::Group(GroupId(id)) => OutboundFrame::SendMessage {
            friend_id: None,
            group_id: Some(id),
            content: content.to_owned(),
        },
    }
}

pub fn search_messages_frame(conversation: ConversationId, query: &str) -> OutboundFrame {
    match conversation {
        ConversationId::Friend(UserId(id)) => OutboundFrame::SearchMessages {
            friend_id: Some(id),
            group_id: None,
            query: query.to_owned(),
        },
        ConversationId::Group(GroupId(id)) => OutboundFrame::SearchMessages {
            friend_id: None,
            group_id: Some(id),
            query: query.to_owned(),
        },
    }
}

pub fn encode_frame(frame: &OutboundFrame) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}
