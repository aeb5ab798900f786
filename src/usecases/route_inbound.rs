//! Decides what happens to a message pushed by the hub: render it into
//! the open conversation or drop it. Every participant receives every
//! broadcast, so the open-conversation check is the only thing keeping
//! other people's chats out of the transcript.

use crate::domain::ids::{ConversationId, GroupId, UserId};
use crate::domain::message::ChatMessage;
use crate::domain::session::{Ownership, UserSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundDisposition {
    /// The message belongs to the open conversation.
    Render,
    /// A conversation is open, but a different one.
    OtherConversation,
    /// No conversation is open on the page at all.
    NoConversationOpen,
}

/// A direct message is rendered iff the open conversation is the friend
/// on either end of it. The recipient side matters because the sender's
/// own messages come back with the friend in the recipient seat.
pub fn direct_message_disposition(
    open: Option<ConversationId>,
    sender: UserId,
    recipient: UserId,
) -> InboundDisposition {
    match open {
        None => InboundDisposition::NoConversationOpen,
        Some(ConversationId::Friend(friend)) if friend == sender || friend == recipient => {
            InboundDisposition::Render
        }
        Some(_) => InboundDisposition::OtherConversation,
    }
}

/// A group message is rendered iff its group is the open conversation.
pub fn group_message_disposition(
    open: Option<ConversationId>,
    group: GroupId,
) -> InboundDisposition {
    match open {
        None => InboundDisposition::NoConversationOpen,
        Some(ConversationId::Group(open_group)) if open_group == group => {
            InboundDisposition::Render
        }
        Some(_) => InboundDisposition::OtherConversation,
    }
}

/// Stamps `is_mine` from the session. Adapters always deliver `false`;
/// only this step may flip it. The returned classification lets the
/// caller log the unknown-self case, where the session has no confirmed
/// user id yet and everything renders as incoming.
pub fn stamp_ownership(session: &UserSession, message: &mut ChatMessage) -> Ownership {
    let ownership = session.classify(message.sender_id);
    message.is_mine = ownership == Ownership::Mine;
    ownership
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::MessageId;
    use crate::domain::message::MessageContent;

    fn message(sender: i64) -> ChatMessage {
        ChatMessage {
            id: MessageId(1),
            sender_id: UserId(sender),
            sender_name: "Lan".to_owned(),
            content: MessageContent::Text("chào".to_owned()),
            sent_at_unix_ms: 1_700_000_000_000,
            avatar_url: None,
            is_mine: false,
        }
    }

    #[test]
    fn renders_direct_message_from_the_open_friend() {
        let open = Some(ConversationId::Friend(UserId(42)));

        assert_eq!(
            direct_message_disposition(open, UserId(42), UserId(7)),
            InboundDisposition::Render
        );
    }

    #[test]
    fn renders_own_echo_addressed_to_the_open_friend() {
        let open = Some(ConversationId::Friend(UserId(42)));

        assert_eq!(
            direct_message_disposition(open, UserId(7), UserId(42)),
            InboundDisposition::Render
        );
    }

    #[test]
    fn drops_direct_message_between_other_people() {
        let open = Some(ConversationId::Friend(UserId(42)));

        assert_eq!(
            direct_message_disposition(open, UserId(99), UserId(7)),
            InboundDisposition::OtherConversation
        );
    }

    #[test]
    fn drops_direct_message_when_nothing_is_open() {
        assert_eq!(
            direct_message_disposition(None, UserId(42), UserId(7)),
            InboundDisposition::NoConversationOpen
        );
    }

    #[test]
    fn direct_message_never_renders_into_a_group() {
        let open = Some(ConversationId::Group(GroupId(42)));

        assert_eq!(
            direct_message_disposition(open, UserId(42), UserId(7)),
            InboundDisposition::OtherConversation
        );
    }

    #[test]
    fn group_message_renders_only_into_its_group() {
        let open = Some(ConversationId::Group(GroupId(3)));

        assert_eq!(
            group_message_disposition(open, GroupId(3)),
            InboundDisposition::Render
        );
        assert_eq!(
            group_message_disposition(open, GroupId(4)),
            InboundDisposition::OtherConversation
        );
    }

    #[test]
    fn stamps_own_messages_as_mine() {
        let session = UserSession::from_config(Some(7), None);
        let mut mine = message(7);
        let mut theirs = message(42);

        assert_eq!(stamp_ownership(&session, &mut mine), Ownership::Mine);
        assert!(mine.is_mine);

        assert_eq!(stamp_ownership(&session, &mut theirs), Ownership::Theirs);
        assert!(!theirs.is_mine);
    }

    #[test]
    fn unknown_session_renders_everything_as_incoming() {
        let session = UserSession::from_config(None, None);
        let mut inbound = message(7);

        assert_eq!(
            stamp_ownership(&session, &mut inbound),
            Ownership::UnknownSelf
        );
        assert!(!inbound.is_mine);
    }
}
