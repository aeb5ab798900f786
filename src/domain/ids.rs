use std::fmt;

/// Identifier of a user account on the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

/// Identifier of a group chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub i64);

/// Identifier of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub i64);

/// Identifier of a notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation is either a direct chat with a friend or a group chat.
///
/// Raw identifiers from the wire are parsed into these variants at the
/// adapter boundary; everything past that point compares typed values,
/// never strings against numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationId {
    Friend(UserId),
    Group(GroupId),
}

impl ConversationId {
    pub fn friend_id(&self) -> Option<UserId> {
        match self {
            ConversationId::Friend(id) => Some(*id),
            ConversationId::Group(_) => None,
        }
    }

    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            ConversationId::Friend(_) => None,
            ConversationId::Group(id) => Some(*id),
        }
    }

    /// Returns a short label used in log records.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ConversationId::Friend(_) => "friend",
            ConversationId::Group(_) => "group",
        }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationId::Friend(id) => write!(f, "friend:{}", id),
            ConversationId::Group(id) => write!(f, "group:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_ids_compare_by_value() {
        assert_eq!(UserId(42), UserId(42));
        assert_ne!(UserId(42), UserId(7));
        assert_eq!(GroupId(3), GroupId(3));
    }

    #[test]
    fn conversation_id_exposes_only_matching_side() {
        let friend = ConversationId::Friend(UserId(42));
        let group = ConversationId::Group(GroupId(9));

        assert_eq!(friend.friend_id(), Some(UserId(42)));
        assert_eq!(friend.group_id(), None);
        assert_eq!(group.group_id(), Some(GroupId(9)));
        assert_eq!(group.friend_id(), None);
    }

    #[test]
    fn conversation_id_display_includes_kind() {
        assert_eq!(ConversationId::Friend(UserId(5)).to_string(), "friend:5");
        assert_eq!(ConversationId::Group(GroupId(8)).to_string(), "group:8");
    }

    #[test]
    fn kind_label_distinguishes_variants() {
        assert_eq!(ConversationId::Friend(UserId(1)).kind_label(), "friend");
        assert_eq!(ConversationId::Group(GroupId(1)).kind_label(), "group");
    }
}
