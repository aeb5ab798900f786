use super::friend_list_state::FriendRow;
use super::group_list_state::GroupRow;
use super::ids::{ConversationId, GroupId, NotificationId, UserId};
use super::member_panel_state::{GroupMember, ModerationAction};
use super::message::{ChatMessage, SearchHit};
use super::notification::Notification;

/// Everything the shell loop can wake up on: keyboard input, the 100ms
/// tick, and completions pushed by the hub and API workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    Hub(HubEvent),
    Api(ApiEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl HubStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            HubStatus::Disconnected => "Mất kết nối",
            HubStatus::Connecting => "Đang kết nối...",
            HubStatus::Connected => "Trực tuyến",
        }
    }
}

/// A direct message as broadcast by the hub. Both parties receive the
/// same frame, so the pair (sender, recipient) is what the shell matches
/// against the open conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDirectMessage {
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub message: ChatMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundGroupMessage {
    pub group_id: GroupId,
    pub message: ChatMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipChange {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub display_name: String,
}

/// Parsed hub traffic, one variant per frame the client understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    StatusChanged(HubStatus),
    /// Connection acknowledgement carrying the server's idea of who we are.
    SessionConfirmed { user_id: UserId },
    DirectMessage(InboundDirectMessage),
    GroupMessage(InboundGroupMessage),
    MemberAdded(MembershipChange),
    MemberRemoved(MembershipChange),
    SearchResults {
        conversation: ConversationId,
        hits: Vec<SearchHit>,
    },
}

/// Fallback text shown for failures the server gave us nothing better for.
pub const GENERIC_FAILURE_MESSAGE: &str = "Có lỗi xảy ra, vui lòng thử lại";

/// Why an API call failed when no server-provided message is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    Transport(String),
    Status(u16),
    Decode(String),
}

impl ApiFailure {
    /// The toast text for a failed call.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Transport(detail) => write!(f, "transport error: {}", detail),
            ApiFailure::Status(code) => write!(f, "unexpected status {}", code),
            ApiFailure::Decode(detail) => write!(f, "malformed response: {}", detail),
        }
    }
}

/// Success flag plus human-readable message, as returned verbatim by the
/// moderation and group-creation endpoints. The message is surfaced to
/// the user either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendRequestOutcome {
    /// The service answered with a redirect; the client follows it.
    Redirected(String),
    /// Plain success: the row flips to its pending label.
    Pending,
}

/// Completions pushed back by the API worker, one variant per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    FriendsLoaded(Result<Vec<FriendRow>, ApiFailure>),
    GroupsLoaded(Result<Vec<GroupRow>, ApiFailure>),
    MembersLoaded {
        group_id: GroupId,
        result: Result<Vec<GroupMember>, ApiFailure>,
    },
    HistoryLoaded {
        conversation: ConversationId,
        result: Result<Vec<ChatMessage>, ApiFailure>,
    },
    GroupCreated(Result<ActionOutcome, ApiFailure>),
    ModerationFinished {
        group_id: GroupId,
        action: ModerationAction,
        result: Result<ActionOutcome, ApiFailure>,
    },
    FriendRequestFinished {
        target: UserId,
        result: Result<FriendRequestOutcome, ApiFailure>,
    },
    NotificationsLoaded(Result<Vec<Notification>, ApiFailure>),
    NotificationMarked {
        id: NotificationId,
        result: Result<(), ApiFailure>,
    },
    AllNotificationsMarked(Result<(), ApiFailure>),
}
