use anyhow::Result;

use crate::domain::{
    events::{AppEvent, HubStatus},
    ids::{ConversationId, GroupId, NotificationId, UserId},
    member_panel_state::ModerationAction,
    shell_state::ShellState,
};

use super::search_messages::SearchInvoker;
use super::send_chat_message::ChatMessageSender;

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Work the API worker runs off the UI thread, one command per REST
/// call the shell makes. Completions come back as `AppEvent::Api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    LoadFriends,
    LoadGroups,
    LoadMembers {
        group_id: GroupId,
    },
    LoadHistory {
        conversation: ConversationId,
    },
    CreateGroup {
        name: String,
        description: String,
    },
    Moderate {
        group_id: GroupId,
        target: UserId,
        action: ModerationAction,
    },
    SendFriendRequest {
        target: UserId,
    },
    LoadNotifications,
    MarkNotificationRead {
        id: NotificationId,
    },
    MarkAllNotificationsRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDispatchError {
    /// The worker's queue is gone; the process is shutting down.
    WorkerGone,
}

impl std::fmt::Display for ApiDispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkerGone => write!(f, "api worker is gone"),
        }
    }
}

impl std::error::Error for ApiDispatchError {}

pub trait ApiGateway {
    fn submit(&self, command: ApiCommand) -> Result<(), ApiDispatchError>;
}

impl<T: ApiGateway + ?Sized> ApiGateway for &T {
    fn submit(&self, command: ApiCommand) -> Result<(), ApiDispatchError> {
        (*self).submit(command)
    }
}

#[derive(Debug)]
pub enum HubStartError {
    WorkerSpawn(std::io::Error),
}

impl std::fmt::Display for HubStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkerSpawn(source) => write!(f, "hub worker spawn failed: {source}"),
        }
    }
}

impl std::error::Error for HubStartError {}

/// The realtime side of the shell: one websocket owned by a background
/// monitor and shared by the direct and group chat pages.
pub trait HubChannel: ChatMessageSender + SearchInvoker {
    /// Starts the monitor if it has never run; otherwise a no-op.
    fn ensure_started(&mut self) -> Result<(), HubStartError>;
    fn status(&self) -> HubStatus;
}
