//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod create_group;
pub mod friend_requests;
pub mod moderate_member;
pub mod notifications;
pub mod open_conversation;
pub mod route_inbound;
pub mod search_messages;
pub mod send_chat_message;
pub mod shell;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
