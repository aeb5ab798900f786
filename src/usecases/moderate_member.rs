//! Admin moderation: kick, timed ban and unban. Kick and unban run
//! behind a yes/no confirmation; ban collects its duration in a dialog.
//! The server answers every call with a success flag and a message that
//! is surfaced verbatim.

use crate::domain::ids::{GroupId, UserId};
use crate::domain::member_panel_state::{MemberPanelState, ModerationAction};

use super::contracts::{ApiCommand, ApiGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerateCommand {
    pub group_id: GroupId,
    pub target: UserId,
    pub action: ModerationAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerateError {
    /// Another moderation call is still in flight for this panel.
    Busy,
    /// The API command could not be queued.
    RequestRejected,
}

/// The yes/no question shown before a kick or unban goes out.
pub fn confirmation_prompt(action: ModerationAction, display_name: &str) -> String {
    match action {
        ModerationAction::Kick => format!("Xóa {} khỏi nhóm?", display_name),
        ModerationAction::Unban => format!("Bỏ chặn {}?", display_name),
        ModerationAction::Ban { days } => {
            format!("Chặn {} trong {} ngày?", display_name, days)
        }
    }
}

/// Queues the confirmed action and latches the panel busy until the
/// worker reports back. A dispatch failure releases the latch.
pub fn moderate_member(
    gateway: &dyn ApiGateway,
    panel: &mut MemberPanelState,
    command: ModerateCommand,
) -> Result<(), ModerateError> {
    if panel.is_busy() {
        return Err(ModerateError::Busy);
    }

    panel.set_busy();
    match gateway.submit(ApiCommand::Moderate {
        group_id: command.group_id,
        target: command.target,
        action: command.action,
    }) {
        Ok(()) => Ok(()),
        Err(_) => {
            panel.clear_busy();
            Err(ModerateError::RequestRejected)
        }
    }
}
