use super::ids::UserId;

/// Moderation verbs a group admin can apply to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Kick,
    Ban { days: u32 },
    Unban,
}

impl ModerationAction {
    /// Short verb used in log records.
    pub fn verb(&self) -> &'static str {
        match self {
            ModerationAction::Kick => "kick",
            ModerationAction::Ban { .. } => "ban",
            ModerationAction::Unban => "unban",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub user_id: UserId,
    pub name: String,
    pub banned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPanelUiState {
    Loading,
    Ready,
    Error,
}

/// The member roster of the selected group, with the busy latch that
/// keeps one moderation call in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPanelState {
    ui_state: MemberPanelUiState,
    members: Vec<GroupMember>,
    selected: usize,
    busy: bool,
}

impl Default for MemberPanelState {
    fn default() -> Self {
        Self {
            ui_state: MemberPanelUiState::Loading,
            members: Vec::new(),
            selected: 0,
            busy: false,
        }
    }
}

impl MemberPanelState {
    pub fn ui_state(&self) -> MemberPanelUiState {
        self.ui_state.clone()
    }

    pub fn set_loading(&mut self) {
        self.ui_state = MemberPanelUiState::Loading;
    }

    pub fn set_ready(&mut self, members: Vec<GroupMember>) {
        self.members = members;
        self.ui_state = MemberPanelUiState::Ready;
        if self.members.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.members.len() {
            self.selected = self.members.len() - 1;
        }
    }

    pub fn set_error(&mut self) {
        self.ui_state = MemberPanelUiState::Error;
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_member(&self) -> Option<&GroupMember> {
        self.members.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.members.is_empty() && self.selected + 1 < self.members.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self) {
        self.busy = true;
    }

    pub fn clear_busy(&mut self) {
        self.busy = false;
    }
}
