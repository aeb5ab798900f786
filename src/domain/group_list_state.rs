use super::ids::GroupId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    pub group_id: GroupId,
    pub name: String,
    pub member_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupListUiState {
    Loading,
    Ready,
    Error,
}

/// The list of groups the account belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListState {
    ui_state: GroupListUiState,
    rows: Vec<GroupRow>,
    selected: usize,
}

impl Default for GroupListState {
    fn default() -> Self {
        Self {
            ui_state: GroupListUiState::Loading,
            rows: Vec::new(),
            selected: 0,
        }
    }
}

impl GroupListState {
    pub fn ui_state(&self) -> GroupListUiState {
        self.ui_state.clone()
    }

    pub fn set_loading(&mut self) {
        self.ui_state = GroupListUiState::Loading;
    }

    pub fn set_ready(&mut self, rows: Vec<GroupRow>) {
        self.rows = rows;
        self.ui_state = GroupListUiState::Ready;
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    pub fn set_error(&mut self) {
        self.ui_state = GroupListUiState::Error;
    }

    pub fn rows(&self) -> &[GroupRow] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&GroupRow> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.rows.is_empty() && self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> GroupRow {
        GroupRow {
            group_id: GroupId(id),
            name: name.to_owned(),
            member_count: 3,
        }
    }

    #[test]
    fn default_state_is_loading() {
        let state = GroupListState::default();

        assert_eq!(state.ui_state(), GroupListUiState::Loading);
        assert!(state.rows().is_empty());
    }

    #[test]
    fn set_ready_stores_rows() {
        let mut state = GroupListState::default();

        state.set_ready(vec![row(1, "Đội bóng"), row(2, "Lớp 12A")]);

        assert_eq!(state.ui_state(), GroupListUiState::Ready);
        assert_eq!(state.rows().len(), 2);
        assert_eq!(state.selected_row().map(|r| r.group_id), Some(GroupId(1)));
    }

    #[test]
    fn refresh_clamps_the_selection() {
        let mut state = GroupListState::default();
        state.set_ready(vec![row(1, "a"), row(2, "b"), row(3, "c")]);
        state.select_next();
        state.select_next();

        state.set_ready(vec![row(1, "a")]);

        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn selection_stops_at_edges() {
        let mut state = GroupListState::default();
        state.set_ready(vec![row(1, "a"), row(2, "b")]);

        state.select_previous();
        assert_eq!(state.selected(), 0);

        state.select_next();
        state.select_next();
        assert_eq!(state.selected(), 1);
    }
}
