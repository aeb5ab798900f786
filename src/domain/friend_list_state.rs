use std::time::Instant;

use super::debounce::Debouncer;
use super::ids::UserId;
use super::text_input::TextFieldState;

/// Relationship between the local account and a listed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRelation {
    /// No pending request; a friend request can be sent.
    CanRequest,
    /// A request has been sent and awaits an answer.
    Pending,
    Friends,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRow {
    pub user_id: UserId,
    pub name: String,
    pub relation: FriendRelation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendListUiState {
    Loading,
    Ready,
    Error,
}

/// A filterable list of users. Backs both the contact sidebar on the
/// chat page and the friend directory with its search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendListState {
    ui_state: FriendListUiState,
    rows: Vec<FriendRow>,
    filter_input: TextFieldState,
    filter_debounce: Debouncer,
    applied_filter: String,
    selected: usize,
    busy_target: Option<UserId>,
}

impl FriendListState {
    pub fn new(filter_delay: std::time::Duration) -> Self {
        Self {
            ui_state: FriendListUiState::Loading,
            rows: Vec::new(),
            filter_input: TextFieldState::default(),
            filter_debounce: Debouncer::new(filter_delay),
            applied_filter: String::new(),
            selected: 0,
            busy_target: None,
        }
    }

    pub fn ui_state(&self) -> FriendListUiState {
        self.ui_state.clone()
    }

    pub fn set_loading(&mut self) {
        self.ui_state = FriendListUiState::Loading;
    }

    pub fn set_ready(&mut self, rows: Vec<FriendRow>) {
        self.rows = rows;
        self.ui_state = FriendListUiState::Ready;
        self.clamp_selection();
    }

    pub fn set_error(&mut self) {
        self.ui_state = FriendListUiState::Error;
    }

    pub fn rows(&self) -> &[FriendRow] {
        &self.rows
    }

    pub fn filter_input(&self) -> &TextFieldState {
        &self.filter_input
    }

    pub fn filter_input_mut(&mut self) -> &mut TextFieldState {
        &mut self.filter_input
    }

    pub fn applied_filter(&self) -> &str {
        &self.applied_filter
    }

    /// Registers filter keystrokes; the new text takes effect only after
    /// the debounce window closes.
    pub fn poke_filter(&mut self, now: Instant) {
        self.filter_debounce.poke(now);
    }

    /// Applies the typed filter once its debounce deadline passes.
    /// Returns true when the visible set may have changed.
    pub fn apply_filter_if_due(&mut self, now: Instant) -> bool {
        if !self.filter_debounce.fire(now) {
            return false;
        }
        self.applied_filter = self.filter_input.text().to_owned();
        self.clamp_selection();
        true
    }

    /// Indices of rows that survive the applied filter, in row order.
    /// An empty filter keeps every row visible.
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.applied_filter.trim().to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &query))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<&FriendRow> {
        self.visible_indices()
            .into_iter()
            .map(|index| &self.rows[index])
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&FriendRow> {
        let visible = self.visible_indices();
        visible.get(self.selected).map(|&index| &self.rows[index])
    }

    pub fn select_next(&mut self) {
        let visible = self.visible_indices().len();
        if visible == 0 {
            return;
        }
        if self.selected + 1 < visible {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The row whose friend request is currently in flight, if any.
    pub fn busy_target(&self) -> Option<UserId> {
        self.busy_target
    }

    pub fn set_busy(&mut self, target: UserId) {
        self.busy_target = Some(target);
    }

    /// Marks a granted request: the row flips to pending and stays there.
    pub fn mark_pending(&mut self, target: UserId) {
        self.busy_target = None;
        if let Some(row) = self.rows.iter_mut().find(|row| row.user_id == target) {
            row.relation = FriendRelation::Pending;
        }
    }

    /// A failed request restores the row to its previous relation.
    pub fn clear_busy(&mut self) {
        self.busy_target = None;
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_indices().len();
        if visible == 0 {
            self.selected = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }
}

/// Case-insensitive containment over the id and name columns. The query
/// is expected pre-lowered and trimmed.
fn row_matches(row: &FriendRow, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    row.user_id.0.to_string().contains(query) || row.name.to_lowercase().contains(query)
}
