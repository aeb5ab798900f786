use super::ids::NotificationId;
use super::notification::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPanelUiState {
    Loading,
    Ready,
    Error,
}

/// The bell dropdown. Items are fetched every time the panel opens and
/// kept when it closes, so reopening shows the last list while the fresh
/// fetch is in flight. Whether the panel is visible is the shell's
/// overlay concern, not tracked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPanelState {
    ui_state: NotificationPanelUiState,
    items: Vec<Notification>,
    selected: usize,
}

impl Default for NotificationPanelState {
    fn default() -> Self {
        Self {
            ui_state: NotificationPanelUiState::Ready,
            items: Vec::new(),
            selected: 0,
        }
    }
}

impl NotificationPanelState {
    pub fn ui_state(&self) -> NotificationPanelUiState {
        self.ui_state
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Notification> {
        self.items.get(self.selected)
    }

    /// Marks the cached list stale for the fetch the caller is about to
    /// dispatch. Items stay visible underneath the loading hint.
    pub fn set_loading(&mut self) {
        self.ui_state = NotificationPanelUiState::Loading;
    }

    pub fn set_items(&mut self, items: Vec<Notification>) {
        self.items = items;
        self.ui_state = NotificationPanelUiState::Ready;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn set_error(&mut self) {
        self.ui_state = NotificationPanelUiState::Error;
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// The bell badge text, or None when everything is read and the
    /// badge stays hidden.
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            count => Some(count.to_string()),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Flips one item to read. Returns false when the id is unknown.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.read = true;
                true
            }
            None => false,
        }
    }

    /// Flips every cached item to read without refetching, mirroring the
    /// bulk endpoint's effect locally.
    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: i64, read: bool) -> Notification {
        Notification {
            id: NotificationId(id),
            sender_name: "Minh".to_owned(),
            content: "đã gửi cho bạn một lời mời kết bạn".to_owned(),
            created_at_unix_ms: 1_700_000_000_000,
            read,
            redirect_url: Some("/Friend".to_owned()),
        }
    }

    #[test]
    fn badge_is_hidden_when_everything_is_read() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![notification(1, true), notification(2, true)]);

        assert_eq!(state.unread_count(), 0);
        assert_eq!(state.badge_label(), None);
    }

    #[test]
    fn badge_counts_unread_items() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![
            notification(1, false),
            notification(2, true),
            notification(3, false),
        ]);

        assert_eq!(state.badge_label(), Some("2".to_owned()));
    }

    #[test]
    fn refetch_keeps_cached_items_visible() {
        let mut state = NotificationPanelState::default();
        state.set_loading();
        state.set_items(vec![notification(1, false)]);

        state.set_loading();

        assert_eq!(state.ui_state(), NotificationPanelUiState::Loading);
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn mark_all_read_flips_every_cached_item() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![notification(1, false), notification(2, false)]);

        state.mark_all_read();

        assert_eq!(state.unread_count(), 0);
        assert!(state.items().iter().all(|item| item.read));
    }

    #[test]
    fn mark_read_targets_one_item() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![notification(1, false), notification(2, false)]);

        assert!(state.mark_read(NotificationId(2)));
        assert!(!state.mark_read(NotificationId(9)));

        assert_eq!(state.unread_count(), 1);
        assert!(state.items()[1].read);
    }

    #[test]
    fn selection_clamps_to_list_bounds() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![notification(1, false), notification(2, false)]);

        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), 1);

        state.select_previous();
        state.select_previous();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn shrinking_list_pulls_selection_back() {
        let mut state = NotificationPanelState::default();
        state.set_items(vec![
            notification(1, false),
            notification(2, false),
            notification(3, false),
        ]);
        state.select_next();
        state.select_next();

        state.set_items(vec![notification(1, false)]);

        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.selected_item().map(|item| item.id), Some(NotificationId(1)));
    }
}
