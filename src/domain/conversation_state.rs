use std::time::Instant;

use super::ids::{ConversationId, MessageId};
use super::message::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationUiState {
    Empty,
    Loading,
    Ready,
    Error,
}

/// Scroll margin - number of items to keep visible above/below cursor before scrolling.
const SCROLL_MARGIN: usize = 5;

/// A message temporarily emphasised after being picked from search
/// results. Cleared on the first tick past `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Highlight {
    message_id: MessageId,
    until: Instant,
}

/// The open conversation of one chat page (direct or group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    conversation: Option<ConversationId>,
    title: String,
    messages: Vec<ChatMessage>,
    ui_state: ConversationUiState,
    highlight: Option<Highlight>,
    selected_index: Option<usize>,
    scroll_offset: usize,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            conversation: None,
            title: String::new(),
            messages: Vec::new(),
            ui_state: ConversationUiState::Empty,
            highlight: None,
            selected_index: None,
            scroll_offset: 0,
        }
    }
}

impl ConversationState {
    pub fn conversation(&self) -> Option<ConversationId> {
        self.conversation
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn ui_state(&self) -> ConversationUiState {
        self.ui_state.clone()
    }

    pub fn is_open(&self) -> bool {
        self.conversation.is_some()
    }

    /// Returns the selected message index for scroll positioning.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Returns the current scroll offset for the messages list.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_loading(&mut self, conversation: ConversationId, title: String) {
        self.conversation = Some(conversation);
        self.title = title;
        self.messages.clear();
        self.ui_state = ConversationUiState::Loading;
        self.highlight = None;
        self.selected_index = None;
        self.scroll_offset = 0;
    }

    pub fn set_ready(&mut self, messages: Vec<ChatMessage>) {
        self.selected_index = if messages.is_empty() {
            None
        } else {
            Some(messages.len() - 1)
        };
        self.messages = messages;
        self.ui_state = ConversationUiState::Ready;
    }

    pub fn set_error(&mut self) {
        self.ui_state = ConversationUiState::Error;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn clear(&mut self) {
        self.conversation = None;
        self.title.clear();
        self.messages.clear();
        self.ui_state = ConversationUiState::Empty;
        self.highlight = None;
        self.selected_index = None;
        self.scroll_offset = 0;
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        // Keep the cursor glued to the bottom when it was already there.
        let was_at_end = self.selected_index == self.messages.len().checked_sub(1);
        self.messages.push(message);
        if was_at_end || self.selected_index.is_none() {
            self.selected_index = Some(self.messages.len() - 1);
        }
    }

    /// Selects the next message (moves down in the list).
    pub fn select_next(&mut self) {
        if self.messages.is_empty() {
            return;
        }

        self.selected_index = match self.selected_index {
            None => Some(0),
            Some(idx) if idx + 1 < self.messages.len() => Some(idx + 1),
            Some(idx) => Some(idx), // Already at the last message
        };
    }

    /// Selects the previous message (moves up in the list).
    pub fn select_previous(&mut self) {
        if self.messages.is_empty() {
            return;
        }

        self.selected_index = match self.selected_index {
            None => Some(self.messages.len() - 1),
            Some(0) => Some(0), // Already at the first message
            Some(idx) => Some(idx - 1),
        };
    }

    /// Moves the cursor onto a message by id, as when a search result is
    /// picked. Returns false when the message is not in the loaded window.
    pub fn select_message(&mut self, message_id: MessageId) -> bool {
        match self.index_of(message_id) {
            Some(index) => {
                self.selected_index = Some(index);
                true
            }
            None => false,
        }
    }

    /// Updates the scroll offset based on the current selection and viewport height.
    /// This ensures the cursor stays visible with SCROLL_MARGIN items above/below.
    ///
    /// `element_index` is the visual index in the list (accounting for date separators).
    /// `viewport_height` is the number of visible rows in the list area.
    pub fn update_scroll_offset(&mut self, element_index: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        let effective_margin = SCROLL_MARGIN.min(viewport_height / 2);

        // If cursor is too close to the top, scroll up
        if element_index < self.scroll_offset + effective_margin {
            self.scroll_offset = element_index.saturating_sub(effective_margin);
        }

        // If cursor is too close to the bottom, scroll down
        let visible_bottom = self.scroll_offset + viewport_height;
        if element_index + effective_margin >= visible_bottom {
            self.scroll_offset =
                (element_index + effective_margin + 1).saturating_sub(viewport_height);
        }
    }

    pub fn index_of(&self, message_id: MessageId) -> Option<usize> {
        self.messages
            .iter()
            .position(|message| message.id == message_id)
    }

    /// Marks a message for emphasis until the given deadline. Returns
    /// false when the message is not in the loaded window, in which case
    /// nothing changes.
    pub fn highlight_message(&mut self, message_id: MessageId, until: Instant) -> bool {
        if self.index_of(message_id).is_none() {
            return false;
        }
        self.highlight = Some(Highlight { message_id, until });
        true
    }

    pub fn highlighted_message(&self) -> Option<MessageId> {
        self.highlight.map(|highlight| highlight.message_id)
    }

    /// Drops an expired highlight. Returns true when one was cleared.
    pub fn clear_expired_highlight(&mut self, now: Instant) -> bool {
        match self.highlight {
            Some(highlight) if now >= highlight.until => {
                self.highlight = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ids::{GroupId, UserId};
    use crate::domain::message::MessageContent;

    fn message(id: i64, text: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId(id),
            sender_id: UserId(7),
            sender_name: "Lan".to_owned(),
            content: MessageContent::Text(text.to_owned()),
            sent_at_unix_ms: 1_000,
            avatar_url: None,
            is_mine: false,
        }
    }

    #[test]
    fn default_state_is_empty() {
        let state = ConversationState::default();

        assert_eq!(state.ui_state(), ConversationUiState::Empty);
        assert!(!state.is_open());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn set_loading_resets_previous_conversation() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "hi")]);

        state.set_loading(ConversationId::Group(GroupId(3)), "Đội bóng".to_owned());

        assert_eq!(state.conversation(), Some(ConversationId::Group(GroupId(3))));
        assert_eq!(state.title(), "Đội bóng");
        assert!(state.messages().is_empty());
        assert_eq!(state.ui_state(), ConversationUiState::Loading);
    }

    #[test]
    fn set_ready_replaces_history() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());

        state.set_ready(vec![message(1, "a"), message(2, "b")]);

        assert_eq!(state.ui_state(), ConversationUiState::Ready);
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn append_keeps_arrival_order() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a")]);

        state.append_message(message(2, "b"));

        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[1].id, MessageId(2));
    }

    #[test]
    fn highlight_requires_a_loaded_message() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a")]);
        let until = Instant::now() + Duration::from_secs(2);

        assert!(state.highlight_message(MessageId(1), until));
        assert_eq!(state.highlighted_message(), Some(MessageId(1)));

        assert!(!state.highlight_message(MessageId(99), until));
        assert_eq!(state.highlighted_message(), Some(MessageId(1)));
    }

    #[test]
    fn highlight_expires_on_deadline() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a")]);
        let start = Instant::now();
        state.highlight_message(MessageId(1), start + Duration::from_secs(2));

        assert!(!state.clear_expired_highlight(start + Duration::from_secs(1)));
        assert_eq!(state.highlighted_message(), Some(MessageId(1)));

        assert!(state.clear_expired_highlight(start + Duration::from_secs(2)));
        assert_eq!(state.highlighted_message(), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a")]);

        state.clear();

        assert!(!state.is_open());
        assert_eq!(state.ui_state(), ConversationUiState::Empty);
        assert_eq!(state.title(), "");
    }

    #[test]
    fn index_of_finds_messages_by_id() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a"), message(5, "b")]);

        assert_eq!(state.index_of(MessageId(5)), Some(1));
        assert_eq!(state.index_of(MessageId(9)), None);
    }

    #[test]
    fn set_ready_selects_last_message() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());

        state.set_ready(vec![message(1, "a"), message(2, "b"), message(3, "c")]);

        assert_eq!(state.selected_index(), Some(2));
    }

    #[test]
    fn append_follows_the_bottom_only_when_cursor_is_there() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a"), message(2, "b")]);

        state.append_message(message(3, "c"));
        assert_eq!(state.selected_index(), Some(2));

        state.select_previous();
        state.append_message(message(4, "d"));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a"), message(2, "b")]);

        state.select_next();
        assert_eq!(state.selected_index(), Some(1));

        state.select_previous();
        state.select_previous();
        state.select_previous();
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn select_message_moves_the_cursor_by_id() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready(vec![message(1, "a"), message(5, "b"), message(9, "c")]);

        assert!(state.select_message(MessageId(5)));
        assert_eq!(state.selected_index(), Some(1));

        assert!(!state.select_message(MessageId(77)));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn scroll_offset_keeps_cursor_in_view() {
        let mut state = ConversationState::default();
        state.set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state.set_ready((0..40i64).map(|id| message(id, "m")).collect());

        state.update_scroll_offset(39, 10);
        assert!(state.scroll_offset() > 0);

        state.update_scroll_offset(0, 10);
        assert_eq!(state.scroll_offset(), 0);
    }
}
