use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use super::message::SearchHit;
use super::text_input::TextFieldState;

/// Shown in the results area when no conversation is open to search in.
pub const SELECT_CONVERSATION_PROMPT: &str = "Hãy chọn một cuộc trò chuyện để tìm kiếm";

/// The in-conversation search panel. Results are rebuilt on every query;
/// nothing here survives a dispatch except the typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPanelState {
    input: TextFieldState,
    debounce: Debouncer,
    hits: Vec<SearchHit>,
    selected: usize,
    notice: Option<&'static str>,
    awaiting_results: bool,
}

impl SearchPanelState {
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            input: TextFieldState::default(),
            debounce: Debouncer::new(debounce_delay),
            hits: Vec::new(),
            selected: 0,
            notice: None,
            awaiting_results: false,
        }
    }

    pub fn input(&self) -> &TextFieldState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextFieldState {
        &mut self.input
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.hits.get(self.selected)
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_awaiting_results(&self) -> bool {
        self.awaiting_results
    }

    /// Restarts the debounce window after an edit.
    pub fn poke(&mut self, now: Instant) {
        self.debounce.poke(now);
    }

    /// Returns the trimmed query once the debounce window elapses.
    /// The caller decides whether to clear, prompt or dispatch.
    pub fn take_due_query(&mut self, now: Instant) -> Option<String> {
        if !self.debounce.fire(now) {
            return None;
        }
        Some(self.input.text().trim().to_owned())
    }

    pub fn mark_dispatched(&mut self) {
        self.awaiting_results = true;
        self.notice = None;
    }

    pub fn set_hits(&mut self, hits: Vec<SearchHit>) {
        self.selected = 0;
        self.hits = hits;
        self.awaiting_results = false;
        self.notice = None;
    }

    /// Empties the results, as when the query is erased.
    pub fn clear_hits(&mut self) {
        self.hits.clear();
        self.selected = 0;
        self.awaiting_results = false;
        self.notice = None;
    }

    /// Replaces the results area with a static prompt.
    pub fn show_notice(&mut self, notice: &'static str) {
        self.hits.clear();
        self.selected = 0;
        self.awaiting_results = false;
        self.notice = Some(notice);
    }

    /// Drops typed text and results together, as when the panel closes.
    pub fn reset(&mut self) {
        self.input.clear();
        self.debounce.cancel();
        self.clear_hits();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.hits.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
