/// A single-line text field with a character cursor.
///
/// Used for the compose box, filter and search inputs, and dialog fields.
/// Indices are character positions; byte offsets are resolved against the
/// buffer on each edit so multi-byte input stays intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldState {
    buffer: String,
    cursor: usize,
    limit: Option<usize>,
}

impl Default for TextFieldState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            limit: None,
        }
    }
}

impl TextFieldState {
    /// A field that refuses input past `limit` characters.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters from the start of the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        if let Some(limit) = self.limit {
            if self.char_count() >= limit {
                return;
            }
        }
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.buffer.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer = match self.limit {
            Some(limit) => text.chars().take(limit).collect(),
            None => text.to_owned(),
        };
        self.cursor = self.char_count();
    }

    /// Returns the buffer contents and resets the field.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.buffer.len())
    }
}
