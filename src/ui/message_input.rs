//! Text box rendering for the compose and filter fields.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::text_input::TextFieldState;

use super::styles;

/// Placeholder shown in an unfocused, empty compose box.
const COMPOSE_PLACEHOLDER: &str = "Press 'i' to type a message...";

/// Placeholder shown in an unfocused, empty filter box.
const FILTER_PLACEHOLDER: &str = "Press 'f' to filter by name or id...";

/// Placeholder shown in an empty search box.
const SEARCH_PLACEHOLDER: &str = "Type to search...";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

/// Renders the message compose box.
pub fn render_message_input(
    frame: &mut Frame<'_>,
    area: Rect,
    field: &TextFieldState,
    focused: bool,
) {
    render_text_box(frame, area, field, focused, None, COMPOSE_PLACEHOLDER);
}

/// Renders the name filter box above a friend list.
pub fn render_filter_input(
    frame: &mut Frame<'_>,
    area: Rect,
    field: &TextFieldState,
    focused: bool,
) {
    render_text_box(frame, area, field, focused, Some("Filter"), FILTER_PLACEHOLDER);
}

/// Renders the query box inside the search overlay.
pub fn render_search_input(
    frame: &mut Frame<'_>,
    area: Rect,
    field: &TextFieldState,
    focused: bool,
) {
    render_text_box(frame, area, field, focused, None, SEARCH_PLACEHOLDER);
}

fn render_text_box(
    frame: &mut Frame<'_>,
    area: Rect,
    field: &TextFieldState,
    focused: bool,
    title: Option<&str>,
    placeholder: &str,
) {
    let border_style = if focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(title) = title {
        block = block.title(title.to_owned());
    }

    let line = build_input_line(field, focused, placeholder);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        // Saturating arithmetic keeps very long inputs from overflowing.
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.len() as u16)
            .saturating_add(cursor_column(field));
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Terminal column of the cursor, measured in display width so wide
/// glyphs keep the cursor aligned.
pub(super) fn cursor_column(field: &TextFieldState) -> u16 {
    let prefix: String = field.text().chars().take(field.cursor()).collect();
    prefix.width().min(u16::MAX as usize) as u16
}

/// Builds the line content for a text box.
fn build_input_line(field: &TextFieldState, focused: bool, placeholder: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if !focused && field.is_empty() {
        return Line::from(vec![
            prompt,
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ]);
    }

    Line::from(vec![
        prompt,
        Span::styled(field.text().to_owned(), styles::input_text_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn unfocused_empty_field_shows_the_placeholder() {
        let field = TextFieldState::default();

        let line = build_input_line(&field, false, COMPOSE_PLACEHOLDER);

        let text = line_text(&line);
        assert!(text.contains(COMPOSE_PLACEHOLDER));
        assert!(text.starts_with(PROMPT_SYMBOL));
    }

    #[test]
    fn focused_empty_field_shows_a_bare_prompt() {
        let field = TextFieldState::default();

        let line = build_input_line(&field, true, COMPOSE_PLACEHOLDER);

        assert!(!line_text(&line).contains(COMPOSE_PLACEHOLDER));
    }

    #[test]
    fn typed_text_replaces_the_placeholder() {
        let mut field = TextFieldState::default();
        field.insert_char('H');
        field.insert_char('i');

        let line = build_input_line(&field, false, COMPOSE_PLACEHOLDER);

        let text = line_text(&line);
        assert!(text.contains("Hi"));
        assert!(!text.contains(COMPOSE_PLACEHOLDER));
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let mut field = TextFieldState::default();
        field.set_text("chào");

        assert_eq!(cursor_column(&field), 4);
    }

    #[test]
    fn cursor_column_widens_for_fullwidth_glyphs() {
        let mut field = TextFieldState::default();
        field.set_text("a漢");

        // One narrow char plus one fullwidth char spans three columns.
        assert_eq!(cursor_column(&field), 3);

        field.move_left();
        assert_eq!(cursor_column(&field), 1);
    }
}
