//! Transcript rendering logic.
//!
//! Turns the conversation's messages into list elements: date separators
//! between days, sender shown once per run of consecutive messages, own
//! messages and the search-jump highlight styled apart.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::ids::MessageId;
use crate::domain::message::ChatMessage;

use super::styles;

/// One visual element of the transcript list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// Date separator line (e.g., "——— 14/02/2026 ———").
    DateSeparator(String),
    /// A message, with the sender shown only at the start of a run.
    Message {
        time: String,
        sender: Option<String>,
        content: String,
        mine: bool,
        highlighted: bool,
    },
}

/// Builds the element list for a transcript.
pub fn build_message_list_elements(
    messages: &[ChatMessage],
    highlighted: Option<MessageId>,
) -> Vec<MessageListElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<chrono::NaiveDate> = None;
    let mut prev_sender = None;

    for message in messages {
        let msg_date = timestamp_to_date(message.sent_at_unix_ms);

        if prev_date != Some(msg_date) {
            elements.push(MessageListElement::DateSeparator(format_date(msg_date)));
            // Sender grouping restarts under a new separator.
            prev_sender = None;
        }

        let sender = if prev_sender == Some(message.sender_id) {
            None
        } else {
            Some(message.sender_name.clone())
        };

        elements.push(MessageListElement::Message {
            time: format_time(message.sent_at_unix_ms),
            sender,
            content: message.content.display(),
            mine: message.is_mine,
            highlighted: highlighted == Some(message.id),
        });

        prev_date = Some(msg_date);
        prev_sender = Some(message.sender_id);
    }

    elements
}

/// Converts a message index to its element index in the list.
///
/// The element list interleaves messages with date separators; selection
/// and scrolling work on element indices. Returns `None` when the message
/// index is out of range.
pub fn message_index_to_element_index(
    elements: &[MessageListElement],
    message_index: usize,
) -> Option<usize> {
    let mut msg_count = 0;

    for (elem_idx, element) in elements.iter().enumerate() {
        if matches!(element, MessageListElement::Message { .. }) {
            if msg_count == message_index {
                return Some(elem_idx);
            }
            msg_count += 1;
        }
    }

    None
}

/// Converts a list element to a ListItem for ratatui rendering.
pub fn element_to_list_item(element: &MessageListElement) -> ListItem<'static> {
    match element {
        MessageListElement::DateSeparator(date) => date_separator_item(date),
        MessageListElement::Message {
            time,
            sender,
            content,
            mine,
            highlighted,
        } => message_item(time, sender.as_deref(), content, *mine, *highlighted),
    }
}

fn date_separator_item(date: &str) -> ListItem<'static> {
    let separator = format!("——— {} ———", date);
    let line = Line::from(vec![Span::styled(
        separator,
        styles::date_separator_style(),
    )])
    .alignment(Alignment::Center);
    ListItem::new(vec![Line::default(), line, Line::default()])
}

fn message_item(
    time: &str,
    sender: Option<&str>,
    content: &str,
    mine: bool,
    highlighted: bool,
) -> ListItem<'static> {
    let mut lines = Vec::new();
    let indent = "      "; // 6 spaces to align with the time column

    if let Some(name) = sender {
        lines.push(message_header_line(time, name, mine));

        for text_line in content.lines() {
            let mut spans = vec![Span::raw(indent.to_owned())];
            spans.extend(content_line_spans(text_line, highlighted));
            lines.push(Line::from(spans));
        }

        if content.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(indent.to_owned()),
                Span::styled("[Empty message]".to_owned(), styles::message_sticker_style()),
            ]));
        }
    } else {
        // Grouped message: time and first content line share a row.
        let mut content_lines = content.lines();
        let mut spans = vec![Span::styled(
            format!("{:>5} ", time),
            styles::message_time_style(),
        )];

        match content_lines.next() {
            Some(first_line) => spans.extend(content_line_spans(first_line, highlighted)),
            None => spans.push(Span::styled(
                "[Empty message]".to_owned(),
                styles::message_sticker_style(),
            )),
        }
        lines.push(Line::from(spans));

        for text_line in content_lines {
            let mut spans = vec![Span::raw(indent.to_owned())];
            spans.extend(content_line_spans(text_line, highlighted));
            lines.push(Line::from(spans));
        }
    }

    ListItem::new(lines)
}

fn message_header_line(time: &str, sender: &str, mine: bool) -> Line<'static> {
    let sender_style = if mine {
        styles::own_sender_style()
    } else {
        styles::message_sender_style()
    };

    Line::from(vec![
        Span::styled(format!("{:>5} ", time), styles::message_time_style()),
        Span::styled(format!("{}:", sender), sender_style),
    ])
}

/// Styles one content line, keeping the [Sticker] indicator cyan. The
/// search-jump highlight overrides everything else on the line.
fn content_line_spans(text: &str, highlighted: bool) -> Vec<Span<'static>> {
    if highlighted {
        return vec![Span::styled(
            text.to_owned(),
            styles::highlighted_message_style(),
        )];
    }

    if text.starts_with('[') {
        if let Some(end_bracket) = text.find(']') {
            let indicator = &text[..=end_bracket];
            let rest = text[end_bracket + 1..].trim_start();

            if rest.is_empty() {
                return vec![Span::styled(
                    indicator.to_owned(),
                    styles::message_sticker_style(),
                )];
            }
            return vec![
                Span::styled(indicator.to_owned(), styles::message_sticker_style()),
                Span::raw(" ".to_owned()),
                Span::styled(rest.to_owned(), styles::message_text_style()),
            ];
        }
    }

    vec![Span::styled(text.to_owned(), styles::message_text_style())]
}

fn timestamp_to_date(timestamp_ms: i64) -> chrono::NaiveDate {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.date_naive(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.date_naive(),
        chrono::LocalResult::None => Local::now().date_naive(),
    }
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%H:%M").to_string(),
        chrono::LocalResult::None => "??:??".to_owned(),
    }
}
