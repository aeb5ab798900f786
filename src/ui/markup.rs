//! Styled-fragment markup for composed list rows.
//!
//! Search results and notification rows are composed as small markup
//! strings (`<b>`, `<dim>`) and parsed into ratatui spans here. Anything
//! server-sourced goes through [`escape_html`] before interpolation, so
//! markup arriving inside message content renders as literal text.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Escapes text for interpolation into a markup string.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Parses a markup string into styled spans.
///
/// Recognizes `<b>` and `<dim>` pairs; any other `<` is literal text.
/// Entities produced by [`escape_html`] are restored inside text runs.
pub fn markup_to_spans(markup: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(open) = rest.find('<') else {
            spans.push(text_span(rest, None));
            break;
        };
        if open > 0 {
            spans.push(text_span(&rest[..open], None));
        }
        rest = &rest[open..];

        let (style, tag_len, close_tag) = if rest.starts_with("<b>") {
            (bold_style(), "<b>".len(), "</b>")
        } else if rest.starts_with("<dim>") {
            (dim_style(), "<dim>".len(), "</dim>")
        } else {
            spans.push(Span::raw("<"));
            rest = &rest[1..];
            continue;
        };

        let body = &rest[tag_len..];
        match body.find(close_tag) {
            Some(end) => {
                spans.push(text_span(&body[..end], Some(style)));
                rest = &body[end + close_tag.len()..];
            }
            None => {
                // Unterminated tag styles the remainder.
                spans.push(text_span(body, Some(style)));
                rest = "";
            }
        }
    }

    spans
}

fn text_span(text: &str, style: Option<Style>) -> Span<'static> {
    let unescaped = unescape_entities(text);
    match style {
        Some(style) => Span::styled(unescaped, style),
        None => Span::raw(unescaped),
    }
}

// `&amp;` last, so a literal "&amp;lt;" resolves to "&lt;" and stops there.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
