//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Panel chrome
// =============================================================================

/// Border style for the panel that owns the keyboard.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for every other panel.
pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Highlight style for the selected list row.
pub fn selection_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

/// Style for the nav link of the current route.
pub fn nav_active_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for the remaining nav links.
pub fn nav_inactive_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the unread badge on the notification bell.
pub fn badge_style() -> Style {
    Style::default().fg(Color::Green)
}

// =============================================================================
// List rows
// =============================================================================

/// Style for a contact or group name (bold, bright).
pub fn row_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for secondary row text such as member counts and relations.
pub fn row_detail_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for a banned member row.
pub fn banned_member_style() -> Style {
    Style::default().fg(Color::Red)
}

// =============================================================================
// Message list styles
// =============================================================================

/// Style for message sender name (white, bold).
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the local account's name on own messages.
pub fn own_sender_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Style for message time in the messages panel.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for sticker indicators like [Sticker].
pub fn message_sticker_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for the briefly highlighted message after a search jump.
pub fn highlighted_message_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

/// Style for date separator line.
pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Inputs and dialogs
// =============================================================================

/// Style for the input prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for typed input text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for input placeholder text.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for inline validation warnings.
pub fn warning_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for dim helper text in dialogs and the status line.
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_border_differs_from_inactive() {
        assert_ne!(
            active_panel_border_style().fg,
            inactive_panel_border_style().fg
        );
    }

    #[test]
    fn selection_style_reverses_and_bolds() {
        let style = selection_style();
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn row_name_style_is_bold_white() {
        let style = row_name_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn highlighted_message_style_sets_background() {
        assert_eq!(highlighted_message_style().bg, Some(Color::Yellow));
    }

    #[test]
    fn badge_style_is_green() {
        assert_eq!(badge_style().fg, Some(Color::Green));
    }
}
