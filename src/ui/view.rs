use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    conversation_state::{ConversationState, ConversationUiState},
    friend_list_state::{FriendListState, FriendListUiState, FriendRelation, FriendRow},
    group_list_state::{GroupListUiState, GroupRow},
    ids::UserId,
    member_panel_state::{GroupMember, MemberPanelUiState, ModerationAction},
    message::SearchHit,
    nav_state::{is_active, Route, NAV_LINKS},
    notification::{now_unix_ms, Notification, EMPTY_NOTIFICATIONS_LABEL},
    notification_state::NotificationPanelUiState,
    shell_state::{BanDialogState, Focus, Overlay, ShellState},
};
use crate::usecases::moderate_member::confirmation_prompt;

use super::markup::{escape_html, markup_to_spans};
use super::message_input::{
    self, render_filter_input, render_message_input, render_search_input,
};
use super::message_rendering::{
    build_message_list_elements, element_to_list_item, message_index_to_element_index,
};
use super::styles;

pub fn render(frame: &mut Frame<'_>, state: &mut ShellState) {
    let [nav_area, content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let nav = Paragraph::new(nav_line(state, nav_area.width as usize));
    frame.render_widget(nav, nav_area);

    match state.route() {
        Route::Chats => render_chats_route(frame, content_area, state),
        Route::Groups => render_groups_route(frame, content_area, state),
        Route::Friends => render_friends_route(frame, content_area, state),
    }

    let status = Paragraph::new(status_line(state));
    frame.render_widget(status, status_area);

    if let Some(overlay) = state.overlay().cloned() {
        render_overlay(frame, state, &overlay);
    }
}

// =============================================================================
// Nav bar
// =============================================================================

fn nav_line(state: &ShellState, width: usize) -> Line<'static> {
    let current_path = state.route().path();

    let mut spans = vec![Span::styled(" vitalk".to_owned(), styles::row_name_style())];
    for link in NAV_LINKS {
        let style = if is_active(link.href, current_path) {
            styles::nav_active_style()
        } else {
            styles::nav_inactive_style()
        };
        spans.push(Span::styled(format!("  {}", link.label), style));
    }

    let bell_style = if state.overlay() == Some(&Overlay::Notifications) {
        styles::nav_active_style()
    } else {
        styles::nav_inactive_style()
    };
    let badge = state.notifications().badge_label();

    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let mut right_len = "Notifications ".chars().count();
    if let Some(label) = &badge {
        right_len += label.chars().count() + 3; // " [" and "]"
    }
    let padding = width.saturating_sub(left_len + right_len);
    spans.push(Span::raw(" ".repeat(padding)));

    spans.push(Span::styled("Notifications".to_owned(), bell_style));
    if let Some(label) = badge {
        spans.push(Span::styled(format!(" [{}]", label), styles::badge_style()));
    }
    spans.push(Span::raw(" "));

    Line::from(spans)
}

// =============================================================================
// Routes
// =============================================================================

fn render_chats_route(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState) {
    let [sidebar_area, main_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .areas(area);

    let [filter_area, contacts_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .areas(sidebar_area);

    render_filter_input(
        frame,
        filter_area,
        state.contacts().filter_input(),
        state.focus() == Focus::Filter,
    );
    render_friend_panel(
        frame,
        contacts_area,
        "Contacts",
        state.contacts(),
        state.focus() == Focus::List,
    );

    let [transcript_area, compose_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(main_area);

    render_transcript_panel(frame, transcript_area, state, Route::Chats);
    if let Some(compose) = state.compose_for(Route::Chats) {
        render_message_input(frame, compose_area, compose, state.focus() == Focus::Compose);
    }
}

fn render_groups_route(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState) {
    let [sidebar_area, main_area, members_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .areas(area);

    render_group_panel(frame, sidebar_area, state, state.focus() == Focus::List);

    let [transcript_area, compose_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(main_area);

    render_transcript_panel(frame, transcript_area, state, Route::Groups);
    if let Some(compose) = state.compose_for(Route::Groups) {
        render_message_input(frame, compose_area, compose, state.focus() == Focus::Compose);
    }

    render_member_panel(frame, members_area, state, state.focus() == Focus::Members);
}

fn render_friends_route(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState) {
    let [filter_area, list_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .areas(area);

    render_filter_input(
        frame,
        filter_area,
        state.friends().filter_input(),
        state.focus() == Focus::Filter,
    );
    render_friend_panel(
        frame,
        list_area,
        "Friends",
        state.friends(),
        state.focus() == Focus::List,
    );
}

// =============================================================================
// Panels
// =============================================================================

fn render_friend_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    name: &str,
    list: &FriendListState,
    is_active: bool,
) {
    let border_style = panel_border_style(is_active);

    match list.ui_state() {
        FriendListUiState::Loading => {
            render_panel_message(frame, area, name, "Loading...", border_style)
        }
        FriendListUiState::Error => render_panel_message(
            frame,
            area,
            name,
            "Failed to load. Check the log.",
            border_style,
        ),
        FriendListUiState::Ready => {
            let visible = list.visible_rows();
            if visible.is_empty() {
                let message = if list.applied_filter().trim().is_empty() {
                    "Nobody here yet."
                } else {
                    "No rows match the filter."
                };
                render_panel_message(frame, area, name, message, border_style);
                return;
            }

            let busy = list.busy_target();
            let items: Vec<ListItem<'static>> = visible
                .iter()
                .map(|row| ListItem::new(friend_row_line(row, busy)))
                .collect();

            let title = format!("{} ({})", name, visible.len());
            let widget = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(styles::selection_style());

            let mut list_state = ListState::default();
            list_state.select(Some(list.selected().min(visible.len() - 1)));
            frame.render_stateful_widget(widget, area, &mut list_state);
        }
    }
}

fn render_group_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState, is_active: bool) {
    let border_style = panel_border_style(is_active);
    let groups = state.groups();

    match groups.ui_state() {
        GroupListUiState::Loading => {
            render_panel_message(frame, area, "Groups", "Loading...", border_style)
        }
        GroupListUiState::Error => render_panel_message(
            frame,
            area,
            "Groups",
            "Failed to load. Check the log.",
            border_style,
        ),
        GroupListUiState::Ready => {
            let rows = groups.rows();
            if rows.is_empty() {
                render_panel_message(
                    frame,
                    area,
                    "Groups",
                    "No groups yet. Press 'c' to create one.",
                    border_style,
                );
                return;
            }

            let items: Vec<ListItem<'static>> = rows
                .iter()
                .map(|row| ListItem::new(group_row_line(row)))
                .collect();

            let title = format!("Groups ({})", rows.len());
            let widget = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(styles::selection_style());

            let mut list_state = ListState::default();
            list_state.select(Some(groups.selected().min(rows.len() - 1)));
            frame.render_stateful_widget(widget, area, &mut list_state);
        }
    }
}

fn render_member_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState, is_active: bool) {
    let border_style = panel_border_style(is_active);

    let group_open = state
        .conversation_for(Route::Groups)
        .is_some_and(|conversation| conversation.is_open());
    if !group_open {
        render_panel_message(
            frame,
            area,
            "Members",
            "Open a group to see its members.",
            border_style,
        );
        return;
    }

    let members = state.members();
    match members.ui_state() {
        MemberPanelUiState::Loading => {
            render_panel_message(frame, area, "Members", "Loading...", border_style)
        }
        MemberPanelUiState::Error => render_panel_message(
            frame,
            area,
            "Members",
            "Failed to load. Check the log.",
            border_style,
        ),
        MemberPanelUiState::Ready => {
            let rows = members.members();
            if rows.is_empty() {
                render_panel_message(frame, area, "Members", "Nobody here.", border_style);
                return;
            }

            let items: Vec<ListItem<'static>> = rows
                .iter()
                .map(|member| ListItem::new(member_row_line(member)))
                .collect();

            let title = format!("Members ({})", rows.len());
            let widget = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(styles::selection_style());

            let mut list_state = ListState::default();
            list_state.select(Some(members.selected().min(rows.len() - 1)));
            frame.render_stateful_widget(widget, area, &mut list_state);
        }
    }
}

fn render_transcript_panel(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState, route: Route) {
    let Some(conversation) = state.conversation_for(route) else {
        return;
    };

    let title = transcript_title(conversation);
    let is_active = state.focus() == Focus::List && conversation.selected_index().is_some();
    let border_style = panel_border_style(is_active);

    match conversation.ui_state() {
        ConversationUiState::Empty => render_panel_message(
            frame,
            area,
            &title,
            "Select a conversation to view messages.",
            border_style,
        ),
        ConversationUiState::Loading => {
            render_panel_message(frame, area, &title, "Loading messages...", border_style)
        }
        ConversationUiState::Error => render_panel_message(
            frame,
            area,
            &title,
            "Failed to load messages. Press Enter to retry.",
            border_style,
        ),
        ConversationUiState::Ready => {
            if conversation.messages().is_empty() {
                render_panel_message(frame, area, &title, "No messages yet.", border_style);
                return;
            }

            let elements = build_message_list_elements(
                conversation.messages(),
                conversation.highlighted_message(),
            );
            let element_index = conversation
                .selected_index()
                .and_then(|index| message_index_to_element_index(&elements, index));
            let items: Vec<ListItem<'static>> = elements.iter().map(element_to_list_item).collect();

            // Anchor on the selection, or on the newest message when nothing
            // is selected, so the transcript follows incoming traffic.
            let viewport_height = area.height.saturating_sub(2) as usize;
            let anchor = element_index.unwrap_or_else(|| elements.len().saturating_sub(1));
            if let Some(conversation) = state.conversation_for_mut(route) {
                conversation.update_scroll_offset(anchor, viewport_height);
            }
            let scroll_offset = state
                .conversation_for(route)
                .map(|conversation| conversation.scroll_offset())
                .unwrap_or(0);

            let widget = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(styles::selection_style());

            let mut list_state = ListState::default();
            list_state.select(element_index);
            *list_state.offset_mut() = scroll_offset;
            frame.render_stateful_widget(widget, area, &mut list_state);
        }
    }
}

fn render_panel_message(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    message: &str,
    border_style: Style,
) {
    let panel = Paragraph::new(message.to_owned()).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(panel, area);
}

fn panel_border_style(is_active: bool) -> Style {
    if is_active {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    }
}

// =============================================================================
// Rows
// =============================================================================

fn friend_row_line(row: &FriendRow, busy_target: Option<UserId>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(row.name.clone(), styles::row_name_style()),
        Span::styled(format!("  #{}", row.user_id.0), styles::row_detail_style()),
    ];

    let detail = if busy_target == Some(row.user_id) {
        "Đang gửi..."
    } else {
        relation_label(row.relation)
    };
    if !detail.is_empty() {
        spans.push(Span::styled(
            format!("  {}", detail),
            styles::row_detail_style(),
        ));
    }

    Line::from(spans)
}

fn relation_label(relation: FriendRelation) -> &'static str {
    match relation {
        FriendRelation::CanRequest => "chưa kết bạn",
        FriendRelation::Pending => "Đã gửi lời mời",
        FriendRelation::Friends => "Bạn bè",
    }
}

fn group_row_line(row: &GroupRow) -> Line<'static> {
    Line::from(vec![
        Span::styled(row.name.clone(), styles::row_name_style()),
        Span::styled(
            format!("  {} thành viên", row.member_count),
            styles::row_detail_style(),
        ),
    ])
}

fn member_row_line(member: &GroupMember) -> Line<'static> {
    let name_style = if member.banned {
        styles::banned_member_style()
    } else {
        styles::row_name_style()
    };

    let mut spans = vec![Span::styled(member.name.clone(), name_style)];
    if member.banned {
        spans.push(Span::styled(
            "  (bị chặn)".to_owned(),
            styles::banned_member_style(),
        ));
    }

    Line::from(spans)
}

fn notification_line(notification: &Notification, now_ms: i64) -> Line<'static> {
    let prefix = if notification.read {
        Span::raw("  ")
    } else {
        Span::styled("● ".to_owned(), styles::badge_style())
    };

    let markup = format!(
        "<b>{}</b> {}",
        escape_html(&notification.sender_name),
        escape_html(&notification.content)
    );
    let mut spans = vec![prefix];
    spans.extend(markup_to_spans(&markup));
    spans.push(Span::styled(
        format!(" · {}", notification.relative_time(now_ms)),
        styles::hint_style(),
    ));

    Line::from(spans)
}

fn search_hit_line(hit: &SearchHit) -> Line<'static> {
    let markup = format!(
        "<b>{}</b>: {}",
        escape_html(&hit.sender_name),
        escape_html(&hit.content)
    );
    let mut spans = markup_to_spans(&markup);
    spans.push(Span::styled(
        format!(" · {}", format_hit_timestamp(hit.sent_at_unix_ms)),
        styles::hint_style(),
    ));

    Line::from(spans)
}

fn transcript_title(conversation: &ConversationState) -> String {
    if conversation.is_open() {
        format!("Messages — {}", conversation.title())
    } else {
        "Messages".to_owned()
    }
}

fn format_hit_timestamp(timestamp_ms: i64) -> String {
    use chrono::{Local, TimeZone};

    let datetime = match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => return "--:--".to_owned(),
    };

    if datetime.date_naive() == Local::now().date_naive() {
        datetime.format("%H:%M").to_string()
    } else {
        datetime.format("%d/%m").to_string()
    }
}

// =============================================================================
// Overlays
// =============================================================================

fn render_overlay(frame: &mut Frame<'_>, state: &ShellState, overlay: &Overlay) {
    match overlay {
        Overlay::Notifications => render_notifications_overlay(frame, state),
        Overlay::CreateGroup => render_create_group_overlay(frame, state),
        Overlay::ConfirmModeration {
            display_name,
            action,
            ..
        } => render_confirm_overlay(frame, display_name, *action),
        Overlay::BanDialog(dialog) => render_ban_overlay(frame, dialog),
        Overlay::Search => render_search_overlay(frame, state),
        Overlay::Alert { message } => render_alert_overlay(frame, message),
    }
}

fn render_notifications_overlay(frame: &mut Frame<'_>, state: &ShellState) {
    let area = centered_area(frame.area(), 64, 16);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title("Notifications")
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style());

    let notifications = state.notifications();
    match notifications.ui_state() {
        NotificationPanelUiState::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
        }
        NotificationPanelUiState::Error => {
            frame.render_widget(
                Paragraph::new("Failed to load. Check the log.").block(block),
                area,
            );
        }
        NotificationPanelUiState::Ready => {
            if notifications.items().is_empty() {
                frame.render_widget(Paragraph::new(EMPTY_NOTIFICATIONS_LABEL).block(block), area);
                return;
            }

            let now = now_unix_ms();
            let items: Vec<ListItem<'static>> = notifications
                .items()
                .iter()
                .map(|notification| ListItem::new(notification_line(notification, now)))
                .collect();

            let widget = List::new(items)
                .block(block)
                .highlight_style(styles::selection_style());
            let mut list_state = ListState::default();
            list_state.select(Some(notifications.selected_index()));
            frame.render_stateful_widget(widget, area, &mut list_state);
        }
    }
}

fn render_create_group_overlay(frame: &mut Frame<'_>, state: &ShellState) {
    use crate::domain::group_form_state::GroupFormFocus;

    let area = centered_area(frame.area(), 50, 10);
    frame.render_widget(Clear, area);

    let form = state.group_form();
    let mut lines = vec![
        Line::from(Span::styled("Tên nhóm:".to_owned(), styles::hint_style())),
        Line::from(vec![
            Span::styled("> ".to_owned(), styles::input_prompt_style()),
            Span::styled(form.name().text().to_owned(), styles::input_text_style()),
        ]),
        Line::from(Span::styled("Mô tả:".to_owned(), styles::hint_style())),
        Line::from(vec![
            Span::styled("> ".to_owned(), styles::input_prompt_style()),
            Span::styled(
                form.description().text().to_owned(),
                styles::input_text_style(),
            ),
        ]),
    ];
    match form.warning() {
        Some(warning) => lines.push(Line::from(Span::styled(
            warning.to_owned(),
            styles::warning_style(),
        ))),
        None => lines.push(Line::default()),
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", form.submit_label()),
        styles::row_name_style(),
    )));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Tạo nhóm")
            .borders(Borders::ALL)
            .border_style(styles::active_panel_border_style()),
    );
    frame.render_widget(panel, area);

    if !form.is_busy() {
        let (field, line_index) = match form.focus() {
            GroupFormFocus::Name => (form.name(), 1),
            GroupFormFocus::Description => (form.description(), 3),
        };
        let cursor_x = area
            .x
            .saturating_add(3)
            .saturating_add(message_input::cursor_column(field));
        frame.set_cursor_position((cursor_x, area.y.saturating_add(1 + line_index)));
    }
}

fn render_confirm_overlay(frame: &mut Frame<'_>, display_name: &str, action: ModerationAction) {
    let area = centered_area(frame.area(), 48, 4);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(confirmation_prompt(action, display_name)),
        Line::from(Span::styled("(y/n)".to_owned(), styles::hint_style())),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Xác nhận")
            .borders(Borders::ALL)
            .border_style(styles::active_panel_border_style()),
    );
    frame.render_widget(panel, area);
}

fn render_ban_overlay(frame: &mut Frame<'_>, dialog: &BanDialogState) {
    let area = centered_area(frame.area(), 44, 4);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(format!(
            "Chặn {} trong bao nhiêu ngày?",
            dialog.display_name
        )),
        Line::from(vec![
            Span::styled("> ".to_owned(), styles::input_prompt_style()),
            Span::styled(
                dialog.days_input.text().to_owned(),
                styles::input_text_style(),
            ),
        ]),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Chặn thành viên")
            .borders(Borders::ALL)
            .border_style(styles::active_panel_border_style()),
    );
    frame.render_widget(panel, area);

    let cursor_x = area
        .x
        .saturating_add(3)
        .saturating_add(message_input::cursor_column(&dialog.days_input));
    frame.set_cursor_position((cursor_x, area.y.saturating_add(2)));
}

fn render_search_overlay(frame: &mut Frame<'_>, state: &ShellState) {
    let area = centered_area(frame.area(), 72, 18);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title("Tìm kiếm tin nhắn")
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [input_area, results_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .areas(inner);

    let search = state.search();
    render_search_input(frame, input_area, search.input(), true);

    if let Some(notice) = search.notice() {
        frame.render_widget(
            Paragraph::new(notice).style(styles::hint_style()),
            results_area,
        );
        return;
    }

    if search.hits().is_empty() {
        let message = if search.is_awaiting_results() {
            "Đang tìm..."
        } else if search.input().is_empty() {
            "Nhập từ khóa để tìm trong cuộc trò chuyện."
        } else {
            "Không có kết quả."
        };
        frame.render_widget(
            Paragraph::new(message).style(styles::hint_style()),
            results_area,
        );
        return;
    }

    let items: Vec<ListItem<'static>> = search
        .hits()
        .iter()
        .map(|hit| ListItem::new(search_hit_line(hit)))
        .collect();
    let widget = List::new(items).highlight_style(styles::selection_style());
    let mut list_state = ListState::default();
    list_state.select(Some(search.selected_index()));
    frame.render_stateful_widget(widget, results_area, &mut list_state);
}

fn render_alert_overlay(frame: &mut Frame<'_>, message: &str) {
    let area = centered_area(frame.area(), 56, 4);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(message.to_owned()),
        Line::from(Span::styled(
            "Enter: đóng".to_owned(),
            styles::hint_style(),
        )),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Lỗi")
            .borders(Borders::ALL)
            .border_style(styles::warning_style()),
    );
    frame.render_widget(panel, area);
}

fn centered_area(frame_area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame_area.width);
    let height = height.min(frame_area.height);
    let x = frame_area.x + frame_area.width.saturating_sub(width) / 2;
    let y = frame_area.y + frame_area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

// =============================================================================
// Status line
// =============================================================================

fn status_line(state: &ShellState) -> String {
    if let Some(toast) = state.toast() {
        return toast.to_owned();
    }

    let connectivity = state.hub_status().as_label();
    let hint = match state.overlay() {
        Some(Overlay::Notifications) => "j/k: move | Enter: open | a: mark all read | Esc: close",
        Some(Overlay::CreateGroup) => "Tab: switch field | Enter: create | Esc: cancel",
        Some(Overlay::ConfirmModeration { .. }) => "y: confirm | n: cancel",
        Some(Overlay::BanDialog(_)) => "type days | Enter: ban | Esc: cancel",
        Some(Overlay::Search) => "type to search | Up/Down: select | Enter: jump | Esc: close",
        Some(Overlay::Alert { .. }) => "Enter: dismiss",
        None => focus_hint(state.route(), state.focus()),
    };

    format!("{} | {}", connectivity, hint)
}

fn focus_hint(route: Route, focus: Focus) -> &'static str {
    match focus {
        Focus::Compose => "Enter: send | Esc: cancel",
        Focus::Filter => "type to filter | Enter/Esc: done",
        Focus::Members => "j/k: move | x: kick | b: ban | u: unban | Esc: back | q: quit",
        Focus::List => match route {
            Route::Chats => {
                "j/k: move | Enter: open | i: compose | /: search | f: filter | n: notifications | Tab: next | q: quit"
            }
            Route::Groups => {
                "j/k: move | Enter: open | m: members | c: new group | i: compose | /: search | q: quit"
            }
            Route::Friends => "j/k: move | Enter/a: add friend | f: filter | q: quit",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::HubStatus;
    use crate::domain::ids::{ConversationId, GroupId, MessageId, NotificationId};
    use crate::domain::session::UserSession;
    use std::time::{Duration, Instant};

    fn state() -> ShellState {
        ShellState::new(UserSession::default())
    }

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn notification(id: i64, sender: &str, content: &str, read: bool) -> Notification {
        Notification {
            id: NotificationId(id),
            sender_name: sender.to_owned(),
            content: content.to_owned(),
            created_at_unix_ms: now_unix_ms(),
            read,
            redirect_url: None,
        }
    }

    #[test]
    fn status_line_carries_the_connection_label() {
        let mut state = state();
        state.set_hub_status(HubStatus::Connected);

        let line = status_line(&state);

        assert!(line.starts_with("Trực tuyến | "));
    }

    #[test]
    fn toast_replaces_the_status_line() {
        let mut state = state();
        state.show_toast(
            "Tạo nhóm thành công".to_owned(),
            Instant::now() + Duration::from_secs(3),
        );

        assert_eq!(status_line(&state), "Tạo nhóm thành công");
    }

    #[test]
    fn compose_focus_changes_the_hint() {
        let mut state = state();
        state.set_focus(Focus::Compose);

        assert!(status_line(&state).contains("Enter: send"));
    }

    #[test]
    fn overlay_hint_wins_over_the_focus_hint() {
        let mut state = state();
        state.set_focus(Focus::Compose);
        state.open_overlay(Overlay::Search);

        assert!(status_line(&state).contains("Enter: jump"));
    }

    #[test]
    fn nav_line_marks_the_active_route() {
        let state = state();

        let line = nav_line(&state, 80);

        let chats = line
            .spans
            .iter()
            .find(|span| span.content.contains("Chats"))
            .expect("nav should list the Chats link");
        assert_eq!(chats.style, styles::nav_active_style());
        let friends = line
            .spans
            .iter()
            .find(|span| span.content.contains("Friends"))
            .expect("nav should list the Friends link");
        assert_eq!(friends.style, styles::nav_inactive_style());
    }

    #[test]
    fn nav_line_shows_the_unread_badge() {
        let mut state = state();
        state.notifications_mut().set_items(vec![
            notification(1, "Lan", "đã gửi lời mời", false),
            notification(2, "Minh", "đã nhắn", true),
        ]);

        let text = line_to_string(&nav_line(&state, 80));

        assert!(text.contains("Notifications [1]"));
    }

    #[test]
    fn nav_line_hides_the_badge_when_everything_is_read() {
        let mut state = state();
        state
            .notifications_mut()
            .set_items(vec![notification(1, "Lan", "đã gửi lời mời", true)]);

        let text = line_to_string(&nav_line(&state, 80));

        assert!(text.contains("Notifications"));
        assert!(!text.contains('['));
    }

    #[test]
    fn friend_row_shows_relation_and_id() {
        let row = FriendRow {
            user_id: UserId(7),
            name: "Minh".to_owned(),
            relation: FriendRelation::Pending,
        };

        let text = line_to_string(&friend_row_line(&row, None));

        assert!(text.contains("Minh"));
        assert!(text.contains("#7"));
        assert!(text.contains("Đã gửi lời mời"));
    }

    #[test]
    fn busy_friend_row_shows_the_spinner_label() {
        let row = FriendRow {
            user_id: UserId(7),
            name: "Minh".to_owned(),
            relation: FriendRelation::CanRequest,
        };

        let text = line_to_string(&friend_row_line(&row, Some(UserId(7))));

        assert!(text.contains("Đang gửi..."));
    }

    #[test]
    fn group_row_shows_the_member_count() {
        let row = GroupRow {
            group_id: GroupId(3),
            name: "Trà chiều".to_owned(),
            member_count: 5,
        };

        let text = line_to_string(&group_row_line(&row));

        assert!(text.contains("Trà chiều"));
        assert!(text.contains("5 thành viên"));
    }

    #[test]
    fn banned_member_row_is_marked() {
        let member = GroupMember {
            user_id: UserId(9),
            name: "Phúc".to_owned(),
            banned: true,
        };

        let text = line_to_string(&member_row_line(&member));

        assert!(text.contains("(bị chặn)"));
    }

    #[test]
    fn notification_line_keeps_content_inert() {
        let item = notification(1, "Lan", "<b>đã nhắn</b>", false);

        let line = notification_line(&item, now_unix_ms());

        let text = line_to_string(&line);
        assert!(text.contains("<b>đã nhắn</b>"));
        assert!(text.contains("vài giây trước"));
    }

    #[test]
    fn search_hit_line_carries_sender_and_content() {
        let hit = SearchHit {
            message_id: MessageId(4),
            sender_name: "Lan".to_owned(),
            content: "trà sữa nhé".to_owned(),
            sent_at_unix_ms: now_unix_ms(),
        };

        let text = line_to_string(&search_hit_line(&hit));

        assert!(text.contains("Lan"));
        assert!(text.contains("trà sữa nhé"));
    }

    #[test]
    fn transcript_title_uses_the_open_conversation() {
        let mut state = state();
        let conversation = state.conversation_for_mut(Route::Chats).unwrap();
        conversation.set_loading(ConversationId::Friend(UserId(1)), "Lan".to_owned());

        assert_eq!(
            transcript_title(state.conversation_for(Route::Chats).unwrap()),
            "Messages — Lan"
        );
    }

    #[test]
    fn closed_transcript_uses_the_bare_title() {
        let state = state();

        assert_eq!(
            transcript_title(state.conversation_for(Route::Chats).unwrap()),
            "Messages"
        );
    }
}
