//! The shell brain: one `handle_event` call per key press, tick or
//! worker completion. All state changes funnel through here, so the UI
//! layer stays a pure renderer.

use std::time::Instant;

use anyhow::Result;

use crate::domain::events::{
    ActionOutcome, ApiEvent, ApiFailure, AppEvent, FriendRequestOutcome, HubEvent,
    InboundDirectMessage, InboundGroupMessage, KeyInput, MembershipChange,
    GENERIC_FAILURE_MESSAGE,
};
use crate::domain::ids::{ConversationId, GroupId, UserId};
use crate::domain::member_panel_state::ModerationAction;
use crate::domain::message::{ChatMessage, SearchHit};
use crate::domain::nav_state::{self, Route};
use crate::domain::search_state::SELECT_CONVERSATION_PROMPT;
use crate::domain::session::{Ownership, UserSession};
use crate::domain::shell_state::{
    BanDialogState, Focus, Overlay, ShellState, HIGHLIGHT_DURATION, POST_CREATE_REFRESH_DELAY,
    TOAST_DURATION,
};
use crate::domain::text_input::TextFieldState;
use crate::infra::contracts::ExternalOpener;

use super::contracts::{ApiCommand, ApiGateway, HubChannel, ShellOrchestrator};
use super::create_group::{self, CreateGroupCommand, CreateGroupError};
use super::friend_requests::{self, FriendRequestError};
use super::moderate_member::{self, ModerateCommand, ModerateError};
use super::notifications::{self, NotificationActivation};
use super::open_conversation::{self, OpenConversationCommand};
use super::route_inbound::{self, InboundDisposition};
use super::search_messages::{self, SearchCommand, SearchError};
use super::send_chat_message::{self, SendChatCommand, SendChatError};

const SESSION_UNCONFIRMED: &str = "SESSION_UNCONFIRMED";
const LIST_LOAD_FAILED: &str = "LIST_LOAD_FAILED";
const NOTIFICATION_SYNC_FAILED: &str = "NOTIFICATION_SYNC_FAILED";
const SEARCH_TARGET_MISSING: &str = "SEARCH_TARGET_MISSING";

/// Status-line text when a hub-bound action finds the socket down.
const OFFLINE_TOAST: &str = "Mất kết nối";
/// Success toast when the server answers group creation without a
/// message of its own.
const GROUP_CREATED_TOAST: &str = "Tạo nhóm thành công";

pub struct DefaultShellOrchestrator<H, A, O>
where
    H: HubChannel,
    A: ApiGateway,
    O: ExternalOpener,
{
    state: ShellState,
    hub: H,
    api: A,
    opener: O,
    bootstrapped: bool,
}

impl<H, A, O> DefaultShellOrchestrator<H, A, O>
where
    H: HubChannel,
    A: ApiGateway,
    O: ExternalOpener,
{
    pub fn new(session: UserSession, hub: H, api: A, opener: O) -> Self {
        Self {
            state: ShellState::new(session),
            hub,
            api,
            opener,
            bootstrapped: false,
        }
    }

    fn show_toast(&mut self, text: String) {
        self.state.show_toast(text, Instant::now() + TOAST_DURATION);
    }

    fn on_tick(&mut self) -> Result<()> {
        if !self.bootstrapped {
            self.bootstrapped = true;
            self.hub.ensure_started()?;
            self.api.submit(ApiCommand::LoadFriends)?;
            self.api.submit(ApiCommand::LoadGroups)?;
            self.api.submit(ApiCommand::LoadNotifications)?;
        }

        let now = Instant::now();
        self.state.clear_expired_toast(now);
        for route in [Route::Chats, Route::Groups] {
            if let Some(pane) = self.state.conversation_for_mut(route) {
                pane.clear_expired_highlight(now);
            }
        }
        self.state.contacts_mut().apply_filter_if_due(now);
        self.state.friends_mut().apply_filter_if_due(now);

        if let Some(query) = self.state.search_mut().take_due_query(now) {
            self.dispatch_search(query);
        }

        if self.state.take_due_group_refresh(now) {
            self.api.submit(ApiCommand::LoadGroups)?;
        }
        Ok(())
    }

    fn dispatch_search(&mut self, query: String) {
        let conversation = self
            .state
            .active_conversation()
            .and_then(|pane| pane.conversation());
        match search_messages::search_messages(&self.hub, SearchCommand {
            conversation,
            query,
        }) {
            Ok(()) => self.state.search_mut().mark_dispatched(),
            Err(SearchError::EmptyQuery) => self.state.search_mut().clear_hits(),
            Err(SearchError::NoConversationOpen) => self
                .state
                .search_mut()
                .show_notice(SELECT_CONVERSATION_PROMPT),
            Err(SearchError::NotConnected | SearchError::ChannelClosed) => {
                self.show_toast(OFFLINE_TOAST.to_owned());
            }
        }
    }

    fn on_key(&mut self, key: KeyInput) -> Result<()> {
        if self.state.overlay().is_some() {
            return self.on_overlay_key(key);
        }
        match self.state.focus() {
            Focus::List => self.on_list_key(key),
            Focus::Members => self.on_members_key(key),
            Focus::Compose => {
                self.on_compose_key(key);
                Ok(())
            }
            Focus::Filter => {
                self.on_filter_key(key);
                Ok(())
            }
        }
    }

    fn on_overlay_key(&mut self, key: KeyInput) -> Result<()> {
        let Some(overlay) = self.state.overlay().cloned() else {
            return Ok(());
        };
        match overlay {
            Overlay::Notifications => self.on_notifications_key(key),
            Overlay::CreateGroup => self.on_create_group_key(key),
            Overlay::ConfirmModeration {
                group_id,
                target,
                action,
                ..
            } => {
                match key.key.as_str() {
                    "y" | "enter" => {
                        self.state.close_overlay();
                        self.run_moderation(group_id, target, action);
                    }
                    "n" | "esc" => self.state.close_overlay(),
                    _ => {}
                }
                Ok(())
            }
            Overlay::BanDialog(dialog) => {
                self.on_ban_dialog_key(dialog, key);
                Ok(())
            }
            Overlay::Search => {
                self.on_search_key(key);
                Ok(())
            }
            Overlay::Alert { .. } => {
                if matches!(key.key.as_str(), "enter" | "esc") {
                    self.state.close_overlay();
                }
                Ok(())
            }
        }
    }

    fn on_notifications_key(&mut self, key: KeyInput) -> Result<()> {
        match key.key.as_str() {
            "esc" | "n" => self.state.close_overlay(),
            "j" | "down" => self.state.notifications_mut().select_next(),
            "k" | "up" => self.state.notifications_mut().select_previous(),
            "a" => {
                if let Err(error) =
                    notifications::mark_all_read(&self.api, self.state.notifications_mut())
                {
                    tracing::warn!(
                        code = NOTIFICATION_SYNC_FAILED,
                        error = ?error,
                        "mark-all-read not queued"
                    );
                }
            }
            "enter" => self.activate_notification(),
            _ => {}
        }
        Ok(())
    }

    fn activate_notification(&mut self) {
        match notifications::activate_selected(
            &self.api,
            &self.opener,
            self.state.notifications_mut(),
        ) {
            Ok(NotificationActivation::Navigated(route)) => {
                self.state.close_overlay();
                self.state.set_route(route);
            }
            Ok(NotificationActivation::OpenedExternal) => self.state.close_overlay(),
            Ok(NotificationActivation::NoTarget) => {}
            Err(error) => {
                tracing::warn!(
                    code = NOTIFICATION_SYNC_FAILED,
                    error = ?error,
                    "notification activation failed"
                );
            }
        }
    }

    fn on_create_group_key(&mut self, key: KeyInput) -> Result<()> {
        match key.key.as_str() {
            "esc" => self.state.close_overlay(),
            "tab" => self.state.group_form_mut().toggle_focus(),
            "enter" => self.submit_group_form(),
            _ => {
                edit_text_field(self.state.group_form_mut().focused_field_mut(), &key);
            }
        }
        Ok(())
    }

    fn submit_group_form(&mut self) {
        let command = CreateGroupCommand {
            name: self.state.group_form().name().text().to_owned(),
            description: self.state.group_form().description().text().to_owned(),
        };
        match create_group::submit_group(&self.api, self.state.group_form_mut(), command) {
            Ok(()) | Err(CreateGroupError::Busy) => {}
            Err(CreateGroupError::RequestRejected) => {
                self.show_toast(GENERIC_FAILURE_MESSAGE.to_owned());
            }
            // Validation misses put their warning on the form already.
            Err(_) => {}
        }
    }

    fn on_ban_dialog_key(&mut self, dialog: BanDialogState, key: KeyInput) {
        match key.key.as_str() {
            "esc" => self.state.close_overlay(),
            "enter" => {
                if let Some(days) = dialog.days() {
                    self.state.close_overlay();
                    self.run_moderation(
                        dialog.group_id,
                        dialog.target,
                        ModerationAction::Ban { days },
                    );
                }
            }
            "backspace" => {
                if let Some(Overlay::BanDialog(dialog)) = self.state.overlay_mut() {
                    dialog.days_input.backspace();
                }
            }
            other => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    if ch.is_ascii_digit() {
                        if let Some(Overlay::BanDialog(dialog)) = self.state.overlay_mut() {
                            dialog.days_input.insert_char(ch);
                        }
                    }
                }
            }
        }
    }

    fn run_moderation(&mut self, group_id: GroupId, target: UserId, action: ModerationAction) {
        let command = ModerateCommand {
            group_id,
            target,
            action,
        };
        match moderate_member::moderate_member(&self.api, self.state.members_mut(), command) {
            Ok(()) | Err(ModerateError::Busy) => {}
            Err(ModerateError::RequestRejected) => {
                self.show_toast(GENERIC_FAILURE_MESSAGE.to_owned());
            }
        }
    }

    fn on_search_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "esc" => {
                self.state.search_mut().reset();
                self.state.close_overlay();
            }
            "down" => self.state.search_mut().select_next(),
            "up" => self.state.search_mut().select_previous(),
            "enter" => self.jump_to_hit(),
            _ => {
                let now = Instant::now();
                let search = self.state.search_mut();
                if edit_text_field(search.input_mut(), &key) {
                    search.poke(now);
                }
            }
        }
    }

    fn jump_to_hit(&mut self) {
        let Some(hit) = self.state.search().selected_hit() else {
            return;
        };
        let message_id = hit.message_id;
        self.state.search_mut().reset();
        self.state.close_overlay();

        let until = Instant::now() + HIGHLIGHT_DURATION;
        if let Some(pane) = self.state.active_conversation_mut() {
            if pane.select_message(message_id) {
                pane.highlight_message(message_id, until);
            } else {
                tracing::debug!(
                    code = SEARCH_TARGET_MISSING,
                    message_id = message_id.0,
                    "search hit not in the loaded transcript"
                );
            }
        }
    }

    fn on_compose_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "esc" => self.state.set_focus(Focus::List),
            "enter" => self.send_compose(),
            _ => {
                if let Some(field) = self.state.active_compose_mut() {
                    edit_text_field(field, &key);
                }
            }
        }
    }

    /// Fire-and-forget: the compose box clears on a queued send and the
    /// transcript only updates when the hub echoes the stored message.
    fn send_compose(&mut self) {
        let conversation = self
            .state
            .active_conversation()
            .and_then(|pane| pane.conversation());
        let Some(text) = self
            .state
            .compose_for(self.state.route())
            .map(|field| field.text().to_owned())
        else {
            return;
        };

        match send_chat_message::send_chat_message(&self.hub, SendChatCommand {
            conversation,
            text,
        }) {
            Ok(()) => {
                if let Some(field) = self.state.active_compose_mut() {
                    field.clear();
                }
            }
            Err(SendChatError::EmptyMessage) => {}
            Err(SendChatError::NoConversationOpen) => {
                self.show_toast(SELECT_CONVERSATION_PROMPT.to_owned());
            }
            Err(SendChatError::NotConnected | SendChatError::ChannelClosed) => {
                self.show_toast(OFFLINE_TOAST.to_owned());
            }
        }
    }

    fn on_filter_key(&mut self, key: KeyInput) {
        if matches!(key.key.as_str(), "esc" | "enter") {
            self.state.set_focus(Focus::List);
            return;
        }
        let now = Instant::now();
        let list = match self.state.route() {
            Route::Friends => self.state.friends_mut(),
            Route::Chats | Route::Groups => self.state.contacts_mut(),
        };
        if edit_text_field(list.filter_input_mut(), &key) {
            list.poke_filter(now);
        }
    }

    fn on_list_key(&mut self, key: KeyInput) -> Result<()> {
        match key.key.as_str() {
            "q" => {
                self.state.stop();
                return Ok(());
            }
            "tab" => {
                self.state.set_route(next_route(self.state.route()));
                return Ok(());
            }
            "n" => {
                self.open_notifications();
                return Ok(());
            }
            _ => {}
        }

        match self.state.route() {
            Route::Chats => self.on_chats_list_key(key),
            Route::Groups => self.on_groups_list_key(key),
            Route::Friends => self.on_friends_list_key(key),
        }
        Ok(())
    }

    fn open_notifications(&mut self) {
        self.state.open_overlay(Overlay::Notifications);
        if let Err(error) = notifications::open_panel(&self.api, self.state.notifications_mut()) {
            tracing::warn!(
                code = NOTIFICATION_SYNC_FAILED,
                error = ?error,
                "notification fetch not queued"
            );
        }
    }

    fn on_chats_list_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "j" => self.state.contacts_mut().select_next(),
            "k" => self.state.contacts_mut().select_previous(),
            "enter" => self.open_selected_contact(),
            "i" => self.focus_compose(),
            "/" => self.open_search(),
            "f" => self.state.set_focus(Focus::Filter),
            "down" => self.scroll_transcript(true),
            "up" => self.scroll_transcript(false),
            _ => {}
        }
    }

    fn on_groups_list_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "j" => self.state.groups_mut().select_next(),
            "k" => self.state.groups_mut().select_previous(),
            "enter" => self.open_selected_group(),
            "i" => self.focus_compose(),
            "m" => {
                if self.open_group_id().is_some() {
                    self.state.set_focus(Focus::Members);
                }
            }
            "c" => {
                self.state.group_form_mut().reset();
                self.state.open_overlay(Overlay::CreateGroup);
            }
            "/" => self.open_search(),
            "down" => self.scroll_transcript(true),
            "up" => self.scroll_transcript(false),
            _ => {}
        }
    }

    fn on_friends_list_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "j" | "down" => self.state.friends_mut().select_next(),
            "k" | "up" => self.state.friends_mut().select_previous(),
            "/" | "f" => self.state.set_focus(Focus::Filter),
            "enter" | "a" => self.request_selected_friend(),
            _ => {}
        }
    }

    fn on_members_key(&mut self, key: KeyInput) -> Result<()> {
        match key.key.as_str() {
            "esc" => self.state.set_focus(Focus::List),
            "q" => self.state.stop(),
            "tab" => self.state.set_route(next_route(self.state.route())),
            "j" | "down" => self.state.members_mut().select_next(),
            "k" | "up" => self.state.members_mut().select_previous(),
            "x" => self.confirm_moderation(ModerationAction::Kick),
            "b" => self.open_ban_dialog(),
            "u" => self.confirm_moderation(ModerationAction::Unban),
            _ => {}
        }
        Ok(())
    }

    fn scroll_transcript(&mut self, forward: bool) {
        if let Some(pane) = self.state.active_conversation_mut() {
            if forward {
                pane.select_next();
            } else {
                pane.select_previous();
            }
        }
    }

    fn focus_compose(&mut self) {
        let open = self
            .state
            .active_conversation()
            .map(|pane| pane.is_open())
            .unwrap_or(false);
        if open {
            self.state.set_focus(Focus::Compose);
        }
    }

    fn open_search(&mut self) {
        self.state.search_mut().reset();
        self.state.open_overlay(Overlay::Search);
        let open = self
            .state
            .active_conversation()
            .map(|pane| pane.is_open())
            .unwrap_or(false);
        if !open {
            self.state
                .search_mut()
                .show_notice(SELECT_CONVERSATION_PROMPT);
        }
    }

    fn open_selected_contact(&mut self) {
        let Some(row) = self.state.contacts().selected_row() else {
            return;
        };
        let command = OpenConversationCommand {
            conversation: ConversationId::Friend(row.user_id),
            title: row.name.clone(),
        };
        self.open_in_pane(Route::Chats, command);
    }

    fn open_selected_group(&mut self) {
        let Some(row) = self.state.groups().selected_row() else {
            return;
        };
        let group_id = row.group_id;
        let command = OpenConversationCommand {
            conversation: ConversationId::Group(group_id),
            title: row.name.clone(),
        };
        self.open_in_pane(Route::Groups, command);

        self.state.members_mut().set_loading();
        if self
            .api
            .submit(ApiCommand::LoadMembers { group_id })
            .is_err()
        {
            self.state.members_mut().set_error();
        }
    }

    fn open_in_pane(&mut self, route: Route, command: OpenConversationCommand) {
        let api = &self.api;
        let Some(pane) = self.state.conversation_for_mut(route) else {
            return;
        };
        if open_conversation::open_conversation(api, pane, command).is_err() {
            self.show_toast(GENERIC_FAILURE_MESSAGE.to_owned());
        }
    }

    fn request_selected_friend(&mut self) {
        let target = match self.state.friends().selected_row() {
            Some(row) => row.user_id,
            None => return,
        };
        let api = &self.api;
        match friend_requests::send_friend_request(api, self.state.friends_mut(), target) {
            Ok(()) => {}
            Err(FriendRequestError::RequestRejected) => {
                self.show_toast(GENERIC_FAILURE_MESSAGE.to_owned());
            }
            // Rows without a requestable relation simply ignore the key.
            Err(_) => {}
        }
    }

    fn confirm_moderation(&mut self, action: ModerationAction) {
        let Some(group_id) = self.open_group_id() else {
            return;
        };
        let Some(member) = self.state.members().selected_member() else {
            return;
        };
        // Unban applies to banned members, kick and ban to the rest.
        let wants_banned = matches!(action, ModerationAction::Unban);
        if member.banned != wants_banned {
            return;
        }
        let overlay = Overlay::ConfirmModeration {
            group_id,
            target: member.user_id,
            display_name: member.name.clone(),
            action,
        };
        self.state.open_overlay(overlay);
    }

    fn open_ban_dialog(&mut self) {
        let Some(group_id) = self.open_group_id() else {
            return;
        };
        let Some(member) = self.state.members().selected_member() else {
            return;
        };
        if member.banned {
            return;
        }
        let dialog = BanDialogState::new(group_id, member.user_id, member.name.clone());
        self.state.open_overlay(Overlay::BanDialog(dialog));
    }

    fn open_group_id(&self) -> Option<GroupId> {
        match self
            .state
            .conversation_for(Route::Groups)
            .and_then(|pane| pane.conversation())
        {
            Some(ConversationId::Group(id)) => Some(id),
            _ => None,
        }
    }

    fn on_hub_event(&mut self, event: HubEvent) -> Result<()> {
        match event {
            HubEvent::StatusChanged(status) => self.state.set_hub_status(status),
            HubEvent::SessionConfirmed { user_id } => {
                self.state.session_mut().confirm_user_id(user_id);
            }
            HubEvent::DirectMessage(inbound) => self.on_direct_message(inbound),
            HubEvent::GroupMessage(inbound) => self.on_group_message(inbound),
            HubEvent::MemberAdded(change) => {
                self.on_membership_change(change, "đã tham gia nhóm")?;
            }
            HubEvent::MemberRemoved(change) => {
                self.on_membership_change(change, "đã rời nhóm")?;
            }
            HubEvent::SearchResults { conversation, hits } => {
                self.on_search_results(conversation, hits);
            }
        }
        Ok(())
    }

    fn on_direct_message(&mut self, inbound: InboundDirectMessage) {
        let open = self
            .state
            .conversation_for(Route::Chats)
            .and_then(|pane| pane.conversation());
        let disposition =
            route_inbound::direct_message_disposition(open, inbound.sender_id, inbound.recipient_id);
        if disposition != InboundDisposition::Render {
            return;
        }
        let message = self.stamp(inbound.message);
        if let Some(pane) = self.state.conversation_for_mut(Route::Chats) {
            pane.append_message(message);
        }
    }

    fn on_group_message(&mut self, inbound: InboundGroupMessage) {
        let open = self
            .state
            .conversation_for(Route::Groups)
            .and_then(|pane| pane.conversation());
        if route_inbound::group_message_disposition(open, inbound.group_id)
            != InboundDisposition::Render
        {
            return;
        }
        let message = self.stamp(inbound.message);
        if let Some(pane) = self.state.conversation_for_mut(Route::Groups) {
            pane.append_message(message);
        }
    }

    fn stamp(&self, mut message: ChatMessage) -> ChatMessage {
        if route_inbound::stamp_ownership(self.state.session(), &mut message)
            == Ownership::UnknownSelf
        {
            tracing::warn!(
                code = SESSION_UNCONFIRMED,
                message_id = message.id.0,
                "account id unknown; message filed as incoming"
            );
        }
        message
    }

    fn on_membership_change(&mut self, change: MembershipChange, what: &str) -> Result<()> {
        self.show_toast(format!("{} {}", change.display_name, what));
        if self.open_group_id() == Some(change.group_id) {
            self.api.submit(ApiCommand::LoadMembers {
                group_id: change.group_id,
            })?;
        }
        Ok(())
    }

    fn on_search_results(&mut self, conversation: ConversationId, hits: Vec<SearchHit>) {
        if !matches!(self.state.overlay(), Some(Overlay::Search)) {
            return;
        }
        let open = self
            .state
            .active_conversation()
            .and_then(|pane| pane.conversation());
        if open != Some(conversation) {
            return;
        }
        self.state.search_mut().set_hits(hits);
    }

    fn on_api_event(&mut self, event: ApiEvent) -> Result<()> {
        match event {
            ApiEvent::FriendsLoaded(result) => match result {
                Ok(rows) => {
                    self.state.contacts_mut().set_ready(rows.clone());
                    self.state.friends_mut().set_ready(rows);
                }
                Err(failure) => {
                    self.state.contacts_mut().set_error();
                    self.state.friends_mut().set_error();
                    tracing::warn!(code = LIST_LOAD_FAILED, list = "friends", error = %failure, "list load failed");
                }
            },
            ApiEvent::GroupsLoaded(result) => match result {
                Ok(rows) => self.state.groups_mut().set_ready(rows),
                Err(failure) => {
                    self.state.groups_mut().set_error();
                    tracing::warn!(code = LIST_LOAD_FAILED, list = "groups", error = %failure, "list load failed");
                }
            },
            ApiEvent::MembersLoaded { group_id, result } => {
                if self.open_group_id() == Some(group_id) {
                    match result {
                        Ok(members) => self.state.members_mut().set_ready(members),
                        Err(_) => self.state.members_mut().set_error(),
                    }
                }
            }
            ApiEvent::HistoryLoaded {
                conversation,
                result,
            } => self.on_history_loaded(conversation, result),
            ApiEvent::GroupCreated(result) => self.on_group_created(result),
            ApiEvent::ModerationFinished {
                group_id, result, ..
            } => self.on_moderation_finished(group_id, result)?,
            ApiEvent::FriendRequestFinished { target, result } => {
                self.on_friend_request_finished(target, result);
            }
            ApiEvent::NotificationsLoaded(result) => match result {
                Ok(items) => self.state.notifications_mut().set_items(items),
                Err(_) => self.state.notifications_mut().set_error(),
            },
            ApiEvent::NotificationMarked { id, result } => {
                if let Err(failure) = result {
                    tracing::warn!(code = NOTIFICATION_SYNC_FAILED, id = id.0, error = %failure, "mark-read not persisted");
                }
            }
            ApiEvent::AllNotificationsMarked(result) => {
                if let Err(failure) = result {
                    tracing::warn!(code = NOTIFICATION_SYNC_FAILED, error = %failure, "mark-all-read not persisted");
                }
            }
        }
        Ok(())
    }

    fn on_history_loaded(
        &mut self,
        conversation: ConversationId,
        result: Result<Vec<ChatMessage>, ApiFailure>,
    ) {
        let session = self.state.session().clone();
        let Some(pane) = self.state.conversation_holding_mut(conversation) else {
            return;
        };
        match result {
            Ok(mut messages) => {
                for message in &mut messages {
                    route_inbound::stamp_ownership(&session, message);
                }
                pane.set_ready(messages);
            }
            Err(_) => pane.set_error(),
        }
    }

    fn on_group_created(&mut self, result: Result<ActionOutcome, ApiFailure>) {
        match result {
            Ok(outcome) if outcome.success => {
                self.state.group_form_mut().reset();
                if matches!(self.state.overlay(), Some(Overlay::CreateGroup)) {
                    self.state.close_overlay();
                }
                let text = if outcome.message.is_empty() {
                    GROUP_CREATED_TOAST.to_owned()
                } else {
                    outcome.message
                };
                self.show_toast(text);
                // Delayed so the toast is readable before the list redraws.
                if self.state.route() == Route::Groups {
                    self.state
                        .schedule_group_refresh(Instant::now() + POST_CREATE_REFRESH_DELAY);
                }
            }
            Ok(outcome) => {
                self.state.group_form_mut().clear_busy();
                let warning = if outcome.message.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_owned()
                } else {
                    outcome.message
                };
                self.state.group_form_mut().set_warning(warning);
            }
            Err(failure) => {
                self.state.group_form_mut().clear_busy();
                self.state
                    .group_form_mut()
                    .set_warning(failure.user_message().to_owned());
            }
        }
    }

    fn on_moderation_finished(
        &mut self,
        group_id: GroupId,
        result: Result<ActionOutcome, ApiFailure>,
    ) -> Result<()> {
        self.state.members_mut().clear_busy();
        match result {
            Ok(outcome) => {
                if !outcome.message.is_empty() {
                    self.show_toast(outcome.message.clone());
                } else if !outcome.success {
                    self.show_toast(GENERIC_FAILURE_MESSAGE.to_owned());
                }
                if outcome.success && self.open_group_id() == Some(group_id) {
                    self.api.submit(ApiCommand::LoadMembers { group_id })?;
                    self.api.submit(ApiCommand::LoadHistory {
                        conversation: ConversationId::Group(group_id),
                    })?;
                }
            }
            Err(failure) => self.show_toast(failure.user_message().to_owned()),
        }
        Ok(())
    }

    fn on_friend_request_finished(
        &mut self,
        target: UserId,
        result: Result<FriendRequestOutcome, ApiFailure>,
    ) {
        match result {
            Ok(FriendRequestOutcome::Pending) => self.state.friends_mut().mark_pending(target),
            // A redirect is a navigation, not an answer; the row goes
            // back to its previous state.
            Ok(FriendRequestOutcome::Redirected(path)) => {
                self.state.friends_mut().clear_busy();
                if let Some(route) = nav_state::route_for_path(&path) {
                    self.state.set_route(route);
                }
            }
            Err(failure) => {
                self.state.friends_mut().clear_busy();
                self.state.open_overlay(Overlay::Alert {
                    message: failure.user_message().to_owned(),
                });
            }
        }
    }
}

impl<H, A, O> ShellOrchestrator for DefaultShellOrchestrator<H, A, O>
where
    H: HubChannel,
    A: ApiGateway,
    O: ExternalOpener,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::QuitRequested => {
                self.state.stop();
                Ok(())
            }
            AppEvent::InputKey(key) => self.on_key(key),
            AppEvent::Hub(event) => self.on_hub_event(event),
            AppEvent::Api(event) => self.on_api_event(event),
        }
    }
}

fn next_route(route: Route) -> Route {
    match route {
        Route::Chats => Route::Groups,
        Route::Groups => Route::Friends,
        Route::Friends => Route::Chats,
    }
}

/// Applies an editing key to a text field. Single-character keys are
/// typed text; everything else must match a named editing key. Returns
/// true when the key was consumed by the field.
fn edit_text_field(field: &mut TextFieldState, key: &KeyInput) -> bool {
    if key.ctrl {
        return false;
    }
    match key.key.as_str() {
        "backspace" => field.backspace(),
        "delete" => field.delete(),
        "left" => field.move_left(),
        "right" => field.move_right(),
        "home" => field.move_home(),
        "end" => field.move_end(),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => field.insert_char(ch),
                _ => return false,
            }
        }
    }
    true
}
