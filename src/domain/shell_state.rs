use std::time::{Duration, Instant};

use super::conversation_state::ConversationState;
use super::events::HubStatus;
use super::friend_list_state::FriendListState;
use super::group_form_state::GroupFormState;
use super::group_list_state::GroupListState;
use super::ids::{ConversationId, GroupId, UserId};
use super::member_panel_state::{MemberPanelState, ModerationAction};
use super::nav_state::Route;
use super::notification_state::NotificationPanelState;
use super::search_state::SearchPanelState;
use super::session::UserSession;
use super::text_input::TextFieldState;

/// Debounce window for the friend filter input.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);
/// Debounce window for the in-conversation search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
/// How long a picked search result stays emphasised in the transcript.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);
/// How long a toast stays in the status line.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// Pause between a successful group creation and the list reload, so
/// the success toast is readable before rows shuffle.
pub const POST_CREATE_REFRESH_DELAY: Duration = Duration::from_millis(1500);
/// Ban duration preloaded into the dialog.
pub const DEFAULT_BAN_DAYS: u32 = 7;

/// Which pane receives list navigation keys on the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The route's primary list: contacts, groups or friend rows.
    List,
    /// The member panel on the groups route.
    Members,
    /// The message compose input.
    Compose,
    /// The friend filter input.
    Filter,
}

/// Ban dialog contents: who is being banned and for how many days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanDialogState {
    pub group_id: GroupId,
    pub target: UserId,
    pub display_name: String,
    pub days_input: TextFieldState,
}

impl BanDialogState {
    pub fn new(group_id: GroupId, target: UserId, display_name: String) -> Self {
        let mut days_input = TextFieldState::default();
        days_input.set_text(&DEFAULT_BAN_DAYS.to_string());
        Self {
            group_id,
            target,
            display_name,
            days_input,
        }
    }

    /// Parses the typed duration. Garbage or zero reads as None.
    pub fn days(&self) -> Option<u32> {
        match self.days_input.text().trim().parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(days) => Some(days),
        }
    }
}

/// Modal layer above the route content. At most one is active and it
/// captures every key until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Notifications,
    CreateGroup,
    ConfirmModeration {
        group_id: GroupId,
        target: UserId,
        display_name: String,
        action: ModerationAction,
    },
    BanDialog(BanDialogState),
    Search,
    /// Blocking message the user has to dismiss, as after a failed
    /// friend request.
    Alert { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    text: String,
    until: Instant,
}

/// Everything the shell renders and mutates: the current route, one
/// state object per view, the modal overlay and the transient status
/// line extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    hub_status: HubStatus,
    route: Route,
    focus: Focus,
    overlay: Option<Overlay>,
    session: UserSession,
    contacts: FriendListState,
    direct_conversation: ConversationState,
    direct_compose: TextFieldState,
    groups: GroupListState,
    group_conversation: ConversationState,
    group_compose: TextFieldState,
    members: MemberPanelState,
    group_form: GroupFormState,
    friends: FriendListState,
    notifications: NotificationPanelState,
    search: SearchPanelState,
    toast: Option<Toast>,
    pending_group_refresh: Option<Instant>,
}

impl ShellState {
    pub fn new(session: UserSession) -> Self {
        Self {
            running: true,
            hub_status: HubStatus::Disconnected,
            route: Route::default(),
            focus: Focus::List,
            overlay: None,
            session,
            contacts: FriendListState::new(FILTER_DEBOUNCE),
            direct_conversation: ConversationState::default(),
            direct_compose: TextFieldState::default(),
            groups: GroupListState::default(),
            group_conversation: ConversationState::default(),
            group_compose: TextFieldState::default(),
            members: MemberPanelState::default(),
            group_form: GroupFormState::default(),
            friends: FriendListState::new(FILTER_DEBOUNCE),
            notifications: NotificationPanelState::default(),
            search: SearchPanelState::new(SEARCH_DEBOUNCE),
            toast: None,
            pending_group_refresh: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn hub_status(&self) -> HubStatus {
        self.hub_status
    }

    pub fn set_hub_status(&mut self, status: HubStatus) {
        self.hub_status = status;
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switches pages. Focus goes back to the primary list; per-view
    /// state survives the round trip.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
        self.focus = Focus::List;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut UserSession {
        &mut self.session
    }

    pub fn contacts(&self) -> &FriendListState {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut FriendListState {
        &mut self.contacts
    }

    pub fn groups(&self) -> &GroupListState {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut GroupListState {
        &mut self.groups
    }

    pub fn members(&self) -> &MemberPanelState {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut MemberPanelState {
        &mut self.members
    }

    pub fn group_form(&self) -> &GroupFormState {
        &self.group_form
    }

    pub fn group_form_mut(&mut self) -> &mut GroupFormState {
        &mut self.group_form
    }

    pub fn friends(&self) -> &FriendListState {
        &self.friends
    }

    pub fn friends_mut(&mut self) -> &mut FriendListState {
        &mut self.friends
    }

    pub fn notifications(&self) -> &NotificationPanelState {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationPanelState {
        &mut self.notifications
    }

    pub fn search(&self) -> &SearchPanelState {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchPanelState {
        &mut self.search
    }

    /// The conversation pane of a chat-bearing route. Friends has none.
    pub fn conversation_for(&self, route: Route) -> Option<&ConversationState> {
        match route {
            Route::Chats => Some(&self.direct_conversation),
            Route::Groups => Some(&self.group_conversation),
            Route::Friends => None,
        }
    }

    pub fn conversation_for_mut(&mut self, route: Route) -> Option<&mut ConversationState> {
        match route {
            Route::Chats => Some(&mut self.direct_conversation),
            Route::Groups => Some(&mut self.group_conversation),
            Route::Friends => None,
        }
    }

    pub fn active_conversation(&self) -> Option<&ConversationState> {
        self.conversation_for(self.route)
    }

    pub fn active_conversation_mut(&mut self) -> Option<&mut ConversationState> {
        self.conversation_for_mut(self.route)
    }

    /// The conversation pane holding the given id, on whichever route.
    pub fn conversation_holding_mut(
        &mut self,
        conversation: ConversationId,
    ) -> Option<&mut ConversationState> {
        if self.direct_conversation.conversation() == Some(conversation) {
            return Some(&mut self.direct_conversation);
        }
        if self.group_conversation.conversation() == Some(conversation) {
            return Some(&mut self.group_conversation);
        }
        None
    }

    pub fn compose_for(&self, route: Route) -> Option<&TextFieldState> {
        match route {
            Route::Chats => Some(&self.direct_compose),
            Route::Groups => Some(&self.group_compose),
            Route::Friends => None,
        }
    }

    pub fn compose_for_mut(&mut self, route: Route) -> Option<&mut TextFieldState> {
        match route {
            Route::Chats => Some(&mut self.direct_compose),
            Route::Groups => Some(&mut self.group_compose),
            Route::Friends => None,
        }
    }

    pub fn active_compose_mut(&mut self) -> Option<&mut TextFieldState> {
        self.compose_for_mut(self.route)
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|toast| toast.text.as_str())
    }

    pub fn show_toast(&mut self, text: String, until: Instant) {
        self.toast = Some(Toast { text, until });
    }

    /// Drops an expired toast. Returns true when one was cleared.
    pub fn clear_expired_toast(&mut self, now: Instant) -> bool {
        match &self.toast {
            Some(toast) if now >= toast.until => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    pub fn schedule_group_refresh(&mut self, at: Instant) {
        self.pending_group_refresh = Some(at);
    }

    /// Consumes the scheduled group-list reload once its moment arrives.
    pub fn take_due_group_refresh(&mut self, now: Instant) -> bool {
        match self.pending_group_refresh {
            Some(at) if now >= at => {
                self.pending_group_refresh = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ShellState {
        ShellState::new(UserSession::from_config(Some(1), Some("Tú".to_owned())))
    }

    #[test]
    fn starts_on_chats_with_list_focus() {
        let state = state();

        assert!(state.is_running());
        assert_eq!(state.route(), Route::Chats);
        assert_eq!(state.focus(), Focus::List);
        assert_eq!(state.hub_status(), HubStatus::Disconnected);
        assert!(state.overlay().is_none());
    }

    #[test]
    fn switching_route_resets_focus_to_list() {
        let mut state = state();
        state.set_focus(Focus::Compose);

        state.set_route(Route::Groups);

        assert_eq!(state.route(), Route::Groups);
        assert_eq!(state.focus(), Focus::List);
    }

    #[test]
    fn friends_route_has_no_conversation_pane() {
        let mut state = state();
        state.set_route(Route::Friends);

        assert!(state.active_conversation().is_none());
        assert!(state.active_compose_mut().is_none());
    }

    #[test]
    fn compose_text_is_kept_per_route() {
        let mut state = state();
        state
            .compose_for_mut(Route::Chats)
            .expect("chats compose")
            .set_text("chào bạn");

        state.set_route(Route::Groups);
        state
            .compose_for_mut(Route::Groups)
            .expect("groups compose")
            .set_text("họp lúc 9h");

        state.set_route(Route::Chats);
        assert_eq!(
            state.compose_for(Route::Chats).expect("chats compose").text(),
            "chào bạn"
        );
    }

    #[test]
    fn conversation_holding_finds_the_right_pane() {
        let mut state = state();
        state
            .conversation_for_mut(Route::Chats)
            .expect("pane")
            .set_loading(ConversationId::Friend(UserId(42)), "Lan".to_owned());
        state
            .conversation_for_mut(Route::Groups)
            .expect("pane")
            .set_loading(ConversationId::Group(GroupId(3)), "Đội bóng".to_owned());

        let pane = state
            .conversation_holding_mut(ConversationId::Group(GroupId(3)))
            .expect("group pane");
        assert_eq!(pane.title(), "Đội bóng");

        assert!(state
            .conversation_holding_mut(ConversationId::Friend(UserId(9)))
            .is_none());
    }

    #[test]
    fn toast_expires_on_deadline() {
        let mut state = state();
        let start = Instant::now();
        state.show_toast("Đã xóa thành viên".to_owned(), start + TOAST_DURATION);

        assert!(!state.clear_expired_toast(start + Duration::from_secs(1)));
        assert_eq!(state.toast(), Some("Đã xóa thành viên"));

        assert!(state.clear_expired_toast(start + TOAST_DURATION));
        assert_eq!(state.toast(), None);
    }

    #[test]
    fn group_refresh_fires_once() {
        let mut state = state();
        let start = Instant::now();
        state.schedule_group_refresh(start + POST_CREATE_REFRESH_DELAY);

        assert!(!state.take_due_group_refresh(start));
        assert!(state.take_due_group_refresh(start + POST_CREATE_REFRESH_DELAY));
        assert!(!state.take_due_group_refresh(start + POST_CREATE_REFRESH_DELAY));
    }

    #[test]
    fn ban_dialog_parses_typed_days() {
        let mut dialog = BanDialogState::new(GroupId(3), UserId(7), "Lan".to_owned());
        assert_eq!(dialog.days(), Some(DEFAULT_BAN_DAYS));

        dialog.days_input.set_text("30");
        assert_eq!(dialog.days(), Some(30));

        dialog.days_input.set_text("0");
        assert_eq!(dialog.days(), None);

        dialog.days_input.set_text("abc");
        assert_eq!(dialog.days(), None);
    }
}
