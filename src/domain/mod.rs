//! Domain layer: core entities and business rules.

pub mod conversation_state;
pub mod debounce;
pub mod events;
pub mod friend_list_state;
pub mod group_form_state;
pub mod group_list_state;
pub mod ids;
pub mod member_panel_state;
pub mod message;
pub mod nav_state;
pub mod notification;
pub mod notification_state;
pub mod search_state;
pub mod session;
pub mod shell_state;
pub mod text_input;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
