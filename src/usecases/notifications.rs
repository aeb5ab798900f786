//! The notification dropdown: fetch on open, mark-as-read on activate,
//! and the bulk mark-all that flips the cached items without a refetch.
//! Activation follows the notification's link, into another page of the
//! app when the path is ours, through the system opener otherwise.

use crate::domain::nav_state::{self, Route};
use crate::domain::notification_state::NotificationPanelState;
use crate::infra::contracts::ExternalOpener;

use super::contracts::{ApiCommand, ApiGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationActivation {
    /// The link pointed into the app; the caller switches pages.
    Navigated(Route),
    OpenedExternal,
    /// Nothing selected, or the notification carries no link.
    NoTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationsError {
    /// The API command could not be queued.
    RequestRejected,
    OpenFailed(String),
}

/// Marks the panel loading and queues the list fetch.
pub fn open_panel(
    gateway: &dyn ApiGateway,
    panel: &mut NotificationPanelState,
) -> Result<(), NotificationsError> {
    panel.set_loading();
    match gateway.submit(ApiCommand::LoadNotifications) {
        Ok(()) => Ok(()),
        Err(_) => {
            panel.set_error();
            Err(NotificationsError::RequestRejected)
        }
    }
}

/// Activates the selected notification: read flag flips locally, the
/// mark-read call is queued, and the link is followed.
pub fn activate_selected(
    gateway: &dyn ApiGateway,
    opener: &dyn ExternalOpener,
    panel: &mut NotificationPanelState,
) -> Result<NotificationActivation, NotificationsError> {
    let (id, redirect) = match panel.selected_item() {
        Some(item) => (item.id, item.redirect_url.clone()),
        None => return Ok(NotificationActivation::NoTarget),
    };

    panel.mark_read(id);
    gateway
        .submit(ApiCommand::MarkNotificationRead { id })
        .map_err(|_| NotificationsError::RequestRejected)?;

    let Some(target) = redirect else {
        return Ok(NotificationActivation::NoTarget);
    };

    if let Some(route) = nav_state::route_for_path(&target) {
        return Ok(NotificationActivation::Navigated(route));
    }

    opener
        .open(&target)
        .map(|()| NotificationActivation::OpenedExternal)
        .map_err(|error| NotificationsError::OpenFailed(error.to_string()))
}

/// Flips every cached item to read and queues the bulk call. No refetch:
/// the local flip is the whole UI effect.
pub fn mark_all_read(
    gateway: &dyn ApiGateway,
    panel: &mut NotificationPanelState,
) -> Result<(), NotificationsError> {
    panel.mark_all_read();
    gateway
        .submit(ApiCommand::MarkAllNotificationsRead)
        .map_err(|_| NotificationsError::RequestRejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::domain::ids::NotificationId;
    use crate::domain::notification::Notification;
    use crate::domain::notification_state::NotificationPanelUiState;
    use crate::infra::stubs::NoopOpener;

    use super::super::contracts::ApiDispatchError;

    struct StubGateway {
        result: Result<(), ApiDispatchError>,
        submitted: RefCell<Vec<ApiCommand>>,
    }

    impl StubGateway {
        fn with_result(result: Result<(), ApiDispatchError>) -> Self {
            Self {
                result,
                submitted: RefCell::new(Vec::new()),
            }
        }
    }

    impl ApiGateway for StubGateway {
        fn submit(&self, command: ApiCommand) -> Result<(), ApiDispatchError> {
            self.submitted.borrow_mut().push(command);
            self.result
        }
    }

    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl RecordingOpener {
        fn new() -> Self {
            Self {
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl ExternalOpener for RecordingOpener {
        fn open(&self, target: &str) -> anyhow::Result<()> {
            self.opened.borrow_mut().push(target.to_owned());
            Ok(())
        }
    }

    fn notification(id: i64, redirect: Option<&str>) -> Notification {
        Notification {
            id: NotificationId(id),
            sender_name: "Minh".to_owned(),
            content: "đã gửi cho bạn một lời mời kết bạn".to_owned(),
            created_at_unix_ms: 1_700_000_000_000,
            read: false,
            redirect_url: redirect.map(str::to_owned),
        }
    }

    #[test]
    fn opening_queues_the_fetch() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut panel = NotificationPanelState::default();

        let result = open_panel(&gateway, &mut panel);

        assert_eq!(result, Ok(()));
        assert_eq!(panel.ui_state(), NotificationPanelUiState::Loading);
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[ApiCommand::LoadNotifications]
        );
    }

    #[test]
    fn activation_marks_read_and_navigates_in_app() {
        let gateway = StubGateway::with_result(Ok(()));
        let opener = RecordingOpener::new();
        let mut panel = NotificationPanelState::default();
        panel.set_items(vec![notification(1, Some("/Friend"))]);

        let result = activate_selected(&gateway, &opener, &mut panel);

        assert_eq!(result, Ok(NotificationActivation::Navigated(Route::Friends)));
        assert!(panel.items()[0].read);
        assert!(opener.opened.borrow().is_empty());
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[ApiCommand::MarkNotificationRead {
                id: NotificationId(1)
            }]
        );
    }

    #[test]
    fn foreign_links_go_through_the_opener() {
        let gateway = StubGateway::with_result(Ok(()));
        let opener = RecordingOpener::new();
        let mut panel = NotificationPanelState::default();
        panel.set_items(vec![notification(1, Some("https://vitalk.vn/help"))]);

        let result = activate_selected(&gateway, &opener, &mut panel);

        assert_eq!(result, Ok(NotificationActivation::OpenedExternal));
        assert_eq!(
            opener.opened.borrow().as_slice(),
            &["https://vitalk.vn/help".to_owned()]
        );
    }

    #[test]
    fn linkless_notifications_only_mark_read() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut panel = NotificationPanelState::default();
        panel.set_items(vec![notification(1, None)]);

        let result = activate_selected(&gateway, &NoopOpener, &mut panel);

        assert_eq!(result, Ok(NotificationActivation::NoTarget));
        assert!(panel.items()[0].read);
    }

    #[test]
    fn mark_all_flips_locally_without_a_refetch() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut panel = NotificationPanelState::default();
        panel.set_items(vec![notification(1, None), notification(2, None)]);

        let result = mark_all_read(&gateway, &mut panel);

        assert_eq!(result, Ok(()));
        assert_eq!(panel.unread_count(), 0);
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[ApiCommand::MarkAllNotificationsRead]
        );
    }

    #[test]
    fn failed_fetch_dispatch_shows_the_error_state() {
        let gateway = StubGateway::with_result(Err(ApiDispatchError::WorkerGone));
        let mut panel = NotificationPanelState::default();

        let result = open_panel(&gateway, &mut panel);

        assert_eq!(result, Err(NotificationsError::RequestRejected));
        assert_eq!(panel.ui_state(), NotificationPanelUiState::Error);
    }
}
