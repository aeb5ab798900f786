//! Sending a friend request from the directory. The row goes busy while
//! the call is in flight; a redirect answer is followed as navigation
//! and a plain success flips the row to its pending label.

use crate::domain::friend_list_state::{FriendListState, FriendRelation};
use crate::domain::ids::UserId;

use super::contracts::{ApiCommand, ApiGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestError {
    /// The target is not in the list at all.
    UnknownTarget,
    /// The target is already a friend or already asked.
    NotRequestable,
    /// Another request is still in flight.
    Busy,
    /// The API command could not be queued.
    RequestRejected,
}

/// Queues a friend request for the selected row. Only rows without an
/// existing relationship can be asked.
pub fn send_friend_request(
    gateway: &dyn ApiGateway,
    directory: &mut FriendListState,
    target: UserId,
) -> Result<(), FriendRequestError> {
    if directory.busy_target().is_some() {
        return Err(FriendRequestError::Busy);
    }

    let relation = directory
        .rows()
        .iter()
        .find(|row| row.user_id == target)
        .map(|row| row.relation)
        .ok_or(FriendRequestError::UnknownTarget)?;
    if relation != FriendRelation::CanRequest {
        return Err(FriendRequestError::NotRequestable);
    }

    directory.set_busy(target);
    match gateway.submit(ApiCommand::SendFriendRequest { target }) {
        Ok(()) => Ok(()),
        Err(_) => {
            directory.clear_busy();
            Err(FriendRequestError::RequestRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    use crate::domain::friend_list_state::FriendRow;

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

    fn directory() -> FriendListState {
        let mut state = FriendListState::new(Duration::from_millis(300));
        state.set_ready(vec![
            FriendRow {
                user_id: UserId(5),
                name: "Minh".to_owned(),
                relation: FriendRelation::CanRequest,
            },
            FriendRow {
                user_id: UserId(6),
                name: "Lan".to_owned(),
                relation: FriendRelation::Friends,
            },
        ]);
        state
    }

    #[test]
    fn queues_a_request_and_marks_the_row_busy() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut state = directory();

        let result = send_friend_request(&gateway, &mut state, UserId(5));

        assert_eq!(result, Ok(()));
        assert_eq!(state.busy_target(), Some(UserId(5)));
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[ApiCommand::SendFriendRequest { target: UserId(5) }]
        );
    }

    #[test]
    fn existing_friends_cannot_be_asked_again() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut state = directory();

        let result = send_friend_request(&gateway, &mut state, UserId(6));

        assert_eq!(result, Err(FriendRequestError::NotRequestable));
        assert!(gateway.submitted.borrow().is_empty());
    }

    #[test]
    fn unknown_rows_are_rejected() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut state = directory();

        let result = send_friend_request(&gateway, &mut state, UserId(99));

        assert_eq!(result, Err(FriendRequestError::UnknownTarget));
    }

    #[test]
    fn one_request_at_a_time() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut state = directory();
        state.set_busy(UserId(5));

        let result = send_friend_request(&gateway, &mut state, UserId(5));

        assert_eq!(result, Err(FriendRequestError::Busy));
        assert!(gateway.submitted.borrow().is_empty());
    }

    #[test]
    fn dispatch_failure_restores_the_row() {
        let gateway = StubGateway::with_result(Err(ApiDispatchError::WorkerGone));
        let mut state = directory();

        let result = send_friend_request(&gateway, &mut state, UserId(5));

        assert_eq!(result, Err(FriendRequestError::RequestRejected));
        assert_eq!(state.busy_target(), None);
    }
}
