//! Use case for opening a conversation: the pane flips to loading and a
//! history fetch is queued for the API worker. The transcript arrives
//! later as an `ApiEvent::HistoryLoaded`.

use crate::domain::conversation_state::ConversationState;
use crate::domain::ids::ConversationId;

use super::contracts::{ApiCommand, ApiGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenConversationCommand {
    pub conversation: ConversationId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenConversationError {
    /// The history fetch could not be queued.
    RequestRejected,
}

/// Opens a conversation in the given pane. On a dispatch failure the
/// pane is left in its error state rather than loading forever.
pub fn open_conversation(
    gateway: &dyn ApiGateway,
    pane: &mut ConversationState,
    command: OpenConversationCommand,
) -> Result<(), OpenConversationError> {
    pane.set_loading(command.conversation, command.title);

    match gateway.submit(ApiCommand::LoadHistory {
        conversation: command.conversation,
    }) {
        Ok(()) => Ok(()),
        Err(_) => {
            pane.set_error();
            Err(OpenConversationError::RequestRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::domain::conversation_state::ConversationUiState;
    use crate::domain::ids::UserId;

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

    #[test]
    fn flips_the_pane_to_loading_and_queues_the_fetch() {
        let gateway = StubGateway::with_result(Ok(()));
        let mut pane = ConversationState::default();
        let conversation = ConversationId::Friend(UserId(42));

        let result = open_conversation(
            &gateway,
            &mut pane,
            OpenConversationCommand {
                conversation,
                title: "Lan".to_owned(),
            },
        );

        assert_eq!(result, Ok(()));
        assert_eq!(pane.ui_state(), ConversationUiState::Loading);
        assert_eq!(pane.title(), "Lan");
        assert_eq!(
            gateway.submitted.borrow().as_slice(),
            &[ApiCommand::LoadHistory { conversation }]
        );
    }

    #[test]
    fn dispatch_failure_leaves_the_pane_in_error() {
        let gateway = StubGateway::with_result(Err(ApiDispatchError::WorkerGone));
        let mut pane = ConversationState::default();

        let result = open_conversation(
            &gateway,
            &mut pane,
            OpenConversationCommand {
                conversation: ConversationId::Friend(UserId(42)),
                title: "Lan".to_owned(),
            },
        );

        assert_eq!(result, Err(OpenConversationError::RequestRejected));
        assert_eq!(pane.ui_state(), ConversationUiState::Error);
    }
}
