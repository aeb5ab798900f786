use std::{
    io,
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::domain::events::{ApiEvent, ApiFailure, AppEvent};
use crate::usecases::contracts::{ApiCommand, ApiDispatchError, ApiGateway};

use super::client::{ApiClient, ApiError};

const API_CALL_FAILED: &str = "API_CALL_FAILED";
const API_WORKER_SHUTDOWN_FAILED: &str = "API_WORKER_SHUTDOWN_FAILED";

/// How long the worker blocks on its queue before rechecking the stop
/// signal.
const COMMAND_WAIT: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum ApiWorkerStartError {
    WorkerSpawn(io::Error),
}

impl std::fmt::Display for ApiWorkerStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiWorkerStartError::WorkerSpawn(source) => {
                write!(f, "could not spawn api worker: {source}")
            }
        }
    }
}

impl std::error::Error for ApiWorkerStartError {}

/// Cheap handle the shell submits commands through. The worker thread
/// owns the HTTP client; the shell only ever queues work.
#[derive(Debug, Clone)]
pub struct ApiHandle {
    command_tx: Sender<ApiCommand>,
}

impl ApiGateway for ApiHandle {
    fn submit(&self, command: ApiCommand) -> Result<(), ApiDispatchError> {
        self.command_tx
            .send(command)
            .map_err(|_| ApiDispatchError::WorkerGone)
    }
}

/// Background thread running REST calls one at a time. Every command
/// answers with exactly one `AppEvent::Api`, success or not, so panels
/// left in a loading state always hear back.
#[derive(Debug)]
pub struct ApiWorker {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ApiWorker {
    pub fn start(
        client: ApiClient,
        event_tx: Sender<AppEvent>,
    ) -> Result<(Self, ApiHandle), ApiWorkerStartError> {
        let (command_tx, command_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker = thread::Builder::new()
            .name("vitalk-api".to_owned())
            .spawn(move || run_worker(client, command_rx, stop_rx, event_tx))
            .map_err(ApiWorkerStartError::WorkerSpawn)?;

        let worker = Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        };
        Ok((worker, ApiHandle { command_tx }))
    }
}

impl Drop for ApiWorker {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = API_WORKER_SHUTDOWN_FAILED,
                    error = ?error,
                    "api worker panicked on shutdown"
                );
            }
        }
    }
}

fn run_worker(
    client: ApiClient,
    command_rx: Receiver<ApiCommand>,
    stop_rx: Receiver<()>,
    event_tx: Sender<AppEvent>,
) {
    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        match command_rx.recv_timeout(COMMAND_WAIT) {
            Ok(command) => {
                let event = execute(&client, command);
                if event_tx.send(AppEvent::Api(event)).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn execute(client: &ApiClient, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::LoadFriends => {
            ApiEvent::FriendsLoaded(call("friends", client.load_friends()))
        }
        ApiCommand::LoadGroups => ApiEvent::GroupsLoaded(call("groups", client.load_groups())),
        ApiCommand::LoadMembers { group_id } => ApiEvent::MembersLoaded {
            group_id,
            result: call("members", client.load_members(group_id)),
        },
        ApiCommand::LoadHistory { conversation } => ApiEvent::HistoryLoaded {
            conversation,
            result: call("history", client.load_history(conversation)),
        },
        ApiCommand::CreateGroup { name, description } => {
            ApiEvent::GroupCreated(call("create_group", client.create_group(&name, &description)))
        }
        ApiCommand::Moderate {
            group_id,
            target,
            action,
        } => ApiEvent::ModerationFinished {
            group_id,
            action,
            result: call("moderate", client.moderate(group_id, target, action)),
        },
        ApiCommand::SendFriendRequest { target } => ApiEvent::FriendRequestFinished {
            target,
            result: call("friend_request", client.send_friend_request(target)),
        },
        ApiCommand::LoadNotifications => {
            ApiEvent::NotificationsLoaded(call("notifications", client.load_notifications()))
        }
        ApiCommand::MarkNotificationRead { id } => ApiEvent::NotificationMarked {
            id,
            result: call("mark_read", client.mark_notification_read(id)),
        },
        ApiCommand::MarkAllNotificationsRead => {
            ApiEvent::AllNotificationsMarked(call("mark_all", client.mark_all_notifications_read()))
        }
    }
}

fn call<T>(endpoint: &'static str, result: Result<T, ApiError>) -> Result<T, ApiFailure> {
    result.map_err(|error| {
        tracing::warn!(code = API_CALL_FAILED, endpoint, error = %error, "api call failed");
        to_failure(error)
    })
}

fn to_failure(error: ApiError) -> ApiFailure {
    match error {
        ApiError::Transport(source) => ApiFailure::Transport(source.to_string()),
        ApiError::Status(status) => ApiFailure::Status(status.as_u16()),
        ApiError::Decode(source) => ApiFailure::Decode(source.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> ApiClient {
        // Port 9 (discard) is closed in the test environment, so calls
        // fail fast with a transport error.
        ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2), None).expect("client")
    }

    #[test]
    fn failed_call_still_answers_with_an_event() {
        let (event_tx, event_rx) = mpsc::channel();
        let (_worker, handle) =
            ApiWorker::start(unreachable_client(), event_tx).expect("worker starts");

        handle.submit(ApiCommand::LoadFriends).expect("submit");

        let event = event_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("worker answers");
        match event {
            AppEvent::Api(ApiEvent::FriendsLoaded(Err(ApiFailure::Transport(_)))) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn submitting_after_shutdown_reports_worker_gone() {
        let (event_tx, _event_rx) = mpsc::channel();
        let (worker, handle) =
            ApiWorker::start(unreachable_client(), event_tx).expect("worker starts");

        drop(worker);

        assert_eq!(
            handle.submit(ApiCommand::LoadGroups),
            Err(ApiDispatchError::WorkerGone)
        );
    }

    #[test]
    fn moderation_failure_keeps_its_addressing() {
        use crate::domain::ids::{GroupId, UserId};
        use crate::domain::member_panel_state::ModerationAction;

        let (event_tx, event_rx) = mpsc::channel();
        let (_worker, handle) =
            ApiWorker::start(unreachable_client(), event_tx).expect("worker starts");

        handle
            .submit(ApiCommand::Moderate {
                group_id: GroupId(7),
                target: UserId(42),
                action: ModerationAction::Kick,
            })
            .expect("submit");

        let event = event_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("worker answers");
        match event {
            AppEvent::Api(ApiEvent::ModerationFinished {
                group_id,
                action,
                result,
            }) => {
                assert_eq!(group_id, GroupId(7));
                assert_eq!(action, ModerationAction::Kick);
                assert!(result.is_err());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
