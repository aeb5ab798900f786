use std::{
    net::TcpStream,
    sync::{
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tungstenite::{stream::MaybeTlsStream, Message as WsMessage, WebSocket};

use crate::domain::events::{AppEvent, HubEvent, HubStatus};
use crate::domain::ids::ConversationId;
use crate::usecases::contracts::{HubChannel, HubStartError};
use crate::usecases::search_messages::{SearchInvoker, SearchSourceError};
use crate::usecases::send_chat_message::{ChatMessageSender, ChatSendSourceError};

use super::wire::{self, OutboundFrame};

const HUB_CONNECT_FAILED: &str = "HUB_CONNECT_FAILED";
const HUB_FRAME_REJECTED: &str = "HUB_FRAME_REJECTED";
const HUB_FRAME_SKIPPED: &str = "HUB_FRAME_SKIPPED";
const HUB_SOCKET_CLOSED: &str = "HUB_SOCKET_CLOSED";
const HUB_MONITOR_SHUTDOWN_FAILED: &str = "HUB_MONITOR_SHUTDOWN_FAILED";

/// Pause between socket polls when no traffic is pending.
const POLL_SLEEP: Duration = Duration::from_millis(8);

/// One websocket to the chat hub, owned by a background monitor thread.
/// Both chat pages talk through this single connection. The monitor
/// starts at most once; a dropped connection stays down, mirroring the
/// page-lifetime socket it stands in for.
#[derive(Debug)]
pub struct HubConnection {
    url: String,
    event_tx: Sender<AppEvent>,
    status: Arc<Mutex<HubStatus>>,
    outbound_tx: Sender<OutboundFrame>,
    outbound_rx: Option<Receiver<OutboundFrame>>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl HubConnection {
    pub fn new(url: String, event_tx: Sender<AppEvent>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::channel();
        Self {
            url,
            event_tx,
            status: Arc::new(Mutex::new(HubStatus::Disconnected)),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
            stop_tx: None,
            worker: None,
        }
    }

    #[cfg(test)]
    pub fn inert() -> Self {
        let (event_tx, _event_rx) = mpsc::channel();
        Self::new(String::new(), event_tx)
    }

    fn current_status(&self) -> HubStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(HubStatus::Disconnected)
    }
}

impl HubChannel for HubConnection {
    fn ensure_started(&mut self) -> Result<(), HubStartError> {
        if self.worker.is_some() {
            return Ok(());
        }
        let Some(outbound_rx) = self.outbound_rx.take() else {
            return Ok(());
        };

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let url = self.url.clone();
        let status = Arc::clone(&self.status);
        let event_tx = self.event_tx.clone();
        let worker = thread::Builder::new()
            .name("vitalk-hub".to_owned())
            .spawn(move || run_monitor(url, status, event_tx, outbound_rx, stop_rx))
            .map_err(HubStartError::WorkerSpawn)?;

        self.stop_tx = Some(stop_tx);
        self.worker = Some(worker);
        Ok(())
    }

    fn status(&self) -> HubStatus {
        self.current_status()
    }
}

impl ChatMessageSender for HubConnection {
    fn send_chat(
        &self,
        conversation: ConversationId,
        text: &str,
    ) -> Result<(), ChatSendSourceError> {
        if self.current_status() != HubStatus::Connected {
            return Err(ChatSendSourceError::NotConnected);
        }
        self.outbound_tx
            .send(wire::send_message_frame(conversation, text))
            .map_err(|_| ChatSendSourceError::ChannelClosed)
    }
}

impl SearchInvoker for HubConnection {
    fn invoke_search(
        &self,
        conversation: ConversationId,
        query: &str,
    ) -> Result<(), SearchSourceError> {
        if self.current_status() != HubStatus::Connected {
            return Err(SearchSourceError::NotConnected);
        }
        self.outbound_tx
            .send(wire::search_messages_frame(conversation, query))
            .map_err(|_| SearchSourceError::ChannelClosed)
    }
}

impl Drop for HubConnection {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = HUB_MONITOR_SHUTDOWN_FAILED,
                    error = ?error,
                    "hub monitor worker panicked on shutdown"
                );
            }
        }
    }
}

fn run_monitor(
    url: String,
    status: Arc<Mutex<HubStatus>>,
    event_tx: Sender<AppEvent>,
    outbound_rx: Receiver<OutboundFrame>,
    stop_rx: Receiver<()>,
) {
    publish_status(&status, &event_tx, HubStatus::Connecting);

    let mut socket = match tungstenite::connect(url.as_str()) {
        Ok((socket, _response)) => socket,
        Err(error) => {
            tracing::warn!(code = HUB_CONNECT_FAILED, url = %url, error = %error, "hub connection failed");
            publish_status(&status, &event_tx, HubStatus::Disconnected);
            return;
        }
    };

    // Frames are polled, not awaited, so the monitor can interleave
    // outbound invocations and the stop signal.
    if let MaybeTlsStream::Plain(stream) = socket.get_mut() {
        let _ = stream.set_nonblocking(true);
    }

    publish_status(&status, &event_tx, HubStatus::Connected);

    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                let _ = socket.close(None);
                break;
            }
            Err(TryRecvError::Empty) => {}
        }

        match socket.read() {
            Ok(WsMessage::Text(text)) => {
                if !forward_frame(&event_tx, &text) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                let io_blocked = matches!(
                    error,
                    tungstenite::Error::Io(ref io_err)
                        if io_err.kind() == std::io::ErrorKind::WouldBlock
                );
                if !io_blocked {
                    tracing::info!(code = HUB_SOCKET_CLOSED, error = %error, "hub socket closed");
                    publish_status(&status, &event_tx, HubStatus::Disconnected);
                    return;
                }
            }
        }

        while let Ok(frame) = outbound_rx.try_recv() {
            if !write_frame(&mut socket, &frame) {
                publish_status(&status, &event_tx, HubStatus::Disconnected);
                return;
            }
        }

        thread::sleep(POLL_SLEEP);
    }

    publish_status(&status, &event_tx, HubStatus::Disconnected);
}

/// Decodes and forwards one text frame. Returns false once the shell
/// side is gone and the monitor should wind down.
fn forward_frame(event_tx: &Sender<AppEvent>, text: &str) -> bool {
    match wire::decode_frame(text) {
        Ok(Some(event)) => event_tx.send(AppEvent::Hub(event)).is_ok(),
        Ok(None) => {
            tracing::debug!(code = HUB_FRAME_SKIPPED, "hub frame type not understood");
            true
        }
        Err(error) => {
            tracing::warn!(code = HUB_FRAME_REJECTED, error = %error, "hub frame rejected");
            true
        }
    }
}

fn write_frame(socket: &mut WebSocket<MaybeTlsStream<TcpStream>>, frame: &OutboundFrame) -> bool {
    let text = match wire::encode_frame(frame) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(code = HUB_FRAME_REJECTED, error = %error, "outbound frame not encodable");
            return true;
        }
    };

    match socket.send(WsMessage::Text(text)) {
        Ok(()) => true,
        // WouldBlock leaves the frame in tungstenite's out buffer; it is
        // flushed by the next read or write pass.
        Err(tungstenite::Error::Io(ref io_err))
            if io_err.kind() == std::io::ErrorKind::WouldBlock =>
        {
            true
        }
        Err(error) => {
            tracing::info!(code = HUB_SOCKET_CLOSED, error = %error, "hub socket closed on write");
            false
        }
    }
}

fn publish_status(status: &Arc<Mutex<HubStatus>>, event_tx: &Sender<AppEvent>, next: HubStatus) {
    if let Ok(mut slot) = status.lock() {
        *slot = next;
    }
    let _ = event_tx.send(AppEvent::Hub(HubEvent::StatusChanged(next)));
}
