//! Loopback hub for development. Speaks the vitalk wire protocol: echoes
//! sent messages back, answers with canned replies and search results.
//!
//! Point `[server].hub_url` at `ws://127.0.0.1:9001` and run the client
//! against it.

use std::{
    net::{TcpListener, TcpStream},
    sync::{
        atomic::{AtomicI64, Ordering},
        mpsc, Arc, Mutex,
    },
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tungstenite::{accept, Message as WsMessage, WebSocket};

const MOCK_ADDR: &str = "127.0.0.1:9001";

/// Id the mock confirms for whoever connects.
const MOCK_SELF_ID: i64 = 7;

/// Frames the mock emits; mirrors the server side of the wire protocol.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerFrame {
    Connected {
        user_id: i64,
    },
    MessageReceived {
        message_id: i64,
        sender_id: i64,
        recipient_id: i64,
        sender_name: String,
        content: String,
        sent_at: i64,
    },
    GroupMessageReceived {
        message_id: i64,
        group_id: i64,
        sender_id: i64,
        sender_name: String,
        content: String,
        sent_at: i64,
    },
    GroupStickerReceived {
        message_id: i64,
        group_id: i64,
        sender_id: i64,
        sender_name: String,
        sticker: String,
        sent_at: i64,
    },
    SearchResults {
        #[serde(skip_serializing_if = "Option::is_none")]
        friend_id: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_id: Option<i64>,
        results: Vec<SearchResult>,
    },
}

#[derive(Serialize)]
struct SearchResult {
    message_id: i64,
    sender_name: String,
    content: String,
    sent_at: i64,
}

/// Invocations the client sends.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    SendMessage {
        #[serde(default)]
        friend_id: Option<i64>,
        #[serde(default)]
        group_id: Option<i64>,
        content: String,
    },
    SearchMessages {
        #[serde(default)]
        friend_id: Option<i64>,
        #[serde(default)]
        group_id: Option<i64>,
        query: String,
    },
}

fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

fn friend_name(id: i64) -> String {
    match id {
        42 => "Lan".to_owned(),
        43 => "Huy".to_owned(),
        44 => "Minh".to_owned(),
        other => format!("Người dùng {other}"),
    }
}

fn broadcast_text(subscribers: &Arc<Mutex<Vec<mpsc::Sender<String>>>>, text: &str) {
    if let Ok(mut list) = subscribers.lock() {
        let mut to_remove = Vec::new();
        for (idx, sender) in list.iter().enumerate() {
            if sender.send(text.to_string()).is_err() {
                to_remove.push(idx);
            }
        }
        for idx in to_remove.into_iter().rev() {
            list.remove(idx);
        }
    }
}

fn broadcast_frame(subscribers: &Arc<Mutex<Vec<mpsc::Sender<String>>>>, frame: &ServerFrame) {
    if let Ok(text) = serde_json::to_string(frame) {
        broadcast_text(subscribers, &text);
    }
}

fn send_frame(socket: &mut WebSocket<TcpStream>, frame: &ServerFrame) {
    if let Ok(text) = serde_json::to_string(frame) {
        let _ = socket.send(WsMessage::Text(text));
    }
}

fn handle_send(
    subscribers: &Arc<Mutex<Vec<mpsc::Sender<String>>>>,
    next_id: &Arc<AtomicI64>,
    friend_id: Option<i64>,
    group_id: Option<i64>,
    content: String,
) {
    let sent_at = now_unix_ms();
    match (friend_id, group_id) {
        (Some(friend), _) => {
            let echo = ServerFrame::MessageReceived {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                sender_id: MOCK_SELF_ID,
                recipient_id: friend,
                sender_name: "Bạn".to_owned(),
                content: content.clone(),
                sent_at,
            };
            broadcast_frame(subscribers, &echo);

            let reply = ServerFrame::MessageReceived {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                sender_id: friend,
                recipient_id: MOCK_SELF_ID,
                sender_name: friend_name(friend),
                content: format!("Đã nhận: {content}"),
                sent_at: sent_at + 1,
            };
            broadcast_frame(subscribers, &reply);
        }
        (None, Some(group)) => {
            let echo = ServerFrame::GroupMessageReceived {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                group_id: group,
                sender_id: MOCK_SELF_ID,
                sender_name: "Bạn".to_owned(),
                content: content.clone(),
                sent_at,
            };
            broadcast_frame(subscribers, &echo);

            // "/sticker" answers with a sticker frame so the non-text
            // rendering path can be exercised by hand.
            let reply = if content.trim() == "/sticker" {
                ServerFrame::GroupStickerReceived {
                    message_id: next_id.fetch_add(1, Ordering::Relaxed),
                    group_id: group,
                    sender_id: 42,
                    sender_name: friend_name(42),
                    sticker: "dance".to_owned(),
                    sent_at: sent_at + 1,
                }
            } else {
                ServerFrame::GroupMessageReceived {
                    message_id: next_id.fetch_add(1, Ordering::Relaxed),
                    group_id: group,
                    sender_id: 42,
                    sender_name: friend_name(42),
                    content: format!("Đã nhận: {content}"),
                    sent_at: sent_at + 1,
                }
            };
            broadcast_frame(subscribers, &reply);
        }
        (None, None) => {}
    }
}

fn search_results_frame(
    next_id: &Arc<AtomicI64>,
    friend_id: Option<i64>,
    group_id: Option<i64>,
    query: &str,
) -> ServerFrame {
    let base = now_unix_ms();
    ServerFrame::SearchResults {
        friend_id,
        group_id,
        results: vec![
            SearchResult {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                sender_name: friend_name(42),
                content: format!("Có ai nhắc đến {query} không?"),
                sent_at: base - 86_400_000,
            },
            SearchResult {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                sender_name: friend_name(43),
                content: format!("{query} thì tối nay nhé"),
                sent_at: base - 3_600_000,
            },
        ],
    }
}

fn main() -> anyhow::Result<()> {
    let listener = TcpListener::bind(MOCK_ADDR)?;
    println!("mock hub listening on ws://{MOCK_ADDR}");
    println!("point [server].hub_url at ws://{MOCK_ADDR} to chat against canned peers");

    let subscribers: Arc<Mutex<Vec<mpsc::Sender<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let next_id = Arc::new(AtomicI64::new(1_000));

    for stream in listener.incoming() {
        let stream = stream?;
        let mut socket = accept(stream)?;
        let _ = socket.get_mut().set_nonblocking(true);

        let (tx, rx) = mpsc::channel::<String>();
        subscribers.lock().expect("subscribers").push(tx);
        let subscribers = Arc::clone(&subscribers);
        let next_id = Arc::clone(&next_id);

        send_frame(
            &mut socket,
            &ServerFrame::Connected {
                user_id: MOCK_SELF_ID,
            },
        );
        send_frame(
            &mut socket,
            &ServerFrame::MessageReceived {
                message_id: next_id.fetch_add(1, Ordering::Relaxed),
                sender_id: 42,
                recipient_id: MOCK_SELF_ID,
                sender_name: friend_name(42),
                content: "Chào bạn! Đây là hub thử nghiệm.".to_owned(),
                sent_at: now_unix_ms(),
            },
        );

        thread::spawn(move || loop {
            match socket.read() {
                Ok(msg) => {
                    if let WsMessage::Text(text) = msg {
                        match serde_json::from_str::<ClientFrame>(&text) {
                            Ok(ClientFrame::SendMessage {
                                friend_id,
                                group_id,
                                content,
                            }) => {
                                handle_send(&subscribers, &next_id, friend_id, group_id, content);
                            }
                            Ok(ClientFrame::SearchMessages {
                                friend_id,
                                group_id,
                                query,
                            }) => {
                                let results =
                                    search_results_frame(&next_id, friend_id, group_id, &query);
                                send_frame(&mut socket, &results);
                            }
                            Err(_) => {
                                // Anything that is not a client invocation is
                                // relayed verbatim, so a second connection can
                                // inject server frames by hand.
                                broadcast_text(&subscribers, &text);
                            }
                        }
                    }
                }
                Err(err) => {
                    let io_blocked = matches!(
                        err,
                        tungstenite::Error::Io(ref io_err)
                            if io_err.kind() == std::io::ErrorKind::WouldBlock
                    );
                    if !io_blocked {
                        break;
                    }
                }
            }

            while let Ok(payload) = rx.try_recv() {
                if socket.send(WsMessage::Text(payload)).is_err() {
                    return;
                }
            }

            thread::sleep(Duration::from_millis(8));
        });
    }

    Ok(())
}
