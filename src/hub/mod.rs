//! Realtime adapter: the websocket connection to the chat hub and the
//! wire-format codec for its frames.

pub mod connection;
pub mod wire;

/// Returns the hub module name for smoke checks.
pub fn module_name() -> &'static str {
    "hub"
}
