use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub user: UserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Where the chat service lives. The hub endpoint is configured
/// separately from the REST base because the websocket path is not
/// derivable from it on every deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    pub hub_url: String,
    pub request_timeout_ms: u64,
    /// Anti-forgery token for the friend-request form post. Without it
    /// the server answers that post with a redirect to the login page.
    pub anti_forgery_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            hub_url: "ws://localhost:5000/chathub".to_owned(),
            request_timeout_ms: 10_000,
            anti_forgery_token: None,
        }
    }
}

/// Who is signed in. These values only seed the session; the hub
/// confirms the real id in its connect acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserConfig {
    pub id: Option<i64>,
    pub display_name: Option<String>,
}
