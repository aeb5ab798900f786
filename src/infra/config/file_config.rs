use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, ServerConfig, UserConfig};

/// The on-disk shape of `config.toml`: every field optional, merged
/// over the compiled-in defaults.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub server: Option<FileServerConfig>,
    pub user: Option<FileUserConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }

        if let Some(user) = self.user {
            user.merge_into(&mut config.user);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub base_url: Option<String>,
    pub hub_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub anti_forgery_token: Option<String>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(hub_url) = self.hub_url {
            config.hub_url = hub_url;
        }

        if let Some(timeout_ms) = self.request_timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }

        if let Some(token) = self.anti_forgery_token {
            config.anti_forgery_token = Some(token);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileUserConfig {
    pub id: Option<i64>,
    pub display_name: Option<String>,
}

impl FileUserConfig {
    fn merge_into(self, config: &mut UserConfig) {
        if let Some(id) = self.id {
            config.id = Some(id);
        }

        if let Some(display_name) = self.display_name {
            config.display_name = Some(display_name);
        }
    }
}
