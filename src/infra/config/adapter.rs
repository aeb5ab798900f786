use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
};

/// Production config source: an optional TOML file merged over
/// compiled-in defaults, with the CLI log-level override applied last.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
    level_override: Option<String>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>, level_override: Option<&str>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            level_override: level_override.map(str::to_owned),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let mut config = load(self.path.as_deref())?;
        if let Some(level) = &self.level_override {
            config.logging.level = level.clone();
        }
        Ok(config)
    }
}
