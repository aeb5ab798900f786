use anyhow::Result;

use crate::infra::config::AppConfig;

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// Opens a target outside the TUI, normally a URL in the browser.
pub trait ExternalOpener {
    fn open(&self, target: &str) -> Result<()>;
}
