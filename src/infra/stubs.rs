//! Inert implementations of the infra ports, compiled only for tests.

use anyhow::Result;

use crate::infra::{
    config::AppConfig,
    contracts::{ConfigAdapter, ExternalOpener},
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// Swallows open requests. Tests assert on navigation, not on the
/// browser actually launching.
#[derive(Debug, Clone, Default)]
pub struct NoopOpener;

impl ExternalOpener for NoopOpener {
    fn open(&self, _target: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }
}
