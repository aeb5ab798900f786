use anyhow::{Context, Result};

use crate::infra::contracts::ExternalOpener;

/// Hands a URL to the operating system's default handler. Used for
/// notification links that point outside the app's own pages.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        open::that(target).with_context(|| format!("failed to open {target}"))
    }
}
