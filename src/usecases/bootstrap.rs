//! Builds the app from configuration: loads `config.toml`, starts
//! logging, then wires the hub connection, the API worker and the
//! orchestrator into one ready-to-run shell.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;

use crate::{
    api::{client::ApiClient, worker::ApiWorker},
    domain::session::UserSession,
    hub::connection::HubConnection,
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        opener::SystemOpener,
    },
    ui::CompositeEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
    },
};

pub fn bootstrap(config_path: Option<&Path>, log_level: Option<&str>) -> Result<AppContext> {
    let config = load_config(config_path, log_level)?;
    let log_guard = infra::logging::init(&config.logging)?;

    Ok(AppContext::new(config, log_guard))
}

/// Config precedence: CLI log-level override, then the file, then defaults.
fn load_config(config_path: Option<&Path>, log_level: Option<&str>) -> Result<AppConfig> {
    FileConfigAdapter::new(config_path, log_level).load()
}

/// The wired shell. Field order doubles as drop order: the
/// orchestrator (holding the hub connection) goes down before the API
/// worker, so in-flight commands still get their completion events.
pub struct ComposedShell {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
    _api_worker: ApiWorker,
}

pub fn compose_shell(context: &AppContext) -> Result<ComposedShell> {
    let server = &context.config.server;
    let (event_tx, event_rx) = mpsc::channel();

    let client = ApiClient::new(
        &server.base_url,
        Duration::from_millis(server.request_timeout_ms),
        server.anti_forgery_token.clone(),
    )?;
    let (api_worker, api_handle) = ApiWorker::start(client, event_tx.clone())?;

    let hub = HubConnection::new(server.hub_url.clone(), event_tx);

    let session = UserSession::from_config(
        context.config.user.id,
        context.config.user.display_name.clone(),
    );

    Ok(ComposedShell {
        event_source: Box::new(CompositeEventSource::new(event_rx)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(
            session,
            hub,
            api_handle,
            SystemOpener,
        )),
        _api_worker: api_worker,
    })
}
