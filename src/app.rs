use anyhow::Result;

use crate::{
    api,
    cli::{Cli, Command},
    domain, hub, infra, ui,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        hub = hub::module_name(),
        api = api::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), cli.log_level.as_deref())?;
            let mut shell = bootstrap::compose_shell(&context)?;
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?;
        }
    }

    Ok(())
}
