use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        hub_url = %context.config.server.hub_url,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state_mut()))?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            events::{AppEvent, HubStatus},
            ids::ConversationId,
            session::UserSession,
        },
        infra::stubs::NoopOpener,
        ui::event_source::MockEventSource,
        usecases::{
            contracts::{ApiCommand, ApiDispatchError, ApiGateway, HubChannel, HubStartError},
            search_messages::{SearchInvoker, SearchSourceError},
            send_chat_message::{ChatMessageSender, ChatSendSourceError},
            shell::DefaultShellOrchestrator,
        },
    };

    struct QuietHub;

    impl ChatMessageSender for QuietHub {
        fn send_chat(
            &self,
            _conversation: ConversationId,
            _text: &str,
        ) -> Result<(), ChatSendSourceError> {
            Ok(())
        }
    }

    impl SearchInvoker for QuietHub {
        fn invoke_search(
            &self,
            _conversation: ConversationId,
            _query: &str,
        ) -> Result<(), SearchSourceError> {
            Ok(())
        }
    }

    impl HubChannel for QuietHub {
        fn ensure_started(&mut self) -> Result<(), HubStartError> {
            Ok(())
        }

        fn status(&self) -> HubStatus {
            HubStatus::Connected
        }
    }

    struct QuietGateway;

    impl ApiGateway for QuietGateway {
        fn submit(&self, _command: ApiCommand) -> Result<(), ApiDispatchError> {
            Ok(())
        }
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }

    #[test]
    fn orchestrator_stops_on_quit_from_source() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let mut orchestrator = DefaultShellOrchestrator::new(
            UserSession::default(),
            QuietHub,
            QuietGateway,
            NoopOpener,
        );

        if let Some(event) = source.next_event().expect("must read mock event") {
            orchestrator
                .handle_event(event)
                .expect("must handle quit event");
        }

        assert!(!orchestrator.state().is_running());
    }
}
