//! Event source feeding the shell loop.
//!
//! Two inputs merge here: events forwarded by the adapter workers over an
//! mpsc channel, and the keyboard via crossterm. Worker events drain
//! first; when both are quiet the poll timeout turns into a tick so
//! debounces and toasts still fire.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub struct CompositeEventSource {
    worker_events: Receiver<AppEvent>,
}

impl CompositeEventSource {
    pub fn new(worker_events: Receiver<AppEvent>) -> Self {
        Self { worker_events }
    }
}

impl AppEventSource for CompositeEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        match self.worker_events.try_recv() {
            Ok(event) => return Ok(Some(event)),
            // A dead channel leaves the keyboard as the only input; the
            // shell keeps running so the error state stays readable.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl && key.code == KeyCode::Char('c') {
                return Ok(Some(AppEvent::QuitRequested));
            }

            if let Some(name) = key_name(key.code) {
                return Ok(Some(AppEvent::InputKey(KeyInput::new(name, ctrl))));
            }
        }

        Ok(None)
    }
}

/// Maps a crossterm key code to the shell's key vocabulary. Printable
/// characters pass through as themselves, editing and navigation keys get
/// lowercase names, anything else is dropped.
fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(ch) => Some(ch.to_string()),
        KeyCode::Enter => Some("enter".to_owned()),
        KeyCode::Esc => Some("esc".to_owned()),
        KeyCode::Up => Some("up".to_owned()),
        KeyCode::Down => Some("down".to_owned()),
        KeyCode::Left => Some("left".to_owned()),
        KeyCode::Right => Some("right".to_owned()),
        KeyCode::Home => Some("home".to_owned()),
        KeyCode::End => Some("end".to_owned()),
        KeyCode::Backspace => Some("backspace".to_owned()),
        KeyCode::Delete => Some("delete".to_owned()),
        KeyCode::Tab => Some("tab".to_owned()),
        _ => None,
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::domain::events::{HubEvent, HubStatus};

    #[test]
    fn worker_events_drain_before_the_keyboard() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Hub(HubEvent::StatusChanged(HubStatus::Connected)))
            .unwrap();
        let mut source = CompositeEventSource::new(rx);

        let event = source.next_event().unwrap();

        assert_eq!(
            event,
            Some(AppEvent::Hub(HubEvent::StatusChanged(HubStatus::Connected)))
        );
    }

    #[test]
    fn key_names_cover_editing_keys() {
        assert_eq!(key_name(KeyCode::Char('q')).as_deref(), Some("q"));
        assert_eq!(key_name(KeyCode::Enter).as_deref(), Some("enter"));
        assert_eq!(key_name(KeyCode::Backspace).as_deref(), Some("backspace"));
        assert_eq!(key_name(KeyCode::Tab).as_deref(), Some("tab"));
        assert_eq!(key_name(KeyCode::F(1)), None);
    }
}
