//! UI layer: terminal rendering and the event loop entry point.

mod event_source;
mod markup;
mod message_input;
mod message_rendering;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::CompositeEventSource;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
