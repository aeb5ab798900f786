//! REST adapter: the blocking HTTP client for the service's API and the
//! worker thread that keeps those calls off the UI thread.

pub mod client;
pub mod worker;

/// Returns the api module name for smoke checks.
pub fn module_name() -> &'static str {
    "api"
}
