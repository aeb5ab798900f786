use std::time::{Duration, Instant};

/// Deadline-based debounce. Every keystroke pushes the deadline out; the
/// shell polls `fire` on each tick and acts once the input has been quiet
/// for the full delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Registers activity, restarting the quiet period.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns true exactly once after the quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
