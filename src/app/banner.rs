// Mutuals - app/banner.rs
//
// Transient error banner. Holds at most one message; a new error replaces
// the previous one and restarts the display timer.
//
// Time is passed in explicitly so expiry is testable without sleeping;
// `SessionController` feeds it `Instant::now()`.

use std::time::{Duration, Instant};

/// A single rolling error message with an expiry deadline.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    message: Option<String>,
    expires_at: Option<Instant>,
    lifetime: Duration,
}

impl ErrorBanner {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            message: None,
            expires_at: None,
            lifetime,
        }
    }

    /// Show `message`, replacing any current one; the deadline restarts
    /// from `now`.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.expires_at = Some(now + self.lifetime);
    }

    /// Clear the message if its deadline has passed. Returns true if a
    /// message was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.message = None;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Time left before the current message expires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
