//! Status signal - the single live status line and its auto-clear deadline

use std::time::Duration;
use tokio::time::Instant;

use crate::models::StatusMessage;

/// Identifies one `set` on a [`StatusSignal`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusToken(u64);

/// Holds at most one status message.
///
/// Each `set*` replaces the message and drops any pending auto-clear, so a
/// deadline scheduled for an older message can never clear a newer one.
/// The owner waits on [`StatusSignal::deadline`] and calls
/// [`StatusSignal::expire`] when it passes.
#[derive(Debug, Default)]
pub struct StatusSignal {
    current: Option<StatusMessage>,
    generation: u64,
    clear_at: Option<Instant>,
}

impl StatusSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn set(&mut self, message: StatusMessage) -> StatusToken {
        self.generation += 1;
        self.current = Some(message);
        self.clear_at = None;
        StatusToken(self.generation)
    }

    pub fn set_with_auto_clear(&mut self, message: StatusMessage, delay: Duration) -> StatusToken {
        let token = self.set(message);
        self.clear_at = Some(Instant::now() + delay);
        token
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
        self.clear_at = None;
    }

    /// Clear only if the message set under `token` is still the live one
    pub fn clear_if(&mut self, token: StatusToken) -> bool {
        if self.current.is_some() && token.0 == self.generation {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Pending auto-clear deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.clear_at
    }

    /// Clear the message if its deadline has passed. Returns true if it cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(at) if at <= now => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}
