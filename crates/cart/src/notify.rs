//! Outcome notification.
//!
//! The store reports failed mutations through a [`Notifier`] so a front end
//! can surface a toast or banner without inspecting the typed result. The
//! notifier is an optional adapter: every failure is also returned as a
//! typed [`CartError`](crate::error::CartError), and the store never blocks
//! on or inspects a notifier's behavior.

use std::sync::{Mutex, PoisonError};

/// Fire-and-forget sink for human-readable failure messages.
pub trait Notifier: Send + Sync {
    /// Report a failed operation to the user.
    fn error(&self, message: &str);
}

/// Notifier that forwards messages to `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "shoebox::notify", "{message}");
    }
}

/// Notifier that records messages for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages reported so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
