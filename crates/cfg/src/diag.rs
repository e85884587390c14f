//! Diagnostic sink: where parse and query messages go.
//!
//! The parser never aborts on bad input; everything it has to say about a
//! document arrives here as a fully formatted, human-readable line. The sink
//! is an injected capability so embedders (and tests) can capture messages
//! instead of printing them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait MessageSink: Send + Sync {
    fn message(&self, text: &str);
}

/// Default sink: one line per message on standard error.
pub struct StderrSink;

impl MessageSink for StderrSink {
    fn message(&self, text: &str) {
        eprintln!("{text}");
    }
}

/// Discards every message.
pub struct NullSink;

impl MessageSink for NullSink {
    fn message(&self, _text: &str) {}
}

/// Collects messages in memory so callers can inspect them afterwards.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSink for MemorySink {
    fn message(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}

impl<S: MessageSink + ?Sized> MessageSink for Arc<S> {
    fn message(&self, text: &str) {
        (**self).message(text);
    }
}
