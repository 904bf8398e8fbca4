//! Display side channel for errors and citations

use super::Citation;
use crate::error::ServiceError;
use std::fmt;
use std::sync::Mutex;

/// Pipeline stage that reported an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classification,
    KnowledgeBase,
    GenericResponse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classification => f.write_str("Classification"),
            Self::KnowledgeBase => f.write_str("Knowledge base"),
            Self::GenericResponse => f.write_str("Generic response"),
        }
    }
}

/// Receives what the display layer shows next to an answer
pub trait DisplaySink: Send + Sync {
    /// A remote call failed and was swallowed
    fn service_error(&self, stage: Stage, error: &ServiceError);

    /// Supporting evidence for a knowledge-base answer
    fn citation(&self, citation: &Citation);

    /// A knowledge-base answer came back without citations
    fn no_context(&self);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DisplaySink for NoopSink {
    fn service_error(&self, _stage: Stage, _error: &ServiceError) {}

    fn citation(&self, _citation: &Citation) {}

    fn no_context(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Rendered message, e.g. `Knowledge base error: ...`
    Error(String),
    Citation(Citation),
    NoContext,
}

/// Buffers events until the front-end drains them after a turn
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Mutex<Vec<DisplayEvent>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events
    pub fn drain(&self) -> Vec<DisplayEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    /// Copy of buffered events
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: DisplayEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DisplaySink for EventBuffer {
    fn service_error(&self, stage: Stage, error: &ServiceError) {
        self.push(DisplayEvent::Error(format!("{} error: {}", stage, error)));
    }

    fn citation(&self, citation: &Citation) {
        self.push(DisplayEvent::Citation(citation.clone()));
    }

    fn no_context(&self) {
        self.push(DisplayEvent::NoContext);
    }
}
