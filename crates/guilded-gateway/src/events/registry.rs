//! Tag to event-shape lookup

use std::collections::HashMap;

use super::{Event, EventKind};
use crate::error::{GatewayError, GatewayResult};

/// Maps wire tags to event kinds
///
/// Built once and shared read-only with the connection manager.
#[derive(Debug, Clone)]
pub struct EventRegistry {
    kinds: HashMap<&'static str, EventKind>,
}

impl EventRegistry {
    /// Create a registry holding every known event kind
    #[must_use]
    pub fn new() -> Self {
        Self::with_kinds(EventKind::ALL.iter().copied())
    }

    /// Create a registry limited to the given kinds
    ///
    /// Tags outside the set resolve to [`EventKind::Unknown`].
    #[must_use]
    pub fn with_kinds(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        let kinds = kinds
            .into_iter()
            .filter(|kind| *kind != EventKind::Unknown)
            .map(|kind| (kind.as_str(), kind))
            .collect();
        Self { kinds }
    }

    /// Look up a tag, failing for unregistered ones
    pub fn lookup(&self, tag: &str) -> GatewayResult<EventKind> {
        self.kinds
            .get(tag)
            .copied()
            .ok_or_else(|| GatewayError::UnknownEventType(tag.to_string()))
    }

    /// Resolve a tag, mapping unregistered ones to `Unknown`
    #[must_use]
    pub fn resolve(&self, tag: &str) -> EventKind {
        self.lookup(tag).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Dispatching as unknown event");
            EventKind::Unknown
        })
    }

    /// Resolve a tag and decode its payload
    #[must_use]
    pub fn decode(&self, tag: &str, payload: &str) -> Event {
        self.resolve(tag).decode(tag, payload)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
