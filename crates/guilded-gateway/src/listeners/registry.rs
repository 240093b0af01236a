//! Listener registry
//!
//! Callbacks are grouped by wire tag and run in registration order on the
//! read loop task. Registration may happen at any time, including from inside
//! a callback: dispatch works on a snapshot and holds no lock while calling out.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::connection::GatewayClient;
use crate::events::Event;

/// A registered event callback
pub type Listener = Arc<dyn Fn(&GatewayClient, &Event) + Send + Sync>;

/// Tag-keyed listener storage
#[derive(Default)]
pub struct ListenerRegistry {
    by_tag: RwLock<HashMap<String, Vec<Listener>>>,
    catch_all: RwLock<Vec<Listener>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for one tag
    pub fn register(&self, tag: impl Into<String>, listener: Listener) {
        let tag = tag.into();
        tracing::trace!(tag = %tag, "Registering listener");
        self.by_tag.write().entry(tag).or_default().push(listener);
    }

    /// Append a listener for every event
    pub fn register_any(&self, listener: Listener) {
        self.catch_all.write().push(listener);
    }

    /// Run the listeners for an event's tag, then the catch-all listeners
    ///
    /// Returns how many callbacks ran.
    pub fn dispatch(&self, client: &GatewayClient, event: &Event) -> usize {
        let tagged: Vec<Listener> = self
            .by_tag
            .read()
            .get(event.tag())
            .cloned()
            .unwrap_or_default();
        let catch_all: Vec<Listener> = self.catch_all.read().clone();

        for listener in tagged.iter().chain(catch_all.iter()) {
            listener(client, event);
        }

        let ran = tagged.len() + catch_all.len();
        tracing::trace!(tag = %event.tag(), listeners = ran, "Event dispatched");
        ran
    }

    /// Number of listeners registered for a tag
    pub fn count(&self, tag: &str) -> usize {
        self.by_tag.read().get(tag).map_or(0, Vec::len)
    }

    pub fn catch_all_count(&self) -> usize {
        self.catch_all.read().len()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<(String, usize)> = self
            .by_tag
            .read()
            .iter()
            .map(|(tag, listeners)| (tag.clone(), listeners.len()))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("tags", &tags)
            .field("catch_all", &self.catch_all_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use guilded_common::ClientConfig;
    use parking_lot::Mutex;

    fn client() -> GatewayClient {
        GatewayClient::new(ClientConfig::new("token", "server"))
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Listener {
        let log = Arc::clone(log);
        Arc::new(move |_: &GatewayClient, event: &Event| {
            log.lock().push(format!("{name}:{}", event.tag()));
        })
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let registry = ListenerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register("DocCreated", recorder(&log, "a"));
        registry.register("DocCreated", recorder(&log, "b"));
        registry.register("DocDeleted", recorder(&log, "other"));

        let client = client();
        let event = EventKind::DocCreated.decode("DocCreated", "{}");
        for _ in 0..3 {
            assert_eq!(registry.dispatch(&client, &event), 2);
        }

        assert_eq!(*log.lock(), ["a:DocCreated", "b:DocCreated"].repeat(3));
    }

    #[test]
    fn test_catch_all_runs_after_tagged() {
        let registry = ListenerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register_any(recorder(&log, "any"));
        registry.register("Mystery", recorder(&log, "raw"));

        let client = client();
        let event = EventKind::Unknown.decode("Mystery", "{}");
        registry.dispatch(&client, &event);

        assert_eq!(*log.lock(), ["raw:Mystery", "any:Mystery"]);
    }

    #[test]
    fn test_register_during_dispatch() {
        let registry = Arc::new(ListenerRegistry::new());
        let inner = Arc::clone(&registry);
        registry.register(
            "DocCreated",
            Arc::new(move |_: &GatewayClient, _: &Event| {
                inner.register("DocCreated", Arc::new(|_: &GatewayClient, _: &Event| {}));
            }),
        );

        let client = client();
        let event = EventKind::DocCreated.decode("DocCreated", "{}");
        assert_eq!(registry.dispatch(&client, &event), 1);
        assert_eq!(registry.count("DocCreated"), 2);
    }

    #[test]
    fn test_no_listeners() {
        let registry = ListenerRegistry::new();
        let event = EventKind::DocCreated.decode("DocCreated", "{}");
        assert_eq!(registry.dispatch(&client(), &event), 0);
        assert_eq!(registry.count("DocCreated"), 0);
    }
}
