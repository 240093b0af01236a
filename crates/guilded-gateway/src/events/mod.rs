//! Gateway events
//!
//! Event tags, their payload shapes, and the registry resolving one to the other.

mod event_types;
pub mod payloads;
mod registry;

pub use event_types::{Event, EventKind, UnknownEvent};
pub use registry::EventRegistry;
