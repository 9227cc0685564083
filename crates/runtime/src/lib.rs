//! Async session hosting for the room-graph game.
//!
//! This crate wires level sources, the shared level catalog, and one worker
//! task per player session into a cohesive runtime API. Consumers embed
//! [`Runtime`] to open sessions, feed them input lines through
//! [`SessionHandle`], and follow lifecycle events on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`catalog`] caches validated level templates
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps the per-session tasks internal to the crate
pub mod api;
pub mod catalog;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    ContentLevelSource, InMemoryLevelSource, LevelId, LevelSource, Result, RuntimeError,
    SessionHandle, SessionId, SessionSnapshot,
};
pub use catalog::LevelCatalog;
pub use events::{Event, EventBus, LevelEvent, SessionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
