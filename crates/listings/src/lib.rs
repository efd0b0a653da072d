//! Incremental aggregation of media listings from several streaming sites.
//!
//! Site collaborators discover streams, hosts, games and videos on their own
//! schedule and push batches into a [`RenderCoordinator`]. The coordinator
//! merges every batch into a per-category ordered list and keeps a display
//! surface in lock-step with that list.

pub mod coordinator;
pub mod display;
pub mod error;
pub mod media;
pub mod merge;
pub mod settings;
pub mod source;

pub use coordinator::RenderCoordinator;
pub use error::{Error, Result};
pub use settings::{GameDisplay, Settings};
