//! Site collaborators and the channel they report through.

pub mod collaborator;
pub mod event;
pub mod feed;
pub mod registry;

pub use collaborator::{RequestTracker, SiteCollaborator};
pub use event::{MediaSink, SourceEvent};
pub use feed::{FeedLocation, FeedPage, FeedSource};
pub use registry::SourceRegistry;
