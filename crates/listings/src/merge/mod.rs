//! Incremental sorted merge of items into an ordered list.

pub mod ordered;
pub mod sorted;

pub use ordered::{MergePolicy, OrderedList};
pub use sorted::{InsertPosition, insertion_position};
