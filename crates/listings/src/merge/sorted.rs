use std::cmp::Ordering;

/// Where a new item goes relative to an already ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before every existing item.
    Front,
    /// Immediately after the item at this index.
    After(usize),
}

impl InsertPosition {
    /// Index the new item occupies once inserted.
    pub fn slot(&self) -> usize {
        match self {
            InsertPosition::Front => 0,
            InsertPosition::After(index) => index + 1,
        }
    }
}

/// Finds the position of `item` in `ordered`.
///
/// `ordered` must already satisfy `compare(a, b) != Greater` for every
/// adjacent pair. The result points after the last element that does not sort
/// after `item`, so an item equal to existing ones lands behind all of them.
pub fn insertion_position<T, F>(item: &T, ordered: &[T], mut compare: F) -> InsertPosition
where
    F: FnMut(&T, &T) -> Ordering,
{
    let slot = ordered.partition_point(|existing| compare(existing, item) != Ordering::Greater);
    match slot {
        0 => InsertPosition::Front,
        n => InsertPosition::After(n - 1),
    }
}
