use std::cmp::Ordering;
use std::fmt;

use super::sorted::{InsertPosition, insertion_position};

pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// How new items are placed in an [`OrderedList`].
pub enum MergePolicy<T> {
    /// Keep the list ordered by the comparator, stable under ties.
    Sorted(Comparator<T>),
    /// Append in arrival order.
    Arrival,
}

impl<T> Clone for MergePolicy<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MergePolicy<T> {}

impl<T> fmt::Debug for MergePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::Sorted(_) => f.write_str("Sorted"),
            MergePolicy::Arrival => f.write_str("Arrival"),
        }
    }
}

/// An ordered item list with a parallel list of display elements.
///
/// Both vectors are only ever grown together through [`OrderedList::insert`],
/// so `items()[i]` is always rendered by `elements()[i]`.
#[derive(Debug)]
pub struct OrderedList<T, E> {
    policy: MergePolicy<T>,
    items: Vec<T>,
    elements: Vec<E>,
}

impl<T, E> OrderedList<T, E> {
    pub fn new(policy: MergePolicy<T>) -> Self {
        Self {
            policy,
            items: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn sorted(compare: Comparator<T>) -> Self {
        Self::new(MergePolicy::Sorted(compare))
    }

    pub fn arrival() -> Self {
        Self::new(MergePolicy::Arrival)
    }

    pub fn policy(&self) -> MergePolicy<T> {
        self.policy
    }

    /// Where `item` would be inserted right now.
    pub fn position_for(&self, item: &T) -> InsertPosition {
        match self.policy {
            MergePolicy::Sorted(compare) => insertion_position(item, &self.items, compare),
            MergePolicy::Arrival => match self.items.len() {
                0 => InsertPosition::Front,
                n => InsertPosition::After(n - 1),
            },
        }
    }

    /// Inserts `item` and its display element at the same slot.
    pub fn insert(&mut self, item: T, element: E) -> InsertPosition {
        let position = self.position_for(&item);
        let slot = position.slot();
        self.items.insert(slot, item);
        self.elements.insert(slot, element);
        position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn element_at(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(a: &u32, b: &u32) -> Ordering {
        b.cmp(a)
    }

    fn assert_sorted(list: &OrderedList<u32, &'static str>) {
        for pair in list.items().windows(2) {
            assert_ne!(desc(&pair[0], &pair[1]), Ordering::Greater, "{pair:?}");
        }
    }

    #[test]
    fn test_insert_keeps_lock_step() {
        let mut list = OrderedList::sorted(desc);
        list.insert(50, "a");
        list.insert(30, "b");
        list.insert(10, "c");
        let position = list.insert(40, "d");

        assert_eq!(position, InsertPosition::After(0));
        assert_eq!(list.items(), &[50, 40, 30, 10]);
        assert_eq!(list.elements(), &["a", "d", "b", "c"]);
        assert_eq!(list.items().len(), list.elements().len());
    }

    #[test]
    fn test_empty_list_inserts_at_front() {
        let mut list: OrderedList<u32, &str> = OrderedList::sorted(desc);
        assert_eq!(list.insert(5, "x"), InsertPosition::Front);
        assert_eq!(list.items(), &[5]);
    }

    #[test]
    fn test_front_insertion_becomes_first() {
        let mut list = OrderedList::sorted(desc);
        list.insert(10, "old");
        assert_eq!(list.insert(11, "new"), InsertPosition::Front);
        assert_eq!(list.element_at(0), Some(&"new"));
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut list = OrderedList::sorted(desc);
        list.insert(20, "first");
        list.insert(10, "low");
        list.insert(20, "second");
        let position = list.insert(20, "third");

        assert_eq!(position, InsertPosition::After(1));
        assert_eq!(list.items(), &[20, 20, 20, 10]);
        assert_eq!(list.elements(), &["first", "second", "third", "low"]);
    }

    #[test]
    fn test_sorted_after_interleaved_batches() {
        let batches: [&[u32]; 3] = [&[5, 80, 13, 13, 2], &[99, 0, 41], &[13, 7, 64, 64, 1]];
        let mut list = OrderedList::sorted(desc);
        for batch in batches {
            for &value in batch {
                list.insert(value, "e");
                assert_sorted(&list);
                assert_eq!(list.items().len(), list.elements().len());
            }
        }
        assert_eq!(list.len(), 13);
        assert_eq!(list.items().first(), Some(&99));
        assert_eq!(list.items().last(), Some(&0));
    }

    #[test]
    fn test_arrival_policy_appends() {
        let mut list = OrderedList::arrival();
        assert_eq!(list.insert(1u32, "a"), InsertPosition::Front);
        assert_eq!(list.insert(9, "b"), InsertPosition::After(0));
        assert_eq!(list.insert(5, "c"), InsertPosition::After(1));
        assert_eq!(list.items(), &[1, 9, 5]);
    }
}
