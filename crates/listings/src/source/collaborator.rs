use std::sync::atomic::{AtomicUsize, Ordering};

use super::MediaSink;
use crate::media::Site;

/// A site-specific source of listings.
///
/// Discovery is fire-and-forget: `start_getting_media` kicks off whatever
/// requests the site needs and returns immediately. Results and progress are
/// reported through the sink. `requests_are_done` is polled synchronously by
/// the coordinator whenever a status update arrives.
pub trait SiteCollaborator: Send + Sync {
    fn site(&self) -> Site;

    fn start_getting_media(&self, sink: MediaSink);

    fn requests_are_done(&self) -> bool;
}

/// Counts issued and finished requests for a collaborator.
#[derive(Debug, Default)]
pub struct RequestTracker {
    total: AtomicUsize,
    completed: AtomicUsize,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `count` new requests; returns the new total.
    pub fn add_requests(&self, count: usize) -> usize {
        self.total.fetch_add(count, Ordering::SeqCst) + count
    }

    /// Marks one request finished; returns the new completed count.
    pub fn complete_one(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// `(total, completed)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.total(), self.completed())
    }

    pub fn is_done(&self) -> bool {
        self.completed() >= self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker() {
        let tracker = RequestTracker::new();
        assert!(tracker.is_done());

        assert_eq!(tracker.add_requests(2), 2);
        assert!(!tracker.is_done());

        assert_eq!(tracker.complete_one(), 1);
        assert_eq!(tracker.counts(), (2, 1));
        assert!(!tracker.is_done());

        tracker.complete_one();
        assert!(tracker.is_done());
    }
}
