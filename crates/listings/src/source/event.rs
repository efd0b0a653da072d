use tokio::sync::mpsc;
use tracing::debug;

use crate::media::{Game, Host, Site, Stream, Video};

/// Messages collaborators send to the render coordinator.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Streams(Vec<Stream>),
    Hosts(Vec<Host>),
    Games(Vec<Game>),
    Videos(Vec<Video>),
    RequestStatus {
        site: Site,
        total: usize,
        completed: usize,
    },
    Failure {
        site: Site,
        message: String,
    },
}

/// Sending half of the coordinator's event channel.
///
/// Cheap to clone; each collaborator task keeps its own copy. The
/// coordinator stops receiving once every sink has been dropped.
#[derive(Debug, Clone)]
pub struct MediaSink {
    tx: mpsc::UnboundedSender<SourceEvent>,
}

impl MediaSink {
    pub fn new(tx: mpsc::UnboundedSender<SourceEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink and the receiver that drains it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SourceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn send(&self, event: SourceEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!(event = ?e.0, "Coordinator gone; dropping event");
        }
    }

    pub fn add_streams(&self, batch: Vec<Stream>) {
        self.send(SourceEvent::Streams(batch));
    }

    pub fn add_hosts(&self, batch: Vec<Host>) {
        self.send(SourceEvent::Hosts(batch));
    }

    pub fn add_games(&self, batch: Vec<Game>) {
        self.send(SourceEvent::Games(batch));
    }

    pub fn add_videos(&self, batch: Vec<Video>) {
        self.send(SourceEvent::Videos(batch));
    }

    pub fn update_request_status(&self, site: Site, total: usize, completed: usize) {
        self.send(SourceEvent::RequestStatus {
            site,
            total,
            completed,
        });
    }

    pub fn report_failure(&self, site: Site, message: impl Into<String>) {
        self.send(SourceEvent::Failure {
            site,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        let (sink, mut rx) = MediaSink::channel();
        sink.add_games(Vec::new());
        sink.update_request_status(Site::Twitch, 2, 1);
        sink.report_failure(Site::Nico, "boom");
        drop(sink);

        assert!(matches!(rx.recv().await, Some(SourceEvent::Games(_))));
        assert!(matches!(
            rx.recv().await,
            Some(SourceEvent::RequestStatus {
                site: Site::Twitch,
                total: 2,
                completed: 1
            })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(SourceEvent::Failure { site: Site::Nico, .. })
        ));
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_send_after_close_is_silent() {
        let (sink, rx) = MediaSink::channel();
        drop(rx);
        sink.add_streams(Vec::new());
    }
}
