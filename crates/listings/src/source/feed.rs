//! A collaborator that reads listings from JSON feed documents.
//!
//! Each feed location (an http(s) URL or a local file) counts as one request.
//! A feed document is a [`FeedPage`]; every section is optional.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

use super::{MediaSink, RequestTracker, SiteCollaborator};
use crate::error::{Error, Result};
use crate::media::{Game, Host, MediaType, Site, Stream, Video};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Url(Url),
    File(PathBuf),
}

impl FromStr for FeedLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidFeedLocation("empty location".to_string()));
        }

        if s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://") {
            let url = Url::parse(s).map_err(|e| Error::InvalidFeedLocation(format!("{s}: {e}")))?;
            if url.scheme() == "file" {
                return url
                    .to_file_path()
                    .map(FeedLocation::File)
                    .map_err(|_| Error::InvalidFeedLocation(s.to_string()));
            }
            return Ok(FeedLocation::Url(url));
        }

        Ok(FeedLocation::File(PathBuf::from(s)))
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLocation::Url(url) => write!(f, "{url}"),
            FeedLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One feed document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FeedPage {
    pub streams: Vec<Stream>,
    pub hosts: Vec<Host>,
    pub games: Vec<Game>,
    pub videos: Vec<Video>,
}

impl FeedPage {
    /// Tags every stream and video with `site`.
    pub fn claim(mut self, site: Site) -> Self {
        self.streams.iter_mut().for_each(|s| s.site = site);
        self.videos.iter_mut().for_each(|v| v.site = site);
        self
    }

    pub async fn fetch(client: &Client, location: &FeedLocation) -> Result<Self> {
        match location {
            FeedLocation::Url(url) => {
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::HttpStatus {
                        status,
                        url: url.to_string(),
                    });
                }
                Ok(response.json::<FeedPage>().await?)
            }
            FeedLocation::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }
}

/// Reads a site's listings from a fixed set of feed locations.
#[derive(Debug)]
pub struct FeedSource {
    site: Site,
    client: Client,
    locations: Vec<FeedLocation>,
    tracker: Arc<RequestTracker>,
}

impl FeedSource {
    pub fn new(site: Site, client: Client, locations: Vec<FeedLocation>) -> Self {
        Self {
            site,
            client,
            locations,
            tracker: Arc::new(RequestTracker::new()),
        }
    }

    /// Parses every location up front so bad config fails before any request.
    pub fn from_strs<S: AsRef<str>>(site: Site, client: Client, locations: &[S]) -> Result<Self> {
        let locations = locations
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<FeedLocation>>>()?;
        Ok(Self::new(site, client, locations))
    }

    pub fn locations(&self) -> &[FeedLocation] {
        &self.locations
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }
}

fn emit(site: Site, page: FeedPage, sink: &MediaSink) {
    let page = page.claim(site);

    macro_rules! forward {
        ($field:ident, $media_type:expr, $send:ident) => {
            if !page.$field.is_empty() {
                if site.provides($media_type) {
                    sink.$send(page.$field);
                } else {
                    warn!(
                        %site,
                        media_type = %$media_type,
                        count = page.$field.len(),
                        "Site does not provide this media type; dropping batch"
                    );
                }
            }
        };
    }

    forward!(streams, MediaType::Streams, add_streams);
    forward!(hosts, MediaType::Hosts, add_hosts);
    forward!(games, MediaType::Games, add_games);
    forward!(videos, MediaType::Videos, add_videos);
}

impl SiteCollaborator for FeedSource {
    fn site(&self) -> Site {
        self.site
    }

    /// Spawns one task per feed location on the current tokio runtime.
    fn start_getting_media(&self, sink: MediaSink) {
        let site = self.site;
        let total = self.tracker.add_requests(self.locations.len());
        sink.update_request_status(site, total, self.tracker.completed());

        for location in self.locations.iter().cloned() {
            let client = self.client.clone();
            let tracker = Arc::clone(&self.tracker);
            let sink = sink.clone();
            let span = info_span!("feed", %site, %location);

            tokio::spawn(
                async move {
                    match FeedPage::fetch(&client, &location).await {
                        Ok(page) => {
                            debug!(
                                streams = page.streams.len(),
                                hosts = page.hosts.len(),
                                games = page.games.len(),
                                videos = page.videos.len(),
                                "Feed loaded"
                            );
                            emit(site, page, &sink);
                        }
                        Err(e) => {
                            warn!(error = %e, "Feed request failed");
                            sink.report_failure(site, format!("{location}: {e}"));
                        }
                    }
                    let completed = tracker.complete_one();
                    sink.update_request_status(site, tracker.total(), completed);
                }
                .instrument(span),
            );
        }
    }

    fn requests_are_done(&self) -> bool {
        self.tracker.is_done()
    }
}
