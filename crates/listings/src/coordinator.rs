//! Render coordinator: owns every category's ordered list and keeps the
//! display surface in step with it.
//!
//! Collaborators never touch the lists directly. They send [`SourceEvent`]s
//! through a [`MediaSink`] and the coordinator applies them one at a time, in
//! the order they were sent.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::display::{DisplaySurface, ToCard};
use crate::media::{Game, Host, MediaType, Site, Stream, Video};
use crate::merge::{InsertPosition, MergePolicy, OrderedList};
use crate::settings::{GameDisplay, Settings};
use crate::source::{MediaSink, SourceEvent, SourceRegistry};

pub const WAITING_TEXT: &str = "Waiting...";
pub const NO_SITES_ENABLED: &str = "No stream sites are enabled! Go to Settings to enable a site.";

/// State of one media category.
#[derive(Debug)]
pub struct CategoryState<T, E> {
    media_type: MediaType,
    /// Enabled sites contributing to this category.
    sites: Vec<Site>,
    list: OrderedList<T, E>,
    exhausted: bool,
}

impl<T, E> CategoryState<T, E> {
    fn new(media_type: MediaType, sites: Vec<Site>, policy: MergePolicy<T>) -> Self {
        Self {
            media_type,
            sites,
            list: OrderedList::new(policy),
            exhausted: false,
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn list(&self) -> &OrderedList<T, E> {
        &self.list
    }

    /// Whether every contributing site has finished its requests.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns true only on the call that flips the category to exhausted.
    fn try_exhaust(&mut self, finished: impl Fn(Site) -> bool) -> bool {
        if self.exhausted {
            return false;
        }
        let done = self.sites.iter().all(|site| finished(*site));
        self.exhausted = done;
        done
    }

    /// Exhausted just now and still empty.
    fn exhaust_if_empty(&mut self, finished: impl Fn(Site) -> bool) -> Option<MediaType> {
        (self.try_exhaust(finished) && self.list.is_empty()).then_some(self.media_type)
    }
}

/// Progress a site has reported through events the coordinator has applied.
///
/// A collaborator's own counters can run ahead of the channel: its last batch
/// may still be queued when `requests_are_done` already says true. A site is
/// finished only once both agree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ReportedStatus {
    total: usize,
    completed: usize,
}

impl ReportedStatus {
    /// Tasks of one site may report out of order; counts never go back.
    fn record(&mut self, total: usize, completed: usize) {
        self.total = self.total.max(total);
        self.completed = self.completed.max(completed);
    }

    fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

fn site_finished(
    registry: &SourceRegistry,
    reported: &BTreeMap<Site, ReportedStatus>,
    site: Site,
) -> bool {
    let Some(source) = registry.get(site) else {
        return true;
    };
    reported.get(&site).is_some_and(ReportedStatus::is_done) && source.requests_are_done()
}

fn merge_batch<T, S>(
    surface: &mut S,
    state: &mut CategoryState<T, S::Element>,
    game_display: GameDisplay,
    batch: Vec<T>,
) where
    T: ToCard,
    S: DisplaySurface,
{
    if batch.is_empty() {
        return;
    }

    let media_type = state.media_type;
    if state.list.is_empty() {
        surface.set_placeholder(media_type, None);
    }

    let count = batch.len();
    for item in batch {
        let element = surface.create_element(media_type, item.to_card(game_display));
        let position = state.list.insert(item, element.clone());
        match (state.list.policy(), position) {
            (MergePolicy::Arrival, _) => surface.append(media_type, &element),
            (MergePolicy::Sorted(_), InsertPosition::Front) => {
                surface.prepend(media_type, &element)
            }
            (MergePolicy::Sorted(_), InsertPosition::After(index)) => {
                match state.list.element_at(index) {
                    Some(anchor) => surface.insert_after(media_type, anchor, &element),
                    None => surface.append(media_type, &element),
                }
            }
        }
    }

    debug!(%media_type, count, total = state.list.len(), "Merged batch");
}

/// Drives one listings session.
///
/// Construct it, call [`init`](Self::init), then either call
/// [`run`](Self::run) or feed events through [`handle_event`](Self::handle_event)
/// yourself.
pub struct RenderCoordinator<S: DisplaySurface> {
    settings: Settings,
    registry: SourceRegistry,
    surface: S,
    streams: CategoryState<Stream, S::Element>,
    hosts: CategoryState<Host, S::Element>,
    games: CategoryState<Game, S::Element>,
    videos: CategoryState<Video, S::Element>,
    reported: BTreeMap<Site, ReportedStatus>,
    sink: Option<MediaSink>,
    events: mpsc::UnboundedReceiver<SourceEvent>,
    started: bool,
}

impl<S: DisplaySurface> RenderCoordinator<S> {
    pub fn new(settings: Settings, registry: SourceRegistry, surface: S) -> Self {
        let sites_for = |media_type: MediaType| -> Vec<Site> {
            media_type
                .sites()
                .filter(|site| settings.is_enabled(*site) && registry.get(*site).is_some())
                .collect()
        };

        let streams = CategoryState::new(
            MediaType::Streams,
            sites_for(MediaType::Streams),
            MergePolicy::Sorted(Stream::by_view_count_desc),
        );
        let hosts = CategoryState::new(
            MediaType::Hosts,
            sites_for(MediaType::Hosts),
            MergePolicy::Arrival,
        );
        let games = CategoryState::new(
            MediaType::Games,
            sites_for(MediaType::Games),
            MergePolicy::Arrival,
        );
        let videos = CategoryState::new(
            MediaType::Videos,
            sites_for(MediaType::Videos),
            MergePolicy::Sorted(Video::by_timestamp_desc),
        );

        let (sink, events) = MediaSink::channel();

        Self {
            settings,
            registry,
            surface,
            streams,
            hosts,
            games,
            videos,
            reported: BTreeMap::new(),
            sink: Some(sink),
            events,
            started: false,
        }
    }

    fn category_sites(&self, media_type: MediaType) -> &[Site] {
        match media_type {
            MediaType::Streams => self.streams.sites(),
            MediaType::Hosts => self.hosts.sites(),
            MediaType::Games => self.games.sites(),
            MediaType::Videos => self.videos.sites(),
        }
    }

    /// Puts a waiting placeholder in every section and shows only the
    /// sections some enabled site can fill.
    pub fn init(&mut self) {
        self.surface.set_footer_visible(false);
        self.surface.set_request_status_visible(false);

        for media_type in MediaType::iter() {
            let visible = !self.category_sites(media_type).is_empty();
            self.surface.set_placeholder(media_type, Some(WAITING_TEXT));
            self.surface.set_section_visible(media_type, visible);
        }
    }

    /// Starts every enabled collaborator. Returns how many were started.
    pub fn start_getting_media(&mut self) -> usize {
        if self.started {
            warn!("Media discovery already started");
            return 0;
        }
        let Some(sink) = self.sink.as_ref() else {
            warn!("Event channel already closed; cannot start collaborators");
            return 0;
        };
        self.started = true;

        let mut started = 0;
        for source in self.registry.enabled(&self.settings) {
            info!(site = %source.site(), "Starting media discovery");
            source.start_getting_media(sink.clone());
            started += 1;
        }

        if started == 0 {
            warn!("No sites enabled");
            self.surface.show_notification(NO_SITES_ENABLED);
        }
        started
    }

    pub fn add_streams(&mut self, batch: Vec<Stream>) {
        let game_display = self.settings.game_display;
        merge_batch(&mut self.surface, &mut self.streams, game_display, batch);
    }

    pub fn add_hosts(&mut self, batch: Vec<Host>) {
        let game_display = self.settings.game_display;
        merge_batch(&mut self.surface, &mut self.hosts, game_display, batch);
    }

    pub fn add_games(&mut self, batch: Vec<Game>) {
        let game_display = self.settings.game_display;
        merge_batch(&mut self.surface, &mut self.games, game_display, batch);
    }

    pub fn add_videos(&mut self, batch: Vec<Video>) {
        let game_display = self.settings.game_display;
        merge_batch(&mut self.surface, &mut self.videos, game_display, batch);
    }

    pub fn show_notification(&mut self, text: &str) {
        self.surface.show_notification(text);
    }

    /// Refreshes a site's status line, then re-evaluates which categories
    /// and whether the whole session are finished.
    pub fn update_request_status(&mut self, site: Site, total: usize, completed: usize) {
        let status = self.reported.entry(site).or_default();
        status.record(total, completed);
        let ReportedStatus { total, completed } = *status;

        if status.is_done() {
            self.surface.set_site_status(site, None);
        } else {
            let line = format!("{site}: {completed} of {total}");
            self.surface.set_site_status(site, Some(&line));
        }

        let (registry, reported) = (&self.registry, &self.reported);
        let finished = |site| site_finished(registry, reported, site);
        let newly_empty = [
            self.streams.exhaust_if_empty(finished),
            self.hosts.exhaust_if_empty(finished),
            self.games.exhaust_if_empty(finished),
            self.videos.exhaust_if_empty(finished),
        ];
        for media_type in newly_empty.into_iter().flatten() {
            debug!(%media_type, "Category finished empty");
            self.surface
                .set_placeholder(media_type, Some(&media_type.empty_text()));
        }

        if self.requests_are_done() {
            self.surface.set_request_status_visible(false);
            self.surface.set_footer_visible(true);
        } else {
            self.surface.set_request_status_visible(true);
        }
    }

    /// Whether every enabled collaborator has finished its requests and
    /// the coordinator has applied its final status.
    pub fn requests_are_done(&self) -> bool {
        self.registry
            .enabled(&self.settings)
            .all(|source| site_finished(&self.registry, &self.reported, source.site()))
    }

    pub fn handle_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Streams(batch) => self.add_streams(batch),
            SourceEvent::Hosts(batch) => self.add_hosts(batch),
            SourceEvent::Games(batch) => self.add_games(batch),
            SourceEvent::Videos(batch) => self.add_videos(batch),
            SourceEvent::RequestStatus {
                site,
                total,
                completed,
            } => self.update_request_status(site, total, completed),
            SourceEvent::Failure { site, message } => {
                warn!(%site, %message, "Source failure");
                self.surface.show_notification(&format!("{site}: {message}"));
            }
        }
    }

    /// Starts discovery if needed and applies events until every
    /// collaborator has dropped its sink.
    pub async fn run(&mut self) {
        if !self.started {
            self.start_getting_media();
        }
        // Only collaborator tasks keep the channel open from here on.
        self.sink = None;

        let mut handled = 0usize;
        while let Some(event) = self.events.recv().await {
            self.handle_event(event);
            handled += 1;
        }

        info!(
            events = handled,
            streams = self.streams.list.len(),
            hosts = self.hosts.list.len(),
            games = self.games.list.len(),
            videos = self.videos.list.len(),
            "All sources finished"
        );
    }

    /// A sink feeding this coordinator, until [`run`](Self::run) closes it.
    pub fn sink(&self) -> Option<MediaSink> {
        self.sink.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn streams(&self) -> &CategoryState<Stream, S::Element> {
        &self.streams
    }

    pub fn hosts(&self) -> &CategoryState<Host, S::Element> {
        &self.hosts
    }

    pub fn games(&self) -> &CategoryState<Game, S::Element> {
        &self.games
    }

    pub fn videos(&self) -> &CategoryState<Video, S::Element> {
        &self.videos
    }
}
