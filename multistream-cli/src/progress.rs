//! Display surface that collects the session in memory and mirrors the
//! per-site request status on a terminal spinner.

use indicatif::{ProgressBar, ProgressStyle};
use listings_core::display::{DisplaySurface, ElementId, MediaCard, MemorySurface, SurfaceSnapshot};
use listings_core::media::{MediaType, Site};
use std::time::Duration;
use strum::IntoEnumIterator;

pub struct ProgressSurface {
    inner: MemorySurface,
    bar: Option<ProgressBar>,
}

pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ]),
    );
    pb.set_message("Waiting for sites...");
    pb
}

impl ProgressSurface {
    pub fn new(bar: Option<ProgressBar>) -> Self {
        Self {
            inner: MemorySurface::new(),
            bar,
        }
    }

    /// Stops the spinner and returns what was rendered.
    pub fn finish(self) -> SurfaceSnapshot {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        self.inner.snapshot()
    }

    fn refresh(&self) {
        let Some(bar) = &self.bar else {
            return;
        };
        let pending: Vec<&str> = Site::iter()
            .filter_map(|site| self.inner.site_status(site))
            .collect();
        if pending.is_empty() {
            bar.set_message("Finishing...");
        } else {
            bar.set_message(pending.join("  "));
        }
    }
}

impl DisplaySurface for ProgressSurface {
    type Element = ElementId;

    fn create_element(&mut self, media_type: MediaType, card: MediaCard) -> ElementId {
        self.inner.create_element(media_type, card)
    }

    fn insert_after(&mut self, media_type: MediaType, anchor: &ElementId, element: &ElementId) {
        self.inner.insert_after(media_type, anchor, element);
    }

    fn prepend(&mut self, media_type: MediaType, element: &ElementId) {
        self.inner.prepend(media_type, element);
    }

    fn append(&mut self, media_type: MediaType, element: &ElementId) {
        self.inner.append(media_type, element);
    }

    fn set_placeholder(&mut self, media_type: MediaType, text: Option<&str>) {
        self.inner.set_placeholder(media_type, text);
    }

    fn set_section_visible(&mut self, media_type: MediaType, visible: bool) {
        self.inner.set_section_visible(media_type, visible);
    }

    fn show_notification(&mut self, text: &str) {
        self.inner.show_notification(text);
        if let Some(bar) = &self.bar {
            bar.println(text);
        }
    }

    fn set_site_status(&mut self, site: Site, status: Option<&str>) {
        self.inner.set_site_status(site, status);
        self.refresh();
    }

    fn set_request_status_visible(&mut self, visible: bool) {
        self.inner.set_request_status_visible(visible);
    }

    fn set_footer_visible(&mut self, visible: bool) {
        self.inner.set_footer_visible(visible);
        if visible && let Some(bar) = &self.bar {
            bar.set_message("Done");
        }
    }
}
