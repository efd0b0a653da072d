use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::warn;

use super::{DisplaySurface, MediaCard};
use crate::media::{MediaType, Site};

/// Handle to a card stored in a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(usize);

#[derive(Debug, Default)]
struct Section {
    visible: bool,
    placeholder: Option<String>,
    placeholder_history: Vec<Option<String>>,
    order: Vec<ElementId>,
}

/// A display surface that keeps everything in memory.
///
/// Used by the CLI to collect a session before printing it, and by tests to
/// observe what the coordinator did.
#[derive(Debug, Default)]
pub struct MemorySurface {
    cards: Vec<MediaCard>,
    sections: FxHashMap<MediaType, Section>,
    notification: Option<String>,
    site_status: BTreeMap<Site, String>,
    request_status_visible: bool,
    footer_visible: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct SectionSnapshot {
    pub media_type: MediaType,
    pub title: &'static str,
    pub visible: bool,
    pub placeholder: Option<String>,
    pub cards: Vec<MediaCard>,
}

/// Owned, serializable view of a [`MemorySurface`].
#[derive(Serialize, Debug, Clone)]
pub struct SurfaceSnapshot {
    pub sections: Vec<SectionSnapshot>,
    pub notification: Option<String>,
    pub site_status: BTreeMap<Site, String>,
    pub request_status_visible: bool,
    pub footer_visible: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn section_mut(&mut self, media_type: MediaType) -> &mut Section {
        self.sections.entry(media_type).or_default()
    }

    pub fn card(&self, id: ElementId) -> Option<&MediaCard> {
        self.cards.get(id.0)
    }

    /// Element handles of a section in display order.
    pub fn section_order(&self, media_type: MediaType) -> &[ElementId] {
        self.sections
            .get(&media_type)
            .map(|s| s.order.as_slice())
            .unwrap_or_default()
    }

    /// Cards of a section in display order.
    pub fn section_cards(&self, media_type: MediaType) -> Vec<&MediaCard> {
        self.section_order(media_type)
            .iter()
            .filter_map(|id| self.card(*id))
            .collect()
    }

    pub fn is_section_visible(&self, media_type: MediaType) -> bool {
        self.sections.get(&media_type).is_some_and(|s| s.visible)
    }

    pub fn placeholder(&self, media_type: MediaType) -> Option<&str> {
        self.sections
            .get(&media_type)
            .and_then(|s| s.placeholder.as_deref())
    }

    /// Every placeholder change of a section, oldest first.
    pub fn placeholder_history(&self, media_type: MediaType) -> &[Option<String>] {
        self.sections
            .get(&media_type)
            .map(|s| s.placeholder_history.as_slice())
            .unwrap_or_default()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn site_status(&self, site: Site) -> Option<&str> {
        self.site_status.get(&site).map(String::as_str)
    }

    pub fn request_status_visible(&self) -> bool {
        self.request_status_visible
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let sections = MediaType::iter()
            .map(|media_type| SectionSnapshot {
                media_type,
                title: media_type.title(),
                visible: self.is_section_visible(media_type),
                placeholder: self.placeholder(media_type).map(str::to_string),
                cards: self
                    .section_cards(media_type)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        SurfaceSnapshot {
            sections,
            notification: self.notification.clone(),
            site_status: self.site_status.clone(),
            request_status_visible: self.request_status_visible,
            footer_visible: self.footer_visible,
        }
    }
}

impl DisplaySurface for MemorySurface {
    type Element = ElementId;

    fn create_element(&mut self, _media_type: MediaType, card: MediaCard) -> ElementId {
        self.cards.push(card);
        ElementId(self.cards.len() - 1)
    }

    fn insert_after(&mut self, media_type: MediaType, anchor: &ElementId, element: &ElementId) {
        let section = self.section_mut(media_type);
        match section.order.iter().position(|id| id == anchor) {
            Some(index) => section.order.insert(index + 1, *element),
            None => {
                warn!(%media_type, ?anchor, "Anchor element not in section; appending");
                section.order.push(*element);
            }
        }
    }

    fn prepend(&mut self, media_type: MediaType, element: &ElementId) {
        self.section_mut(media_type).order.insert(0, *element);
    }

    fn append(&mut self, media_type: MediaType, element: &ElementId) {
        self.section_mut(media_type).order.push(*element);
    }

    fn set_placeholder(&mut self, media_type: MediaType, text: Option<&str>) {
        let section = self.section_mut(media_type);
        section.placeholder = text.map(str::to_string);
        section.placeholder_history.push(section.placeholder.clone());
    }

    fn set_section_visible(&mut self, media_type: MediaType, visible: bool) {
        self.section_mut(media_type).visible = visible;
    }

    fn show_notification(&mut self, text: &str) {
        self.notification = Some(text.to_string());
    }

    fn set_site_status(&mut self, site: Site, status: Option<&str>) {
        match status {
            Some(text) => {
                self.site_status.insert(site, text.to_string());
            }
            None => {
                self.site_status.remove(&site);
            }
        }
    }

    fn set_request_status_visible(&mut self, visible: bool) {
        self.request_status_visible = visible;
    }

    fn set_footer_visible(&mut self, visible: bool) {
        self.footer_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CardFooter;

    fn card(headline: &str) -> MediaCard {
        MediaCard {
            link: String::new(),
            tooltip: String::new(),
            thumbnail_url: String::new(),
            thumbnail_tag: None,
            overlays: Vec::new(),
            headline: headline.to_string(),
            minor_text: None,
            game: None,
            footer: CardFooter {
                leading: String::new(),
                site: Site::Twitch,
                trailing: String::new(),
            },
        }
    }

    fn headlines(surface: &MemorySurface, media_type: MediaType) -> Vec<String> {
        surface
            .section_cards(media_type)
            .into_iter()
            .map(|c| c.headline.clone())
            .collect()
    }

    #[test]
    fn test_placement() {
        let mut surface = MemorySurface::new();
        let a = surface.create_element(MediaType::Streams, card("a"));
        let b = surface.create_element(MediaType::Streams, card("b"));
        let c = surface.create_element(MediaType::Streams, card("c"));

        surface.append(MediaType::Streams, &a);
        surface.prepend(MediaType::Streams, &b);
        surface.insert_after(MediaType::Streams, &b, &c);

        assert_eq!(headlines(&surface, MediaType::Streams), vec!["b", "c", "a"]);
        assert!(surface.section_cards(MediaType::Videos).is_empty());
    }

    #[test]
    fn test_placeholder_history() {
        let mut surface = MemorySurface::new();
        surface.set_placeholder(MediaType::Games, Some("Waiting..."));
        surface.set_placeholder(MediaType::Games, None);

        assert_eq!(surface.placeholder(MediaType::Games), None);
        assert_eq!(
            surface.placeholder_history(MediaType::Games),
            &[Some("Waiting...".to_string()), None]
        );
    }

    #[test]
    fn test_site_status_lines() {
        let mut surface = MemorySurface::new();
        surface.set_site_status(Site::Nico, Some("Nico: 1 of 2"));
        assert_eq!(surface.site_status(Site::Nico), Some("Nico: 1 of 2"));
        surface.set_site_status(Site::Nico, None);
        assert_eq!(surface.site_status(Site::Nico), None);
    }

    #[test]
    fn test_snapshot_lists_every_section() {
        let mut surface = MemorySurface::new();
        surface.set_section_visible(MediaType::Videos, true);
        let snapshot = surface.snapshot();
        assert_eq!(snapshot.sections.len(), 4);
        assert!(snapshot.sections[3].visible);
        assert_eq!(snapshot.sections[3].title, "Videos");
    }
}
