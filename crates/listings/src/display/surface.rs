use crate::display::MediaCard;
use crate::media::{MediaType, Site};

/// Where rendered listings end up.
///
/// Every section holds elements in display order. The coordinator decides
/// the position of each element; the surface only places it.
pub trait DisplaySurface {
    /// Handle to an element that has been created on this surface.
    type Element: Clone;

    fn create_element(&mut self, media_type: MediaType, card: MediaCard) -> Self::Element;

    fn insert_after(
        &mut self,
        media_type: MediaType,
        anchor: &Self::Element,
        element: &Self::Element,
    );

    fn prepend(&mut self, media_type: MediaType, element: &Self::Element);

    fn append(&mut self, media_type: MediaType, element: &Self::Element);

    /// Sets the text shown while a section is empty; `None` removes it.
    fn set_placeholder(&mut self, media_type: MediaType, text: Option<&str>);

    fn set_section_visible(&mut self, media_type: MediaType, visible: bool);

    fn show_notification(&mut self, text: &str);

    /// Sets a site's request status line; `None` hides it.
    fn set_site_status(&mut self, site: Site, status: Option<&str>);

    fn set_request_status_visible(&mut self, visible: bool);

    fn set_footer_visible(&mut self, visible: bool);
}
