//! Registry of site collaborators.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::SiteCollaborator;
use crate::media::Site;
use crate::settings::Settings;

/// At most one collaborator per [`Site`], iterated in site order.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: BTreeMap<Site, Arc<dyn SiteCollaborator>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collaborator, replacing any previous one for the same site.
    pub fn register(&mut self, source: Arc<dyn SiteCollaborator>) -> &mut Self {
        let site = source.site();
        if self.sources.insert(site, source).is_some() {
            debug!(%site, "Replaced collaborator");
        }
        self
    }

    pub fn get(&self, site: Site) -> Option<Arc<dyn SiteCollaborator>> {
        self.sources.get(&site).cloned()
    }

    /// Collaborators whose site is enabled in `settings`.
    pub fn enabled<'a>(
        &'a self,
        settings: &'a Settings,
    ) -> impl Iterator<Item = &'a Arc<dyn SiteCollaborator>> + 'a {
        self.sources
            .iter()
            .filter(|(site, _)| settings.is_enabled(**site))
            .map(|(_, source)| source)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sites", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}
