use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{OutputManager, SiteRow, write_output};
use crate::progress::{ProgressSurface, spinner};
use listings_core::RenderCoordinator;
use listings_core::media::{MediaType, Site};
use listings_core::source::{FeedSource, SourceRegistry};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("multistream/", env!("CARGO_PKG_VERSION"));

pub struct CommandExecutor {
    config: AppConfig,
    output: OutputManager,
    /// Session deadline; also bounds each feed request.
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(config: AppConfig, colored: bool, timeout: Duration) -> Self {
        Self {
            config,
            output: OutputManager::new(colored),
            timeout,
        }
    }

    fn build_client(&self) -> Result<Client> {
        let user_agent = self.config.user_agent.as_deref().unwrap_or(USER_AGENT);
        Ok(Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()?)
    }

    /// One feed source per site, enabled or not; the coordinator only starts
    /// the enabled ones.
    pub fn build_registry(&self, client: Client) -> Result<SourceRegistry> {
        let mut registry = SourceRegistry::new();
        for site in Site::iter() {
            let feeds = &self.config.site(site).feeds;
            if feeds.is_empty() && self.config.settings.is_enabled(site) {
                warn!(%site, "Site enabled but has no feeds configured");
            }
            let source = FeedSource::from_strs(site, client.clone(), feeds.as_slice())?;
            debug!(%site, feeds = source.locations().len(), "Registered feed source");
            registry.register(Arc::new(source));
        }
        Ok(registry)
    }

    pub async fn show(
        &self,
        format: OutputFormat,
        sections: &[MediaType],
        output_file: Option<&Path>,
    ) -> Result<()> {
        let registry = self.build_registry(self.build_client()?)?;
        self.run_session(registry, format, sections, output_file).await
    }

    /// Runs one session over `registry` and prints it. Sources that have not
    /// finished by the deadline are listed as pending.
    async fn run_session(
        &self,
        registry: SourceRegistry,
        format: OutputFormat,
        sections: &[MediaType],
        output_file: Option<&Path>,
    ) -> Result<()> {
        let bar = matches!(format, OutputFormat::Pretty).then(spinner);
        let surface = ProgressSurface::new(bar);

        let mut coordinator =
            RenderCoordinator::new(self.config.settings.clone(), registry, surface);
        coordinator.init();

        if tokio::time::timeout(self.timeout, coordinator.run())
            .await
            .is_err()
        {
            warn!(
                timeout_secs = self.timeout.as_secs(),
                "Timed out waiting for sources; showing what arrived"
            );
        }

        let snapshot = coordinator.into_surface().finish();
        info!(
            sections = snapshot.sections.iter().filter(|s| s.visible).count(),
            "Session finished"
        );

        let content = self.output.format_snapshot(&snapshot, &format, sections)?;
        write_output(&content, output_file)
    }

    pub fn list_sites(&self, format: &OutputFormat) -> Result<()> {
        let rows: Vec<SiteRow> = Site::iter()
            .map(|site| SiteRow {
                site,
                enabled: self.config.settings.is_enabled(site),
                media_types: site.media_types().to_vec(),
                feeds: self.config.site(site).feeds.len(),
            })
            .collect();
        let content = self.output.format_sites(&rows, format)?;
        write_output(&content, None)
    }
}
