use crate::error::{AppError, Result};
use listings_core::Settings;
use listings_core::media::Site;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Feed locations for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// http(s) URLs or local paths of JSON feed documents.
    pub feeds: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub twitch: SiteConfig,
    pub hitbox: SiteConfig,
    pub nico: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds to wait for all sources.
    pub timeout_secs: u64,
    pub colored: bool,
    pub user_agent: Option<String>,
    pub settings: Settings,
    pub sites: SitesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            colored: true,
            user_agent: None,
            settings: Settings::default(),
            sites: SitesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("multistream").join("config.toml"))
    }

    fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path().ok_or(AppError::NoConfigDir),
        }
    }

    /// Loads the config file, falling back to defaults when it doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.show()?)?;
        Ok(path)
    }

    /// Overwrites the config file with defaults.
    pub fn reset(path: Option<&Path>) -> Result<PathBuf> {
        Self::default().save(path)
    }

    pub fn show(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn site(&self, site: Site) -> &SiteConfig {
        match site {
            Site::Twitch => &self.sites.twitch,
            Site::Hitbox => &self.sites.hitbox,
            Site::Nico => &self.sites.nico,
        }
    }
}
