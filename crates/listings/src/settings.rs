//! User preferences the listings core reads but never writes.

use serde::{Deserialize, Serialize};

use crate::media::Site;

/// How the game of a stream, host or video is shown on its card.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameDisplay {
    /// Don't show the game.
    None,
    /// Box art of the game.
    #[default]
    BoxImage,
    /// Game name as text.
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub twitch_enabled: bool,
    pub hitbox_enabled: bool,
    pub nico_enabled: bool,
    pub game_display: GameDisplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            twitch_enabled: true,
            hitbox_enabled: true,
            nico_enabled: true,
            game_display: GameDisplay::default(),
        }
    }
}

impl Settings {
    pub fn is_enabled(&self, site: Site) -> bool {
        match site {
            Site::Twitch => self.twitch_enabled,
            Site::Hitbox => self.hitbox_enabled,
            Site::Nico => self.nico_enabled,
        }
    }

    pub fn set_enabled(&mut self, site: Site, enabled: bool) {
        match site {
            Site::Twitch => self.twitch_enabled = enabled,
            Site::Hitbox => self.hitbox_enabled = enabled,
            Site::Nico => self.nico_enabled = enabled,
        }
    }

    /// Settings with only the given sites enabled.
    pub fn only(sites: &[Site]) -> Self {
        let mut settings = Self {
            twitch_enabled: false,
            hitbox_enabled: false,
            nico_enabled: false,
            ..Self::default()
        };
        for site in sites {
            settings.set_enabled(*site, true);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enables_listed_sites() {
        let settings = Settings::only(&[Site::Hitbox]);
        assert!(settings.is_enabled(Site::Hitbox));
        assert!(!settings.is_enabled(Site::Twitch));
        assert!(!settings.is_enabled(Site::Nico));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"nico_enabled":false,"game_display":"name"}"#).unwrap();
        assert!(settings.twitch_enabled);
        assert!(!settings.nico_enabled);
        assert_eq!(settings.game_display, GameDisplay::Name);
    }
}
