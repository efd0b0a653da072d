use serde::{Deserialize, Serialize};

use super::MediaType;

/// A streaming site that can contribute listings.
///
/// The order of the variants is the order sites are started in and the
/// order their status lines are shown in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Site {
    #[default]
    Twitch,
    Hitbox,
    Nico,
}

impl Site {
    /// Lowercase identifier, used for config keys and site indicators.
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Twitch => "twitch",
            Site::Hitbox => "hitbox",
            Site::Nico => "nico",
        }
    }

    /// Media categories this site can fill.
    pub fn media_types(&self) -> &'static [MediaType] {
        match self {
            Site::Twitch => &[
                MediaType::Streams,
                MediaType::Hosts,
                MediaType::Games,
                MediaType::Videos,
            ],
            Site::Hitbox => &[MediaType::Streams, MediaType::Videos],
            Site::Nico => &[MediaType::Streams],
        }
    }

    pub fn provides(&self, media_type: MediaType) -> bool {
        self.media_types().contains(&media_type)
    }
}
