use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::Site;

/// A listing category. Each category is rendered as its own section.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaType {
    Streams,
    Hosts,
    Games,
    Videos,
}

impl MediaType {
    /// Section title, e.g. `Streams`.
    pub fn title(&self) -> &'static str {
        match self {
            MediaType::Streams => "Streams",
            MediaType::Hosts => "Hosts",
            MediaType::Games => "Followed games",
            MediaType::Videos => "Videos",
        }
    }

    /// Placeholder shown once every contributing site has finished and the
    /// section is still empty.
    pub fn empty_text(&self) -> String {
        format!("No {self} found")
    }

    /// Every site able to contribute to this category, enabled or not.
    pub fn sites(&self) -> impl Iterator<Item = Site> + '_ {
        Site::iter().filter(move |site| site.provides(*self))
    }
}
