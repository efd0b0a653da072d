use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Site;

/// The game a stream, host or video is tagged with.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameInfo {
    /// The site has no notion of games.
    Unsupported,
    /// The broadcaster did not pick a game.
    #[default]
    Unset,
    Known {
        name: String,
        #[serde(default)]
        link: String,
        #[serde(default)]
        image: String,
    },
}

impl GameInfo {
    pub fn known(name: impl Into<String>, link: impl Into<String>, image: impl Into<String>) -> Self {
        GameInfo::Known {
            name: name.into(),
            link: link.into(),
            image: image.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            GameInfo::Known { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A live stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    #[serde(default)]
    pub site: Site,
    pub channel_name: String,
    pub channel_link: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub view_count: u64,
    #[serde(default)]
    pub game: GameInfo,
}

impl Stream {
    /// Highest view count first.
    pub fn by_view_count_desc(a: &Stream, b: &Stream) -> Ordering {
        b.view_count.cmp(&a.view_count)
    }
}

/// A channel hosting another channel's stream. Only Twitch has hosts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub hoster_name: String,
    pub streamer_name: String,
    pub stream_link: String,
    pub stream_title: String,
    #[serde(default)]
    pub stream_thumbnail_url: String,
    pub view_count: u64,
    #[serde(default)]
    pub game: GameInfo,
}

/// A followed game. Only Twitch has followed games.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub name: String,
    pub game_link: String,
    #[serde(default)]
    pub game_image: String,
    pub view_count: u64,
    pub channel_count: u64,
}

/// A recorded video (past broadcast or upload).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Video {
    #[serde(default)]
    pub site: Site,
    pub channel_name: String,
    pub video_link: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub view_count: u64,
    #[serde(default)]
    pub duration: String,
    /// Seconds since the Unix epoch.
    pub unix_timestamp: i64,
    /// Preformatted date; derived from `unix_timestamp` when absent.
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub game: GameInfo,
}

impl Video {
    /// Latest first.
    pub fn by_timestamp_desc(a: &Video, b: &Video) -> Ordering {
        b.unix_timestamp.cmp(&a.unix_timestamp)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unix_timestamp, 0)
    }

    pub fn date_label(&self) -> String {
        if let Some(display) = &self.date_display {
            return display.clone();
        }
        self.published_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(ts: i64) -> Video {
        Video {
            site: Site::Twitch,
            channel_name: "chan".into(),
            video_link: "https://example.com/v".into(),
            title: "v".into(),
            description: String::new(),
            thumbnail_url: String::new(),
            view_count: 0,
            duration: "1:00".into(),
            unix_timestamp: ts,
            date_display: None,
            game: GameInfo::Unset,
        }
    }

    #[test]
    fn test_video_date_label_from_timestamp() {
        // 2024-01-01 12:00:00 UTC
        assert_eq!(video(1_704_110_400).date_label(), "2024-01-01 12:00");
    }

    #[test]
    fn test_video_date_label_prefers_display() {
        let mut v = video(0);
        v.date_display = Some("yesterday".into());
        assert_eq!(v.date_label(), "yesterday");
    }

    #[test]
    fn test_comparators_are_descending() {
        assert_eq!(
            Video::by_timestamp_desc(&video(10), &video(5)),
            Ordering::Less
        );
        assert_eq!(
            Video::by_timestamp_desc(&video(5), &video(5)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_deserialize_stream_defaults() {
        let stream: Stream = serde_json::from_str(
            r#"{"channel_name":"a","channel_link":"l","title":"t","view_count":3}"#,
        )
        .unwrap();
        assert_eq!(stream.site, Site::Twitch);
        assert_eq!(stream.game, GameInfo::Unset);
        assert!(stream.thumbnail_url.is_empty());
    }

    #[test]
    fn test_deserialize_game_info() {
        let game: GameInfo =
            serde_json::from_str(r#"{"kind":"known","name":"Chess","image":"img"}"#).unwrap();
        assert_eq!(game.name(), Some("Chess"));

        let game: GameInfo = serde_json::from_str(r#"{"kind":"unsupported"}"#).unwrap();
        assert_eq!(game, GameInfo::Unsupported);
    }
}
