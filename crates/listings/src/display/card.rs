//! Mapping from media items to the cards a surface renders.

use serde::Serialize;

use crate::media::{Game, GameInfo, Host, Site, Stream, Video};
use crate::settings::GameDisplay;

/// How a card shows the game being played.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameBadge {
    Image {
        name: String,
        link: String,
        image: String,
    },
    Name {
        text: String,
    },
}

/// Bottom line of a card: two text spans around a site indicator.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CardFooter {
    pub leading: String,
    pub site: Site,
    pub trailing: String,
}

/// Display payload for one listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MediaCard {
    pub link: String,
    pub tooltip: String,
    pub thumbnail_url: String,
    /// Styling hint for the thumbnail, such as `twitch-stream`.
    pub thumbnail_tag: Option<&'static str>,
    /// Text laid over the thumbnail (view count, duration).
    pub overlays: Vec<String>,
    pub headline: String,
    pub minor_text: Option<String>,
    pub game: Option<GameBadge>,
    pub footer: CardFooter,
}

pub trait ToCard {
    fn to_card(&self, game_display: GameDisplay) -> MediaCard;
}

fn game_badge(game: &GameInfo, game_display: GameDisplay) -> Option<GameBadge> {
    match (game_display, game) {
        (_, GameInfo::Unsupported) | (GameDisplay::None, _) => None,
        (GameDisplay::BoxImage, GameInfo::Known { name, link, image }) => Some(GameBadge::Image {
            name: name.clone(),
            link: link.clone(),
            image: image.clone(),
        }),
        (GameDisplay::BoxImage, GameInfo::Unset) => None,
        (GameDisplay::Name, GameInfo::Known { name, .. }) => Some(GameBadge::Name {
            text: name.clone(),
        }),
        (GameDisplay::Name, GameInfo::Unset) => Some(GameBadge::Name {
            text: "No game selected".to_string(),
        }),
    }
}

impl ToCard for Stream {
    fn to_card(&self, game_display: GameDisplay) -> MediaCard {
        let thumbnail_tag = match self.site {
            Site::Twitch => Some("twitch-stream"),
            Site::Nico => Some("nico-stream"),
            Site::Hitbox => None,
        };
        MediaCard {
            link: self.channel_link.clone(),
            tooltip: self.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            thumbnail_tag,
            overlays: Vec::new(),
            headline: self.title.clone(),
            minor_text: None,
            game: game_badge(&self.game, game_display),
            footer: CardFooter {
                leading: self.view_count.to_string(),
                site: self.site,
                trailing: self.channel_name.clone(),
            },
        }
    }
}

impl ToCard for Host {
    fn to_card(&self, game_display: GameDisplay) -> MediaCard {
        MediaCard {
            link: self.stream_link.clone(),
            tooltip: self.stream_title.clone(),
            thumbnail_url: self.stream_thumbnail_url.clone(),
            thumbnail_tag: Some("twitch-stream"),
            overlays: Vec::new(),
            headline: format!("{} hosting {}", self.hoster_name, self.streamer_name),
            minor_text: Some(self.stream_title.clone()),
            game: game_badge(&self.game, game_display),
            footer: CardFooter {
                leading: self.view_count.to_string(),
                site: Site::Twitch,
                trailing: self.streamer_name.clone(),
            },
        }
    }
}

impl ToCard for Game {
    fn to_card(&self, _game_display: GameDisplay) -> MediaCard {
        let channel_word = if self.channel_count == 1 {
            "channel"
        } else {
            "channels"
        };
        MediaCard {
            link: self.game_link.clone(),
            tooltip: self.name.clone(),
            thumbnail_url: self.game_image.clone(),
            thumbnail_tag: Some("followed-game"),
            overlays: Vec::new(),
            headline: self.name.clone(),
            minor_text: None,
            game: None,
            footer: CardFooter {
                leading: self.view_count.to_string(),
                site: Site::Twitch,
                trailing: format!("{} {}", self.channel_count, channel_word),
            },
        }
    }
}

impl ToCard for Video {
    fn to_card(&self, game_display: GameDisplay) -> MediaCard {
        let thumbnail_tag = match self.site {
            Site::Twitch => Some("twitch-video"),
            _ => None,
        };
        MediaCard {
            link: self.video_link.clone(),
            tooltip: self.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            thumbnail_tag,
            overlays: vec![self.view_count.to_string(), self.duration.clone()],
            headline: self.title.clone(),
            minor_text: Some(self.description.clone()),
            game: game_badge(&self.game, game_display),
            footer: CardFooter {
                leading: self.channel_name.clone(),
                site: self.site,
                trailing: self.date_label(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(site: Site, game: GameInfo) -> Stream {
        Stream {
            site,
            channel_name: "speedy".into(),
            channel_link: "https://twitch.tv/speedy".into(),
            title: "Any% run".into(),
            thumbnail_url: "thumb.jpg".into(),
            view_count: 1234,
            game,
        }
    }

    #[test]
    fn test_stream_card() {
        let card = stream(Site::Nico, GameInfo::Unset).to_card(GameDisplay::BoxImage);
        assert_eq!(card.link, "https://twitch.tv/speedy");
        assert_eq!(card.headline, "Any% run");
        assert_eq!(card.thumbnail_tag, Some("nico-stream"));
        assert_eq!(card.footer.leading, "1234");
        assert_eq!(card.footer.site, Site::Nico);
        assert_eq!(card.footer.trailing, "speedy");
        assert_eq!(card.game, None);
    }

    #[test]
    fn test_game_badge_modes() {
        let known = GameInfo::known("Chess", "https://g/chess", "chess.png");

        let card = stream(Site::Twitch, known.clone()).to_card(GameDisplay::BoxImage);
        assert_eq!(
            card.game,
            Some(GameBadge::Image {
                name: "Chess".into(),
                link: "https://g/chess".into(),
                image: "chess.png".into(),
            })
        );

        let card = stream(Site::Twitch, known.clone()).to_card(GameDisplay::Name);
        assert_eq!(card.game, Some(GameBadge::Name { text: "Chess".into() }));

        let card = stream(Site::Twitch, known).to_card(GameDisplay::None);
        assert_eq!(card.game, None);

        let card = stream(Site::Twitch, GameInfo::Unset).to_card(GameDisplay::Name);
        assert_eq!(
            card.game,
            Some(GameBadge::Name {
                text: "No game selected".into()
            })
        );
    }

    #[test]
    fn test_unsupported_game_never_shown() {
        for mode in [GameDisplay::BoxImage, GameDisplay::Name, GameDisplay::None] {
            let card = stream(Site::Hitbox, GameInfo::Unsupported).to_card(mode);
            assert_eq!(card.game, None);
        }
    }

    #[test]
    fn test_host_card() {
        let host = Host {
            hoster_name: "alice".into(),
            streamer_name: "bob".into(),
            stream_link: "https://twitch.tv/bob".into(),
            stream_title: "bob plays".into(),
            stream_thumbnail_url: String::new(),
            view_count: 7,
            game: GameInfo::Unset,
        };
        let card = host.to_card(GameDisplay::None);
        assert_eq!(card.headline, "alice hosting bob");
        assert_eq!(card.minor_text.as_deref(), Some("bob plays"));
        assert_eq!(card.footer.trailing, "bob");
    }

    #[test]
    fn test_game_card_channel_word() {
        let mut game = Game {
            name: "Chess".into(),
            game_link: "https://g/chess".into(),
            game_image: "chess.png".into(),
            view_count: 10,
            channel_count: 1,
        };
        assert_eq!(game.to_card(GameDisplay::Name).footer.trailing, "1 channel");
        game.channel_count = 3;
        assert_eq!(game.to_card(GameDisplay::Name).footer.trailing, "3 channels");
    }

    #[test]
    fn test_video_card_overlays() {
        let video = Video {
            site: Site::Hitbox,
            channel_name: "carol".into(),
            video_link: "https://hitbox.tv/v/1".into(),
            title: "Highlights".into(),
            description: "best bits".into(),
            thumbnail_url: String::new(),
            view_count: 42,
            duration: "10:00".into(),
            unix_timestamp: 0,
            date_display: Some("Jan 1".into()),
            game: GameInfo::Unsupported,
        };
        let card = video.to_card(GameDisplay::BoxImage);
        assert_eq!(card.overlays, vec!["42".to_string(), "10:00".to_string()]);
        assert_eq!(card.thumbnail_tag, None);
        assert_eq!(card.footer.trailing, "Jan 1");
    }
}
