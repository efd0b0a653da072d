use crate::{cli::OutputFormat, error::Result};
#[cfg(feature = "colored-output")]
use colored::*;
use listings_core::display::{GameBadge, MediaCard, SectionSnapshot, SurfaceSnapshot};
use listings_core::media::{MediaType, Site};
use serde::Serialize;
use std::io::Write;
#[cfg(feature = "table-output")]
use tabled::{Table, Tabled, settings::Style};

/// One row of the `sites` listing.
#[derive(Debug, Clone, Serialize)]
pub struct SiteRow {
    pub site: Site,
    pub enabled: bool,
    pub media_types: Vec<MediaType>,
    pub feeds: usize,
}

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Renders the visible sections of a finished session. An empty
    /// `sections` filter keeps every section.
    pub fn format_snapshot(
        &self,
        snapshot: &SurfaceSnapshot,
        format: &OutputFormat,
        sections: &[MediaType],
    ) -> Result<String> {
        let selected: Vec<&SectionSnapshot> = snapshot
            .sections
            .iter()
            .filter(|s| s.visible)
            .filter(|s| sections.is_empty() || sections.contains(&s.media_type))
            .collect();

        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(snapshot, &selected)),
            OutputFormat::Json => self.format_json(snapshot, &selected, true),
            OutputFormat::JsonCompact => self.format_json(snapshot, &selected, false),
            #[cfg(feature = "table-output")]
            OutputFormat::Table => Ok(self.format_table(&selected)),
            #[cfg(not(feature = "table-output"))]
            OutputFormat::Table => {
                // Fallback to pretty format when table feature is disabled
                Ok(self.format_pretty(snapshot, &selected))
            }
        }
    }

    fn format_pretty(&self, snapshot: &SurfaceSnapshot, sections: &[&SectionSnapshot]) -> String {
        let mut output = String::new();

        if let Some(notification) = &snapshot.notification {
            output.push_str(&self.colorize(notification, &Color::Yellow, true));
            output.push_str("\n\n");
        }

        for section in sections {
            output.push_str(&self.colorize(section.title, &Color::Green, true));
            output.push('\n');

            if let Some(placeholder) = &section.placeholder {
                output.push_str(&format!("  {placeholder}\n"));
            }

            for card in &section.cards {
                self.push_card(&mut output, card);
            }
            output.push('\n');
        }

        if !snapshot.site_status.is_empty() {
            output.push_str(&self.colorize("Still waiting on:", &Color::Yellow, false));
            output.push('\n');
            for status in snapshot.site_status.values() {
                output.push_str(&format!("  {status}\n"));
            }
        }
        output
    }

    fn push_card(&self, output: &mut String, card: &MediaCard) {
        output.push_str(&format!(
            "  {}\n",
            self.colorize(&card.headline, &Color::Cyan, false)
        ));

        if let Some(minor) = card.minor_text.as_deref().filter(|m| !m.is_empty()) {
            output.push_str(&format!("    {minor}\n"));
        }

        if !card.overlays.is_empty() {
            output.push_str(&format!("    {}\n", card.overlays.join(" | ")));
        }

        match &card.game {
            Some(GameBadge::Name { text }) => {
                output.push_str(&format!(
                    "    {}: {}\n",
                    self.colorize("Game", &Color::Yellow, false),
                    text
                ));
            }
            Some(GameBadge::Image { name, image, .. }) => {
                output.push_str(&format!(
                    "    {}: {} ({})\n",
                    self.colorize("Game", &Color::Yellow, false),
                    name,
                    self.colorize(image, &Color::Blue, false)
                ));
            }
            None => {}
        }

        output.push_str(&format!(
            "    {} [{}] {}\n",
            card.footer.leading,
            self.colorize(card.footer.site.as_str(), &Color::Yellow, false),
            card.footer.trailing
        ));
        output.push_str(&format!(
            "    {}\n",
            self.colorize(&card.link, &Color::Blue, false)
        ));
    }

    fn format_json(
        &self,
        snapshot: &SurfaceSnapshot,
        sections: &[&SectionSnapshot],
        pretty: bool,
    ) -> Result<String> {
        let value = serde_json::json!({
            "status": "ok",
            "notification": snapshot.notification,
            "pending": snapshot.site_status,
            "sections": sections,
        });
        if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .map_err(Into::into)
    }

    #[cfg(feature = "table-output")]
    fn format_table(&self, sections: &[&SectionSnapshot]) -> String {
        #[derive(Tabled)]
        struct CardRow<'a> {
            section: &'a str,
            title: &'a str,
            site: &'a str,
            info: &'a str,
            channel: &'a str,
            game: &'a str,
            link: &'a str,
        }

        let rows: Vec<CardRow> = sections
            .iter()
            .flat_map(|section| {
                section.cards.iter().map(move |card| CardRow {
                    section: section.title,
                    title: &card.headline,
                    site: card.footer.site.as_str(),
                    info: &card.footer.leading,
                    channel: &card.footer.trailing,
                    game: match &card.game {
                        Some(GameBadge::Name { text }) => text.as_str(),
                        Some(GameBadge::Image { name, .. }) => name.as_str(),
                        None => "",
                    },
                    link: &card.link,
                })
            })
            .collect();

        Table::new(rows).with(Style::modern()).to_string()
    }

    pub fn format_sites(&self, rows: &[SiteRow], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::JsonCompact => Ok(serde_json::to_string(rows)?),
            _ => {
                let mut output = String::new();
                output.push_str(&self.colorize("Supported sites:", &Color::Green, true));
                output.push('\n');
                for row in rows {
                    let state = if row.enabled { "enabled" } else { "disabled" };
                    let media: Vec<String> = row.media_types.iter().map(|m| m.to_string()).collect();
                    output.push_str(&format!(
                        "  {:<8} {:<9} feeds: {:<3} provides: {}\n",
                        self.colorize(&row.site.to_string(), &Color::Cyan, false),
                        state,
                        row.feeds,
                        media.join(", ")
                    ));
                }
                Ok(output)
            }
        }
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Blue => text.blue(),
                    Color::Cyan => text.cyan(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (color, bold, self.colored);
            text.to_string()
        }
    }
}

enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listings_core::display::{DisplaySurface, MemorySurface, ToCard};
    use listings_core::media::{GameInfo, Stream};
    use listings_core::settings::GameDisplay;

    fn snapshot() -> SurfaceSnapshot {
        let mut surface = MemorySurface::new();
        let stream = Stream {
            site: Site::Hitbox,
            channel_name: "carol".into(),
            channel_link: "https://hitbox.tv/carol".into(),
            title: "Speedrun".into(),
            thumbnail_url: String::new(),
            view_count: 77,
            game: GameInfo::known("Tetris", "", "tetris.png"),
        };
        let element =
            surface.create_element(MediaType::Streams, stream.to_card(GameDisplay::Name));
        surface.append(MediaType::Streams, &element);
        surface.set_section_visible(MediaType::Streams, true);
        surface.set_section_visible(MediaType::Videos, true);
        surface.set_placeholder(MediaType::Videos, Some("No videos found"));
        surface.snapshot()
    }

    #[test]
    fn test_pretty_output() {
        let output = OutputManager::new(false)
            .format_snapshot(&snapshot(), &OutputFormat::Pretty, &[])
            .unwrap();
        assert!(output.contains("Streams\n"));
        assert!(output.contains("  Speedrun\n"));
        assert!(output.contains("Game: Tetris"));
        assert!(output.contains("77 [hitbox] carol"));
        assert!(output.contains("  No videos found\n"));
        assert!(!output.contains("Hosts"));
    }

    #[test]
    fn test_section_filter() {
        let output = OutputManager::new(false)
            .format_snapshot(&snapshot(), &OutputFormat::Pretty, &[MediaType::Videos])
            .unwrap();
        assert!(!output.contains("Speedrun"));
        assert!(output.contains("No videos found"));
    }

    #[test]
    fn test_json_output() {
        let output = OutputManager::new(false)
            .format_snapshot(&snapshot(), &OutputFormat::JsonCompact, &[])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["sections"][0]["media_type"], "streams");
        assert_eq!(value["sections"][0]["cards"][0]["footer"]["site"], "hitbox");
        assert_eq!(value["sections"][1]["placeholder"], "No videos found");
    }

    #[test]
    fn test_sites_output() {
        let rows = vec![SiteRow {
            site: Site::Nico,
            enabled: false,
            media_types: vec![MediaType::Streams],
            feeds: 0,
        }];
        let output = OutputManager::new(false)
            .format_sites(&rows, &OutputFormat::Pretty)
            .unwrap();
        assert!(output.contains("Nico"));
        assert!(output.contains("disabled"));
        assert!(output.contains("provides: streams"));

        let json = OutputManager::new(false)
            .format_sites(&rows, &OutputFormat::JsonCompact)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["site"], "nico");
        assert_eq!(value[0]["enabled"], false);
        assert_eq!(value[0]["media_types"][0], "streams");
    }
}
