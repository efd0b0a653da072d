use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use listings_core::media::MediaType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "multistream", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "MULTISTREAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Seconds to wait for all sources before printing what arrived
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every enabled site's feeds and print the merged listings
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,

        /// Only print these sections (streams, hosts, games, videos)
        #[arg(short, long = "section")]
        sections: Vec<MediaType>,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// List supported sites and their configuration
    Sites {
        /// Output format (table prints the same as pretty)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },

    /// Show or reset the configuration file
    Config {
        #[arg(long)]
        show: bool,

        #[arg(long, conflicts_with = "show")]
        reset: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
    JsonCompact,
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_sections() {
        let args = Args::parse_from([
            "multistream",
            "show",
            "-o",
            "json",
            "--section",
            "streams",
            "-s",
            "videos",
        ]);
        match args.command {
            Commands::Show {
                output, sections, ..
            } => {
                assert_eq!(output, OutputFormat::Json);
                assert_eq!(sections, vec![MediaType::Streams, MediaType::Videos]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_sites_output() {
        let args = Args::parse_from(["multistream", "sites", "-o", "json-compact"]);
        assert!(matches!(
            args.command,
            Commands::Sites {
                output: OutputFormat::JsonCompact
            }
        ));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["multistream", "-v", "-q", "sites"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
