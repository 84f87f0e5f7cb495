use crate::buffer::Region;
use crate::time_range::Notation;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bluebill - text utilities for notes: time ranges, TODO items, dates and links
#[derive(Debug, Parser)]
#[command(name = "bluebill")]
#[command(about = "Text utilities for notes: time ranges, TODO items, dates and links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive time-range mode)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a time-range line and print it followed by its summary
    #[command(alias = "t")]
    Time {
        /// The line to parse, e.g. "T: 0645 - 0730, 0815 - 1200"
        #[arg(required = true)]
        line: String,

        /// Token notation (standard or military); defaults to the configured one
        #[arg(long, short)]
        notation: Option<Notation>,
    },

    /// Run an editor command over text read from stdin and print the result
    Run {
        /// Command name, see `bluebill commands`
        #[arg(required = true)]
        command: String,

        /// Selection as ANCHOR:CARET byte offsets, or a single offset for a cursor
        #[arg(long = "select", value_parser = parse_region)]
        selections: Vec<Region>,

        /// Select a whole line (1-based)
        #[arg(long = "line")]
        lines: Vec<usize>,
    },

    /// List the available editor commands
    #[command(alias = "list")]
    Commands,

    /// Suggest a date based file name such as "2025-06-20 [2ec7].md"
    SuggestName {
        /// File extension including the dot; defaults to the configured one
        #[arg(long)]
        extension: Option<String>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Show configuration
    #[command(aliases = ["list", "get"])]
    Show {
        /// Key to show (all keys when omitted)
        key: Option<String>,
    },

    /// Set configuration value
    Set {
        /// Configuration key
        #[arg(required = true)]
        key: String,

        /// Configuration value
        #[arg(required = true)]
        value: String,
    },

    /// Print the config file location
    Path,
}

/// Parse `A:B` into a region, or `A` into a cursor.
pub fn parse_region(s: &str) -> Result<Region, String> {
    let offset = |part: &str| {
        part.trim().parse::<usize>().map_err(|e| format!("invalid offset '{}': {}", part, e))
    };
    match s.split_once(':') {
        Some((a, b)) => Ok(Region::new(offset(a)?, offset(b)?)),
        None => Ok(Region::cursor(offset(s)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("3:9").unwrap(), Region::new(3, 9));
        assert_eq!(parse_region("9:3").unwrap(), Region::new(9, 3));
        assert_eq!(parse_region("4").unwrap(), Region::cursor(4));
        assert!(parse_region("a:3").is_err());
        assert!(parse_region("").is_err());
    }

    #[test]
    fn test_cli_parses_time_command() {
        let cli = Cli::try_parse_from(["bluebill", "time", "T: 1pm - 230pm", "--notation", "standard"])
            .unwrap();
        match cli.command {
            Some(Commands::Time { line, notation }) => {
                assert_eq!(line, "T: 1pm - 230pm");
                assert_eq!(notation, Some(Notation::Standard));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_run_command() {
        let cli = Cli::try_parse_from([
            "bluebill",
            "run",
            "create_todo",
            "--select",
            "0:4",
            "--line",
            "3",
            "--select",
            "7",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run { command, selections, lines }) => {
                assert_eq!(command, "create_todo");
                assert_eq!(selections, vec![Region::new(0, 4), Region::cursor(7)]);
                assert_eq!(lines, vec![3]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
