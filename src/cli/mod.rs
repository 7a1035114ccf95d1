use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game-shelf")]
#[command(author, version, about = "Browse, filter and sort a game collection from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Library file to read instead of the configured one
    #[arg(short, long, global = true)]
    pub library: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the filters that currently match at least one game
    Filters {
        /// Restrict to one collection (system short name)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// List games, filtered and sorted
    List {
        /// Filter name ("All Games", "Favorites", "Last Played")
        #[arg(short, long)]
        filter: Option<String>,

        /// Restrict to one collection (system short name)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Print the filter that follows the given one
    Next {
        /// Current filter name
        current: String,

        /// Cycle through the whole catalog, even filters without matches
        #[arg(short, long)]
        all_filters: bool,

        /// Restrict to one collection (system short name)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Show details about a game
    Info {
        /// Title of the game
        title: String,
    },

    /// Print screenshots in random order
    Screenshots {
        /// Maximum number of screenshots to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show status and configuration
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filter() {
        let cli = Cli::parse_from(["game-shelf", "list", "--filter", "Last Played", "-c", "snes"]);
        match cli.command {
            Some(Commands::List { filter, collection }) => {
                assert_eq!(filter.as_deref(), Some("Last Played"));
                assert_eq!(collection.as_deref(), Some("snes"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["game-shelf", "--verbose"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
