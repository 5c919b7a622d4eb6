//! Command-line interface for zennotes.
//!
//! This module provides the CLI structure for the `zennotes` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DeleteCommand, EditCommand, ExportCommand, ImportCommand, ListCommand,
    NewCommand, OutputFormat, ShowCommand, StatusCommand,
};

/// zennotes - Keep short notes on your own machine
///
/// Create, edit, search and delete notes, and move them between machines
/// with JSON backups.
#[derive(Debug, Parser)]
#[command(name = "zennotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note
    New(NewCommand),

    /// Edit a note's title or body
    Edit(EditCommand),

    /// Delete a note
    Delete(DeleteCommand),

    /// List notes, optionally filtered by a search query
    List(ListCommand),

    /// Show a single note
    Show(ShowCommand),

    /// Write a JSON backup of all notes
    Export(ExportCommand),

    /// Add the notes of a JSON backup
    Import(ImportCommand),

    /// Show note count and storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "zennotes");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["zennotes", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["zennotes", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["zennotes", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["zennotes", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_new() {
        let cli = parse(&["zennotes", "new", "-t", "Title", "-b", "Body"]);
        let Command::New(cmd) = cli.command else {
            panic!("expected new command");
        };
        assert_eq!(cmd.title, "Title");
        assert_eq!(cmd.content, "Body");
    }

    #[test]
    fn test_parse_new_defaults_empty() {
        let cli = parse(&["zennotes", "new", "--content", "only body"]);
        let Command::New(cmd) = cli.command else {
            panic!("expected new command");
        };
        assert_eq!(cmd.title, "");
        assert_eq!(cmd.content, "only body");
    }

    #[test]
    fn test_parse_edit_partial() {
        let cli = parse(&["zennotes", "edit", "abc", "--title", "New"]);
        let Command::Edit(cmd) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(cmd.id, "abc");
        assert_eq!(cmd.title.as_deref(), Some("New"));
        assert!(cmd.content.is_none());
    }

    #[test]
    fn test_parse_delete() {
        let cli = parse(&["zennotes", "delete", "abc", "--yes"]);
        let Command::Delete(cmd) = cli.command else {
            panic!("expected delete command");
        };
        assert_eq!(cmd.id, "abc");
        assert!(cmd.yes);
    }

    #[test]
    fn test_parse_list_with_query_and_format() {
        let cli = parse(&["zennotes", "list", "milk run", "-f", "table"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.query, "milk run");
        assert_eq!(cmd.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_list_without_query() {
        let cli = parse(&["zennotes", "list"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.query, "");
        assert_eq!(cmd.format, OutputFormat::Plain);
    }

    #[test]
    fn test_parse_show() {
        let cli = parse(&["zennotes", "show", "abc", "--json"]);
        assert!(matches!(cli.command, Command::Show(ShowCommand { json: true, .. })));
    }

    #[test]
    fn test_parse_export_output() {
        let cli = parse(&["zennotes", "export", "-o", "/tmp/backups"]);
        let Command::Export(cmd) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(cmd.output, Some(PathBuf::from("/tmp/backups")));
        assert!(!cmd.stdout);
    }

    #[test]
    fn test_export_output_conflicts_with_stdout() {
        let result = Cli::try_parse_from(["zennotes", "export", "-o", "x.json", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_import() {
        let cli = parse(&["zennotes", "import", "backup.json"]);
        let Command::Import(cmd) = cli.command else {
            panic!("expected import command");
        };
        assert_eq!(cmd.file, PathBuf::from("backup.json"));
    }

    #[test]
    fn test_parse_status() {
        let cli = parse(&["zennotes", "status"]);
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = parse(&["zennotes", "config", "show", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["zennotes", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
