use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod commands;
pub mod i18n;
pub mod interactive;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "mcp-manager",
    version,
    about = "MCP server manager for Claude Desktop",
    long_about = "Edit the mcpServers section of claude_desktop_config.json without touching the file directly.\n\nPaste the file content in, edit server arguments, then copy back a shell command that overwrites the file.\n\nRun without arguments to enter interactive mode."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Terminal command that copies your config file to the clipboard
    LoadCommand {
        /// Also copy the command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Print the Terminal command that overwrites the config file with INPUT
    SaveCommand {
        /// JSON file to read, or - for stdin
        input: std::path::PathBuf,

        /// Also copy the command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Write INPUT as a pretty-printed claude_desktop_config.json
    Export {
        /// JSON file to read, or - for stdin
        input: std::path::PathBuf,

        /// Target directory (defaults to the configured download directory)
        #[arg(short, long)]
        dir: Option<std::path::PathBuf>,
    },

    /// List MCP servers and their editable variables
    Servers {
        /// JSON file to read, or - for stdin
        input: std::path::PathBuf,
    },

    /// Set editable variables of one server and print the save command
    Set {
        /// JSON file to read, or - for stdin
        input: std::path::PathBuf,

        /// Server name
        server: String,

        /// Assignments in the form NAME=VALUE
        #[arg(required = true, value_parser = commands::parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Also copy the command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Remove one server and print the save command
    Delete {
        /// JSON file to read, or - for stdin
        input: std::path::PathBuf,

        /// Server name
        server: String,

        /// Also copy the command to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Enter interactive mode
    #[command(alias = "ui")]
    Interactive,

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_parses_assignments() {
        let cli = Cli::try_parse_from([
            "mcp-manager",
            "set",
            "config.json",
            "filesystem",
            "path=/Users/me/Desktop",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Set {
                server,
                assignments,
                copy,
                ..
            }) => {
                assert_eq!(server, "filesystem");
                assert_eq!(
                    assignments,
                    vec![("path".to_string(), "/Users/me/Desktop".to_string())]
                );
                assert!(!copy);
            }
            _ => panic!("expected set command"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["mcp-manager"]).expect("parse");
        assert!(cli.command.is_none());
    }
}
