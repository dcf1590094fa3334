// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmlint - rule-based commit message linter
///
/// Checks commit messages against type, case and length rules.
#[derive(Parser, Debug)]
#[command(name = "cmlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Rule-based commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true, env = "CMLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate commit messages
    Check(CheckArgs),

    /// Print the effective configuration
    PrintConfig,

    /// Print version information
    Version,

    /// Write an example configuration file
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Messages to check ("-" reads stdin; stdin is used when nothing is given)
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// Read a message from a file (e.g. .git/COMMIT_EDITMSG)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Only print messages that have findings
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(default_value = "cmlint.toml")]
    pub path: PathBuf,

    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let args = Cli::parse_from(["cmlint", "check", "feat: add thing", "--strict"]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(check_args.messages, vec!["feat: add thing"]);
            assert!(check_args.strict);
            assert!(check_args.files.is_empty());
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_parse_check_files() {
        let args = Cli::parse_from([
            "cmlint",
            "check",
            "-f",
            ".git/COMMIT_EDITMSG",
            "--file",
            "other.txt",
        ]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(check_args.files.len(), 2);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from([
            "cmlint",
            "--format",
            "json",
            "check",
            "--config",
            "rules.toml",
        ]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.config, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn test_parse_init_default_path() {
        let args = Cli::parse_from(["cmlint", "init"]);
        if let Commands::Init(init) = args.command {
            assert_eq!(init.path, PathBuf::from("cmlint.toml"));
            assert!(!init.force);
        } else {
            panic!("Expected Init command");
        }
    }
}
