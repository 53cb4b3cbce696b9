//! CLI argument parsing for ttnconf.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ttnconf: inspect and maintain a tinyterra nodes `config.ini`.
///
/// Every command loads the file (creating it if missing). Malformed lines
/// and invalid toggle values are repaired rather than reported as errors.
#[derive(Parser, Debug)]
#[command(name = "ttnconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true, default_value = "config.ini")]
    pub config: PathBuf,

    /// Log every repair and write (sets the log level to debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for ttnconf.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the startup sequence.
    ///
    /// Repairs the file, removes duplicate options, records node versions,
    /// fills in missing defaults and validates every feature toggle.
    Init(InitArgs),

    /// Print the value of an option.
    Get(GetArgs),

    /// Set an option, creating its section if needed.
    Set(SetArgs),

    /// Remove an option.
    Unset(UnsetArgs),

    /// Repair malformed lines and remove duplicate options.
    Repair,

    /// Validate feature toggles against their allowed values.
    ///
    /// Invalid values are reverted to their defaults in the file.
    Validate(ValidateArgs),

    /// Print the whole store.
    Show(ShowArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Node version to record under [Versions] (repeatable).
    #[arg(long = "node-version", value_name = "NAME=VERSION")]
    pub node_versions: Vec<String>,
}

/// Arguments for the `get` command.
#[derive(Parser, Debug)]
pub struct GetArgs {
    pub section: String,
    pub option: String,
}

/// Arguments for the `set` command.
#[derive(Parser, Debug)]
pub struct SetArgs {
    pub section: String,
    pub option: String,
    pub value: String,
}

/// Arguments for the `unset` command.
#[derive(Parser, Debug)]
pub struct UnsetArgs {
    pub section: String,
    pub option: String,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Options to validate (default: every toggle).
    pub options: Vec<String>,

    /// Section holding the toggles.
    #[arg(long, default_value = "ttNodes")]
    pub section: String,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print a JSON object instead of INI text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_set_with_global_config() {
        let cli = Cli::try_parse_from([
            "ttnconf",
            "set",
            "ttNodes",
            "auto_update",
            "True",
            "--config",
            "/tmp/config.ini",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/tmp/config.ini"));
        match cli.command {
            Command::Set(args) => {
                assert_eq!(args.section, "ttNodes");
                assert_eq!(args.option, "auto_update");
                assert_eq!(args.value, "True");
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn parse_init_node_versions() {
        let cli = Cli::try_parse_from([
            "ttnconf",
            "init",
            "--node-version",
            "ttN pipeLoader=1.1.2",
            "--node-version",
            "ttN xyPlot=1.2.0",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("config.ini"));
        match cli.command {
            Command::Init(args) => assert_eq!(args.node_versions.len(), 2),
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[test]
    fn parse_validate_defaults_to_ttnodes_section() {
        let cli = Cli::try_parse_from(["ttnconf", "validate", "auto_update"]).unwrap();

        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.section, "ttNodes");
                assert_eq!(args.options, vec!["auto_update"]);
            }
            other => panic!("expected validate, got {:?}", other),
        }
    }
}
