//! Command implementations for ttnconf.
//!
//! Every command opens the store through [`open_store`], which loads the file
//! and repairs its text before anything reads it.

mod display;


use crate::cli::{Cli, Command, GetArgs, InitArgs, SetArgs, ShowArgs, UnsetArgs, ValidateArgs};
use display::{print_cleanup, print_startup_report};
use std::path::Path;
use ttnconf::error::{ConfigError, Result};
use ttnconf::options::{self, OPTION_SPECS};
use ttnconf::startup::bootstrap;
use ttnconf::store::{ConfigStore, FileBacking};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let path = cli.config.as_path();
    match cli.command {
        Command::Init(args) => cmd_init(path, args),
        Command::Get(args) => cmd_get(path, args),
        Command::Set(args) => cmd_set(path, args),
        Command::Unset(args) => cmd_unset(path, args),
        Command::Repair => cmd_repair(path),
        Command::Validate(args) => cmd_validate(path, args),
        Command::Show(args) => cmd_show(path, args),
    }
}

/// Load the store and repair its text so the document reflects the fixed file.
pub(crate) fn open_store(path: &Path) -> Result<ConfigStore<FileBacking>> {
    let mut store = ConfigStore::load(FileBacking::new(path))?;
    store.repair_format()?;
    Ok(store)
}

/// Split `NAME=VERSION` at the last `=`, so names may contain one.
fn parse_node_version(raw: &str) -> Result<(&str, &str)> {
    match raw.rsplit_once('=') {
        Some((name, version)) if !name.trim().is_empty() => Ok((name.trim(), version.trim())),
        _ => Err(ConfigError::UserError(format!(
            "invalid --node-version '{}': expected NAME=VERSION",
            raw
        ))),
    }
}

pub(crate) fn cmd_init(path: &Path, args: InitArgs) -> Result<()> {
    let versions = args
        .node_versions
        .iter()
        .map(|raw| parse_node_version(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut store = ConfigStore::load(FileBacking::new(path))?;
    let report = bootstrap(&mut store, &versions)?;

    print_startup_report(path, &report);
    Ok(())
}

pub(crate) fn cmd_get(path: &Path, args: GetArgs) -> Result<()> {
    let store = open_store(path)?;
    match store.read(&args.section, &args.option) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(ConfigError::UserError(format!(
            "option '{}' is not set in section [{}]",
            args.option, args.section
        ))),
    }
}

pub(crate) fn cmd_set(path: &Path, args: SetArgs) -> Result<()> {
    let mut store = open_store(path)?;
    store.write(&args.section, &args.option, &args.value)?;
    println!("[{}] {} = {}", args.section, args.option, args.value);
    Ok(())
}

pub(crate) fn cmd_unset(path: &Path, args: UnsetArgs) -> Result<()> {
    let mut store = open_store(path)?;
    if store.remove(&args.section, &args.option)? {
        println!("Removed [{}] {}", args.section, args.option);
    } else {
        println!("[{}] {} was not set; nothing to do.", args.section, args.option);
    }
    Ok(())
}

pub(crate) fn cmd_repair(path: &Path) -> Result<()> {
    let mut store = ConfigStore::load(FileBacking::new(path))?;
    let repair = store.repair_format()?;
    let deduplication = store.deduplicate()?;

    print_cleanup(&repair, &deduplication);
    Ok(())
}

pub(crate) fn cmd_validate(path: &Path, args: ValidateArgs) -> Result<()> {
    let names: Vec<String> = if args.options.is_empty() {
        OPTION_SPECS.iter().map(|s| s.key.to_string()).collect()
    } else {
        args.options
    };

    let mut store = open_store(path)?;
    for name in &names {
        let spec =
            options::spec(name).ok_or_else(|| ConfigError::UnknownOption(name.clone()))?;
        let value = store.validate_option(&args.section, name, spec.fallback)?;
        println!("{} = {}", name, value);
    }
    Ok(())
}

pub(crate) fn cmd_show(path: &Path, args: ShowArgs) -> Result<()> {
    let store = open_store(path)?;

    if args.json {
        let json = serde_json::to_string_pretty(store.document()).map_err(|e| {
            ConfigError::UserError(format!("failed to render config as JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        print!("{}", store.document().serialize());
    }
    Ok(())
}
