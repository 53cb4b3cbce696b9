//! The self-repairing settings store.
//!
//! [`ConfigStore`] keeps the parsed document in memory and writes the whole
//! file back through its [`Backing`] after every mutation. Malformed lines and
//! invalid option values are fixed and logged; only I/O and decoding failures
//! reach the caller.

mod backing;
mod defaults;


pub use backing::{Backing, FileBacking, MemoryBacking};
pub use defaults::{DefaultEntry, Defaults};

use crate::error::{ConfigError, Result};
use crate::ini::{self, Deduplication, IniDocument, RepairReport};
use crate::options;
use tracing::{debug, info, warn};

/// Section that records per-node version strings.
pub const VERSIONS_SECTION: &str = "Versions";

/// A section name must serialize to a header that parses back to itself.
fn check_section_name(section: &str) -> Result<()> {
    if section.trim().is_empty()
        || section.trim() != section
        || section.contains([']', '\n', '\r'])
    {
        return Err(ConfigError::UserError(format!(
            "invalid section name '{}': must be non-empty without surrounding whitespace, ']' or line breaks",
            section.escape_debug()
        )));
    }
    Ok(())
}

/// An option key must serialize to a line that parses back under the same key.
fn check_option_key(option: &str) -> Result<()> {
    let key = option.trim();
    if key.is_empty()
        || key.contains(char::is_whitespace)
        || key.contains(['=', ':'])
        || key.starts_with([';', '#', '['])
    {
        return Err(ConfigError::UserError(format!(
            "invalid option key '{}': must be non-empty without whitespace, '=', ':' or a leading comment marker",
            option.escape_debug()
        )));
    }
    Ok(())
}

/// Settings store over an injected backing.
#[derive(Debug)]
pub struct ConfigStore<B: Backing> {
    backing: B,
    document: IniDocument,
}

impl<B: Backing> ConfigStore<B> {
    /// Load the store, creating empty storage if nothing is persisted yet.
    ///
    /// A missing file is not an error. Undecodable content is.
    pub fn load(mut backing: B) -> Result<Self> {
        let document = match backing.load()? {
            Some(text) => ini::parse(&text),
            None => {
                backing.store("")?;
                info!(location = %backing.location(), "created empty config");
                IniDocument::new()
            }
        };

        Ok(Self { backing, document })
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn into_backing(self) -> B {
        self.backing
    }

    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    /// Ordered copy of every section and option.
    pub fn snapshot(&self) -> IniDocument {
        self.document.clone()
    }

    pub fn sections(&self) -> Vec<&str> {
        self.document.section_names()
    }

    /// Option keys of `section` in order, or an empty list if it does not exist.
    pub fn options(&self, section: &str) -> Vec<&str> {
        self.document
            .sections()
            .iter()
            .filter(|s| s.name == section)
            .flat_map(|s| s.keys())
            .collect()
    }

    /// Persist the current document.
    pub fn flush(&mut self) -> Result<()> {
        self.backing.store(&self.document.serialize())?;
        debug!(location = %self.backing.location(), "persisted config");
        Ok(())
    }

    /// Repair the persisted text line by line, then re-read it.
    ///
    /// Storage is rewritten only when the repair changed something. Nothing
    /// happens when nothing is persisted.
    pub fn repair_format(&mut self) -> Result<RepairReport> {
        let Some(text) = self.backing.load()? else {
            return Ok(RepairReport::default());
        };

        let report = ini::repair(&text);
        if report.text != text {
            self.backing.store(&report.text)?;
            debug!(
                location = %self.backing.location(),
                fixes = report.fixes.len(),
                "persisted repaired config"
            );
        }
        self.document = ini::parse(&report.text);

        Ok(report)
    }

    /// Keep only the first occurrence of each option per section.
    ///
    /// Persists only if something was removed or merged.
    pub fn deduplicate(&mut self) -> Result<Deduplication> {
        let outcome = self.document.deduplicate();

        for name in &outcome.merged_sections {
            warn!(section = %name, "merging repeated section header");
        }
        for removed in &outcome.removed {
            warn!(
                section = %removed.section,
                option = %removed.key,
                value = %removed.value,
                "removing duplicate option"
            );
        }

        if !outcome.is_empty() {
            self.flush()?;
        }
        Ok(outcome)
    }

    /// Current value of an option, `None` if the section or option is missing.
    pub fn read(&self, section: &str, option: &str) -> Option<&str> {
        self.document.get(section, option)
    }

    /// Set an option, creating its section if needed, and persist.
    ///
    /// # Arguments
    ///
    /// * `section` - Section name; must be non-empty with no leading or trailing
    ///   whitespace, and contain no `]` or line break
    /// * `option` - Option key; must be non-empty and contain no whitespace,
    ///   `=` or `:`, and must not start with a comment marker
    /// * `value` - Stored as-is; line breaks become continuation lines
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The option was set and the whole store persisted
    /// * `Err(ConfigError::UserError)` - The section or key would not read back
    ///   under the same name; nothing was changed
    /// * `Err(ConfigError::Io)` - Persisting failed
    pub fn write(&mut self, section: &str, option: &str, value: &str) -> Result<()> {
        check_section_name(section)?;
        check_option_key(option)?;
        self.document.set(section, option, value);
        self.flush()
    }

    /// Remove an option. Persists and returns `true` only if it existed.
    pub fn remove(&mut self, section: &str, option: &str) -> Result<bool> {
        if !self.document.remove(section, option) {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Fill in every default whose option is not set. Returns the entries written.
    pub fn apply_defaults(&mut self, defaults: &Defaults) -> Result<Vec<DefaultEntry>> {
        let mut applied = Vec::new();
        for entry in defaults.entries() {
            if self.read(&entry.section, &entry.option).is_some() {
                continue;
            }
            self.write(&entry.section, &entry.option, &entry.value)?;
            info!(
                section = %entry.section,
                option = %entry.option,
                value = %entry.value,
                "applied default"
            );
            applied.push(entry.clone());
        }
        Ok(applied)
    }

    /// Read an option as lower case and check it against `allowed`.
    ///
    /// An unset option reads as `"none"`. A value outside `allowed` is replaced
    /// in storage by `default`, which is returned instead.
    pub fn validate_enum(
        &mut self,
        section: &str,
        option: &str,
        default: &str,
        allowed: &[&str],
    ) -> Result<String> {
        let value = self.read(section, option).unwrap_or("none").to_lowercase();
        if allowed.contains(&value.as_str()) {
            return Ok(value);
        }

        warn!(
            section,
            option,
            value = %value,
            allowed = ?allowed,
            "value not allowed, reverting to default"
        );
        self.write(section, option, default)?;
        Ok(default.to_string())
    }

    /// [`validate_enum`](Self::validate_enum) against the built-in allow-list.
    pub fn validate_option(&mut self, section: &str, option: &str, default: &str) -> Result<String> {
        let allowed = options::allowed_values(option)
            .ok_or_else(|| ConfigError::UnknownOption(option.to_string()))?;
        self.validate_enum(section, option, default, allowed)
    }

    /// Record node versions under `[Versions]`, spaces in names replaced by `_`.
    pub fn record_versions<'a, I>(&mut self, versions: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut recorded = 0;
        for (node, version) in versions {
            let node = node.replace(' ', "_");
            self.write(VERSIONS_SECTION, &node, version)?;
            recorded += 1;
        }
        if recorded > 0 {
            info!(count = recorded, "recorded node versions");
        }
        Ok(recorded)
    }
}
