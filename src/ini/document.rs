//! Ordered in-memory model of an INI file.
//!
//! Sections and entries keep file order. The model tolerates duplicate
//! section names and duplicate keys, because that is what a damaged file can
//! contain; [`IniDocument::deduplicate`] folds them away.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single `key = value` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// A `[name]` section and its options, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Option keys in order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

/// An option dropped by [`IniDocument::deduplicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedOption {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// What [`IniDocument::deduplicate`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplication {
    /// Later occurrences of a key, removed in favour of the first.
    pub removed: Vec<RemovedOption>,
    /// Names of sections whose repeated headers were folded into the first one.
    pub merged_sections: Vec<String>,
}

impl Deduplication {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.merged_sections.is_empty()
    }
}

/// Option keys are case-insensitive; they are stored lower-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distinct section names in order of first appearance.
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for section in &self.sections {
            if !names.contains(&section.name.as_str()) {
                names.push(&section.name);
            }
        }
        names
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Append an empty section, or return the existing one.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Push a raw section as parsed, without merging into an existing one.
    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn last_section_mut(&mut self) -> Option<&mut Section> {
        self.sections.last_mut()
    }

    /// First value stored for `key` across every section named `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.sections
            .iter()
            .filter(|s| s.name == section)
            .flat_map(|s| s.entries.iter())
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Replace every occurrence of `key` with a single entry at the end of the section.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let key = normalize_key(key);
        self.remove(section, &key);
        self.add_section(section).entries.push(Entry {
            key,
            value: value.to_string(),
        });
    }

    /// Remove every occurrence of `key` in `section`. Returns whether anything was removed.
    pub fn remove(&mut self, section: &str, key: &str) -> bool {
        let key = normalize_key(key);
        let mut removed = false;
        for s in self.sections.iter_mut().filter(|s| s.name == section) {
            let before = s.entries.len();
            s.entries.retain(|e| e.key != key);
            removed |= s.entries.len() != before;
        }
        removed
    }

    /// Fold repeated section headers into their first occurrence, then keep
    /// only the first occurrence of each key within a section.
    pub fn deduplicate(&mut self) -> Deduplication {
        let mut outcome = Deduplication::default();

        let mut merged: Vec<Section> = Vec::with_capacity(self.sections.len());
        for section in self.sections.drain(..) {
            match merged.iter_mut().find(|s| s.name == section.name) {
                Some(first) => {
                    if !outcome.merged_sections.contains(&section.name) {
                        outcome.merged_sections.push(section.name.clone());
                    }
                    first.entries.extend(section.entries);
                }
                None => merged.push(section),
            }
        }
        self.sections = merged;

        for section in &mut self.sections {
            let mut seen: Vec<String> = Vec::new();
            let mut kept = Vec::with_capacity(section.entries.len());
            for entry in section.entries.drain(..) {
                if seen.contains(&entry.key) {
                    outcome.removed.push(RemovedOption {
                        section: section.name.clone(),
                        key: entry.key,
                        value: entry.value,
                    });
                } else {
                    seen.push(entry.key.clone());
                    kept.push(entry);
                }
            }
            section.entries = kept;
        }

        outcome
    }

    /// Render as INI text: one block per section, each followed by a blank line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("[{}]\n", section.name));
            for entry in &section.entries {
                let value = entry.value.replace('\n', "\n\t");
                out.push_str(&format!("{} = {}\n", entry.key, value));
            }
            out.push('\n');
        }
        out
    }
}

struct SectionEntries<'a>(&'a Section);

impl Serialize for SectionEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.entries.len()))?;
        for entry in &self.0.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// Serializes as `{ section: { key: value } }` in file order.
impl Serialize for IniDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &SectionEntries(section))?;
        }
        map.end()
    }
}
