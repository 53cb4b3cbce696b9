//! Default values applied to settings that are not yet present.

/// One `[section] option = value` default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultEntry {
    pub section: String,
    pub option: String,
    pub value: String,
}

/// Ordered section → option → value defaults table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    entries: Vec<DefaultEntry>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default; a later entry for the same option replaces the earlier one.
    pub fn with(mut self, section: &str, option: &str, value: &str) -> Self {
        self.entries
            .retain(|e| !(e.section == section && e.option == option));
        self.entries.push(DefaultEntry {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn entries(&self) -> &[DefaultEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str, &'a str)> for Defaults {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Defaults::new(), |d, (section, option, value)| {
                d.with(section, option, value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_entry_replaces_earlier() {
        let defaults = Defaults::new()
            .with("ttNodes", "auto_update", "False")
            .with("ttNodes", "enable_interface", "True")
            .with("ttNodes", "auto_update", "True");

        assert_eq!(defaults.entries().len(), 2);
        assert_eq!(defaults.entries()[1].option, "auto_update");
        assert_eq!(defaults.entries()[1].value, "True");
    }

    #[test]
    fn collects_from_tuples() {
        let defaults: Defaults = [("a", "x", "1"), ("b", "y", "2")].into_iter().collect();

        assert_eq!(defaults.entries()[0].section, "a");
        assert_eq!(defaults.entries()[1].value, "2");
    }
}
