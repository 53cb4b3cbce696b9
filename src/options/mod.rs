//! Built-in option allow-list and defaults for the `ttNodes` section.
//!
//! Every toggle is a boolean stored as text. Stored values are compared
//! case-insensitively against the lower-case allow-list; the defaults table
//! keeps the capitalised spelling users see in a fresh `config.ini`.

mod flags;

pub use flags::FeatureFlags;

use crate::store::Defaults;

/// Section holding the feature toggles.
pub const SECTION: &str = "ttNodes";

/// Allowed spellings for boolean toggles, after lower-casing.
pub const BOOLEAN_VALUES: &[&str] = &["true", "false"];

/// A validated option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub allowed: &'static [&'static str],
    /// Written when the option is missing at startup.
    pub initial: &'static str,
    /// Written back when the stored value is not allowed.
    pub fallback: &'static str,
}

/// The allow-list, in the order options appear in a fresh file.
pub const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        key: "auto_update",
        allowed: BOOLEAN_VALUES,
        initial: "False",
        fallback: "false",
    },
    OptionSpec {
        key: "enable_interface",
        allowed: BOOLEAN_VALUES,
        initial: "True",
        fallback: "true",
    },
    OptionSpec {
        key: "enable_fullscreen",
        allowed: BOOLEAN_VALUES,
        initial: "True",
        fallback: "true",
    },
    OptionSpec {
        key: "enable_embed_autocomplete",
        allowed: BOOLEAN_VALUES,
        initial: "True",
        fallback: "true",
    },
    OptionSpec {
        key: "enable_dynamic_widgets",
        allowed: BOOLEAN_VALUES,
        initial: "True",
        fallback: "true",
    },
    // Missing means off, but an unreadable value falls back to on.
    OptionSpec {
        key: "enable_dev_nodes",
        allowed: BOOLEAN_VALUES,
        initial: "False",
        fallback: "true",
    },
];

pub fn spec(option: &str) -> Option<&'static OptionSpec> {
    OPTION_SPECS.iter().find(|s| s.key == option)
}

/// Allowed values for `option`, or `None` if it is not validated.
pub fn allowed_values(option: &str) -> Option<&'static [&'static str]> {
    spec(option).map(|s| s.allowed)
}

/// Defaults written at startup for options that are not set.
pub fn default_settings() -> Defaults {
    OPTION_SPECS
        .iter()
        .map(|s| (SECTION, s.key, s.initial))
        .collect()
}
