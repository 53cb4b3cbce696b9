//! ttnconf: self-repairing INI settings for tinyterra node plugins.
//!
//! The host loads a [`ConfigStore`](store::ConfigStore) once at startup, runs
//! [`startup::bootstrap`] to repair the file and fill in defaults, and reads
//! the resulting [`FeatureFlags`](options::FeatureFlags) to decide which
//! optional features to enable.

pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod ini;
pub mod options;
pub mod startup;
pub mod store;

pub use error::{ConfigError, Result};
pub use options::FeatureFlags;
pub use store::{Backing, ConfigStore, Defaults, FileBacking, MemoryBacking};
