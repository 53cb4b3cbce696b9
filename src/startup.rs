//! Startup sequence run by the host before it decides which features to load.
//!
//! Order matters: text repair must precede anything that parses, and defaults
//! are applied only after duplicates are gone so that a later duplicate can
//! never shadow a filled default.

use crate::error::Result;
use crate::ini::{Deduplication, RepairReport};
use crate::options::{FeatureFlags, default_settings};
use crate::store::{Backing, ConfigStore, DefaultEntry};

/// Everything the startup sequence changed, plus the resolved flags.
#[derive(Debug, Clone)]
pub struct StartupReport {
    pub repair: RepairReport,
    pub deduplication: Deduplication,
    pub versions_recorded: usize,
    pub defaults_applied: Vec<DefaultEntry>,
    pub flags: FeatureFlags,
}

impl StartupReport {
    /// Whether any stored content was repaired, removed or filled in.
    pub fn changed_anything(&self) -> bool {
        !self.repair.fixes.is_empty()
            || !self.deduplication.is_empty()
            || self.versions_recorded > 0
            || !self.defaults_applied.is_empty()
    }
}

/// Repair, deduplicate, record versions, fill defaults, then validate toggles.
pub fn bootstrap<B: Backing>(
    store: &mut ConfigStore<B>,
    versions: &[(&str, &str)],
) -> Result<StartupReport> {
    let repair = store.repair_format()?;
    let deduplication = store.deduplicate()?;
    let versions_recorded = store.record_versions(versions.iter().copied())?;
    let defaults_applied = store.apply_defaults(&default_settings())?;
    let flags = FeatureFlags::resolve(store)?;

    Ok(StartupReport {
        repair,
        deduplication,
        versions_recorded,
        defaults_applied,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBacking;

    #[test]
    fn fresh_store_gets_documented_defaults() {
        let mut store = ConfigStore::load(MemoryBacking::new()).unwrap();

        let report = bootstrap(&mut store, &[]).unwrap();

        assert_eq!(report.defaults_applied.len(), 6);
        assert!(!report.flags.auto_update);
        assert!(report.flags.enable_interface);
        assert!(report.flags.enable_fullscreen);
        assert!(report.flags.enable_embed_autocomplete);
        assert!(report.flags.enable_dynamic_widgets);
        assert!(!report.flags.enable_dev_nodes);
        assert_eq!(store.read("ttNodes", "enable_interface"), Some("True"));
        assert_eq!(store.read("ttNodes", "auto_update"), Some("False"));
    }

    #[test]
    fn damaged_file_is_repaired_end_to_end() {
        let text = "[ttNodes]\nauto update = True\n= stray\nenable_interface=False\nenable_interface=True\n\
                    enable_fullscreen = Maybe\n";
        let mut store = ConfigStore::load(MemoryBacking::with_content(text)).unwrap();

        let report = bootstrap(&mut store, &[("ttN pipeLoader", "1.2.0")]).unwrap();

        assert_eq!(report.repair.dropped().count(), 1);
        assert_eq!(report.deduplication.removed.len(), 1);
        assert_eq!(report.versions_recorded, 1);
        assert!(report.changed_anything());
        assert_eq!(report.repair.rewritten().count(), 3);
        assert!(report.flags.auto_update);
        assert!(!report.flags.enable_interface);
        assert!(report.flags.enable_fullscreen);
        assert_eq!(store.read("ttNodes", "auto_update"), Some("True"));
        assert_eq!(store.read("ttNodes", "enable_fullscreen"), Some("true"));
        assert_eq!(store.read("Versions", "ttn_pipeloader"), Some("1.2.0"));
    }

    #[test]
    fn second_bootstrap_changes_nothing() {
        let mut store = ConfigStore::load(MemoryBacking::new()).unwrap();
        bootstrap(&mut store, &[]).unwrap();
        let writes = store.backing().writes();

        let report = bootstrap(&mut store, &[]).unwrap();

        assert!(!report.changed_anything());
        assert_eq!(store.backing().writes(), writes);
    }
}
