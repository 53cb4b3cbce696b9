//! Feature flags the host reads once at startup.

use super::{SECTION, spec};
use crate::error::Result;
use crate::store::{Backing, ConfigStore};
use serde::Serialize;

/// Validated toggles from the `ttNodes` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub auto_update: bool,
    pub enable_interface: bool,
    pub enable_fullscreen: bool,
    pub enable_embed_autocomplete: bool,
    pub enable_dynamic_widgets: bool,
    pub enable_dev_nodes: bool,
}

impl FeatureFlags {
    /// Validate every toggle, reverting invalid ones in storage.
    pub fn resolve<B: Backing>(store: &mut ConfigStore<B>) -> Result<Self> {
        Ok(Self {
            auto_update: resolve_one(store, "auto_update")?,
            enable_interface: resolve_one(store, "enable_interface")?,
            enable_fullscreen: resolve_one(store, "enable_fullscreen")?,
            enable_embed_autocomplete: resolve_one(store, "enable_embed_autocomplete")?,
            enable_dynamic_widgets: resolve_one(store, "enable_dynamic_widgets")?,
            enable_dev_nodes: resolve_one(store, "enable_dev_nodes")?,
        })
    }

    /// `(option, enabled)` pairs in allow-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("auto_update", self.auto_update),
            ("enable_interface", self.enable_interface),
            ("enable_fullscreen", self.enable_fullscreen),
            ("enable_embed_autocomplete", self.enable_embed_autocomplete),
            ("enable_dynamic_widgets", self.enable_dynamic_widgets),
            ("enable_dev_nodes", self.enable_dev_nodes),
        ]
        .into_iter()
    }
}

fn resolve_one<B: Backing>(store: &mut ConfigStore<B>, option: &str) -> Result<bool> {
    let fallback = spec(option).map(|s| s.fallback).unwrap_or("false");
    let value = store.validate_option(SECTION, option, fallback)?;
    Ok(value == "true")
}
