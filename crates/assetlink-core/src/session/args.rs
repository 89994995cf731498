//! Linker arguments: which manager to use and how to configure it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::manager::Settings;

/// Per-invocation configuration map handed to the linker.
///
/// Compared by value: two equal maps share one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkerArgs {
    /// Manager to use; the default manager config is consulted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Manager-specific settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl LinkerArgs {
    pub fn for_manager(identifier: impl Into<String>, settings: Settings) -> Self {
        Self {
            identifier: Some(identifier.into()),
            settings: Some(settings),
        }
    }

    /// Read arguments from a JSON file shaped `{ "identifier": .., "settings": {..} }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("read linker args: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse linker args JSON: {}", path.display()))
    }

    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) {
        self.settings
            .get_or_insert_with(Settings::new)
            .insert(key.into(), value);
    }
}
