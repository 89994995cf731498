//! Default manager configuration.
//!
//! Used when the linker arguments do not name a manager. The file is taken
//! from `$ASSETLINK_DEFAULT_CONFIG`, else `~/.config/assetlink/default_manager.toml`
//! when it exists:
//!
//! ```toml
//! [manager]
//! identifier = "org.assetlink.manager.library"
//!
//! [manager.settings]
//! library_path = "${config_dir}/library.json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manager::Settings;

/// Environment variable naming the default manager config file.
pub const DEFAULT_CONFIG_ENV: &str = "ASSETLINK_DEFAULT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "default_manager.toml";
const CONFIG_DIR_TOKEN: &str = "${config_dir}";

/// Contents of the default manager config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultManagerConfig {
    pub manager: ManagerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerSection {
    pub identifier: String,
    #[serde(default)]
    pub settings: Settings,
}

/// Path of the per-user default config, whether or not it exists.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetlink")?;
    Ok(xdg_dirs.get_config_file(DEFAULT_CONFIG_FILE))
}

/// Where to look for the default config: the env var if set, else the
/// per-user file if present.
pub fn default_config_location() -> Result<Option<PathBuf>> {
    if let Some(path) = std::env::var_os(DEFAULT_CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(Some(PathBuf::from(path)));
        }
    }
    let path = config_path()?;
    Ok(path.exists().then_some(path))
}

/// Load a default manager config, expanding `${config_dir}` in string settings.
pub fn load_from(path: &Path) -> Result<DefaultManagerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read default manager config: {}", path.display()))?;
    let mut cfg: DefaultManagerConfig = toml::from_str(&data)
        .with_context(|| format!("parse default manager config: {}", path.display()))?;

    let config_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config_dir = config_dir.to_string_lossy();
    for value in cfg.manager.settings.values_mut() {
        expand_config_dir(value, &config_dir);
    }
    Ok(cfg)
}

fn expand_config_dir(value: &mut Value, config_dir: &str) {
    match value {
        Value::String(s) if s.contains(CONFIG_DIR_TOKEN) => {
            *s = s.replace(CONFIG_DIR_TOKEN, config_dir);
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|v| expand_config_dir(v, config_dir)),
        Value::Object(map) => map
            .values_mut()
            .for_each(|v| expand_config_dir(v, config_dir)),
        _ => {}
    }
}
