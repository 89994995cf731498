//! CLI command handlers. Each command is in its own file.

mod completions;
mod link;
mod managers;
mod resolve;

use anyhow::Result;
use assetlink_core::LinkerArgs;
use serde_json::Value;

use super::ManagerOpts;

pub use completions::run_completions;
pub use link::run_link;
pub use managers::run_managers;
pub use resolve::run_resolve;

/// clap value parser for `KEY=VALUE` settings.
pub fn parse_setting(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty setting name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Build linker args: args file first, then --manager and --setting on top.
pub fn linker_args(opts: &ManagerOpts) -> Result<LinkerArgs> {
    let mut args = match &opts.args {
        Some(path) => LinkerArgs::from_json_file(path)?,
        None => LinkerArgs::default(),
    };
    if let Some(identifier) = &opts.manager {
        args.identifier = Some(identifier.clone());
    }
    for (key, value) in &opts.settings {
        args.set_setting(key.clone(), value.clone());
    }
    Ok(args)
}
