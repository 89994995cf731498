//! `assetlink resolve <reference>` – print the location of one entity.

use anyhow::Result;
use assetlink_core::linker::resolve_location;
use assetlink_core::manager::ManagerRegistry;
use assetlink_core::SessionCache;

use super::linker_args;
use crate::cli::ManagerOpts;

pub fn run_resolve(reference: &str, opts: &ManagerOpts) -> Result<()> {
    let args = linker_args(opts)?;
    let mut sessions = SessionCache::new(ManagerRegistry::with_builtin());
    match resolve_location(reference, None, &args, &mut sessions)? {
        Some(location) => println!("{location}"),
        None => anyhow::bail!("'{reference}' is not an entity reference for the selected manager"),
    }
    Ok(())
}
