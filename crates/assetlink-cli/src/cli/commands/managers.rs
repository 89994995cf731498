//! `assetlink managers` – list registered managers.

use anyhow::Result;
use assetlink_core::manager::ManagerRegistry;

pub fn run_managers() -> Result<()> {
    let registry = ManagerRegistry::with_builtin();
    println!("{:<36} {}", "IDENTIFIER", "NAME");
    for (identifier, name) in registry.describe() {
        println!("{:<36} {}", identifier, name);
    }
    Ok(())
}
