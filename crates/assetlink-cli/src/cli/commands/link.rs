//! `assetlink link <timeline>` – resolve entity references in a timeline.

use anyhow::{Context, Result};
use assetlink_core::manager::ManagerRegistry;
use assetlink_core::timeline::Timeline;
use assetlink_core::{link_timeline, SessionCache};
use std::path::Path;

use super::linker_args;
use crate::cli::ManagerOpts;

pub fn run_link(timeline_path: &Path, opts: &ManagerOpts, output: Option<&Path>) -> Result<()> {
    let args = linker_args(opts)?;
    let mut timeline = Timeline::read_from_path(timeline_path)?;

    let mut sessions = SessionCache::new(ManagerRegistry::with_builtin());
    let report = link_timeline(&mut timeline, &args, &mut sessions)
        .with_context(|| format!("link {}", timeline_path.display()))?;

    let json = timeline.to_json_pretty()?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write linked timeline: {}", path.display()))?,
        None => println!("{json}"),
    }
    eprintln!(
        "Linked {} of {} clips ({} skipped).",
        report.linked, report.clips, report.skipped
    );
    Ok(())
}
