//! Host-side timeline model: load, walk clips, write back.
//!
//! Only the structure needed to reach clips and their media references is
//! modeled; everything else rides along untouched.

mod schema;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

pub use schema::{
    Clip, Composable, ExternalReference, Fields, MediaReference, Opaque, Stack, Timeline, Track,
    DEFAULT_MEDIA_KEY,
};

const SCHEMA_KEY: &str = "OTIO_SCHEMA";
const TIMELINE_SCHEMA_PREFIX: &str = "Timeline.";

impl Timeline {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let timeline: Timeline = serde_json::from_str(json).context("parse timeline JSON")?;
        match timeline.extra.get(SCHEMA_KEY).and_then(Value::as_str) {
            Some(schema) if schema.starts_with(TIMELINE_SCHEMA_PREFIX) => Ok(timeline),
            Some(schema) => anyhow::bail!("expected a Timeline document, found {schema}"),
            None => anyhow::bail!("timeline JSON has no {SCHEMA_KEY} field"),
        }
    }

    pub fn read_from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline: {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load timeline: {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize timeline JSON")
    }

    /// All clips in document order, descending into nested tracks and stacks.
    pub fn clips(&self) -> Vec<&Clip> {
        let mut out = Vec::new();
        collect_clips(&self.tracks.children, &mut out);
        out
    }

    pub fn clips_mut(&mut self) -> Vec<&mut Clip> {
        let mut out = Vec::new();
        collect_clips_mut(&mut self.tracks.children, &mut out);
        out
    }
}

fn collect_clips<'a>(children: &'a [Composable], out: &mut Vec<&'a Clip>) {
    for child in children {
        match child {
            Composable::Clip(clip) | Composable::ClipV2(clip) => out.push(clip),
            Composable::Track(track) => collect_clips(&track.children, out),
            Composable::Stack(stack) => collect_clips(&stack.children, out),
            Composable::Gap(_) | Composable::Transition(_) => {}
        }
    }
}

fn collect_clips_mut<'a>(children: &'a mut [Composable], out: &mut Vec<&'a mut Clip>) {
    for child in children {
        match child {
            Composable::Clip(clip) | Composable::ClipV2(clip) => out.push(clip),
            Composable::Track(track) => collect_clips_mut(&mut track.children, out),
            Composable::Stack(stack) => collect_clips_mut(&mut stack.children, out),
            Composable::Gap(_) | Composable::Transition(_) => {}
        }
    }
}
