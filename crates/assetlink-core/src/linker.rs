//! Media linker: rewrite clip URLs that are entity references to the
//! location their manager resolves them to.
//!
//! Clips whose media reference is not an external URL, or whose URL the
//! manager does not recognize, are left alone. Any manager error aborts the
//! pass and leaves the offending clip unchanged.

use serde_json::Value;

use crate::error::LinkError;
use crate::manager::{trait_set, LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY};
use crate::session::{LinkerArgs, SessionCache};
use crate::timeline::{Clip, MediaReference, Timeline};

/// A clip the linker can inspect and rewrite.
pub trait LinkableClip {
    fn name(&self) -> &str;

    /// URL of a simple external media reference; None for any other kind.
    fn external_url(&self) -> Option<&str>;

    /// Replace the external URL. No-op when the reference is not external.
    fn set_external_url(&mut self, url: String);
}

impl LinkableClip for Clip {
    fn name(&self) -> &str {
        &self.name
    }

    fn external_url(&self) -> Option<&str> {
        self.target_url()
    }

    fn set_external_url(&mut self, url: String) {
        if let Some(MediaReference::External(ext)) = self.active_reference_mut() {
            ext.target_url = url;
        }
    }
}

/// What linking did to one clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    NotExternal,
    NotEntityReference,
}

/// Per-pass tally returned by [`link_timeline`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub clips: usize,
    pub linked: usize,
    pub skipped: usize,
}

/// Resolve `url` to a location, or None if it is not an entity reference
/// for the manager selected by `args`. `clip_name` goes into the locale; a
/// bare reference resolves with the clip locale but no name.
pub fn resolve_location(
    url: &str,
    clip_name: Option<&str>,
    args: &LinkerArgs,
    sessions: &mut SessionCache,
) -> Result<Option<String>, LinkError> {
    let state = sessions.get_or_create(args)?;

    let Some(reference) = state.session.entity_reference_if_valid(url) else {
        return Ok(None);
    };

    match clip_name {
        Some(name) => state.context.set_clip_name(name),
        None => state.context.clear_clip_name(),
    }
    let data = state
        .session
        .resolve(
            &reference,
            &trait_set([LOCATABLE_CONTENT_TRAIT]),
            &state.context,
        )
        .map_err(|source| LinkError::Resolution {
            reference: reference.to_string(),
            clip: clip_name.unwrap_or_default().to_string(),
            source,
        })?;

    let location = data
        .property(LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY)
        .and_then(Value::as_str)
        .ok_or_else(|| LinkError::MissingLocation {
            reference: reference.to_string(),
            clip: clip_name.unwrap_or_default().to_string(),
        })?;
    Ok(Some(location.to_string()))
}

/// Link one clip.
pub fn link_media_reference<C>(
    clip: &mut C,
    args: &LinkerArgs,
    sessions: &mut SessionCache,
) -> Result<LinkOutcome, LinkError>
where
    C: LinkableClip + ?Sized,
{
    let Some(url) = clip.external_url() else {
        tracing::debug!(clip = clip.name(), "not an external reference; skipped");
        return Ok(LinkOutcome::NotExternal);
    };

    match resolve_location(url, Some(clip.name()), args, sessions)? {
        Some(location) => {
            tracing::debug!(clip = clip.name(), from = url, to = %location, "linked");
            clip.set_external_url(location);
            Ok(LinkOutcome::Linked)
        }
        None => {
            tracing::debug!(clip = clip.name(), url, "not an entity reference; skipped");
            Ok(LinkOutcome::NotEntityReference)
        }
    }
}

/// Link every clip of `timeline` in document order, stopping at the first error.
pub fn link_timeline(
    timeline: &mut Timeline,
    args: &LinkerArgs,
    sessions: &mut SessionCache,
) -> Result<LinkReport, LinkError> {
    let mut report = LinkReport::default();
    for clip in timeline.clips_mut() {
        report.clips += 1;
        match link_media_reference(clip, args, sessions)? {
            LinkOutcome::Linked => report.linked += 1,
            LinkOutcome::NotExternal | LinkOutcome::NotEntityReference => report.skipped += 1,
        }
    }
    tracing::info!(
        clips = report.clips,
        linked = report.linked,
        skipped = report.skipped,
        "timeline linked"
    );
    Ok(report)
}
