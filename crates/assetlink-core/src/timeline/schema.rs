//! Serde model of the timeline JSON subset the linker touches.
//!
//! Objects are tagged by their `OTIO_SCHEMA` field. Fields the linker does
//! not use are kept in `extra` so a linked timeline writes back unchanged
//! apart from the rewritten URLs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields of an object the model does not interpret.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub tracks: Stack,
    /// Includes the `OTIO_SCHEMA` tag of the timeline itself.
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub children: Vec<Composable>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub children: Vec<Composable>,
    #[serde(flatten)]
    pub extra: Fields,
}

/// Child of a stack or track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA")]
pub enum Composable {
    #[serde(rename = "Clip.1")]
    Clip(Clip),
    /// Clip carrying a keyed set of media references.
    #[serde(rename = "Clip.2")]
    ClipV2(Clip),
    #[serde(rename = "Gap.1")]
    Gap(Opaque),
    #[serde(rename = "Transition.1")]
    Transition(Opaque),
    #[serde(rename = "Track.1")]
    Track(Track),
    #[serde(rename = "Stack.1")]
    Stack(Stack),
}

/// Key of the active reference when a `Clip.2` names none.
pub const DEFAULT_MEDIA_KEY: &str = "DEFAULT_MEDIA";

/// A clip of either schema version. `Clip.1` holds one `media_reference`;
/// `Clip.2` holds `media_references` keyed by name plus the active key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_reference: Option<MediaReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_references: Option<BTreeMap<String, MediaReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_media_reference_key: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Clip {
    /// Clip with an external reference to `target_url`.
    pub fn external(name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_reference: Some(MediaReference::External(ExternalReference {
                target_url: target_url.into(),
                extra: Fields::new(),
            })),
            ..Self::default()
        }
    }

    fn active_key(&self) -> &str {
        self.active_media_reference_key
            .as_deref()
            .unwrap_or(DEFAULT_MEDIA_KEY)
    }

    /// The reference playback uses: the keyed active one when the clip has a
    /// `media_references` map, otherwise `media_reference`.
    pub fn active_reference(&self) -> Option<&MediaReference> {
        match &self.media_references {
            Some(refs) => refs.get(self.active_key()),
            None => self.media_reference.as_ref(),
        }
    }

    pub fn active_reference_mut(&mut self) -> Option<&mut MediaReference> {
        let key = self.active_key().to_string();
        match &mut self.media_references {
            Some(refs) => refs.get_mut(&key),
            None => self.media_reference.as_mut(),
        }
    }

    /// URL of the active reference if it is external; None for any other kind.
    pub fn target_url(&self) -> Option<&str> {
        match self.active_reference() {
            Some(MediaReference::External(ext)) => Some(&ext.target_url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA")]
pub enum MediaReference {
    #[serde(rename = "ExternalReference.1")]
    External(ExternalReference),
    #[serde(rename = "MissingReference.1")]
    Missing(Opaque),
    #[serde(rename = "ImageSequenceReference.1")]
    ImageSequence(Opaque),
    #[serde(rename = "GeneratorReference.1")]
    Generator(Opaque),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub target_url: String,
    #[serde(flatten)]
    pub extra: Fields,
}

/// Object kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opaque {
    #[serde(flatten)]
    pub fields: Fields,
}
