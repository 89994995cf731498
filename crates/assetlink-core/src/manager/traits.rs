//! Trait data exchanged with managers.
//!
//! A trait is a named slice of resolvable data (for example "has a
//! location"). `TraitsData` holds any number of traits, each with its own
//! property map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Trait carried by entities that have a content location.
pub const LOCATABLE_CONTENT_TRAIT: &str = "content.LocatableContent";
/// Property of [`LOCATABLE_CONTENT_TRAIT`] holding the location URL.
pub const LOCATION_PROPERTY: &str = "location";

/// Locale trait describing a clip in a timeline track.
pub const CLIP_LOCALE_TRAIT: &str = "timeline.track.clip";
/// Property of [`CLIP_LOCALE_TRAIT`] holding the clip name.
pub const CLIP_NAME_PROPERTY: &str = "clipName";

/// Set of trait identifiers.
pub type TraitSet = BTreeSet<String>;

/// Trait identifiers mapped to their properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitsData {
    traits: BTreeMap<String, Map<String, Value>>,
}

impl TraitsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trait with no properties. Existing properties are kept.
    pub fn add_trait(&mut self, trait_id: &str) {
        self.traits.entry(trait_id.to_string()).or_default();
    }

    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits.contains_key(trait_id)
    }

    pub fn trait_set(&self) -> TraitSet {
        self.traits.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Sets a property, imbuing the trait if needed.
    pub fn set_property(&mut self, trait_id: &str, property: &str, value: impl Into<Value>) {
        self.traits
            .entry(trait_id.to_string())
            .or_default()
            .insert(property.to_string(), value.into());
    }

    pub fn property(&self, trait_id: &str, property: &str) -> Option<&Value> {
        self.traits.get(trait_id).and_then(|props| props.get(property))
    }

    pub fn property_mut(&mut self, trait_id: &str, property: &str) -> Option<&mut Value> {
        self.traits
            .get_mut(trait_id)
            .and_then(|props| props.get_mut(property))
    }

    /// Removes a property, keeping the trait itself.
    pub fn remove_property(&mut self, trait_id: &str, property: &str) -> Option<Value> {
        self.traits
            .get_mut(trait_id)
            .and_then(|props| props.remove(property))
    }

    /// Drops every trait not in `wanted`.
    pub fn retain_traits(&mut self, wanted: &TraitSet) {
        self.traits.retain(|id, _| wanted.contains(id));
    }
}

/// Builds a trait set from identifiers.
pub fn trait_set<'a>(ids: impl IntoIterator<Item = &'a str>) -> TraitSet {
    ids.into_iter().map(str::to_string).collect()
}
