//! Entity library file structures.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::manager::TraitsData;

/// Root of an entity library JSON document.
#[derive(Debug, Default, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub entities: BTreeMap<String, LibraryEntity>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryEntity {
    /// Oldest first; the last entry is the latest version.
    #[serde(default)]
    pub versions: Vec<EntityVersion>,
}

#[derive(Debug, Deserialize)]
pub struct EntityVersion {
    #[serde(default)]
    pub traits: TraitsData,
}
