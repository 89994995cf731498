//! Asset manager contract.
//!
//! The linker only depends on the [`Manager`] trait. Concrete backends are
//! constructed by identifier through a [`ManagerRegistry`]; the built-in
//! [`library::LibraryManager`] resolves references against a JSON file.

mod context;
pub mod library;
mod registry;
mod traits;

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::host::HostInterface;

pub use context::{Access, Context};
pub use registry::ManagerRegistry;
pub use traits::{
    trait_set, TraitSet, TraitsData, CLIP_LOCALE_TRAIT, CLIP_NAME_PROPERTY,
    LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY,
};

/// Backend-specific settings, as supplied in the linker arguments.
pub type Settings = Map<String, Value>;

/// Optional features a manager may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can tell whether a string is one of its entity references.
    EntityReferenceIdentification,
    /// Can resolve trait data for an entity reference.
    Resolution,
    /// Can report which traits it manages.
    ManagementPolicyQueries,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::EntityReferenceIdentification => "entity reference identification",
            Capability::Resolution => "resolution",
            Capability::ManagementPolicyQueries => "management policy queries",
        };
        f.write_str(name)
    }
}

/// A string a manager has confirmed is one of its entity references.
///
/// Only [`crate::session::Session::entity_reference_if_valid`] creates these,
/// so holding one means the syntax check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityReference(String);

impl EntityReference {
    pub(crate) fn new(reference: String) -> Self {
        Self(reference)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures reported by a manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("invalid manager settings: {0}")]
    InvalidSettings(String),

    #[error("failed to load entity library {}: {message}", .path.display())]
    LibraryLoad { path: PathBuf, message: String },

    #[error("malformed entity reference '{0}'")]
    MalformedEntityReference(String),

    #[error("entity not found: '{0}'")]
    EntityNotFound(String),

    #[error("entity '{reference}' does not allow {access} access")]
    EntityAccess { reference: String, access: Access },

    #[error("{0}")]
    Other(String),
}

/// Backend contract used by the linker.
pub trait Manager {
    /// Unique, reverse-DNS style identifier.
    fn identifier(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Configures the manager. Called once, before any other query.
    fn initialize(
        &mut self,
        settings: &Settings,
        host: &dyn HostInterface,
    ) -> Result<(), ManagerError>;

    fn supports(&self, capability: Capability) -> bool;

    /// Syntax check only; does not imply the entity exists.
    fn is_entity_reference(&self, candidate: &str) -> bool;

    /// Resolves the requested traits for `reference`. Traits the entity does
    /// not have are absent from the result.
    fn resolve(
        &self,
        reference: &EntityReference,
        trait_set: &TraitSet,
        context: &Context,
    ) -> Result<TraitsData, ManagerError>;
}
