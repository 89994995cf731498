//! Manager sessions and the per-pass session cache.

mod args;
mod cache;

use std::fmt;

use crate::host::HostInterface;
use crate::manager::{
    Context, EntityReference, Manager, ManagerError, TraitSet, TraitsData,
};

pub use args::LinkerArgs;
pub use cache::SessionCache;

/// An initialized manager bound to the host that initialized it.
pub struct Session {
    host: Box<dyn HostInterface>,
    manager: Box<dyn Manager>,
}

impl Session {
    /// Wrap a manager that has already been initialized with `host`.
    pub fn new(host: Box<dyn HostInterface>, manager: Box<dyn Manager>) -> Self {
        Self { host, manager }
    }

    pub fn host(&self) -> &dyn HostInterface {
        self.host.as_ref()
    }

    pub fn manager(&self) -> &dyn Manager {
        self.manager.as_ref()
    }

    /// Some(reference) if the manager recognizes `candidate` as one of its references.
    pub fn entity_reference_if_valid(&self, candidate: &str) -> Option<EntityReference> {
        self.manager
            .is_entity_reference(candidate)
            .then(|| EntityReference::new(candidate.to_string()))
    }

    pub fn resolve(
        &self,
        reference: &EntityReference,
        trait_set: &TraitSet,
        context: &Context,
    ) -> Result<TraitsData, ManagerError> {
        self.manager.resolve(reference, trait_set, context)
    }

    /// Fresh read context with an empty clip locale.
    pub fn create_context(&self) -> Context {
        Context::for_clip_read()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host.identifier())
            .field("manager", &self.manager.identifier())
            .finish()
    }
}

/// Session plus the context reused for every clip linked through it.
#[derive(Debug)]
pub struct SessionState {
    pub session: Session,
    pub context: Context,
}
