//! Manager constructors keyed by identifier.

use std::collections::BTreeMap;
use std::fmt;

use super::library::{LibraryManager, LIBRARY_MANAGER_IDENTIFIER};
use super::Manager;

type Constructor = Box<dyn Fn() -> Box<dyn Manager>>;

/// Maps manager identifiers to constructors.
#[derive(Default)]
pub struct ManagerRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl ManagerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the managers shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LIBRARY_MANAGER_IDENTIFIER, || {
            Box::new(LibraryManager::new()) as Box<dyn Manager>
        });
        registry
    }

    /// Registers `constructor` under `identifier`, replacing any previous entry.
    pub fn register<F>(&mut self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Manager> + 'static,
    {
        self.constructors
            .insert(identifier.into(), Box::new(constructor));
    }

    /// Constructs an uninitialized manager, or None if the identifier is unknown.
    pub fn create(&self, identifier: &str) -> Option<Box<dyn Manager>> {
        self.constructors.get(identifier).map(|make| make())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }

    /// (identifier, display name) for every registered manager, sorted by identifier.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.constructors
            .iter()
            .map(|(id, make)| (id.clone(), make().display_name().to_string()))
            .collect()
    }
}

impl fmt::Debug for ManagerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}
