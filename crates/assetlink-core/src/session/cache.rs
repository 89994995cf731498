//! One-entry session cache keyed by linker arguments.
//!
//! Owned by whoever runs a linking pass. Holds at most one session; equal
//! arguments reuse it, anything else replaces it. A failed creation leaves
//! the cache empty so the next call retries.

use std::path::PathBuf;

use crate::config;
use crate::error::LinkError;
use crate::host::LinkerHost;
use crate::manager::{Capability, ManagerRegistry, Settings};

use super::{LinkerArgs, Session, SessionState};

const REQUIRED_CAPABILITIES: [Capability; 2] = [
    Capability::EntityReferenceIdentification,
    Capability::Resolution,
];

#[derive(Debug)]
pub struct SessionCache {
    registry: ManagerRegistry,
    cached: Option<(LinkerArgs, SessionState)>,
    sessions_created: usize,
}

impl SessionCache {
    pub fn new(registry: ManagerRegistry) -> Self {
        Self {
            registry,
            cached: None,
            sessions_created: 0,
        }
    }

    pub fn registry(&self) -> &ManagerRegistry {
        &self.registry
    }

    /// Number of sessions built over the cache's lifetime.
    pub fn sessions_created(&self) -> usize {
        self.sessions_created
    }

    /// Session for `args`, reusing the cached one when the arguments are equal.
    pub fn get_or_create(&mut self, args: &LinkerArgs) -> Result<&mut SessionState, LinkError> {
        let entry = match self.cached.take() {
            Some((cached_args, state)) if cached_args == *args => (cached_args, state),
            _ => {
                let state = create_session_state(&self.registry, args)?;
                self.sessions_created += 1;
                (args.clone(), state)
            }
        };
        let (_, state) = self.cached.insert(entry);
        Ok(state)
    }
}

fn create_session_state(
    registry: &ManagerRegistry,
    args: &LinkerArgs,
) -> Result<SessionState, LinkError> {
    let (identifier, settings) = select_manager(args)?;

    let mut manager = registry
        .create(&identifier)
        .ok_or_else(|| LinkError::UnknownManager {
            identifier: identifier.clone(),
        })?;

    let host = LinkerHost;
    manager
        .initialize(&settings, &host)
        .map_err(|source| LinkError::ManagerInitialization {
            identifier: identifier.clone(),
            source,
        })?;

    if let Some(capability) = REQUIRED_CAPABILITIES
        .into_iter()
        .find(|c| !manager.supports(*c))
    {
        return Err(LinkError::Capability {
            identifier,
            capability,
        });
    }

    tracing::debug!(manager = %identifier, "manager session created");
    let session = Session::new(Box::new(host), manager);
    let context = session.create_context();
    Ok(SessionState { session, context })
}

/// Manager identifier and settings: from the arguments, else the default config
/// with argument settings layered on top.
fn select_manager(args: &LinkerArgs) -> Result<(String, Settings), LinkError> {
    if let Some(identifier) = &args.identifier {
        return Ok((identifier.clone(), args.settings.clone().unwrap_or_default()));
    }

    let location = config::default_config_location().unwrap_or_else(|err| {
        tracing::debug!("no per-user config directory: {err:#}");
        None
    });
    let path: PathBuf = location.ok_or(LinkError::NoDefaultManager)?;
    let cfg = config::load_from(&path)
        .map_err(|source| LinkError::DefaultConfig { path: path.clone(), source })?;
    tracing::debug!(
        manager = %cfg.manager.identifier,
        config = %path.display(),
        "using default manager"
    );

    let mut settings = cfg.manager.settings;
    if let Some(overrides) = &args.settings {
        for (key, value) in overrides {
            settings.insert(key.clone(), value.clone());
        }
    }
    Ok((cfg.manager.identifier, settings))
}
