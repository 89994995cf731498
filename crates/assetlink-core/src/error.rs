//! Errors surfaced by a linking pass.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::DEFAULT_CONFIG_ENV;
use crate::manager::{Capability, ManagerError};

/// Coarse classification of [`LinkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkErrorKind {
    /// Manager could not be selected or initialized.
    Plugin,
    /// Selected manager lacks a required capability.
    Capability,
    /// A reference failed to resolve to a location.
    Resolution,
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(
        "no manager identifier given and no default manager configured (set {})",
        DEFAULT_CONFIG_ENV
    )]
    NoDefaultManager,

    #[error("invalid default manager config {}", .path.display())]
    DefaultConfig {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown manager '{identifier}'")]
    UnknownManager { identifier: String },

    #[error("failed to initialize manager '{identifier}'")]
    ManagerInitialization {
        identifier: String,
        #[source]
        source: ManagerError,
    },

    #[error("manager '{identifier}' does not support {capability}")]
    Capability {
        identifier: String,
        capability: Capability,
    },

    #[error("failed to resolve '{reference}' for clip '{clip}'")]
    Resolution {
        reference: String,
        clip: String,
        #[source]
        source: ManagerError,
    },

    #[error("'{reference}' for clip '{clip}' resolved without a location")]
    MissingLocation { reference: String, clip: String },
}

impl LinkError {
    pub fn kind(&self) -> LinkErrorKind {
        match self {
            LinkError::NoDefaultManager
            | LinkError::DefaultConfig { .. }
            | LinkError::UnknownManager { .. }
            | LinkError::ManagerInitialization { .. } => LinkErrorKind::Plugin,
            LinkError::Capability { .. } => LinkErrorKind::Capability,
            LinkError::Resolution { .. } | LinkError::MissingLocation { .. } => {
                LinkErrorKind::Resolution
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(LinkError::NoDefaultManager.kind(), LinkErrorKind::Plugin);
        assert_eq!(
            LinkError::UnknownManager {
                identifier: "x".into()
            }
            .kind(),
            LinkErrorKind::Plugin
        );
        assert_eq!(
            LinkError::Capability {
                identifier: "x".into(),
                capability: Capability::Resolution
            }
            .kind(),
            LinkErrorKind::Capability
        );
        assert_eq!(
            LinkError::MissingLocation {
                reference: "bal:///a".into(),
                clip: "A".into()
            }
            .kind(),
            LinkErrorKind::Resolution
        );
    }

    #[test]
    fn resolution_error_wraps_manager_error() {
        let err = LinkError::Resolution {
            reference: "bal:///a".into(),
            clip: "A".into(),
            source: ManagerError::EntityNotFound("bal:///a".into()),
        };
        assert_eq!(err.to_string(), "failed to resolve 'bal:///a' for clip 'A'");
        let source = err.source().expect("source is kept");
        assert_eq!(source.to_string(), "entity not found: 'bal:///a'");
    }

    #[test]
    fn no_default_message_names_env_var() {
        assert!(LinkError::NoDefaultManager
            .to_string()
            .contains("ASSETLINK_DEFAULT_CONFIG"));
    }
}
