//! Resolve timeline clip URLs that are asset-manager entity references.
//!
//! A linking pass walks the clips of a [`timeline::Timeline`], asks the
//! manager selected by [`session::LinkerArgs`] whether each external URL is
//! one of its entity references, and replaces those URLs with the resolved
//! location. Sessions are cached in a caller-owned [`session::SessionCache`].

pub mod config;
pub mod error;
pub mod host;
pub mod linker;
pub mod logging;
pub mod manager;
pub mod session;
pub mod timeline;

pub use error::{LinkError, LinkErrorKind};
pub use linker::{link_media_reference, link_timeline, LinkOutcome, LinkReport, LinkableClip};
pub use session::{LinkerArgs, SessionCache};
