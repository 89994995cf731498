//! JSON-backed reference manager.
//!
//! Entities live in a single JSON file named by the `library_path` setting.
//! References look like `bal:///asset1` (scheme configurable through
//! `entity_reference_url_scheme`), optionally pinned with `?v=N`. Without a
//! version the latest one is resolved. `${library_dir}` in a resolved
//! location expands to the directory holding the library file.

mod parse;
mod reference;

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::host::HostInterface;
use crate::manager::{
    Access, Capability, Context, EntityReference, Manager, ManagerError, Settings, TraitSet,
    TraitsData, LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY,
};

use parse::Library;
use reference::parse_reference;

pub const LIBRARY_MANAGER_IDENTIFIER: &str = "org.assetlink.manager.library";
const DISPLAY_NAME: &str = "Entity Library (JSON)";

pub const LIBRARY_PATH_SETTING: &str = "library_path";
pub const SCHEME_SETTING: &str = "entity_reference_url_scheme";
const DEFAULT_SCHEME: &str = "bal";
const LIBRARY_DIR_TOKEN: &str = "${library_dir}";

/// Manager resolving entity references from a JSON entity library.
#[derive(Debug)]
pub struct LibraryManager {
    scheme: String,
    prefix: String,
    library: Option<Library>,
    library_dir: PathBuf,
}

impl LibraryManager {
    pub fn new() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            prefix: format!("{DEFAULT_SCHEME}:///"),
            library: None,
            library_dir: PathBuf::from("."),
        }
    }
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new()
    }
}

/// True if `<scheme>:///<name>` references parse back to the same name.
fn scheme_is_usable(scheme: &str) -> bool {
    !scheme.is_empty()
        && parse_reference(&format!("{scheme}:///x"), scheme).is_ok_and(|r| r.name == "x")
}

fn load_library(path: &Path) -> Result<Library, ManagerError> {
    let load_err = |message: String| ManagerError::LibraryLoad {
        path: path.to_path_buf(),
        message,
    };
    let bytes = fs::read(path).map_err(|e| load_err(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))
}

impl Manager for LibraryManager {
    fn identifier(&self) -> &str {
        LIBRARY_MANAGER_IDENTIFIER
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn initialize(
        &mut self,
        settings: &Settings,
        host: &dyn HostInterface,
    ) -> Result<(), ManagerError> {
        let path = settings
            .get(LIBRARY_PATH_SETTING)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ManagerError::InvalidSettings(format!("'{LIBRARY_PATH_SETTING}' must be a string"))
            })?;
        let path = PathBuf::from(path);

        if let Some(scheme) = settings.get(SCHEME_SETTING) {
            match scheme.as_str() {
                Some(s) if scheme_is_usable(s) => self.scheme = s.to_string(),
                _ => {
                    return Err(ManagerError::InvalidSettings(format!(
                        "'{SCHEME_SETTING}' must be a URL scheme usable as '<scheme>:///<name>', got {scheme}"
                    )))
                }
            }
        }
        self.prefix = format!("{}:///", self.scheme);

        let library = load_library(&path)?;
        self.library_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        tracing::debug!(
            host = host.identifier(),
            path = %path.display(),
            scheme = %self.scheme,
            entities = library.entities.len(),
            "entity library loaded"
        );
        self.library = Some(library);
        Ok(())
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::EntityReferenceIdentification | Capability::Resolution => true,
            Capability::ManagementPolicyQueries => false,
        }
    }

    fn is_entity_reference(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.prefix)
    }

    fn resolve(
        &self,
        reference: &EntityReference,
        trait_set: &TraitSet,
        context: &Context,
    ) -> Result<TraitsData, ManagerError> {
        if context.access != Access::Read {
            return Err(ManagerError::EntityAccess {
                reference: reference.to_string(),
                access: context.access,
            });
        }
        let library = self
            .library
            .as_ref()
            .ok_or_else(|| ManagerError::Other("library manager is not initialized".into()))?;

        let parsed = parse_reference(reference.as_str(), &self.scheme)?;
        let not_found = || ManagerError::EntityNotFound(reference.to_string());
        let entity = library.entities.get(&parsed.name).ok_or_else(not_found)?;
        let version = match parsed.version {
            Some(v) => entity.versions.get(v - 1),
            None => entity.versions.last(),
        }
        .ok_or_else(not_found)?;

        let mut data = version.traits.clone();
        data.retain_traits(trait_set);
        if let Some(Value::String(location)) =
            data.property_mut(LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY)
        {
            if location.contains(LIBRARY_DIR_TOKEN) {
                *location =
                    location.replace(LIBRARY_DIR_TOKEN, &self.library_dir.to_string_lossy());
            }
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LinkerHost;
    use crate::manager::trait_set;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIBRARY: &str = r#"{
        "entities": {
            "asset1": {
                "versions": [
                    { "traits": { "content.LocatableContent": { "location": "file:///asset/1/v1" } } },
                    { "traits": {
                        "content.LocatableContent": { "location": "file:///asset/1/v2" },
                        "other": { "x": 1 }
                    } }
                ]
            },
            "relative": {
                "versions": [
                    { "traits": { "content.LocatableContent": { "location": "file://${library_dir}/rel.mov" } } }
                ]
            },
            "nolocation": {
                "versions": [ { "traits": { "other": {} } } ]
            },
            "my asset": {
                "versions": [
                    { "traits": { "content.LocatableContent": { "location": "file:///assets/my%20asset.mov" } } }
                ]
            },
            "café": {
                "versions": [
                    { "traits": { "content.LocatableContent": { "location": "file:///assets/cafe.mov" } } }
                ]
            }
        }
    }"#;

    fn library_file() -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(LIBRARY.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn manager_for(file: &NamedTempFile, scheme: Option<&str>) -> LibraryManager {
        let mut settings = Settings::new();
        settings.insert(
            LIBRARY_PATH_SETTING.into(),
            json!(file.path().to_str().unwrap()),
        );
        if let Some(s) = scheme {
            settings.insert(SCHEME_SETTING.into(), json!(s));
        }
        let mut manager = LibraryManager::new();
        manager.initialize(&settings, &LinkerHost).unwrap();
        manager
    }

    fn location(data: &TraitsData) -> Option<&str> {
        data.property(LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY)
            .and_then(Value::as_str)
    }

    fn resolve(manager: &LibraryManager, reference: &str) -> Result<TraitsData, ManagerError> {
        manager.resolve(
            &EntityReference::new(reference.to_string()),
            &trait_set([LOCATABLE_CONTENT_TRAIT]),
            &Context::for_clip_read(),
        )
    }

    #[test]
    fn identifies_references_by_scheme_prefix() {
        let file = library_file();
        let manager = manager_for(&file, None);
        assert!(manager.is_entity_reference("bal:///asset1"));
        assert!(!manager.is_entity_reference("file:///not/an/asset"));
        assert!(!manager.is_entity_reference("bal://asset1"));

        let custom = manager_for(&file, Some("scheme"));
        assert!(custom.is_entity_reference("scheme:///asset1"));
        assert!(!custom.is_entity_reference("bal:///asset1"));
    }

    #[test]
    fn resolves_latest_version_by_default() {
        let file = library_file();
        let manager = manager_for(&file, None);
        let data = resolve(&manager, "bal:///asset1").unwrap();
        assert_eq!(location(&data), Some("file:///asset/1/v2"));
        assert!(!data.has_trait("other"), "unrequested traits are dropped");
    }

    #[test]
    fn resolves_pinned_version() {
        let file = library_file();
        let manager = manager_for(&file, None);
        let data = resolve(&manager, "bal:///asset1?v=1").unwrap();
        assert_eq!(location(&data), Some("file:///asset/1/v1"));
        assert!(matches!(
            resolve(&manager, "bal:///asset1?v=3"),
            Err(ManagerError::EntityNotFound(_))
        ));
    }

    #[test]
    fn expands_library_dir_token() {
        let file = library_file();
        let manager = manager_for(&file, None);
        let data = resolve(&manager, "bal:///relative").unwrap();
        let dir = file.path().parent().unwrap().to_string_lossy().to_string();
        assert_eq!(location(&data), Some(format!("file://{dir}/rel.mov").as_str()));
    }

    #[test]
    fn missing_trait_is_absent_not_error() {
        let file = library_file();
        let manager = manager_for(&file, None);
        let data = resolve(&manager, "bal:///nolocation").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn unknown_entity_is_not_found() {
        let file = library_file();
        let manager = manager_for(&file, None);
        assert!(matches!(
            resolve(&manager, "bal:///missing"),
            Err(ManagerError::EntityNotFound(_))
        ));
    }

    #[test]
    fn write_access_is_refused() {
        let file = library_file();
        let manager = manager_for(&file, None);
        let mut ctx = Context::for_clip_read();
        ctx.access = Access::Write;
        let err = manager
            .resolve(
                &EntityReference::new("bal:///asset1".into()),
                &trait_set([LOCATABLE_CONTENT_TRAIT]),
                &ctx,
            )
            .unwrap_err();
        assert!(matches!(err, ManagerError::EntityAccess { access: Access::Write, .. }));
    }

    #[test]
    fn resolves_names_with_spaces_and_non_ascii() {
        let file = library_file();
        let manager = manager_for(&file, None);
        for reference in ["bal:///my asset", "bal:///my%20asset"] {
            let data = resolve(&manager, reference).unwrap();
            assert_eq!(location(&data), Some("file:///assets/my%20asset.mov"), "{reference}");
        }
        for reference in ["bal:///café", "bal:///caf%C3%A9"] {
            let data = resolve(&manager, reference).unwrap();
            assert_eq!(location(&data), Some("file:///assets/cafe.mov"), "{reference}");
        }
    }

    #[test]
    fn initialize_rejects_unparseable_scheme() {
        let file = library_file();
        for scheme in ["my_scheme", "1bal", "", "http"] {
            let mut settings = Settings::new();
            settings.insert(
                LIBRARY_PATH_SETTING.into(),
                json!(file.path().to_str().unwrap()),
            );
            settings.insert(SCHEME_SETTING.into(), json!(scheme));
            let mut manager = LibraryManager::new();
            let err = manager.initialize(&settings, &LinkerHost).unwrap_err();
            assert!(matches!(err, ManagerError::InvalidSettings(_)), "{scheme}");
        }
    }

    #[test]
    fn initialize_accepts_scheme_with_allowed_punctuation() {
        let file = library_file();
        let manager = manager_for(&file, Some("my-scheme.v2+x"));
        assert!(manager.is_entity_reference("my-scheme.v2+x:///asset1"));
        let data = resolve(&manager, "my-scheme.v2+x:///asset1").unwrap();
        assert_eq!(location(&data), Some("file:///asset/1/v2"));
    }

    #[test]
    fn initialize_requires_library_path() {
        let mut manager = LibraryManager::new();
        let err = manager.initialize(&Settings::new(), &LinkerHost).unwrap_err();
        assert!(matches!(err, ManagerError::InvalidSettings(_)));
    }

    #[test]
    fn initialize_reports_unreadable_library() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::new();
        settings.insert(
            LIBRARY_PATH_SETTING.into(),
            json!(dir.path().join("absent.json").to_str().unwrap()),
        );
        let mut manager = LibraryManager::new();
        let err = manager.initialize(&settings, &LinkerHost).unwrap_err();
        assert!(matches!(err, ManagerError::LibraryLoad { .. }));
    }

    #[test]
    fn capabilities() {
        let manager = LibraryManager::new();
        assert!(manager.supports(Capability::Resolution));
        assert!(manager.supports(Capability::EntityReferenceIdentification));
        assert!(!manager.supports(Capability::ManagementPolicyQueries));
    }
}
