//! Shared fixtures for linker integration tests.

#![allow(dead_code)]

pub mod recording_manager;

use assetlink_core::manager::library::{
    LIBRARY_MANAGER_IDENTIFIER, LIBRARY_PATH_SETTING, SCHEME_SETTING,
};
use assetlink_core::manager::Settings;
use assetlink_core::LinkerArgs;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Library where `asset1` and `asset2` resolve to `file:///asset/1` and `file:///asset/2`.
pub const TEST_LIBRARY: &str = r#"{
    "entities": {
        "asset1": {
            "versions": [
                { "traits": { "content.LocatableContent": { "location": "file:///asset/1" } } }
            ]
        },
        "asset2": {
            "versions": [
                { "traits": { "content.LocatableContent": { "location": "file:///asset/2" } } }
            ]
        },
        "nolocation": {
            "versions": [ { "traits": { "other.Trait": {} } } ]
        },
        "my asset": {
            "versions": [
                { "traits": { "content.LocatableContent": { "location": "file:///assets/my%20asset.mov" } } }
            ]
        }
    }
}"#;

pub fn write_library(dir: &Path) -> PathBuf {
    let path = dir.join("test_entity_library.json");
    std::fs::write(&path, TEST_LIBRARY).unwrap();
    path
}

/// Library manager args for `library` using `scheme` references.
pub fn library_args(library: &Path, scheme: &str) -> LinkerArgs {
    let mut settings = Settings::new();
    settings.insert(
        LIBRARY_PATH_SETTING.into(),
        json!(library.to_str().unwrap()),
    );
    settings.insert(SCHEME_SETTING.into(), json!(scheme));
    LinkerArgs::for_manager(LIBRARY_MANAGER_IDENTIFIER, settings)
}

/// Three-clip timeline: two entity references and one plain file URL.
pub fn three_clip_timeline(scheme: &str) -> String {
    let clip = |name: &str, url: &str| {
        format!(
            r#"{{
                "OTIO_SCHEMA": "Clip.1",
                "media_reference": {{
                    "OTIO_SCHEMA": "ExternalReference.1",
                    "target_url": "{url}"
                }},
                "name": "{name}",
                "source_range": {{
                    "OTIO_SCHEMA": "TimeRange.1",
                    "duration": {{ "OTIO_SCHEMA": "RationalTime.1", "rate": 24, "value": 50 }},
                    "start_time": {{ "OTIO_SCHEMA": "RationalTime.1", "rate": 24, "value": 0.0 }}
                }}
            }}"#
        )
    };
    format!(
        r#"{{
            "OTIO_SCHEMA": "Timeline.1",
            "name": "Linker Test",
            "tracks": {{
                "OTIO_SCHEMA": "Stack.1",
                "children": [
                    {{
                        "OTIO_SCHEMA": "Track.1",
                        "kind": "Video",
                        "children": [ {}, {}, {} ]
                    }}
                ]
            }}
        }}"#,
        clip("Asset1", &format!("{scheme}:///asset1")),
        clip("Asset2", &format!("{scheme}:///asset2")),
        clip("NotAnAsset", "file:///not/an/asset"),
    )
}
