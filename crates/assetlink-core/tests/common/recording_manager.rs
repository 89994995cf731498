//! Manager double that records how it is used.

use assetlink_core::host::HostInterface;
use assetlink_core::manager::{
    Capability, Context, EntityReference, Manager, ManagerError, Settings, TraitSet, TraitsData,
    LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const RECORDING_IDENTIFIER: &str = "org.test.recording";

/// Observations shared between the test and every manager it constructs.
#[derive(Debug, Default)]
pub struct Recorder {
    pub initializations: Cell<usize>,
    pub hosts: RefCell<Vec<String>>,
    /// Clip name from the locale of each resolve call, None when unnamed.
    pub locales: RefCell<Vec<Option<String>>>,
}

/// Resolves `rec:///<name>` from a fixed table; `rec:///fail` errors.
pub struct RecordingManager {
    recorder: Rc<Recorder>,
    locations: BTreeMap<String, String>,
}

impl RecordingManager {
    pub fn new(recorder: Rc<Recorder>) -> Self {
        let locations = [
            ("rec:///asset1", "file:///asset/1"),
            ("rec:///asset2", "file:///asset/2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { recorder, locations }
    }
}

impl Manager for RecordingManager {
    fn identifier(&self) -> &str {
        RECORDING_IDENTIFIER
    }

    fn display_name(&self) -> &str {
        "Recording"
    }

    fn initialize(
        &mut self,
        _settings: &Settings,
        host: &dyn HostInterface,
    ) -> Result<(), ManagerError> {
        self.recorder
            .initializations
            .set(self.recorder.initializations.get() + 1);
        self.recorder.hosts.borrow_mut().push(host.identifier().to_string());
        Ok(())
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::Resolution | Capability::EntityReferenceIdentification
        )
    }

    fn is_entity_reference(&self, candidate: &str) -> bool {
        candidate.starts_with("rec:///")
    }

    fn resolve(
        &self,
        reference: &EntityReference,
        trait_set: &TraitSet,
        context: &Context,
    ) -> Result<TraitsData, ManagerError> {
        self.recorder
            .locales
            .borrow_mut()
            .push(context.clip_name().map(str::to_string));
        if reference.as_str() == "rec:///fail" {
            return Err(ManagerError::Other("backend unavailable".into()));
        }
        let mut data = TraitsData::new();
        if let Some(location) = self.locations.get(reference.as_str()) {
            if trait_set.contains(LOCATABLE_CONTENT_TRAIT) {
                data.set_property(LOCATABLE_CONTENT_TRAIT, LOCATION_PROPERTY, location.as_str());
            }
        }
        Ok(data)
    }
}
