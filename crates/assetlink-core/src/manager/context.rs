//! Calling context handed to managers alongside resolution requests.

use std::fmt;

use super::traits::{TraitsData, CLIP_LOCALE_TRAIT, CLIP_NAME_PROPERTY};

/// Intended use of resolved data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// Access mode plus a locale describing where the request comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub access: Access,
    pub locale: TraitsData,
}

impl Context {
    /// Read context with an empty clip locale.
    pub fn for_clip_read() -> Self {
        let mut locale = TraitsData::new();
        locale.add_trait(CLIP_LOCALE_TRAIT);
        Self {
            access: Access::Read,
            locale,
        }
    }

    pub fn set_clip_name(&mut self, name: &str) {
        self.locale
            .set_property(CLIP_LOCALE_TRAIT, CLIP_NAME_PROPERTY, name);
    }

    /// Leaves the clip locale in place without a name.
    pub fn clear_clip_name(&mut self) {
        self.locale
            .remove_property(CLIP_LOCALE_TRAIT, CLIP_NAME_PROPERTY);
    }

    pub fn clip_name(&self) -> Option<&str> {
        self.locale
            .property(CLIP_LOCALE_TRAIT, CLIP_NAME_PROPERTY)
            .and_then(|v| v.as_str())
    }
}
