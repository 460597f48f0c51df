use crate::{error::MappingError, mapping::ClassMapping};
use std::collections::BTreeMap;

///
/// MappingRegistry
///
/// The host's class-metadata provider: class path to raw mapping.
/// Populated at startup, read-only afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct MappingRegistry {
    classes: BTreeMap<&'static str, ClassMapping>,
}

impl MappingRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Register a class mapping, replacing any previous mapping for the
    /// same class path.
    pub fn register(&mut self, mapping: ClassMapping) {
        self.classes.insert(mapping.class, mapping);
    }

    #[must_use]
    pub fn get(&self, class: &str) -> Option<&ClassMapping> {
        self.classes.get(class)
    }

    pub fn expect(&self, class: &str) -> Result<&ClassMapping, MappingError> {
        self.get(class).ok_or_else(|| MappingError::UnknownClass {
            class: class.to_string(),
        })
    }
}
