//! Translatable — per-locale translation management for entity persistence
//! runtimes.
//!
//! This is the public meta-crate. Downstream users depend on **translatable**
//! only. It re-exports the stable public API from `translatable-core`:
//! mapping metadata, the lifecycle listener, the translatable query builder,
//! and the locale-aware repository.

pub use translatable_core as core;

pub use translatable_core::{
    collection::TranslationSet,
    error::{Error, MappingError, RuntimeError},
    listener::TranslatableListener,
    locale::Locale,
    mapping::{
        Annotation, AssociationKind, AssociationMapping, ClassMapping, FieldMapping,
        MappingRegistry, MetadataExtractor,
    },
    model::{TranslatableClassModel, TranslationModel},
    query::{Cmp, JoinKind, OrderDirection, TranslatableQueryBuilder},
    repository::TranslatableRepository,
    store::EntityStore,
    traits::{Entity, FieldAccess, Path, Translatable, Translation},
    value::{FieldValue, Value},
};

pub mod prelude {
    pub use translatable_core::prelude::*;
}
