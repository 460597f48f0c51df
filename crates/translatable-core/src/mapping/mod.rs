//! Raw mapping declarations and the metadata extractor that validates them.

mod annotation;
mod extract;
mod registry;

pub use annotation::{
    Annotation, AssociationKind, AssociationMapping, ClassMapping, FieldMapping,
};
pub use extract::MetadataExtractor;
pub use registry::MappingRegistry;
