use crate::{collection::TranslationSet, value::Value};

///
/// Path
/// Fully-qualified class path used as mapping identity.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldAccess
///
/// The accessor registry: read/write a field by its logical name.
/// Replaces reflection-based property access; implementors enumerate their
/// fields explicitly. `set_field` returns `false` for unknown fields or
/// values the field cannot hold.
///

pub trait FieldAccess {
    fn get_field(&self, field: &str) -> Option<Value>;

    fn set_field(&mut self, field: &str, value: Value) -> bool;
}

/// Marker for mapped entity types.
pub trait Entity: Path + FieldAccess {}
impl<T> Entity for T where T: Path + FieldAccess {}

///
/// Translation
///
/// A per-locale record: locale + translated field values + a back-reference
/// to its owner. `Default` gives the lazy-creation path a blank instance to
/// fill in.
///

pub trait Translation: Entity + Clone + Default {}
impl<T> Translation for T where T: Entity + Clone + Default {}

///
/// Translatable
///
/// An entity owning per-locale translations through named to-many
/// associations. The live scalar properties mirroring translatable fields
/// are transient views of one locale's translation, moved in and out by the
/// lifecycle listener.
///

pub trait Translatable: Entity {
    type Translation: Translation;

    /// Primary-key value, stored on created translations as the
    /// back-reference to this entity.
    fn primary_key(&self) -> Value;

    /// The translation collection behind `association`, if the entity
    /// exposes one under that name.
    fn translations(&self, association: &str) -> Option<&TranslationSet<Self::Translation>>;

    fn translations_mut(
        &mut self,
        association: &str,
    ) -> Option<&mut TranslationSet<Self::Translation>>;
}
