///
/// TranslationModel
///
/// Resolved metadata for one (owner, association) pair: where translations
/// live and how they are keyed. Derived by the extractor from the owner's
/// association mapping and the target class's own metadata.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranslationModel {
    /// Translation class path.
    pub target: String,

    /// Persisted locale column on the translation class.
    pub locale_property: String,

    /// Back-reference property on the translation class.
    pub mapped_by: String,

    /// True iff the association's index key equals `locale_property`,
    /// enabling unique-by-locale collection semantics.
    pub indexed_by_locale: bool,
}
