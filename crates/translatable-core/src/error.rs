use thiserror::Error as ThisError;

///
/// MappingError
///
/// Malformed entity or translation mapping detected at first metadata
/// extraction. Raised once per offending class; the mapping must be fixed,
/// retrying extraction never succeeds differently.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MappingError {
    #[error(
        "Entity '{class}' has translatable properties so it must have property marked with Language annotation"
    )]
    MissingLanguageProperty { class: String },

    #[error("Field '{association}' in entity '{class}' has to be a OneToMany association")]
    NotOneToMany { class: String, association: String },

    #[error(
        "Entity '{class}' seems to be a translatable entity so its '{field}' field must not be persistent"
    )]
    PersistentLocaleProperty { class: String, field: String },

    #[error(
        "Entity '{class}' seems to be a translation entity so its '{field}' field must be persistent"
    )]
    TransientTranslationLocale { class: String, field: String },

    #[error(
        "Entity '{class}' seems to be a translation entity so it must have a field marked with Language annotation"
    )]
    MissingTranslationLocale { class: String },

    #[error("Entity '{class}' is not registered in the mapping registry")]
    UnknownClass { class: String },

    #[error("Entity '{class}' has no association named '{association}'")]
    UnknownAssociation { class: String, association: String },
}

///
/// RuntimeError
///
/// Operational misuse of a correctly-mapped class. Always fatal to the
/// in-progress flush or query; the caller's transaction boundary decides
/// what was actually persisted.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RuntimeError {
    #[error("Neither object's locale nor the current locale was set for translatable properties")]
    LocaleNotSet,

    #[error("Entity '{class}' has no translations association named '{association}'")]
    UnknownTranslationAssociation { class: String, association: String },

    #[error("Entity '{class}' must expose a translation collection in '{association}' association")]
    MissingTranslationCollection { class: String, association: String },

    #[error("Entity '{class}' has no field named '{field}'")]
    UnknownField { class: String, field: String },

    #[error("query returned no result")]
    NoResult,

    #[error("query returned more than one result")]
    NonUniqueResult,
}

///
/// Error
///
/// Umbrella error for operations that can fail either way.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }
}
