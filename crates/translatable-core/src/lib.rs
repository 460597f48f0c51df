//! Core runtime for Translatable: mapping metadata, the lifecycle listener
//! moving values between entities and their per-locale translations, and the
//! locale-aware query builder and repository.
#![warn(unreachable_pub)]

pub mod collection;
pub mod error;
pub mod listener;
pub mod locale;
pub mod mapping;
pub mod model;
pub mod query;
pub mod repository;
pub mod store;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, builders, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        collection::TranslationSet,
        locale::Locale,
        traits::{Entity, FieldAccess, Path, Translatable, Translation},
        value::Value,
    };
}
