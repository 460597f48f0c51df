use crate::{
    collection::TranslationSet,
    error::{Error, RuntimeError},
    listener::TranslatableListener,
    locale::Locale,
    mapping::MappingRegistry,
    model::TranslationModel,
    query::{JoinKind, OrderDirection, TranslatableQueryBuilder},
    store::EntityStore,
    traits::{FieldAccess, Path, Translatable},
    value::Value,
};
use std::{marker::PhantomData, rc::Rc};

///
/// TranslatableRepository
///
/// Locale-aware finders over one translatable entity class. Queries go
/// through the translatable query builder so conditions and ordering land
/// on translation fields, and every loaded entity is re-hydrated for the
/// effective locale before it is returned.
///

pub struct TranslatableRepository<'a, E, S> {
    registry: &'a MappingRegistry,
    listener: &'a TranslatableListener,
    store: &'a S,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E, S> TranslatableRepository<'a, E, S>
where
    E: Translatable,
    S: EntityStore<E>,
{
    #[must_use]
    pub const fn new(
        registry: &'a MappingRegistry,
        listener: &'a TranslatableListener,
        store: &'a S,
    ) -> Self {
        Self {
            registry,
            listener,
            store,
            _entity: PhantomData,
        }
    }

    ///
    /// Queries
    ///

    /// Start a builder with current and default translations of every
    /// translatable association already joined and selected. The first
    /// association takes the given aliases; later ones get numbered
    /// variants.
    pub fn create_translatable_query_builder(
        &self,
        alias: &str,
        translation_alias: &str,
        default_translation_alias: &str,
    ) -> Result<TranslatableQueryBuilder<'a>, Error> {
        let meta = self.listener.extended_metadata(self.registry, E::PATH)?;
        let mut qb =
            TranslatableQueryBuilder::new(self.registry, self.listener, E::PATH, alias)?;

        let join_default = match (self.listener.locale(), self.listener.default_locale()) {
            (_, None) => false,
            (current, Some(default)) => current != Some(default),
        };

        for (index, association) in meta.translatable_properties.keys().enumerate() {
            let (current_alias, current_param, default_alias, default_param) = if index == 0 {
                (
                    translation_alias.to_string(),
                    "locale".to_string(),
                    default_translation_alias.to_string(),
                    "deflocale".to_string(),
                )
            } else {
                (
                    format!("{translation_alias}{index}"),
                    format!("locale{index}"),
                    format!("{default_translation_alias}{index}"),
                    format!("deflocale{index}"),
                )
            };

            qb.join_and_select_current_translations(
                association,
                JoinKind::Left,
                &current_alias,
                &current_param,
            )?;
            if join_default {
                qb.join_and_select_default_translations(
                    association,
                    JoinKind::Left,
                    &default_alias,
                    &default_param,
                )?;
            }
        }

        Ok(qb)
    }

    /// Find entities matching all criteria in the given locale (or the
    /// current one), ordered and sliced, each re-hydrated for that locale.
    pub fn find_translatable_by(
        &self,
        criteria: &[(&str, Value)],
        order_by: &[(&str, OrderDirection)],
        limit: Option<u64>,
        offset: Option<u64>,
        locale: Option<&Locale>,
    ) -> Result<Vec<E>, Error> {
        let mut qb =
            TranslatableQueryBuilder::new(self.registry, self.listener, E::PATH, "e")?;

        for (field, value) in criteria {
            qb.add_translatable_where(field, value.clone(), locale)?;
        }
        for (field, direction) in order_by {
            qb.add_translatable_order_by(field, *direction, locale)?;
        }
        qb.set_max_results(limit);
        qb.set_first_result(offset);

        let mut results = qb.evaluate(self.store.load_all());
        for entity in &mut results {
            match locale {
                Some(locale) => self.listener.load_translation(self.registry, entity, locale)?,
                None => self.listener.post_load(self.registry, entity)?,
            }
        }

        Ok(results)
    }

    /// Like [`Self::find_translatable_by`] but demands exactly one match.
    pub fn find_translatable_one_by(
        &self,
        criteria: &[(&str, Value)],
        locale: Option<&Locale>,
    ) -> Result<E, Error> {
        let mut results = self.find_translatable_by(criteria, &[], None, None, locale)?;

        match results.len() {
            0 => Err(RuntimeError::NoResult.into()),
            1 => results.pop().ok_or_else(|| RuntimeError::NoResult.into()),
            _ => Err(RuntimeError::NonUniqueResult.into()),
        }
    }

    ///
    /// Translation access
    ///

    /// Get the translation for `locale`, creating an empty one in the
    /// collection if it does not exist yet. Idempotent: a second call with
    /// the same locale returns the same entry.
    pub fn get_translation<'e>(
        &self,
        entity: &'e mut E,
        locale: &Locale,
        association: &str,
    ) -> Result<&'e mut E::Translation, Error> {
        let translation_meta = self.translation_metadata(association)?;
        let locale_property = translation_meta.locale_property.clone();
        let mapped_by = translation_meta.mapped_by.clone();
        let key = entity.primary_key();

        let collection = entity.translations_mut(association).ok_or_else(|| {
            RuntimeError::MissingTranslationCollection {
                class: E::PATH.to_string(),
                association: association.to_string(),
            }
        })?;

        if collection.find(&locale_property, locale).is_none() {
            let mut translation = E::Translation::default();
            if !translation.set_field(&locale_property, Value::Text(locale.to_string())) {
                return Err(RuntimeError::UnknownField {
                    class: <E::Translation as Path>::PATH.to_string(),
                    field: locale_property,
                }
                .into());
            }
            if !translation.set_field(&mapped_by, key) {
                return Err(RuntimeError::UnknownField {
                    class: <E::Translation as Path>::PATH.to_string(),
                    field: mapped_by,
                }
                .into());
            }

            if translation_meta.indexed_by_locale {
                collection.insert_keyed(&locale_property, translation);
            } else {
                collection.push(translation);
            }
        }

        collection.find_mut(&locale_property, locale).ok_or_else(|| {
            RuntimeError::UnknownField {
                class: <E::Translation as Path>::PATH.to_string(),
                field: locale_property,
            }
            .into()
        })
    }

    /// Look up the translation for `locale` without creating one.
    pub fn find_translation<'e>(
        &self,
        entity: &'e E,
        locale: &Locale,
        association: &str,
    ) -> Result<Option<&'e E::Translation>, Error> {
        let translation_meta = self.translation_metadata(association)?;
        let collection = self.get_translations(entity, association)?;

        Ok(collection.find(&translation_meta.locale_property, locale))
    }

    pub fn has_translation(
        &self,
        entity: &E,
        locale: &Locale,
        association: &str,
    ) -> Result<bool, Error> {
        self.find_translation(entity, locale, association)
            .map(|translation| translation.is_some())
    }

    /// Borrow the whole translation collection of the association.
    pub fn get_translations<'e>(
        &self,
        entity: &'e E,
        association: &str,
    ) -> Result<&'e TranslationSet<E::Translation>, Error> {
        self.translation_metadata(association)?;

        entity.translations(association).ok_or_else(|| {
            RuntimeError::MissingTranslationCollection {
                class: E::PATH.to_string(),
                association: association.to_string(),
            }
            .into()
        })
    }

    /// Validate that the association is a translatable one on this class
    /// and hand back its translation metadata.
    fn translation_metadata(&self, association: &str) -> Result<Rc<TranslationModel>, Error> {
        let meta = self.listener.extended_metadata(self.registry, E::PATH)?;
        if !meta.translatable_properties.contains_key(association) {
            return Err(RuntimeError::UnknownTranslationAssociation {
                class: E::PATH.to_string(),
                association: association.to_string(),
            }
            .into());
        }

        let translation_meta =
            self.listener
                .extractor()
                .translation_metadata(self.registry, E::PATH, association)?;

        Ok(translation_meta)
    }
}
