use crate::{
    error::{Error, MappingError, RuntimeError},
    locale::Locale,
    mapping::{MappingRegistry, MetadataExtractor},
    model::TranslatableClassModel,
    traits::{FieldAccess, Path, Translatable},
    value::Value,
};
use std::rc::Rc;

///
/// TranslatableListener
///
/// Lifecycle hook component moving translated values between live entity
/// properties and per-locale translation records. Constructed once and
/// passed by reference to whatever orchestrates load/flush; it is never
/// looked up by type at runtime.
///
/// Hooks, in host lifecycle order:
/// - `load_class_metadata` after mapping load (warms the extractor cache)
/// - `post_load` after an entity is hydrated (copy-in)
/// - `pre_flush` before the unit of work writes (copy-out)
///

#[derive(Debug, Default)]
pub struct TranslatableListener {
    extractor: MetadataExtractor,
    locale: Option<Locale>,
    default_locale: Option<Locale>,
}

impl TranslatableListener {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extractor: MetadataExtractor::new(),
            locale: None,
            default_locale: None,
        }
    }

    ///
    /// Locale configuration
    ///

    pub fn set_locale(&mut self, locale: Option<Locale>) {
        self.locale = locale;
    }

    #[must_use]
    pub const fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn set_default_locale(&mut self, locale: Option<Locale>) {
        self.default_locale = locale;
    }

    #[must_use]
    pub const fn default_locale(&self) -> Option<&Locale> {
        self.default_locale.as_ref()
    }

    #[must_use]
    pub const fn extractor(&self) -> &MetadataExtractor {
        &self.extractor
    }

    ///
    /// Metadata
    ///

    /// Metadata-load hook: populates the extractor cache so later hooks
    /// never pay first-access cost mid-transaction.
    pub fn load_class_metadata(
        &self,
        registry: &MappingRegistry,
        class: &str,
    ) -> Result<(), MappingError> {
        self.extractor.extended_metadata(registry, class).map(|_| ())
    }

    pub fn extended_metadata(
        &self,
        registry: &MappingRegistry,
        class: &str,
    ) -> Result<Rc<TranslatableClassModel>, MappingError> {
        self.extractor.extended_metadata(registry, class)
    }

    ///
    /// Copy-in (storage -> live properties)
    ///

    /// Post-load hook: populate live properties from the translation for
    /// the resolved read locale, falling back to the default locale. The
    /// entity's locale selector is left reflecting the locale actually
    /// used, so callers can read back which locale's content is displayed.
    pub fn post_load<E: Translatable>(
        &self,
        registry: &MappingRegistry,
        entity: &mut E,
    ) -> Result<(), Error> {
        self.copy_in(registry, entity, None)
    }

    /// Re-run copy-in for one explicitly named locale, bypassing both the
    /// resolved read locale and the default fallback.
    pub fn load_translation<E: Translatable>(
        &self,
        registry: &MappingRegistry,
        entity: &mut E,
        locale: &Locale,
    ) -> Result<(), Error> {
        self.copy_in(registry, entity, Some(locale))
    }

    fn copy_in<E: Translatable>(
        &self,
        registry: &MappingRegistry,
        entity: &mut E,
        explicit: Option<&Locale>,
    ) -> Result<(), Error> {
        let meta = self.extended_metadata(registry, E::PATH)?;
        if !meta.has_translatable_properties() {
            return Ok(());
        }

        let primary = explicit
            .cloned()
            .or_else(|| Self::object_locale(entity, &meta))
            .or_else(|| self.locale.clone());

        for (association, properties) in &meta.translatable_properties {
            let translation_meta =
                self.extractor
                    .translation_metadata(registry, E::PATH, association)?;

            let mut candidates = Vec::new();
            if let Some(primary) = &primary {
                candidates.push(primary.clone());
            }
            if explicit.is_none() {
                if let Some(default) = &self.default_locale {
                    if !candidates.contains(default) {
                        candidates.push(default.clone());
                    }
                }
            }

            // Values are collected before any write so the collection
            // borrow ends first.
            let mut found: Option<(Locale, Vec<(String, Value)>)> = None;
            {
                let collection = entity.translations(association).ok_or_else(|| {
                    RuntimeError::MissingTranslationCollection {
                        class: E::PATH.to_string(),
                        association: association.clone(),
                    }
                })?;

                for locale in candidates {
                    if let Some(translation) =
                        collection.find(&translation_meta.locale_property, &locale)
                    {
                        let values = properties
                            .iter()
                            .map(|(property, target)| {
                                let value =
                                    translation.get_field(target).unwrap_or(Value::Unit);
                                (property.clone(), value)
                            })
                            .collect();
                        found = Some((locale, values));
                        break;
                    }
                }
            }

            match found {
                Some((locale, values)) => {
                    for (property, value) in values {
                        Self::write_field(entity, &property, value)?;
                    }
                    if let Some(selector) = &meta.locale_property {
                        Self::write_field(entity, selector, Value::Text(locale.to_string()))?;
                    }
                }
                None => {
                    // No translation for any candidate locale: live
                    // properties stay at their unset default.
                    for property in properties.keys() {
                        Self::write_field(entity, property, Value::Unit)?;
                    }
                    if let (Some(selector), Some(primary)) = (&meta.locale_property, &primary) {
                        Self::write_field(
                            entity,
                            selector,
                            Value::Text(primary.to_string()),
                        )?;
                    }
                }
            }
        }

        Ok(())
    }

    ///
    /// Copy-out (live properties -> storage)
    ///

    /// Pre-flush hook: copy live translatable values into the translation
    /// record for the resolved write locale, creating the record lazily.
    /// An association with every live value unset is a no-op. Resolving no
    /// write locale while values are pending is an error.
    pub fn pre_flush<E: Translatable>(
        &self,
        registry: &MappingRegistry,
        entity: &mut E,
    ) -> Result<(), Error> {
        let meta = self.extended_metadata(registry, E::PATH)?;
        if !meta.has_translatable_properties() {
            return Ok(());
        }

        let object_locale = Self::object_locale(entity, &meta);

        for (association, properties) in &meta.translatable_properties {
            let translation_meta =
                self.extractor
                    .translation_metadata(registry, E::PATH, association)?;

            let values: Vec<(String, Value)> = properties
                .iter()
                .map(|(property, target)| {
                    let value = entity.get_field(property).unwrap_or(Value::Unit);
                    (target.clone(), value)
                })
                .collect();

            if values.iter().all(|(_, value)| value.is_unit()) {
                continue;
            }

            // Write path: entity override, else current; default never applies.
            let locale = object_locale
                .clone()
                .or_else(|| self.locale.clone())
                .ok_or(RuntimeError::LocaleNotSet)?;

            let owner_key = entity.primary_key();
            let locale_property = translation_meta.locale_property.clone();
            let collection = entity.translations_mut(association).ok_or_else(|| {
                RuntimeError::MissingTranslationCollection {
                    class: E::PATH.to_string(),
                    association: association.clone(),
                }
            })?;

            if collection.find(&locale_property, &locale).is_none() {
                let mut translation = E::Translation::default();
                if !translation.set_field(&locale_property, Value::Text(locale.to_string())) {
                    return Err(RuntimeError::UnknownField {
                        class: <E::Translation as Path>::PATH.to_string(),
                        field: locale_property,
                    }
                    .into());
                }
                if !translation.set_field(&translation_meta.mapped_by, owner_key) {
                    return Err(RuntimeError::UnknownField {
                        class: <E::Translation as Path>::PATH.to_string(),
                        field: translation_meta.mapped_by.clone(),
                    }
                    .into());
                }

                if translation_meta.indexed_by_locale {
                    collection.insert_keyed(&locale_property, translation);
                } else {
                    collection.push(translation);
                }
            }

            let translation = collection.find_mut(&locale_property, &locale).ok_or_else(|| {
                RuntimeError::UnknownField {
                    class: <E::Translation as Path>::PATH.to_string(),
                    field: locale_property.clone(),
                }
            })?;
            for (target, value) in values {
                if !translation.set_field(&target, value) {
                    return Err(RuntimeError::UnknownField {
                        class: <E::Translation as Path>::PATH.to_string(),
                        field: target,
                    }
                    .into());
                }
            }
        }

        Ok(())
    }

    ///
    /// Locale resolution
    ///

    fn object_locale<E: Translatable>(
        entity: &E,
        meta: &TranslatableClassModel,
    ) -> Option<Locale> {
        meta.locale_property
            .as_ref()
            .and_then(|property| entity.get_field(property))
            .and_then(|value| value.as_locale())
    }

    fn write_field<E: Translatable>(
        entity: &mut E,
        field: &str,
        value: Value,
    ) -> Result<(), Error> {
        if entity.set_field(field, value) {
            Ok(())
        } else {
            Err(RuntimeError::UnknownField {
                class: E::PATH.to_string(),
                field: field.to_string(),
            }
            .into())
        }
    }
}
