use crate::{
    error::MappingError,
    mapping::{Annotation, AssociationKind, MappingRegistry},
    model::{TranslatableClassModel, TranslationModel},
};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

///
/// MetadataExtractor
///
/// Reads raw annotations and association mappings, validates their shape,
/// and produces immutable metadata models. Results are cached for the
/// process lifetime; repeated extraction for a class is O(1) and returns
/// the same `Rc`. Single-threaded by design, matching the host's
/// one-unit-of-work-in-flight model.
///

#[derive(Debug, Default)]
pub struct MetadataExtractor {
    classes: RefCell<BTreeMap<String, Rc<TranslatableClassModel>>>,
    translations: RefCell<BTreeMap<(String, String), Rc<TranslationModel>>>,
}

impl MetadataExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes: RefCell::new(BTreeMap::new()),
            translations: RefCell::new(BTreeMap::new()),
        }
    }

    /// Validated translatable metadata for `class`, building and caching it
    /// on first access.
    pub fn extended_metadata(
        &self,
        registry: &MappingRegistry,
        class: &str,
    ) -> Result<Rc<TranslatableClassModel>, MappingError> {
        if let Some(model) = self.classes.borrow().get(class) {
            return Ok(model.clone());
        }

        let model = Rc::new(Self::build_class_model(registry, class)?);
        self.classes
            .borrow_mut()
            .insert(class.to_string(), model.clone());

        Ok(model)
    }

    /// Resolved translation metadata for one association of `class`,
    /// building and caching it on first access. Extraction of the target
    /// class runs first, so translation-class validation applies.
    pub fn translation_metadata(
        &self,
        registry: &MappingRegistry,
        class: &str,
        association: &str,
    ) -> Result<Rc<TranslationModel>, MappingError> {
        let key = (class.to_string(), association.to_string());
        if let Some(model) = self.translations.borrow().get(&key) {
            return Ok(model.clone());
        }

        let model = Rc::new(self.build_translation_model(registry, class, association)?);
        self.translations.borrow_mut().insert(key, model.clone());

        Ok(model)
    }

    fn build_class_model(
        registry: &MappingRegistry,
        class: &str,
    ) -> Result<TranslatableClassModel, MappingError> {
        let mapping = registry.expect(class)?;

        let mut translatable: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for field in &mapping.fields {
            for annotation in &field.annotations {
                if let Annotation::Translatable {
                    mapped_by,
                    target_field,
                } = annotation
                {
                    translatable.entry(mapped_by.clone()).or_default().insert(
                        field.name.clone(),
                        target_field.clone().unwrap_or_else(|| field.name.clone()),
                    );
                }
            }
        }

        let language = mapping.language_property();

        if translatable.is_empty() {
            // A class with a Language field and no translatable properties is
            // a translation class; its locale column must be persisted.
            if let Some(field) = language {
                if !field.persistent {
                    return Err(MappingError::TransientTranslationLocale {
                        class: class.to_string(),
                        field: field.name.clone(),
                    });
                }
            }
        } else {
            let Some(field) = language else {
                return Err(MappingError::MissingLanguageProperty {
                    class: class.to_string(),
                });
            };

            // The owner's locale field is a transient selector, never a column.
            if field.persistent {
                return Err(MappingError::PersistentLocaleProperty {
                    class: class.to_string(),
                    field: field.name.clone(),
                });
            }

            for association in translatable.keys() {
                let kind = mapping.association(association).map(|mapping| &mapping.kind);
                if !matches!(kind, Some(AssociationKind::OneToMany { .. })) {
                    return Err(MappingError::NotOneToMany {
                        class: class.to_string(),
                        association: association.clone(),
                    });
                }
            }
        }

        Ok(TranslatableClassModel {
            class: class.to_string(),
            translatable_properties: translatable,
            locale_property: language.map(|field| field.name.clone()),
        })
    }

    fn build_translation_model(
        &self,
        registry: &MappingRegistry,
        class: &str,
        association: &str,
    ) -> Result<TranslationModel, MappingError> {
        let mapping = registry.expect(class)?;

        let Some(association_mapping) = mapping.association(association) else {
            return Err(MappingError::UnknownAssociation {
                class: class.to_string(),
                association: association.to_string(),
            });
        };

        let AssociationKind::OneToMany {
            mapped_by,
            index_by,
        } = &association_mapping.kind
        else {
            return Err(MappingError::NotOneToMany {
                class: class.to_string(),
                association: association.to_string(),
            });
        };

        let target_model = self.extended_metadata(registry, association_mapping.target)?;
        let Some(locale_property) = target_model.locale_property.clone() else {
            return Err(MappingError::MissingTranslationLocale {
                class: association_mapping.target.to_string(),
            });
        };

        Ok(TranslationModel {
            target: association_mapping.target.to_string(),
            indexed_by_locale: index_by.as_deref() == Some(locale_property.as_str()),
            locale_property,
            mapped_by: mapped_by.clone(),
        })
    }
}
