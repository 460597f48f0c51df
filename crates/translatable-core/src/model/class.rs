use std::collections::BTreeMap;

///
/// TranslatableClassModel
///
/// Validated per-class translatable metadata: which associations carry
/// translations, which live properties map onto which translation fields,
/// and the transient locale-selector property. Built once by the extractor,
/// read-only afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranslatableClassModel {
    pub class: String,

    /// association name -> (live property -> field on the translation class)
    pub translatable_properties: BTreeMap<String, BTreeMap<String, String>>,

    /// Language-marked field. Transient selector on a translatable owner,
    /// persisted locale column on a translation class.
    pub locale_property: Option<String>,
}

impl TranslatableClassModel {
    #[must_use]
    pub fn has_translatable_properties(&self) -> bool {
        !self.translatable_properties.is_empty()
    }

    #[must_use]
    pub fn properties_of(&self, association: &str) -> Option<&BTreeMap<String, String>> {
        self.translatable_properties.get(association)
    }

    /// Resolve a live property name to its `(association, target_field)`
    /// pair, if the property is translatable.
    #[must_use]
    pub fn translatable_field(&self, property: &str) -> Option<(String, String)> {
        self.translatable_properties
            .iter()
            .find_map(|(association, properties)| {
                properties
                    .get(property)
                    .map(|target| (association.clone(), target.clone()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> TranslatableClassModel {
        let mut properties = BTreeMap::new();
        properties.insert("translations".to_string(), {
            let mut fields = BTreeMap::new();
            fields.insert("title".to_string(), "title".to_string());
            fields.insert("body".to_string(), "contents".to_string());
            fields
        });

        TranslatableClassModel {
            class: "app::Post".to_string(),
            translatable_properties: properties,
            locale_property: Some("locale".to_string()),
        }
    }

    #[test]
    fn resolves_translatable_fields_with_targets() {
        let model = model();

        assert_eq!(
            model.translatable_field("body"),
            Some(("translations".to_string(), "contents".to_string()))
        );
        assert_eq!(model.translatable_field("id"), None);
        assert!(model.has_translatable_properties());
    }
}
