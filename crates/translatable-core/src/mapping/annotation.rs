///
/// Annotation
///
/// Raw field-level marker read by the metadata extractor; the declarative
/// equivalent of the original `Translatable` / `Language` annotations.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Annotation {
    /// The field's value is stored per-locale on the named translations
    /// association rather than on the entity's own table.
    Translatable {
        /// Association on the owner holding the translation collection.
        mapped_by: String,
        /// Field name on the translation class; defaults to the same name.
        target_field: Option<String>,
    },

    /// The field holds the locale: the transient selector on a translatable
    /// owner, or the persisted locale column on a translation class.
    Language,
}

///
/// FieldMapping
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMapping {
    pub name: String,
    pub persistent: bool,
    pub annotations: Vec<Annotation>,
}

impl FieldMapping {
    #[must_use]
    pub fn is_language(&self) -> bool {
        self.annotations
            .iter()
            .any(|annotation| matches!(annotation, Annotation::Language))
    }

    /// The `(association, target_field)` pair if this field is marked
    /// translatable; target defaults to the field's own name.
    #[must_use]
    pub fn translatable_target(&self) -> Option<(&str, &str)> {
        self.annotations.iter().find_map(|annotation| {
            if let Annotation::Translatable {
                mapped_by,
                target_field,
            } = annotation
            {
                Some((
                    mapped_by.as_str(),
                    target_field.as_deref().unwrap_or(self.name.as_str()),
                ))
            } else {
                None
            }
        })
    }
}

///
/// AssociationKind
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssociationKind {
    OneToMany {
        /// Back-reference property on the target class.
        mapped_by: String,
        /// Collection index key, if the association is indexed.
        index_by: Option<String>,
    },
    ManyToOne,
    OneToOne,
}

///
/// AssociationMapping
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociationMapping {
    pub name: String,
    pub target: &'static str,
    pub kind: AssociationKind,
}

///
/// ClassMapping
///
/// Raw mapping declaration for one class: persistent/transient fields with
/// their annotations plus associations. Declared fluently, read by the
/// extractor and never mutated afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassMapping {
    pub class: &'static str,
    pub fields: Vec<FieldMapping>,
    pub associations: Vec<AssociationMapping>,
}

impl ClassMapping {
    #[must_use]
    pub const fn new(class: &'static str) -> Self {
        Self {
            class,
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Declare a plain field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, persistent: bool) -> Self {
        self.fields.push(FieldMapping {
            name: name.into(),
            persistent,
            annotations: Vec::new(),
        });
        self
    }

    /// Declare a transient live property whose value is stored per-locale on
    /// `mapped_by`, under the same field name on the translation class.
    #[must_use]
    pub fn translatable_field(self, name: impl Into<String>, mapped_by: impl Into<String>) -> Self {
        self.translatable_field_targeting(name, mapped_by, None::<String>)
    }

    /// As `translatable_field`, with an explicit target field name.
    #[must_use]
    pub fn translatable_field_targeting(
        mut self,
        name: impl Into<String>,
        mapped_by: impl Into<String>,
        target_field: Option<impl Into<String>>,
    ) -> Self {
        self.fields.push(FieldMapping {
            name: name.into(),
            persistent: false,
            annotations: vec![Annotation::Translatable {
                mapped_by: mapped_by.into(),
                target_field: target_field.map(Into::into),
            }],
        });
        self
    }

    /// Declare the Language-marked field.
    #[must_use]
    pub fn language_field(mut self, name: impl Into<String>, persistent: bool) -> Self {
        self.fields.push(FieldMapping {
            name: name.into(),
            persistent,
            annotations: vec![Annotation::Language],
        });
        self
    }

    #[must_use]
    pub fn one_to_many(
        mut self,
        name: impl Into<String>,
        target: &'static str,
        mapped_by: impl Into<String>,
        index_by: Option<&str>,
    ) -> Self {
        self.associations.push(AssociationMapping {
            name: name.into(),
            target,
            kind: AssociationKind::OneToMany {
                mapped_by: mapped_by.into(),
                index_by: index_by.map(str::to_string),
            },
        });
        self
    }

    #[must_use]
    pub fn many_to_one(mut self, name: impl Into<String>, target: &'static str) -> Self {
        self.associations.push(AssociationMapping {
            name: name.into(),
            target,
            kind: AssociationKind::ManyToOne,
        });
        self
    }

    #[must_use]
    pub fn one_to_one(mut self, name: impl Into<String>, target: &'static str) -> Self {
        self.associations.push(AssociationMapping {
            name: name.into(),
            target,
            kind: AssociationKind::OneToOne,
        });
        self
    }

    #[must_use]
    pub fn field_mapping(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationMapping> {
        self.associations
            .iter()
            .find(|association| association.name == name)
    }

    /// The first Language-marked field, if any.
    #[must_use]
    pub fn language_property(&self) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.is_language())
    }
}
