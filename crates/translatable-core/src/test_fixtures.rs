use crate::{
    collection::TranslationSet,
    locale::Locale,
    mapping::{ClassMapping, MappingRegistry},
    traits::{FieldAccess, Path, Translatable},
    value::Value,
};

///
/// Article / ArticleTranslation
///
/// Canonical translatable fixture pair: three translatable properties, a
/// transient locale selector, and a locale-indexed translations
/// association.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Article {
    pub id: u64,
    pub date: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub contents: Option<String>,
    pub locale: Option<Locale>,
    pub translations: TranslationSet<ArticleTranslation>,
}

impl Path for Article {
    const PATH: &'static str = "fixtures::Article";
}

fn opt_text(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map_or(Value::Unit, |text| Value::Text(text.clone()))
}

fn opt_locale(value: &Option<Locale>) -> Value {
    value
        .as_ref()
        .map_or(Value::Unit, |locale| Value::Text(locale.to_string()))
}

impl FieldAccess for Article {
    fn get_field(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "date" => Some(opt_text(&self.date)),
            "title" => Some(opt_text(&self.title)),
            "subtitle" => Some(opt_text(&self.subtitle)),
            "contents" => Some(opt_text(&self.contents)),
            "locale" => Some(opt_locale(&self.locale)),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: Value) -> bool {
        match field {
            "id" => {
                if let Value::Uint(id) = value {
                    self.id = id;
                    true
                } else {
                    false
                }
            }
            "date" => {
                self.date = value.as_text().map(str::to_string);
                true
            }
            "title" => {
                self.title = value.as_text().map(str::to_string);
                true
            }
            "subtitle" => {
                self.subtitle = value.as_text().map(str::to_string);
                true
            }
            "contents" => {
                self.contents = value.as_text().map(str::to_string);
                true
            }
            "locale" => {
                self.locale = value.as_locale();
                true
            }
            _ => false,
        }
    }
}

impl Translatable for Article {
    type Translation = ArticleTranslation;

    fn primary_key(&self) -> Value {
        Value::Uint(self.id)
    }

    fn translations(&self, association: &str) -> Option<&TranslationSet<ArticleTranslation>> {
        (association == "translations").then_some(&self.translations)
    }

    fn translations_mut(
        &mut self,
        association: &str,
    ) -> Option<&mut TranslationSet<ArticleTranslation>> {
        (association == "translations").then_some(&mut self.translations)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ArticleTranslation {
    pub article: Value,
    pub locale: Option<Locale>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub contents: Option<String>,
}

impl Path for ArticleTranslation {
    const PATH: &'static str = "fixtures::ArticleTranslation";
}

impl FieldAccess for ArticleTranslation {
    fn get_field(&self, field: &str) -> Option<Value> {
        match field {
            "article" => Some(self.article.clone()),
            "locale" => Some(opt_locale(&self.locale)),
            "title" => Some(opt_text(&self.title)),
            "subtitle" => Some(opt_text(&self.subtitle)),
            "contents" => Some(opt_text(&self.contents)),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: Value) -> bool {
        match field {
            "article" => {
                self.article = value;
                true
            }
            "locale" => {
                self.locale = value.as_locale();
                true
            }
            "title" => {
                self.title = value.as_text().map(str::to_string);
                true
            }
            "subtitle" => {
                self.subtitle = value.as_text().map(str::to_string);
                true
            }
            "contents" => {
                self.contents = value.as_text().map(str::to_string);
                true
            }
            _ => false,
        }
    }
}

/// Registry with the Article pair mapped, translations indexed by locale.
pub(crate) fn registry() -> MappingRegistry {
    registry_with_index(Some("locale"))
}

/// Registry variant controlling the association's index key.
pub(crate) fn registry_with_index(index_by: Option<&str>) -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry.register(
        ClassMapping::new(Article::PATH)
            .field("id", true)
            .field("date", true)
            .translatable_field("title", "translations")
            .translatable_field("subtitle", "translations")
            .translatable_field("contents", "translations")
            .language_field("locale", false)
            .one_to_many("translations", ArticleTranslation::PATH, "article", index_by),
    );
    registry.register(
        ClassMapping::new(ArticleTranslation::PATH)
            .field("title", true)
            .field("subtitle", true)
            .field("contents", true)
            .language_field("locale", true)
            .many_to_one("article", Article::PATH),
    );
    registry
}

pub(crate) fn locale(code: &str) -> Locale {
    Locale::new(code).unwrap()
}

pub(crate) fn article(id: u64) -> Article {
    Article {
        id,
        date: Some("2015-01-10".to_string()),
        ..Article::default()
    }
}

pub(crate) fn translation(owner: u64, code: &str, title: &str, contents: &str) -> ArticleTranslation {
    ArticleTranslation {
        article: Value::Uint(owner),
        locale: Locale::new(code),
        title: Some(title.to_string()),
        subtitle: None,
        contents: Some(contents.to_string()),
    }
}
