use crate::{locale::Locale, traits::Translation};
use derive_more::Deref;

///
/// TranslationSet
///
/// In-memory to-many collection of translation instances.
/// Locale-indexed associations use `insert_keyed` (unique by locale,
/// ascending locale order); non-indexed associations use `push` (append
/// only). Lookup reads each entry's locale through its accessor registry,
/// so the locale property name travels with every call.
///

#[derive(Clone, Debug, Deref, PartialEq)]
#[repr(transparent)]
pub struct TranslationSet<T>(Vec<T>);

impl<T> TranslationSet<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }

    /// Append an entry without any uniqueness check (non-indexed
    /// association semantics).
    pub fn push(&mut self, translation: T) {
        self.0.push(translation);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Remove the entry at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }
}

impl<T: Translation> TranslationSet<T> {
    fn locale_of(entry: &T, locale_property: &str) -> Option<Locale> {
        entry
            .get_field(locale_property)
            .and_then(|value| value.as_locale())
    }

    /// Find the entry whose locale property equals `locale`.
    #[must_use]
    pub fn find(&self, locale_property: &str, locale: &Locale) -> Option<&T> {
        self.0
            .iter()
            .find(|entry| Self::locale_of(entry, locale_property).as_ref() == Some(locale))
    }

    #[must_use]
    pub fn find_mut(&mut self, locale_property: &str, locale: &Locale) -> Option<&mut T> {
        self.0
            .iter_mut()
            .find(|entry| Self::locale_of(entry, locale_property).as_ref() == Some(locale))
    }

    /// Insert keyed by the entry's own locale: replaces a same-locale entry,
    /// otherwise inserts in ascending locale order (locale-indexed
    /// association semantics).
    pub fn insert_keyed(&mut self, locale_property: &str, translation: T) {
        let locale = Self::locale_of(&translation, locale_property);

        if let Some(index) = self
            .0
            .iter()
            .position(|entry| Self::locale_of(entry, locale_property) == locale)
        {
            self.0[index] = translation;
            return;
        }

        let at = self
            .0
            .iter()
            .position(|entry| Self::locale_of(entry, locale_property) > locale)
            .unwrap_or(self.0.len());
        self.0.insert(at, translation);
    }

    /// Locales present in the collection, in entry order.
    #[must_use]
    pub fn locales(&self, locale_property: &str) -> Vec<Locale> {
        self.0
            .iter()
            .filter_map(|entry| Self::locale_of(entry, locale_property))
            .collect()
    }
}

impl<T> Default for TranslationSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for TranslationSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
