use derive_more::{Deref, Display};
use serde::{Deserialize, Deserializer, Serialize};

///
/// Locale
///
/// Non-empty locale code ("en", "pl", "en_GB").
/// An empty string never constructs a `Locale`, so an empty selector read
/// back from an entity cannot mask the fact that no locale was set.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Construct a locale, rejecting empty input.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.is_empty() { None } else { Some(Self(code)) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;

        Self::new(code).ok_or_else(|| serde::de::Error::custom("locale must be non-empty"))
    }
}
