use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Value
///
/// Dynamic scalar moved through the accessor registry and the query layer.
/// `Unit` encodes null/absent; a field whose live value is unset reads as
/// `Unit` and writing `Unit` clears it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }

    /// Read the value as a locale; empty text yields `None`.
    #[must_use]
    pub fn as_locale(&self) -> Option<Locale> {
        self.as_text().and_then(Locale::new)
    }

    /// Ordered comparison within a value family.
    /// Signed/unsigned integers compare numerically; any other cross-family
    /// pair is incomparable and yields `None`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Unit, Self::Unit) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Uint(b)) => Some(cmp_int_uint(*a, *b)),
            (Self::Uint(a), Self::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality used by predicate evaluation: family-aware, so
    /// `Int(3) == Uint(3)`.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

fn cmp_int_uint(a: i64, b: u64) -> Ordering {
    u64::try_from(a).map_or(Ordering::Less, |a| a.cmp(&b))
}

///
/// FieldValue
///
/// Conversion into a `Value` for ergonomic call sites; mirrors the accepted
/// input of filter clauses and field writes.
///

pub trait FieldValue {
    fn to_value(self) -> Value;
}

impl FieldValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl FieldValue for () {
    fn to_value(self) -> Value {
        Value::Unit
    }
}

impl FieldValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FieldValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl FieldValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl FieldValue for u32 {
    fn to_value(self) -> Value {
        Value::Uint(u64::from(self))
    }
}

impl FieldValue for u64 {
    fn to_value(self) -> Value {
        Value::Uint(self)
    }
}

impl FieldValue for &str {
    fn to_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl FieldValue for Locale {
    fn to_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for &Locale {
    fn to_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(self) -> Value {
        self.map_or(Value::Unit, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::List(self.into_iter().map(FieldValue::to_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_compares_lexicographically() {
        let a = Value::Text("abc".to_string());
        let b = Value::Text("abd".to_string());
        assert_eq!(a.compare(&b), Some(Ordering::Less));
    }

    #[test]
    fn mixed_integer_families_compare_numerically() {
        assert!(Value::Int(3).matches(&Value::Uint(3)));
        assert_eq!(Value::Int(-1).compare(&Value::Uint(0)), Some(Ordering::Less));
        assert_eq!(
            Value::Uint(u64::MAX).compare(&Value::Int(5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn cross_family_is_incomparable() {
        assert_eq!(Value::Text("1".to_string()).compare(&Value::Int(1)), None);
        assert_eq!(Value::Bool(true).compare(&Value::Int(1)), None);
    }

    #[test]
    fn option_and_list_conversions() {
        assert_eq!(None::<i64>.to_value(), Value::Unit);
        assert_eq!(Some("x").to_value(), Value::Text("x".to_string()));
        assert_eq!(
            vec![1i64, 2].to_value(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn empty_text_is_not_a_locale() {
        assert!(Value::Text(String::new()).as_locale().is_none());
        assert_eq!(
            Value::Text("en".to_string()).as_locale(),
            Locale::new("en")
        );
    }
}
