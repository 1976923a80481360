//! Purpose: Total encoders from typed domain values to JSON values.
//! Exports: `Encoder`, leaf constructors, `array`/`mapping`/`object`, `Object`, `nullable`.
//! Role: Mirror of the decode engine with no failure mode.
//! Invariants: Every encoder is total over well-typed input; nothing here errors.
//! Invariants: The `Object` builder omits absent optional fields; `nullable`
//! is the explicit null-emitting alternative.

use crate::value::Value;

/// A total encode function from a `&T` to a JSON [`Value`].
///
/// Any `Fn(&T) -> Value` qualifies; the trait exists so signatures can name
/// the contract.
pub trait Encoder<T>: Fn(&T) -> Value {}

impl<T, F: Fn(&T) -> Value> Encoder<T> for F {}

pub fn boolean(value: bool) -> Value {
    Value::Bool(value)
}

pub fn integer(value: i64) -> Value {
    Value::Number(value as f64)
}

pub fn float(value: f64) -> Value {
    Value::Number(value)
}

pub fn string(value: &str) -> Value {
    Value::String(value.to_string())
}

pub fn null() -> Value {
    Value::Null
}

/// Encode a sequence element-wise.
pub fn array<T>(items: impl IntoIterator<Item = T>, encode: impl Encoder<T>) -> Value {
    Value::Array(items.into_iter().map(|item| encode(&item)).collect())
}

/// Build an object from already-encoded pairs, in the given order.
pub fn object(pairs: impl IntoIterator<Item = (String, Value)>) -> Value {
    Value::Object(pairs.into_iter().collect())
}

/// Encode keyed values into an object, preserving pair order.
pub fn mapping<T>(
    pairs: impl IntoIterator<Item = (String, T)>,
    encode: impl Encoder<T>,
) -> Value {
    Value::Object(
        pairs
            .into_iter()
            .map(|(key, item)| (key, encode(&item)))
            .collect(),
    )
}

/// Encode an optional value as itself or as JSON null.
///
/// This is the null-filling choice; when the field should disappear
/// instead, use [`Object::field_opt`].
pub fn nullable<T>(value: Option<&T>, encode: impl Encoder<T>) -> Value {
    value.map_or(Value::Null, |inner| encode(inner))
}

/// Incremental object builder for encoders.
///
/// Fields appear in insertion order. [`Object::field_opt`] with `None`
/// emits nothing at all, so optional fields round-trip through
/// `decode::optional(decode::field(..))` exactly.
#[derive(Clone, Debug, Default)]
pub struct Object {
    pairs: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.pairs.push((key.into(), value));
        self
    }

    /// Add the field only when a value is present; `None` omits the key.
    #[must_use]
    pub fn field_opt(mut self, key: impl Into<String>, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.into(), value));
        }
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.pairs)
    }
}
