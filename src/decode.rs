//! Purpose: Composable decoders from JSON values to typed domain values.
//! Exports: `Decoder` plus the primitive and combinator constructors.
//! Role: The decode engine; everything here is a pure function over `Value`.
//! Invariants: Failures are values carrying the path where decoding stopped.
//! Invariants: Decoders hold no state between calls and are freely shared
//! across threads; composition never touches a shared registry.
//! Invariants: `optional` absorbs only missing/null targets, never
//! malformation inside a present value.

use std::sync::Arc;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::path::{Path, Segment};
use crate::value::Value;

/// A first-class decode function from a JSON [`Value`] to a `T`.
///
/// Cloning is cheap (a reference-count bump) and clones share nothing
/// mutable. Build decoders from the constructors in this module and combine
/// them with [`Decoder::map`], [`Decoder::and_then`], [`one_of`], and the
/// structural combinators.
pub struct Decoder<T> {
    run: Arc<dyn Fn(&Value, &Path) -> Result<T, DecodeError> + Send + Sync>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T: 'static> Decoder<T> {
    fn from_fn(
        run: impl Fn(&Value, &Path) -> Result<T, DecodeError> + Send + Sync + 'static,
    ) -> Self {
        Self { run: Arc::new(run) }
    }

    /// Run against a value, starting from the root path.
    pub fn run(&self, value: &Value) -> Result<T, DecodeError> {
        (self.run)(value, &Path::root())
    }

    fn run_at(&self, value: &Value, path: &Path) -> Result<T, DecodeError> {
        (self.run)(value, path)
    }

    /// Like [`Decoder::run`], but failure is a single rendered message of
    /// the form `<what went wrong> at <path>`. Still a plain error value;
    /// nothing panics.
    pub fn run_report(&self, value: &Value) -> Result<T, String> {
        self.run(value).map_err(|err| err.to_string())
    }

    /// Parse JSON text, then run. Syntax failures surface as a custom
    /// decode error at the root; use [`crate::value::parse`] directly when
    /// line/column positions matter.
    pub fn run_str(&self, text: &str) -> Result<T, DecodeError> {
        let value = crate::value::parse(text)
            .map_err(|err| DecodeError::custom(err.to_string(), Path::root()))?;
        self.run(&value)
    }

    /// Transform the decoded value. Failures pass through untouched.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Decoder<U> {
        Decoder::from_fn(move |value, path| self.run_at(value, path).map(&f))
    }

    /// Data-dependent decoding: the continuation decoder is chosen from the
    /// first result and runs against the same value and path.
    pub fn and_then<U: 'static>(
        self,
        f: impl Fn(T) -> Decoder<U> + Send + Sync + 'static,
    ) -> Decoder<U> {
        Decoder::from_fn(move |value, path| {
            let first = self.run_at(value, path)?;
            f(first).run_at(value, path)
        })
    }
}

/// Decode a JSON bool.
pub fn boolean() -> Decoder<bool> {
    Decoder::from_fn(|value, path| match value {
        Value::Bool(b) => Ok(*b),
        other => Err(DecodeError::type_mismatch("bool", other, path.clone())),
    })
}

/// Decode a JSON number that is an exact integer.
///
/// Fractional numbers and numbers outside the i64 range fail with a
/// description of the offending number, distinct from the non-number case,
/// so callers can tell `1.5` from `"1"`.
pub fn integer() -> Decoder<i64> {
    Decoder::from_fn(|value, path| match value {
        Value::Number(n) if !n.is_finite() => Err(DecodeError::mismatch_detail(
            "integer",
            format!("number {n} outside integer range"),
            path.clone(),
        )),
        Value::Number(n) if n.fract() != 0.0 => Err(DecodeError::mismatch_detail(
            "integer",
            format!("number {n} with a fractional part"),
            path.clone(),
        )),
        // i64::MAX as f64 rounds up to 2^63, which is already out of range,
        // so the upper bound is exclusive; i64::MIN as f64 is exact.
        Value::Number(n) if *n < i64::MIN as f64 || *n >= i64::MAX as f64 => {
            Err(DecodeError::mismatch_detail(
                "integer",
                format!("number {n} outside integer range"),
                path.clone(),
            ))
        }
        Value::Number(n) => Ok(*n as i64),
        other => Err(DecodeError::type_mismatch("integer", other, path.clone())),
    })
}

/// Decode any JSON number.
pub fn float() -> Decoder<f64> {
    Decoder::from_fn(|value, path| match value {
        Value::Number(n) => Ok(*n),
        other => Err(DecodeError::type_mismatch("number", other, path.clone())),
    })
}

/// Decode a JSON string.
pub fn string() -> Decoder<String> {
    Decoder::from_fn(|value, path| match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(DecodeError::type_mismatch("string", other, path.clone())),
    })
}

/// Succeed with `default` iff the value is JSON null.
pub fn null_as<T: Clone + Send + Sync + 'static>(default: T) -> Decoder<T> {
    Decoder::from_fn(move |value, path| match value {
        Value::Null => Ok(default.clone()),
        other => Err(DecodeError::type_mismatch("null", other, path.clone())),
    })
}

/// Identity decoder: hand back the JSON value itself.
pub fn value() -> Decoder<Value> {
    Decoder::from_fn(|value, _path| Ok(value.clone()))
}

/// Decode the named field of an object with `inner`.
///
/// Lookup is first-match over the object's stored pairs. A present field
/// extends the error path with `.name`; an absent one fails with a
/// missing-field error recorded at the object's own path.
pub fn field<T: 'static>(name: impl Into<String>, inner: Decoder<T>) -> Decoder<T> {
    let name = name.into();
    Decoder::from_fn(move |value, path| match value {
        Value::Object(_) => match value.get(&name) {
            Some(child) => inner.run_at(child, &path.child(name.as_str())),
            None => Err(DecodeError::missing_field(name.clone(), path.clone())),
        },
        other => Err(DecodeError::type_mismatch(
            format!("object with field '{name}'"),
            other,
            path.clone(),
        )),
    })
}

/// Decode the `idx`-th element of an array with `inner`.
pub fn index<T: 'static>(idx: usize, inner: Decoder<T>) -> Decoder<T> {
    Decoder::from_fn(move |value, path| match value {
        Value::Array(items) => match items.get(idx) {
            Some(child) => inner.run_at(child, &path.child(idx)),
            None => Err(DecodeError::mismatch_detail(
                format!("array with at least {} elements", idx + 1),
                format!("array of length {}", items.len()),
                path.clone(),
            )),
        },
        other => Err(DecodeError::type_mismatch("array", other, path.clone())),
    })
}

/// Decode through a sequence of field/index steps, then apply `inner`.
///
/// Equivalent to nesting [`field`] and [`index`]; the first failing step
/// short-circuits and the error path names the deepest step reached.
pub fn at<T: 'static, S: Into<Segment>>(
    segments: impl IntoIterator<Item = S>,
    inner: Decoder<T>,
) -> Decoder<T> {
    let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
    segments
        .into_iter()
        .rev()
        .fold(inner, |acc, segment| match segment {
            Segment::Key(key) => field(key, acc),
            Segment::Index(idx) => index(idx, acc),
        })
}

/// Absorb a missing or null target into `None`.
///
/// Exactly two failure shapes become `None`: the value being decoded is
/// null, or `inner` reported a missing field at this same level (the
/// `optional(field(..))` case). Any failure deeper inside a present value
/// is a malformation and propagates:
/// `optional(field("x", integer()))` on `{}` is `Ok(None)`, on
/// `{"x": "bad"}` it is an error at `.x`.
pub fn optional<T: 'static>(inner: Decoder<T>) -> Decoder<Option<T>> {
    Decoder::from_fn(move |value, path| {
        if value.is_null() {
            return Ok(None);
        }
        match inner.run_at(value, path) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => match err.kind() {
                DecodeErrorKind::MissingField { .. } if err.path() == path => Ok(None),
                _ => Err(err),
            },
        }
    })
}

/// Decode every element of an array with `inner`, failing fast.
///
/// The first failing element aborts the decode; its error path carries the
/// element's index and later elements are never inspected.
pub fn array<T: 'static>(inner: Decoder<T>) -> Decoder<Vec<T>> {
    Decoder::from_fn(move |value, path| match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                out.push(inner.run_at(item, &path.child(idx))?);
            }
            Ok(out)
        }
        other => Err(DecodeError::type_mismatch("array", other, path.clone())),
    })
}

/// Decode every value of an object with `inner`, failing fast.
///
/// Pairs come back in stored order, duplicate keys included; the error path
/// for a failing value carries its key.
pub fn mapping_of<T: 'static>(inner: Decoder<T>) -> Decoder<Vec<(String, T)>> {
    Decoder::from_fn(move |value, path| match value {
        Value::Object(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (key, item) in pairs {
                let decoded = inner.run_at(item, &path.child(key.as_str()))?;
                out.push((key.clone(), decoded));
            }
            Ok(out)
        }
        other => Err(DecodeError::type_mismatch("object", other, path.clone())),
    })
}

/// Try each decoder in order against the same value; first success wins.
///
/// Branches are independent: a failed branch leaks nothing into the next
/// attempt. When every branch fails, the error aggregates all branch
/// failures in attempt order.
pub fn one_of<T: 'static>(decoders: impl IntoIterator<Item = Decoder<T>>) -> Decoder<T> {
    let decoders: Vec<Decoder<T>> = decoders.into_iter().collect();
    Decoder::from_fn(move |value, path| {
        let mut attempts = Vec::with_capacity(decoders.len());
        for decoder in &decoders {
            match decoder.run_at(value, path) {
                Ok(decoded) => return Ok(decoded),
                Err(err) => attempts.push(err),
            }
        }
        Err(DecodeError::no_match(attempts, path.clone()))
    })
}

/// Wrap a total function; a text failure becomes a custom decode error at
/// the current path.
pub fn custom<T: 'static>(
    f: impl Fn(&Value) -> Result<T, String> + Send + Sync + 'static,
) -> Decoder<T> {
    Decoder::from_fn(move |value, path| {
        f(value).map_err(|message| DecodeError::custom(message, path.clone()))
    })
}

/// Always succeed with a fixed value, ignoring the input.
pub fn succeed<T: Clone + Send + Sync + 'static>(decoded: T) -> Decoder<T> {
    Decoder::from_fn(move |_value, _path| Ok(decoded.clone()))
}

/// Always fail with a fixed message at the current path.
pub fn fail<T: 'static>(message: impl Into<String>) -> Decoder<T> {
    let message = message.into();
    Decoder::from_fn(move |_value, path| Err(DecodeError::custom(message.clone(), path.clone())))
}
