//! Purpose: Generic JSON value tree plus the parse/stringify text boundary.
//! Exports: `Value`, `StringifyMode`, `parse`, `stringify`.
//! Role: Foundation type every decoder and encoder operates on.
//! Invariants: Objects are ordered key/value pairs; duplicate keys are representable.
//! Invariants: Key lookup is first-match; equality is structural and order-sensitive.
//! Invariants: Grammar work is delegated to serde_json; no hand-rolled tokenizer.

mod de;
mod interop;

use crate::error::ParseError;

/// A JSON document in memory.
///
/// `Object` keeps its pairs in construction order and does not deduplicate
/// keys. [`Value::get`] resolves duplicates with first-match. Equality is
/// derived, so two objects with the same pairs in different orders compare
/// unequal; arrays are order-sensitive as usual.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Lowercase tag name, used verbatim in decode error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Checked number constructor. NaN and infinities are outside the
    /// representable domain and yield `None`.
    pub fn number(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::Number(value))
    }

    /// First-match key lookup. `None` when the value is not an object or
    /// the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(pairs) => pairs
                .iter()
                .find(|(candidate, _)| candidate.as_str() == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Self::Object(pairs)
    }
}

/// Output shape for [`stringify`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StringifyMode {
    Compact,
    Pretty { indent: usize },
}

/// Parse JSON text into a [`Value`].
///
/// The grammar is serde_json's; this crate only shapes the resulting tree.
/// Unlike `serde_json::Value`, object key order and duplicate keys survive.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(ParseError::new)
}

/// Render a [`Value`] as JSON text.
///
/// Deterministic for a given value and mode. Object keys render in stored
/// order, never re-sorted. Non-finite numbers smuggled past
/// [`Value::number`] render as `null`, matching the serializer boundary.
pub fn stringify(value: &Value, mode: StringifyMode) -> String {
    let mut out = String::new();
    match mode {
        StringifyMode::Compact => write_value(value, None, 0, &mut out),
        StringifyMode::Pretty { indent } => write_value(value, Some(indent), 0, &mut out),
    }
    out
}

fn write_value(value: &Value, indent: Option<usize>, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(num) => write_number(*num, out),
        Value::String(text) => write_escaped(text, out),
        Value::Array(items) => write_array(items, indent, depth, out),
        Value::Object(pairs) => write_object(pairs, indent, depth, out),
    }
}

fn write_number(num: f64, out: &mut String) {
    if num.is_finite() {
        out.push_str(&num.to_string());
    } else {
        out.push_str("null");
    }
}

// String escaping stays delegated to serde_json so the exact escape rules
// match the parser's.
fn write_escaped(text: &str, out: &mut String) {
    let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    out.push_str(&encoded);
}

fn write_array(items: &[Value], indent: Option<usize>, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_break(indent, depth + 1, out);
        write_value(item, indent, depth + 1, out);
    }
    push_break(indent, depth, out);
    out.push(']');
}

fn write_object(pairs: &[(String, Value)], indent: Option<usize>, depth: usize, out: &mut String) {
    if pairs.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (idx, (key, value)) in pairs.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_break(indent, depth + 1, out);
        write_escaped(key, out);
        out.push(':');
        if indent.is_some() {
            out.push(' ');
        }
        write_value(value, indent, depth + 1, out);
    }
    push_break(indent, depth, out);
    out.push('}');
}

fn push_break(indent: Option<usize>, depth: usize, out: &mut String) {
    let Some(width) = indent else {
        return;
    };
    out.push('\n');
    for _ in 0..depth * width {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::{StringifyMode, Value, parse, stringify};

    #[test]
    fn parse_preserves_key_order_and_duplicates() {
        let value = parse(r#"{"z":1,"a":2,"z":3}"#).expect("parse");
        let Value::Object(pairs) = &value else {
            panic!("expected object");
        };
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "z"]);
        // First-match lookup.
        assert_eq!(value.get("z"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn parse_reports_syntax_position() {
        let err = parse("{\"a\": }").expect_err("syntax error");
        assert_eq!(err.line(), 1);
        assert!(err.column() > 0);
        assert!(err.to_string().starts_with("invalid JSON:"));
    }

    #[test]
    fn stringify_compact_is_minimal() {
        let value = parse(r#"{"a":[1,true,null],"b":"x"}"#).expect("parse");
        assert_eq!(
            stringify(&value, StringifyMode::Compact),
            r#"{"a":[1,true,null],"b":"x"}"#
        );
    }

    #[test]
    fn stringify_pretty_matches_indent_width() {
        let value = parse(r#"{"a":[1],"b":{}}"#).expect("parse");
        let text = stringify(&value, StringifyMode::Pretty { indent: 2 });
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ],\n  \"b\": {}\n}");
    }

    #[test]
    fn stringify_does_not_resort_keys() {
        let value = Value::Object(vec![
            ("z".to_string(), Value::from(1.0)),
            ("a".to_string(), Value::from(2.0)),
        ]);
        assert_eq!(stringify(&value, StringifyMode::Compact), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn number_constructor_rejects_non_finite() {
        assert!(Value::number(f64::NAN).is_none());
        assert!(Value::number(f64::INFINITY).is_none());
        assert_eq!(Value::number(1.5), Some(Value::Number(1.5)));
    }

    #[test]
    fn object_equality_is_order_sensitive() {
        let ab = parse(r#"{"a":1,"b":2}"#).expect("parse");
        let ba = parse(r#"{"b":2,"a":1}"#).expect("parse");
        assert_ne!(ab, ba);
    }

    #[test]
    fn escaped_strings_round_trip() {
        let value = Value::String("line\nbreak \"quoted\" \u{2603}".to_string());
        let text = stringify(&value, StringifyMode::Compact);
        assert_eq!(parse(&text).expect("parse"), value);
    }
}
