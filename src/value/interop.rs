//! Purpose: Bridge between this crate's `Value` and `serde_json::Value`.
//! Exports: `From` impls in both directions.
//! Role: Compatibility shim for callers that already hold serde_json trees.
//! Invariants: Inbound conversion is lossless (serde_json keeps key order here).
//! Invariants: Outbound conversion keeps the first of any duplicate keys,
//! matching `Value::get`; integral in-range numbers cross over as JSON
//! integers and non-finite numbers become null.

use super::Value;

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => number_out(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(pairs) => {
                let mut map = serde_json::Map::with_capacity(pairs.len());
                for (key, value) in pairs {
                    // First occurrence wins, like Value::get.
                    map.entry(key).or_insert_with(|| Self::from(value));
                }
                Self::Object(map)
            }
        }
    }
}

// serde_json tells integer and float numbers apart; hand integral in-range
// values over as integers so they compare equal to what serde_json itself
// would have parsed from the same text.
fn number_out(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 {
        // u64::MAX as f64 rounds up to 2^64, one past the last valid u64,
        // so the upper bound is exclusive; i64::MIN as f64 is exact.
        if n >= 0.0 && n < u64::MAX as f64 {
            return serde_json::Value::Number(serde_json::Number::from(n as u64));
        }
        if n >= i64::MIN as f64 {
            return serde_json::Value::Number(serde_json::Number::from(n as i64));
        }
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

#[cfg(test)]
mod tests {
    use super::Value;
    use serde_json::json;

    #[test]
    fn from_serde_json_preserves_order() {
        let value = Value::from(json!({"z": 1, "a": [true, null]}));
        let Value::Object(pairs) = &value else {
            panic!("expected object");
        };
        assert_eq!(pairs[0].0, "z");
        assert_eq!(pairs[1].0, "a");
        assert_eq!(pairs[1].1, Value::Array(vec![Value::Bool(true), Value::Null]));
    }

    #[test]
    fn round_trip_through_serde_json() {
        let original = json!({"a": 1.5, "b": {"c": ["x", false]}});
        let back = serde_json::Value::from(Value::from(original.clone()));
        assert_eq!(back, original);
    }

    #[test]
    fn numbers_at_the_u64_boundary_cross_without_saturating() {
        // 2^64 has no u64 representation; it must cross as a float, not
        // saturate to u64::MAX.
        let past = serde_json::Value::from(Value::Number(18_446_744_073_709_551_616.0));
        assert!(past.as_u64().is_none());
        assert_eq!(past.as_f64(), Some(18_446_744_073_709_551_616.0));

        // The largest integral f64 below 2^64 is a real u64 and stays one.
        let last = serde_json::Value::from(Value::Number(18_446_744_073_709_549_568.0));
        assert_eq!(last.as_u64(), Some(18_446_744_073_709_549_568));
    }

    #[test]
    fn duplicate_keys_collapse_to_first() {
        let value = Value::Object(vec![
            ("k".to_string(), Value::from(1.0)),
            ("k".to_string(), Value::from(2.0)),
        ]);
        assert_eq!(serde_json::Value::from(value), json!({"k": 1}));
    }
}
