//! Query-string encoding for request params.
//!
//! Params are encoded the way Web API model binders read them back:
//! scalars become their plain string form, arrays repeat the key once per
//! element and nested objects are flattened with dotted keys. `null` values
//! are dropped.

use serde_json::{Map, Value};

use crate::errors::ApiError;

/// Ordered `(key, value)` pairs ready to be attached to a request URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Encodes a params object.
    ///
    /// # Example
    /// ```
    /// use simply_api::query::QueryParams;
    /// use serde_json::json;
    ///
    /// let params = json!({ "ids": [1, 2], "filter": { "name": "ada" } });
    /// let query = QueryParams::from_object(params.as_object().unwrap());
    ///
    /// assert_eq!(query.get_all("ids"), vec!["1", "2"]);
    /// assert_eq!(query.get("filter.name"), Some("ada"));
    /// ```
    pub fn from_object(params: &Map<String, Value>) -> Self {
        let mut pairs = Vec::new();
        for (key, value) in params {
            append(&mut pairs, key.clone(), value);
        }
        Self(pairs)
    }

    /// Encodes params that went through a serializer and may no longer be an object.
    ///
    /// `null` encodes to no params; any other non-object value is rejected.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(map) => Ok(Self::from_object(&map)),
            Value::Null => Ok(Self::new()),
            Value::Bool(_) => Err(ApiError::Params("bool")),
            Value::Number(_) => Err(ApiError::Params("number")),
            Value::String(_) => Err(ApiError::Params("string")),
            Value::Array(_) => Err(ApiError::Params("array")),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Returns the first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the params as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

/// Whole floats below 1e21 print without a fraction, so `1.0` reads as `1`.
fn number_to_string(n: &serde_json::Number) -> String {
    if !n.is_f64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Covers `-0.0` too.
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn append(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, number_to_string(n))),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                match item {
                    // Composite elements need an index to stay distinguishable.
                    Value::Array(_) | Value::Object(_) => {
                        append(pairs, format!("{key}[{index}]"), item)
                    }
                    _ => append(pairs, key.clone(), item),
                }
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                append(pairs, format!("{key}.{child}"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: Value) -> QueryParams {
        QueryParams::from_value(value).unwrap()
    }

    #[test]
    fn test_scalars_are_stringified() {
        let query = encode(json!({ "a": 1, "b": "x", "c": true, "d": 2.5 }));
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("b"), Some("x"));
        assert_eq!(query.get("c"), Some("true"));
        assert_eq!(query.get("d"), Some("2.5"));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_whole_floats_drop_the_fraction() {
        let query = encode(json!({
            "f": 1.0,
            "neg": -3.0,
            "zero": -0.0,
            "large": 1e20,
            "frac": 0.5,
            "int": 7
        }));
        assert_eq!(query.get("f"), Some("1"));
        assert_eq!(query.get("neg"), Some("-3"));
        assert_eq!(query.get("zero"), Some("0"));
        assert_eq!(query.get("large"), Some("100000000000000000000"));
        assert_eq!(query.get("frac"), Some("0.5"));
        assert_eq!(query.get("int"), Some("7"));
    }

    #[test]
    fn test_null_values_are_skipped() {
        let query = encode(json!({ "a": null, "b": "kept" }));
        assert_eq!(query.get("a"), None);
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_arrays_repeat_the_key() {
        let query = encode(json!({ "ids": [3, 1, 2] }));
        assert_eq!(query.get_all("ids"), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_nested_objects_use_dotted_keys() {
        let query = encode(json!({ "filter": { "name": "ada", "range": { "min": 1 } } }));
        assert_eq!(query.get("filter.name"), Some("ada"));
        assert_eq!(query.get("filter.range.min"), Some("1"));
    }

    #[test]
    fn test_arrays_of_objects_are_indexed() {
        let query = encode(json!({ "sort": [{ "field": "name" }, { "field": "age" }] }));
        assert_eq!(query.get("sort[0].field"), Some("name"));
        assert_eq!(query.get("sort[1].field"), Some("age"));
    }

    #[test]
    fn test_null_params_encode_to_nothing() {
        assert!(encode(Value::Null).is_empty());
    }

    #[test]
    fn test_non_object_params_are_rejected() {
        let err = QueryParams::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Params("array")));
    }

    #[test]
    fn test_query_string_is_form_encoded() {
        let mut query = QueryParams::new();
        query.push("q", "a b&c");
        query.push("page", "2");
        assert_eq!(query.to_query_string(), "q=a+b%26c&page=2");
    }
}
