//! The serializer capability and the two serializers shipped with the crate.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::SerializerError;
use crate::http::ResponseBody;
use crate::options::DeserializeTo;

/// Converts outgoing bodies and params to their wire form and incoming
/// bodies back into domain types.
pub trait Serializer {
    /// The error type returned when a conversion fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transforms an outgoing request body or params object.
    fn serialize(&self, data: Value) -> Result<Value, Self::Error>;

    /// Builds a `T` from a response body.
    fn deserialize<T>(
        &self,
        data: ResponseBody,
        target: DeserializeTo<T>,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned;
}

/// Plain `serde_json` conversion: outgoing data is left as is and responses
/// are deserialized with `T`'s own `Deserialize` impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    type Error = SerializerError;

    fn serialize(&self, data: Value) -> Result<Value, Self::Error> {
        Ok(data)
    }

    fn deserialize<T>(
        &self,
        data: ResponseBody,
        _target: DeserializeTo<T>,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(into_value(data)?)?)
    }
}

/// Letter case used for object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// `displayName`
    Camel,
    /// `display_name`
    Snake,
}

impl KeyCase {
    pub fn convert(&self, key: &str) -> String {
        match self {
            KeyCase::Camel => to_camel_case(key),
            KeyCase::Snake => to_snake_case(key),
        }
    }

    /// Rewrites every object key in `value`, recursing through arrays and nested objects.
    ///
    /// Fails with [`SerializerError::KeyCollision`] when two keys of the same
    /// object convert to the same name.
    pub fn rename_keys(&self, value: Value) -> Result<Value, SerializerError> {
        match value {
            Value::Object(map) => {
                let mut renamed = Map::new();
                for (key, value) in map {
                    let converted = self.convert(&key);
                    if renamed.contains_key(&converted) {
                        return Err(SerializerError::KeyCollision(converted));
                    }
                    renamed.insert(converted, self.rename_keys(value)?);
                }
                Ok(Value::Object(renamed))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|v| self.rename_keys(v))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other),
        }
    }
}

/// Translates object keys between the domain's case and the wire's case.
///
/// Rust types keep their `snake_case` field names while the server speaks
/// `camelCase` (or the other way around). Params go through the same
/// translation as bodies.
///
/// # Example
/// ```
/// use simply_api::serializer::{KeyCase, KeyCaseSerializer, Serializer};
/// use serde_json::json;
///
/// let serializer = KeyCaseSerializer::new(KeyCase::Snake, KeyCase::Camel);
/// let wire = serializer.serialize(json!({ "page_size": 20 })).unwrap();
/// assert_eq!(wire, json!({ "pageSize": 20 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCaseSerializer {
    domain: KeyCase,
    wire: KeyCase,
}

impl KeyCaseSerializer {
    pub fn new(domain: KeyCase, wire: KeyCase) -> Self {
        Self { domain, wire }
    }
}

impl Default for KeyCaseSerializer {
    fn default() -> Self {
        Self::new(KeyCase::Snake, KeyCase::Camel)
    }
}

impl Serializer for KeyCaseSerializer {
    type Error = SerializerError;

    fn serialize(&self, data: Value) -> Result<Value, Self::Error> {
        self.wire.rename_keys(data)
    }

    fn deserialize<T>(
        &self,
        data: ResponseBody,
        _target: DeserializeTo<T>,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let value = self.domain.rename_keys(into_value(data)?)?;
        Ok(serde_json::from_value(value)?)
    }
}

fn into_value(data: ResponseBody) -> Result<Value, SerializerError> {
    match data {
        ResponseBody::Json(value) => Ok(value),
        // Plain text that is not JSON reads as a JSON string.
        ResponseBody::Text(text) => {
            Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        }
        ResponseBody::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
    }
}

fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // Last capital of an acronym followed by a new word: `HTTPServer`
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                Some(_) => false,
            };
            if starts_word {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' && !out.is_empty() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}
