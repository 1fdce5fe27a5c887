//! Cache Value Module
//!
//! The three value shapes the cache accepts: text, ordered list and string-keyed map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Value ==
/// A value stored in the cache.
///
/// Serialized untagged, so on the wire a `Text` is a JSON string, a `List` an
/// array and a `Dict` an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<Value>),
    Dict(HashMap<String, Value>),
}

impl Value {
    /// Returns the list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map, if this is a dict.
    pub fn as_dict(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Dict(map)
    }
}

// == JSON Validation ==
/// Accepts only strings, arrays and objects, at every nesting level.
impl TryFrom<serde_json::Value> for Value {
    type Error = CacheError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::String(text) => Ok(Value::Text(text)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, item)| Value::try_from(item).map(|value| (key, value)))
                .collect::<Result<HashMap<_, _>, _>>()
                .map(Value::Dict),
            serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Number(_) => Err(CacheError::InvalidValueType),
        }
    }
}
