//! Row and parameter types for graph query results.

use std::collections::HashMap;

use neo4rs::{BoltList, BoltMap, BoltNull, BoltType};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::GraphError;

/// Parameters for Cypher queries, keyed by parameter name (without `$`).
pub type Params = HashMap<String, JsonValue>;

/// A single row from a query result: column alias → JSON value.
///
/// Serializes as a plain JSON object, so rows can be returned to API callers
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    data: Map<String, JsonValue>,
}

impl Row {
    pub fn new(data: Map<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Gets a column value, deserializing to the requested type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, GraphError> {
        let value = self
            .data
            .get(key)
            .ok_or_else(|| GraphError::Decode(format!("column not found: {key}")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| GraphError::Decode(format!("failed to deserialize '{key}': {e}")))
    }

    /// Deserializes the whole row into a struct whose fields are the column aliases.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, GraphError> {
        serde_json::from_value(JsonValue::Object(self.data))
            .map_err(|e| GraphError::Decode(e.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Map<String, JsonValue>> for Row {
    fn from(data: Map<String, JsonValue>) -> Self {
        Self::new(data)
    }
}

/// Builds `Params` from `(name, value)` pairs.
pub fn params<I, K>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, JsonValue)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Converts a JSON parameter value to its Bolt counterpart.
pub(crate) fn json_to_bolt(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => b.into(),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        JsonValue::String(s) => s.into(),
        JsonValue::Array(items) => BoltType::List(BoltList::from(
            items.into_iter().map(json_to_bolt).collect::<Vec<_>>(),
        )),
        JsonValue::Object(map) => {
            let mut bolt = BoltMap::default();
            for (key, value) in map {
                bolt.put(key.into(), json_to_bolt(value));
            }
            BoltType::Map(bolt)
        }
    }
}
