//! Firestore typed-value codec.
//!
//! Firestore documents carry every field wrapped in a single-key object naming
//! its type (`{"stringValue": "x"}`, `{"integerValue": "3"}`, ...). These
//! helpers convert between that representation and plain JSON.

use ct_core::ports::RemoteError;
use serde_json::{Map, Value};

/// Plain JSON object → Firestore `fields` map.
pub fn encode_fields(document: &Value) -> Result<Value, RemoteError> {
    match document {
        Value::Object(map) => Ok(Value::Object(encode_map(map))),
        other => Err(RemoteError::InvalidDocument(format!(
            "document must be an object, got {other}"
        ))),
    }
}

/// Firestore document resource → plain JSON object. A document without
/// `fields` (all fields unset) decodes to `{}`.
pub fn decode_document(document: &Value) -> Result<Value, RemoteError> {
    match document.get("fields") {
        None => Ok(Value::Object(Map::new())),
        Some(Value::Object(fields)) => decode_map(fields).map(Value::Object),
        Some(other) => Err(RemoteError::InvalidDocument(format!(
            "unexpected fields payload: {other}"
        ))),
    }
}

fn encode_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

fn encode_value(value: &Value) -> Value {
    let mut wrapped = Map::with_capacity(1);
    match value {
        Value::Null => {
            wrapped.insert("nullValue".into(), Value::Null);
        }
        Value::Bool(b) => {
            wrapped.insert("booleanValue".into(), Value::Bool(*b));
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // int64 travels as a decimal string
                wrapped.insert("integerValue".into(), Value::String(i.to_string()));
            } else {
                wrapped.insert("doubleValue".into(), Value::Number(n.clone()));
            }
        }
        Value::String(s) => {
            wrapped.insert("stringValue".into(), Value::String(s.clone()));
        }
        Value::Array(items) => {
            let values = items.iter().map(encode_value).collect();
            let mut array = Map::with_capacity(1);
            array.insert("values".into(), Value::Array(values));
            wrapped.insert("arrayValue".into(), Value::Object(array));
        }
        Value::Object(map) => {
            let mut inner = Map::with_capacity(1);
            inner.insert("fields".into(), Value::Object(encode_map(map)));
            wrapped.insert("mapValue".into(), Value::Object(inner));
        }
    }
    Value::Object(wrapped)
}

fn decode_map(fields: &Map<String, Value>) -> Result<Map<String, Value>, RemoteError> {
    fields
        .iter()
        .map(|(key, value)| decode_value(value).map(|decoded| (key.clone(), decoded)))
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, RemoteError> {
    let invalid = || RemoteError::InvalidDocument(format!("unsupported firestore value: {value}"));
    let Value::Object(wrapped) = value else {
        return Err(invalid());
    };
    let Some((kind, inner)) = wrapped.iter().next() else {
        return Err(invalid());
    };

    match (kind.as_str(), inner) {
        ("nullValue", _) => Ok(Value::Null),
        ("booleanValue", Value::Bool(b)) => Ok(Value::Bool(*b)),
        ("integerValue", Value::String(s)) => s
            .parse::<i64>()
            .map(|i| Value::Number(i.into()))
            .map_err(|_| invalid()),
        ("integerValue", Value::Number(n)) => Ok(Value::Number(n.clone())),
        ("doubleValue", Value::Number(n)) => Ok(Value::Number(n.clone())),
        // NaN and infinities have no JSON form
        ("doubleValue", Value::String(_)) => Ok(Value::Null),
        ("stringValue" | "timestampValue" | "referenceValue" | "bytesValue", Value::String(s)) => {
            Ok(Value::String(s.clone()))
        }
        ("geoPointValue", Value::Object(point)) => Ok(Value::Object(point.clone())),
        ("arrayValue", Value::Object(array)) => match array.get("values") {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(items)) => items
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Some(_) => Err(invalid()),
        },
        ("mapValue", Value::Object(map)) => match map.get("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(fields)) => decode_map(fields).map(Value::Object),
            Some(_) => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Document id is the last segment of the resource name.
pub fn document_id(document: &Value) -> Option<&str> {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
}
