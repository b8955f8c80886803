//! Conversion between JSON documents and Firestore REST `Value` objects.
//!
//! Firestore's REST surface wraps every field in a typed envelope
//! (`{"stringValue": "..."}`, `{"mapValue": {"fields": ...}}`); this module
//! folds those envelopes to and from the plain JSON the domain models
//! serialize to. Only the value kinds the household document uses are
//! supported, plus `timestampValue` on the read side.

use serde_json::{json, Map, Value};

use semesmart_core::errors::{Error, Result, StoreError};

/// Encodes one JSON document (an object) as Firestore `fields`.
pub(crate) fn encode_fields(document: &Value) -> Result<Value> {
    let Value::Object(map) = document else {
        return Err(Error::Store(StoreError::Serialization(
            "document root must be an object".to_string(),
        )));
    };
    let mut fields = Map::new();
    for (key, value) in map {
        fields.insert(key.clone(), encode_value(value)?);
    }
    Ok(Value::Object(fields))
}

/// Decodes Firestore `fields` back into a plain JSON object.
pub(crate) fn decode_fields(fields: &Value) -> Result<Value> {
    let Value::Object(map) = fields else {
        return Err(decode_error("fields must be an object"));
    };
    let mut document = Map::new();
    for (key, value) in map {
        document.insert(key.clone(), decode_value(value)?);
    }
    Ok(Value::Object(document))
}

fn encode_value(value: &Value) -> Result<Value> {
    Ok(match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        // Firestore carries 64-bit integers as strings; everything else
        // rides as a double.
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect::<Result<_>>()?;
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(_) => json!({ "mapValue": { "fields": encode_fields(value)? } }),
    })
}

fn decode_value(value: &Value) -> Result<Value> {
    let Value::Object(map) = value else {
        return Err(decode_error("value must be a typed object"));
    };
    let Some((kind, inner)) = map.iter().next() else {
        return Err(decode_error("empty value object"));
    };

    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(
            inner
                .as_bool()
                .ok_or_else(|| decode_error("booleanValue must hold a bool"))?,
        ),
        "integerValue" => decode_integer(inner)?,
        "doubleValue" => {
            if !inner.is_number() {
                return Err(decode_error("doubleValue must hold a number"));
            }
            inner.clone()
        }
        // Timestamps come back as RFC 3339 strings, which is how the
        // domain models read them.
        "stringValue" | "timestampValue" => Value::String(
            inner
                .as_str()
                .ok_or_else(|| decode_error("stringValue must hold a string"))?
                .to_string(),
        ),
        "arrayValue" => {
            let items = inner.get("values").and_then(Value::as_array);
            let decoded: Vec<Value> = items
                .map(|values| values.iter().map(decode_value).collect::<Result<_>>())
                .transpose()?
                .unwrap_or_default();
            Value::Array(decoded)
        }
        "mapValue" => {
            let fields = inner.get("fields").cloned().unwrap_or_else(|| json!({}));
            decode_fields(&fields)?
        }
        other => {
            return Err(decode_error(format!("unsupported value kind: {}", other)));
        }
    })
}

/// Integers arrive as strings, but lenient servers may send bare numbers.
fn decode_integer(inner: &Value) -> Result<Value> {
    match inner {
        Value::String(s) => {
            let n: i64 = s
                .parse()
                .map_err(|_| decode_error(format!("invalid integerValue: {}", s)))?;
            Ok(json!(n))
        }
        Value::Number(_) => Ok(inner.clone()),
        _ => Err(decode_error("integerValue must hold a string or number")),
    }
}

fn decode_error(message: impl Into<String>) -> Error {
    Error::Store(StoreError::Deserialization(message.into()))
}
