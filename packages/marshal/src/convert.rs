//! Conversions between script values, the canonical tree, and host records.

use rhai::{Array, Dynamic, Map};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

use crate::error::MarshalError;

/// Resolve a script value into the canonical tree.
///
/// Object maps become JSON objects and arrays become JSON arrays,
/// recursively. Unit becomes `null` and a char becomes a one-character
/// string. Anything else (function pointers, host types, non-finite floats)
/// fails.
pub fn export(value: &Dynamic) -> Result<JsonValue, MarshalError> {
    export_value(value.flatten_clone())
}

fn export_value(value: Dynamic) -> Result<JsonValue, MarshalError> {
    if value.is_unit() {
        return Ok(JsonValue::Null);
    }
    if let Ok(b) = value.as_bool() {
        return Ok(JsonValue::Bool(b));
    }
    if let Ok(i) = value.as_int() {
        return Ok(JsonValue::Number(i.into()));
    }
    if let Ok(f) = value.as_float() {
        return Number::from_f64(f)
            .map(JsonValue::Number)
            .ok_or_else(|| MarshalError::export(format!("{} has no JSON representation", f)));
    }
    if let Ok(c) = value.as_char() {
        return Ok(JsonValue::String(c.to_string()));
    }
    if value.is_string() {
        let s = value.into_string().map_err(MarshalError::export)?;
        return Ok(JsonValue::String(s));
    }
    if value.is_array() {
        let array: Array = value.into_array().map_err(MarshalError::export)?;
        return array
            .into_iter()
            .map(|item| export_value(item.flatten()))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array);
    }
    if value.is_map() {
        let map = value
            .try_cast::<Map>()
            .ok_or_else(|| MarshalError::export("object map could not be read"))?;
        let mut object = serde_json::Map::new();
        for (key, item) in map {
            object.insert(key.to_string(), export_value(item.flatten())?);
        }
        return Ok(JsonValue::Object(object));
    }

    Err(MarshalError::export(format!(
        "values of type {} cannot be exported",
        value.type_name()
    )))
}

/// Build a script value from the canonical tree.
///
/// Integers that fit in the script's integer type stay integers; every other
/// number becomes a float.
pub fn import(tree: JsonValue) -> Dynamic {
    match tree {
        JsonValue::Null => Dynamic::UNIT,
        JsonValue::Bool(b) => Dynamic::from_bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Dynamic::from_int(i)
            } else {
                Dynamic::from_float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Dynamic::from(s),
        JsonValue::Array(items) => Dynamic::from_array(items.into_iter().map(import).collect()),
        JsonValue::Object(object) => Dynamic::from_map(
            object
                .into_iter()
                .map(|(key, item)| (key.into(), import(item)))
                .collect::<Map>(),
        ),
    }
}

/// Populate a host record from a script value.
///
/// The value is exported into the canonical tree, encoded as JSON, and the
/// JSON decoded into `T`.
///
/// # Example
///
/// ```rust
/// use rhai::Engine;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let value = Engine::new().eval::<rhai::Dynamic>("#{x: 1, y: 2}").unwrap();
/// let point: Point = hostlib_marshal::to_struct(&value).unwrap();
/// assert_eq!((point.x, point.y), (1, 2));
/// ```
pub fn to_struct<T: DeserializeOwned>(value: &Dynamic) -> Result<T, MarshalError> {
    let tree = export(value)?;
    let encoded = serde_json::to_vec(&tree).map_err(|e| MarshalError::encode(e.to_string()))?;
    serde_json::from_slice(&encoded).map_err(|e| MarshalError::decode(e.to_string()))
}

/// Build a script value from a host record.
pub fn from_struct<T: Serialize>(record: &T) -> Result<Dynamic, MarshalError> {
    let tree = serde_json::to_value(record).map_err(|e| MarshalError::encode(e.to_string()))?;
    Ok(import(tree))
}
