//! JSON documents.
//!
//! Tagged mappings become JSON objects with the tag under [`TAG_KEY`]. Arrays
//! become `{"_tag": "core/ndarray-1.0.0", "shape": [...], "data": [...]}`.
//! JSON has no non-finite numbers, so NaN and the infinities are written as the
//! strings `"nan"`, `"inf"` and `"-inf"` inside arrays and as a tagged
//! `core/float-1.0.0` object elsewhere.
//!
//! A document is a JSON object whose top-level entries are named trees.

use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value as JsonValue};

use crate::array::NdArray;
use crate::codec::{tags, ConvertError};

use super::{Mapping, Node};

/// Key holding the tag of a tagged mapping.
pub const TAG_KEY: &str = "_tag";

/// Convert a tree to JSON.
pub fn to_json(node: &Node) -> JsonValue {
    match node {
        Node::Bool(b) => JsonValue::Bool(*b),
        Node::Int(i) => JsonValue::from(*i),
        Node::Float(v) => match Number::from_f64(*v) {
            Some(n) => JsonValue::Number(n),
            None => {
                let mut obj = Map::new();
                obj.insert(TAG_KEY.into(), JsonValue::from(tags::FLOAT));
                obj.insert("value".into(), JsonValue::from(non_finite_name(*v)));
                JsonValue::Object(obj)
            }
        },
        Node::Str(s) => JsonValue::String(s.clone()),
        Node::List(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Node::NdArray(array) => {
            let mut obj = Map::new();
            obj.insert(TAG_KEY.into(), JsonValue::from(tags::NDARRAY));
            obj.insert("shape".into(), JsonValue::from(array.shape().to_vec()));
            obj.insert(
                "data".into(),
                JsonValue::Array(array.data().iter().map(|v| float_to_json(*v)).collect()),
            );
            JsonValue::Object(obj)
        }
        Node::Mapping(mapping) => {
            let mut obj = Map::new();
            if let Some(tag) = mapping.tag() {
                obj.insert(TAG_KEY.into(), JsonValue::from(tag));
            }
            for (key, value) in mapping.iter() {
                obj.insert(key.to_string(), to_json(value));
            }
            JsonValue::Object(obj)
        }
    }
}

/// Convert JSON back to a tree.
pub fn from_json(json: &JsonValue) -> Result<Node, ConvertError> {
    match json {
        JsonValue::Null => Err(ConvertError::schema("null is not a valid node")),
        JsonValue::Bool(b) => Ok(Node::Bool(*b)),
        JsonValue::Number(n) => Ok(match n.as_i64() {
            Some(i) => Node::Int(i),
            None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        JsonValue::String(s) => Ok(Node::Str(s.clone())),
        JsonValue::Array(items) => items.iter().map(from_json).collect::<Result<_, _>>().map(Node::List),
        JsonValue::Object(obj) => object_to_node(obj),
    }
}

fn object_to_node(obj: &Map<String, JsonValue>) -> Result<Node, ConvertError> {
    let tag = match obj.get(TAG_KEY) {
        None => None,
        Some(JsonValue::String(tag)) => Some(tag.as_str()),
        Some(other) => {
            return Err(ConvertError::schema(format!(
                "'{TAG_KEY}' must be a string, found {}",
                json_type_name(other)
            )));
        }
    };

    match tag {
        Some(tags::NDARRAY) => return ndarray_from_json(obj).map(Node::NdArray),
        Some(tags::FLOAT) => {
            let value = obj
                .get("value")
                .ok_or_else(|| ConvertError::missing_field("value", tags::FLOAT))?;
            return float_from_json(value).map(Node::Float);
        }
        _ => {}
    }

    let mut mapping = match tag {
        Some(tag) => Mapping::tagged(tag),
        None => Mapping::new(),
    };
    for (key, value) in obj.iter().filter(|(k, _)| k.as_str() != TAG_KEY) {
        mapping.insert(key.clone(), from_json(value)?);
    }
    Ok(Node::Mapping(mapping))
}

fn ndarray_from_json(obj: &Map<String, JsonValue>) -> Result<NdArray, ConvertError> {
    let shape = obj
        .get("shape")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| ConvertError::missing_field("shape", tags::NDARRAY))?
        .iter()
        .map(|d| {
            d.as_u64()
                .map(|d| d as usize)
                .ok_or_else(|| ConvertError::schema("array shape must hold non-negative integers"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let data = obj
        .get("data")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| ConvertError::missing_field("data", tags::NDARRAY))?
        .iter()
        .map(float_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let len = data.len();
    NdArray::from_shape_vec(shape.clone(), data).ok_or_else(|| {
        ConvertError::schema(format!("array of {len} elements does not fit shape {shape:?}"))
    })
}

fn float_to_json(v: f64) -> JsonValue {
    match Number::from_f64(v) {
        Some(n) => JsonValue::Number(n),
        None => JsonValue::from(non_finite_name(v)),
    }
}

fn float_from_json(json: &JsonValue) -> Result<f64, ConvertError> {
    match json {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConvertError::schema(format!("number {n} is not representable"))),
        JsonValue::String(s) => match s.as_str() {
            "nan" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => Err(ConvertError::schema(format!("'{other}' is not a number"))),
        },
        other => Err(ConvertError::schema(format!(
            "expected number, found {}",
            json_type_name(other)
        ))),
    }
}

fn non_finite_name(v: f64) -> &'static str {
    if v.is_nan() {
        "nan"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// =============================================================================
// Text and files
// =============================================================================

/// Serialize a tree to pretty-printed JSON text.
pub fn to_string(node: &Node) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(&to_json(node))?)
}

/// Parse JSON text into a tree.
pub fn from_str(text: &str) -> Result<Node, ConvertError> {
    let json: JsonValue = serde_json::from_str(text)?;
    from_json(&json)
}

/// Write `node` as the top-level entry `key` of a JSON document at `path`.
pub fn write_document(path: &Path, key: &str, node: &Node) -> Result<(), ConvertError> {
    let root = Node::from(Mapping::new().with(key, node.clone()));
    fs::write(path, to_string(&root)?)?;
    Ok(())
}

/// Read the top-level entry `key` from the JSON document at `path`.
pub fn read_document(path: &Path, key: &str) -> Result<Node, ConvertError> {
    let Node::Mapping(mut root) = from_str(&fs::read_to_string(path)?)? else {
        return Err(ConvertError::schema("document root must be a mapping"));
    };
    root.remove(key)
        .ok_or_else(|| ConvertError::schema(format!("document has no entry '{key}'")))
}
