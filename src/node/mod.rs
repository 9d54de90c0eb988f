//! Generic tagged tree.
//!
//! Converters produce and consume [`Node`]s. A node is a scalar, a list, a
//! numeric array, or an ordered string-keyed [`Mapping`] that may carry a type
//! tag. Writing the tree to an actual document is the job of [`json`].

pub mod json;

use indexmap::IndexMap;

use crate::array::NdArray;

/// A node of the serialized tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
    /// Ordered sequence.
    List(Vec<Node>),
    /// Numeric array with shape.
    NdArray(NdArray),
    /// String-keyed mapping with an optional tag.
    Mapping(Mapping),
}

impl Node {
    /// String content, if this is a string node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content of an integer or float node.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Mapping content, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Tag of a tagged mapping.
    pub fn tag(&self) -> Option<&str> {
        self.as_mapping().and_then(Mapping::tag)
    }

    /// Short name of the node type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::NdArray(_) => "ndarray",
            Self::Mapping(m) if m.tag().is_some() => "tagged mapping",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Ordered string-keyed mapping with an optional type tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    tag: Option<String>,
    entries: IndexMap<String, Node>,
}

impl Mapping {
    /// Untagged empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mapping carrying `tag`.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            entries: IndexMap::new(),
        }
    }

    /// The type tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Entry by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries (the tag is not an entry).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
