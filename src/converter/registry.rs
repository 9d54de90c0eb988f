//! Tag-keyed converter registry.
//!
//! The registry is built once and only read afterwards, so it can be shared
//! freely between threads.

use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::codec::ConvertError;
use crate::frame::{Frame, FrameKind};
use crate::node::Node;

use super::{FrameConverter, StandardConverter};

/// Global registry holding a standard converter for every frame kind.
///
/// Built on first access and never mutated.
pub static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::standard);

/// Maps tags and frame kinds to converters.
#[derive(Clone, Default)]
pub struct Registry {
    by_tag: FxHashMap<String, Arc<dyn FrameConverter>>,
    by_kind: FxHashMap<FrameKind, Arc<dyn FrameConverter>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("Registry").field("tags", &tags).finish()
    }
}

impl Registry {
    /// The shared global registry.
    pub fn global() -> &'static Registry {
        &GLOBAL_REGISTRY
    }

    /// A registry with the standard converter for every [`FrameKind`].
    pub fn standard() -> Self {
        Self::builder().with_standard().build()
    }

    /// Start building a custom registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Converter registered for `tag`.
    pub fn converter_for_tag(&self, tag: &str) -> Result<&dyn FrameConverter, ConvertError> {
        self.by_tag
            .get(tag)
            .map(|c| c.as_ref())
            .ok_or_else(|| ConvertError::UnknownTag(tag.to_string()))
    }

    /// Converter used to encode frames of `kind`.
    pub fn converter_for_kind(&self, kind: FrameKind) -> Option<&dyn FrameConverter> {
        self.by_kind.get(&kind).map(|c| c.as_ref())
    }

    /// All registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether no converter is registered.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Encode a frame with the converter for its kind.
    pub fn encode(&self, frame: &Frame) -> Result<Node, ConvertError> {
        let converter = self
            .converter_for_kind(frame.kind())
            .ok_or(ConvertError::UnregisteredKind(frame.kind()))?;
        let node = converter.to_node(frame, self)?;
        debug!(
            tag = converter.tag(),
            entries = node.as_mapping().map_or(0, |m| m.len()),
            "encoded frame"
        );
        Ok(node)
    }

    /// Decode a tagged frame node with the converter for its tag.
    pub fn decode(&self, node: &Node) -> Result<Frame, ConvertError> {
        let mapping = node.as_mapping().ok_or_else(|| {
            ConvertError::schema(format!("expected frame node, found {}", node.type_name()))
        })?;
        let tag = mapping
            .tag()
            .ok_or_else(|| ConvertError::schema("frame node has no tag"))?;
        let converter = self.converter_for_tag(tag)?;
        let frame = converter.from_node(mapping, self)?;
        debug!(tag, "decoded frame");
        Ok(frame)
    }
}

/// Builder for [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    converters: Vec<Arc<dyn FrameConverter>>,
}

impl RegistryBuilder {
    /// Register a converter.
    ///
    /// A later converter for the same tag replaces an earlier one. The first
    /// converter registered for a kind is the one used to encode it.
    pub fn with(mut self, converter: impl FrameConverter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    /// Register the standard converter for every frame kind.
    pub fn with_standard(mut self) -> Self {
        for kind in FrameKind::ALL {
            self = self.with(StandardConverter::new(*kind));
        }
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        let mut registry = Registry::default();
        for converter in self.converters {
            let kind = converter.kind();
            registry
                .by_kind
                .entry(kind)
                .or_insert_with(|| Arc::clone(&converter));
            let tag = converter.tag().to_string();
            let Some(replaced) = registry.by_tag.insert(tag.clone(), Arc::clone(&converter)) else {
                continue;
            };
            warn!(tag = %tag, "converter replaced an earlier registration");
            // A replaced converter must not keep encoding its kind.
            if let Some(encoder) = registry.by_kind.get_mut(&kind)
                && Arc::ptr_eq(encoder, &replaced)
            {
                *encoder = converter;
            }
        }
        registry
    }
}
