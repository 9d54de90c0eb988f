//! Frame converters and the tag-keyed registry.
//!
//! # Architecture
//!
//! ```text
//! Registry (GLOBAL_REGISTRY, built once)
//! ├── by_tag:  "frame/fk5-1.0.0" → converter
//! └── by_kind: FrameKind::Fk5    → converter
//!
//! encode: Frame ──kind──▶ converter.to_node ──▶ tagged Mapping
//! decode: tagged Mapping ──tag──▶ converter.from_node ──▶ Frame
//! ```
//!
//! Every converter declares its tag and its attribute default table up front;
//! nothing is discovered by inspecting frames at runtime.

pub mod defaults;
mod registry;
mod standard;

#[cfg(test)]
mod roundtrip;

use crate::codec::ConvertError;
use crate::frame::{Frame, FrameKind};
use crate::node::{Mapping, Node};

pub use defaults::{AttributeDefault, DefaultValue, DEFAULTS_VERSION};
pub use registry::{Registry, RegistryBuilder, GLOBAL_REGISTRY};
pub use standard::{StandardConverter, DATA_KEY};

/// Converts one frame kind to and from a tagged mapping.
///
/// Converters are shared between threads through the registry and must not
/// hold mutable state.
pub trait FrameConverter: Send + Sync {
    /// Tag written on, and recognized in, encoded nodes.
    fn tag(&self) -> &str;

    /// Frame kind handled.
    fn kind(&self) -> FrameKind;

    /// Default table, in attribute declaration order.
    fn attributes(&self) -> &'static [AttributeDefault];

    /// Encode `frame`, omitting attributes left at their default.
    ///
    /// `registry` encodes attributes that are themselves frames.
    fn to_node(&self, frame: &Frame, registry: &Registry) -> Result<Node, ConvertError>;

    /// Rebuild a frame from a mapping carrying [`Self::tag`].
    ///
    /// Absent attributes are filled from the default table; unrecognized
    /// names are rejected.
    fn from_node(&self, mapping: &Mapping, registry: &Registry) -> Result<Frame, ConvertError>;
}

/// Encode a frame with the global registry.
pub fn encode_frame(frame: &Frame) -> Result<Node, ConvertError> {
    Registry::global().encode(frame)
}

/// Decode a frame with the global registry.
pub fn decode_frame(node: &Node) -> Result<Frame, ConvertError> {
    Registry::global().decode(node)
}
