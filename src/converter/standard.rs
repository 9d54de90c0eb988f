//! Table-driven converter used for every built-in frame kind.

use indexmap::IndexMap;
use tracing::trace;

use crate::codec::{
    decode_component, decode_differential, decode_epoch, decode_quantity_as, decode_representation,
    encode_component, encode_differential, encode_epoch, encode_quantity, encode_quantity_as,
    encode_representation, tags, ConvertError,
};
use crate::frame::{
    AttributeDecl, AttributeKind, AttributeValue, ConstructionMode, Frame, FrameData, FrameKind,
};
use crate::node::{Mapping, Node};
use crate::oracle::Comparator;
use crate::representation::{DifferentialKind, Representation, RepresentationKind};

use super::defaults::{defaults_for, resolve_attributes, AttributeDefault};
use super::{FrameConverter, Registry};

/// Key under which a frame built from a representation object stores it.
pub const DATA_KEY: &str = "data";

/// Converter for one built-in frame kind.
///
/// Data built from named components is written under the frame's component
/// names (`ra`, `dec`, `pm_ra_cosdec`, …); data built from a representation
/// object is written as one representation node under [`DATA_KEY`]. Decoding
/// picks the construction mode from which of the two is present.
#[derive(Debug, Clone)]
pub struct StandardConverter {
    kind: FrameKind,
    tag: String,
}

impl StandardConverter {
    /// Converter for `kind` under its standard tag.
    pub fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            tag: tags::frame_tag(kind),
        }
    }

    /// Converter for `kind` under a custom tag.
    pub fn with_tag(kind: FrameKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
        }
    }

    fn is_component_name(&self, name: &str) -> bool {
        RepresentationKind::ALL
            .iter()
            .any(|k| self.kind.position_names(*k).contains(&name))
            || DifferentialKind::ALL
                .iter()
                .any(|k| self.kind.velocity_names(*k).contains(&name))
    }

    fn unknown(&self, name: &str) -> ConvertError {
        ConvertError::UnknownAttribute {
            tag: self.tag.clone(),
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    fn encode_data(&self, mapping: &mut Mapping, data: &FrameData) -> Result<(), ConvertError> {
        let repr = data.representation();
        match data.mode() {
            ConstructionMode::Representation => {
                mapping.insert(DATA_KEY, encode_representation(repr, data.differential())?);
            }
            ConstructionMode::Components => {
                let names = self.kind.position_names(repr.kind());
                for (alias, (_, component)) in names.iter().zip(repr.components()) {
                    mapping.insert(*alias, encode_component(&component)?);
                }
                if let Some(diff) = data.differential() {
                    let names = self.kind.velocity_names(diff.kind());
                    for (alias, (_, q)) in names.iter().zip(diff.components()) {
                        mapping.insert(*alias, encode_quantity(q));
                    }
                }
            }
        }
        Ok(())
    }

    fn encode_attribute(
        &self,
        decl: &AttributeDecl,
        value: &AttributeValue,
        registry: &Registry,
    ) -> Result<Node, ConvertError> {
        match (decl.kind, value) {
            (AttributeKind::Epoch, AttributeValue::Epoch(t)) => Ok(encode_epoch(t)),
            (AttributeKind::Quantity(t), AttributeValue::Quantity(q)) => encode_quantity_as(q, t),
            (AttributeKind::CartesianRepresentation(t), AttributeValue::Representation(r)) => {
                if let Representation::Cartesian { x, .. } = r {
                    x.require(t)?;
                }
                encode_representation(r, None)
            }
            (AttributeKind::CartesianDifferential(_), AttributeValue::Differential(d)) => {
                Ok(encode_differential(d))
            }
            (AttributeKind::Coordinate(_), AttributeValue::Coordinate(frame)) => {
                registry.encode(frame)
            }
            _ => Err(ConvertError::schema(format!(
                "{} attribute '{}' must be a {}",
                self.kind,
                decl.name,
                decl.kind.describe()
            ))),
        }
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    fn decode_attribute(
        &self,
        decl: &AttributeDecl,
        node: &Node,
        registry: &Registry,
    ) -> Result<AttributeValue, ConvertError> {
        Ok(match decl.kind {
            AttributeKind::Epoch => decode_epoch(node)?.into(),
            AttributeKind::Quantity(t) => decode_quantity_as(node, t)?.into(),
            AttributeKind::CartesianRepresentation(t) => {
                let (repr, diff) = decode_representation(node)?;
                if diff.is_some() {
                    return Err(ConvertError::schema(format!(
                        "{} attribute '{}' cannot carry a differential",
                        self.kind, decl.name
                    )));
                }
                if let Representation::Cartesian { x, .. } = &repr {
                    x.require(t)?;
                }
                repr.into()
            }
            AttributeKind::CartesianDifferential(_) => decode_differential(node)?.into(),
            AttributeKind::Coordinate(_) => registry.decode(node)?.into(),
        })
    }
}

impl FrameConverter for StandardConverter {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn kind(&self) -> FrameKind {
        self.kind
    }

    fn attributes(&self) -> &'static [AttributeDefault] {
        defaults_for(self.kind)
    }

    fn to_node(&self, frame: &Frame, registry: &Registry) -> Result<Node, ConvertError> {
        if frame.kind() != self.kind {
            return Err(ConvertError::schema(format!(
                "converter for {} cannot encode a {} frame",
                self.kind,
                frame.kind()
            )));
        }

        let mut mapping = Mapping::tagged(self.tag.clone());
        if let Some(data) = frame.data() {
            self.encode_data(&mut mapping, data)?;
        }

        let exact = Comparator::exact();
        let mut resolved: IndexMap<&'static str, AttributeValue> = IndexMap::new();
        for entry in self.attributes() {
            let default = entry.value.resolve(&resolved)?;
            let value = match frame.attribute(entry.name) {
                Some(value) if exact.check_attribute(entry.name, value, &default).is_err() => {
                    let decl = self
                        .kind
                        .attribute(entry.name)
                        .ok_or_else(|| self.unknown(entry.name))?;
                    mapping.insert(entry.name, self.encode_attribute(decl, value, registry)?);
                    value.clone()
                }
                _ => {
                    trace!(frame = %self.kind, attribute = entry.name, "elided default attribute");
                    default
                }
            };
            resolved.insert(entry.name, value);
        }

        Ok(mapping.into())
    }

    fn from_node(&self, mapping: &Mapping, registry: &Registry) -> Result<Frame, ConvertError> {
        let mut builder = Frame::builder(self.kind);
        let mut explicit: IndexMap<&'static str, AttributeValue> = IndexMap::new();
        let mut has_components = false;

        for (key, node) in mapping.iter() {
            if key == DATA_KEY {
                continue;
            }
            if let Some(decl) = self.kind.attribute(key) {
                explicit.insert(decl.name, self.decode_attribute(decl, node, registry)?);
            } else if self.is_component_name(key) {
                has_components = true;
                builder = builder.component(key, decode_component(node)?);
            } else {
                return Err(self.unknown(key));
            }
        }

        if let Some(node) = mapping.get(DATA_KEY) {
            if has_components {
                return Err(ConvertError::schema(format!(
                    "node tagged '{}' holds both '{DATA_KEY}' and named components",
                    self.tag
                )));
            }
            let (repr, diff) = decode_representation(node)?;
            builder = builder.representation(repr);
            if let Some(diff) = diff {
                builder = builder.differential(diff);
            }
        }

        for (name, value) in resolve_attributes(self.attributes(), &explicit)? {
            builder = builder.attribute(name, value);
        }
        Ok(builder.build()?)
    }
}
