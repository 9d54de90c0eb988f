//! Representation and differential codecs.

use crate::node::{Mapping, Node};
use crate::representation::{Component, Differential, Representation};

use super::primitive::{
    decode_component, decode_quantity, encode_component, encode_quantity, reject_unknown, required,
};
use super::{tags, ConvertError};

/// Key under which a representation node carries its differential.
pub const DIFFERENTIAL_KEY: &str = "differential";

/// Encode a representation, nesting `differential` when given.
pub fn encode_representation(
    representation: &Representation,
    differential: Option<&Differential>,
) -> Result<Node, ConvertError> {
    let mut mapping = Mapping::tagged(tags::representation_tag(representation.kind()));
    for (name, component) in representation.components() {
        mapping.insert(name, encode_component(&component)?);
    }
    if let Some(diff) = differential {
        mapping.insert(DIFFERENTIAL_KEY, encode_differential(diff));
    }
    Ok(mapping.into())
}

/// Decode a representation node and its nested differential, if any.
pub fn decode_representation(
    node: &Node,
) -> Result<(Representation, Option<Differential>), ConvertError> {
    let mapping = representation_mapping(node)?;
    let tag = mapping.tag().unwrap_or_default();
    let kind = tags::representation_kind(tag)
        .ok_or_else(|| ConvertError::UnsupportedRepresentation(tag.to_string()))?;

    let names = kind.component_names();
    let mut allowed = names.to_vec();
    allowed.push(DIFFERENTIAL_KEY);
    reject_unknown(mapping, &allowed)?;

    let components = names
        .iter()
        .map(|name| decode_component(required(mapping, name)?))
        .collect::<Result<Vec<Component>, _>>()?;
    let representation = Representation::from_components(kind, components)?;

    let differential = mapping
        .get(DIFFERENTIAL_KEY)
        .map(decode_differential)
        .transpose()?;
    if let Some(diff) = &differential
        && !kind.accepts(diff.kind())
    {
        return Err(ConvertError::UnsupportedRepresentation(format!(
            "{} with {} differential",
            kind.name(),
            diff.kind().name()
        )));
    }
    Ok((representation, differential))
}

fn representation_mapping(node: &Node) -> Result<&Mapping, ConvertError> {
    let mapping = node.as_mapping().ok_or_else(|| {
        ConvertError::schema(format!("expected representation, found {}", node.type_name()))
    })?;
    match mapping.tag() {
        Some(tag) if tags::is_representation_tag(tag) => Ok(mapping),
        Some(tag) => Err(ConvertError::UnsupportedRepresentation(tag.to_string())),
        None => Err(ConvertError::schema("representation node has no tag")),
    }
}

/// Encode a differential.
pub fn encode_differential(differential: &Differential) -> Node {
    let mut mapping = Mapping::tagged(tags::differential_tag(differential.kind()));
    for (name, q) in differential.components() {
        mapping.insert(name, encode_quantity(q));
    }
    mapping.into()
}

/// Decode a differential node.
pub fn decode_differential(node: &Node) -> Result<Differential, ConvertError> {
    let mapping = node.as_mapping().ok_or_else(|| {
        ConvertError::schema(format!("expected differential, found {}", node.type_name()))
    })?;
    let tag = match mapping.tag() {
        Some(tag) if tags::is_differential_tag(tag) => tag,
        Some(tag) => return Err(ConvertError::UnsupportedRepresentation(tag.to_string())),
        None => return Err(ConvertError::schema("differential node has no tag")),
    };
    let kind = tags::differential_kind(tag)
        .ok_or_else(|| ConvertError::UnsupportedRepresentation(tag.to_string()))?;

    let names = kind.component_names();
    reject_unknown(mapping, names)?;
    let components = names
        .iter()
        .map(|name| decode_quantity(required(mapping, name)?))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Differential::new(kind, components)?)
}
