//! Frame constructor.

use indexmap::IndexMap;

use crate::array::broadcast_shapes;
use crate::representation::{
    Component, Differential, DifferentialKind, Representation, RepresentationError,
    RepresentationKind,
};

use super::{AttributeValue, ConstructionMode, Frame, FrameData, FrameError, FrameKind};

/// Keyword-style constructor for [`Frame`].
///
/// Data is given either as named components or as one representation object,
/// never both. Component names are the frame kind's own (`ra`/`dec` for
/// equatorial frames, `l`/`b` for Galactic, `x`/`y`/`z`, proper motions such
/// as `pm_ra_cosdec`). The representation kind is inferred from the set of
/// names given.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    kind: FrameKind,
    components: IndexMap<String, Component>,
    representation: Option<Representation>,
    differential: Option<Differential>,
    attributes: IndexMap<String, AttributeValue>,
}

impl FrameBuilder {
    /// Create a builder for `kind`.
    pub fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            components: IndexMap::new(),
            representation: None,
            differential: None,
            attributes: IndexMap::new(),
        }
    }

    /// Add a named data component.
    pub fn component(mut self, name: impl Into<String>, value: impl Into<Component>) -> Self {
        self.components.insert(name.into(), value.into());
        self
    }

    /// Supply the data as a representation object.
    pub fn representation(mut self, representation: Representation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Attach a differential to a representation given via [`Self::representation`].
    pub fn differential(mut self, differential: Differential) -> Self {
        self.differential = Some(differential);
        self
    }

    /// Set a frame-definition attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Validate everything and build the frame.
    pub fn build(self) -> Result<Frame, FrameError> {
        let kind = self.kind;

        let data = match (self.representation, self.components.is_empty()) {
            (Some(_), false) => return Err(FrameError::ConflictingData(kind)),
            (Some(representation), true) => Some(with_differential(
                representation,
                self.differential,
                ConstructionMode::Representation,
            )?),
            (None, false) => {
                if self.differential.is_some() {
                    return Err(FrameError::ConflictingData(kind));
                }
                Some(from_components(kind, self.components)?)
            }
            (None, true) => match self.differential {
                Some(_) => return Err(FrameError::ConflictingData(kind)),
                None => None,
            },
        };

        let mut attributes = IndexMap::new();
        for (name, value) in self.attributes {
            let decl = kind
                .attribute(&name)
                .ok_or_else(|| FrameError::UnknownAttribute {
                    frame: kind,
                    name: name.clone(),
                })?;
            if !value.matches(decl.kind) {
                return Err(FrameError::AttributeType {
                    frame: kind,
                    name,
                    expected: decl.kind.describe(),
                });
            }
            attributes.insert(decl.name, value);
        }

        let data_shape = data
            .as_ref()
            .map(|d: &FrameData| d.representation.shape())
            .unwrap_or_default();
        attributes
            .values()
            .try_fold(data_shape, |acc, v: &AttributeValue| broadcast_shapes(&acc, &v.shape()))?;

        Ok(Frame {
            kind,
            data,
            attributes,
        })
    }
}

fn with_differential(
    representation: Representation,
    differential: Option<Differential>,
    mode: ConstructionMode,
) -> Result<FrameData, FrameError> {
    if let Some(diff) = &differential {
        if !representation.kind().accepts(diff.kind()) {
            return Err(RepresentationError::IncompatibleDifferential {
                representation: representation.kind().name(),
                differential: diff.kind().name(),
            }
            .into());
        }
        let shape = representation.shape();
        for (_, q) in diff.components() {
            broadcast_shapes(&shape, q.shape())?;
        }
    }
    Ok(FrameData {
        representation,
        differential,
        mode,
    })
}

/// Pick the representation and differential kinds whose frame-specific names
/// are all present, preferring the larger match, then assemble them.
fn from_components(
    kind: FrameKind,
    mut components: IndexMap<String, Component>,
) -> Result<FrameData, FrameError> {
    let repr_kind = best_match(
        RepresentationKind::ALL.iter().copied(),
        |k| kind.position_names(k),
        &components,
    );
    let Some(repr_kind) = repr_kind else {
        let name = components.keys().next().cloned().unwrap_or_default();
        return Err(FrameError::UnknownComponent { frame: kind, name });
    };
    let position: Vec<Component> = kind
        .position_names(repr_kind)
        .iter()
        .filter_map(|name| components.shift_remove(*name))
        .collect();
    let representation = Representation::from_components(repr_kind, position)?;

    let differential = if components.is_empty() {
        None
    } else {
        let diff_kind = best_match(
            DifferentialKind::ALL.iter().copied(),
            |k| kind.velocity_names(k),
            &components,
        );
        let Some(diff_kind) = diff_kind else {
            let name = components.keys().next().cloned().unwrap_or_default();
            return Err(FrameError::UnknownComponent { frame: kind, name });
        };
        let rates = kind
            .velocity_names(diff_kind)
            .iter()
            .filter_map(|name| components.shift_remove(*name))
            .map(|c| c.quantity().clone())
            .collect();
        Some(Differential::new(diff_kind, rates)?)
    };

    if let Some(name) = components.keys().next() {
        return Err(FrameError::UnknownComponent {
            frame: kind,
            name: name.clone(),
        });
    }

    with_differential(representation, differential, ConstructionMode::Components)
}

fn best_match<K: Copy>(
    candidates: impl Iterator<Item = K>,
    names: impl Fn(K) -> &'static [&'static str],
    components: &IndexMap<String, Component>,
) -> Option<K> {
    candidates
        .filter(|k| names(*k).iter().all(|n| components.contains_key(*n)))
        .max_by_key(|k| names(*k).len())
}
