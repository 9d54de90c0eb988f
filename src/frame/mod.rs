//! Coordinate frames.
//!
//! A [`Frame`] is an immutable value: a [`FrameKind`], optional positional
//! data, and the frame-definition attributes that were explicitly given.
//! Attributes that were not given are absent here; their documented defaults
//! live with the converters (see [`crate::converter::defaults`]).
//!
//! Frames are built through [`FrameBuilder`], which accepts data either as
//! named components (`ra`, `dec`, …) or as a single [`Representation`]. The
//! chosen [`ConstructionMode`] is recorded on the frame.
//!
//! # Example
//!
//! ```
//! use frame_codec::frame::{Frame, FrameKind};
//! use frame_codec::quantity::Quantity;
//! use frame_codec::time::Epoch;
//! use frame_codec::units::Unit;
//!
//! let fk5 = Frame::builder(FrameKind::Fk5)
//!     .component("ra", Quantity::new(1.0, Unit::DEG))
//!     .component("dec", Quantity::new(2.0, Unit::DEG))
//!     .attribute("equinox", Epoch::parse("J2005").unwrap())
//!     .build()
//!     .unwrap();
//! assert_eq!(fk5.shape(), Vec::<usize>::new());
//! ```

mod builder;
mod kind;

use indexmap::IndexMap;
use thiserror::Error;

use crate::array::{broadcast_shapes, ShapeError};
use crate::quantity::Quantity;
use crate::representation::{Component, Differential, Representation, RepresentationError};
use crate::time::Epoch;

pub use builder::FrameBuilder;
pub use kind::{AttributeDecl, AttributeKind, FrameKind};

/// Error raised by the frame constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// Invalid representation, differential, or component.
    #[error(transparent)]
    Representation(#[from] RepresentationError),

    /// Data and attribute shapes do not broadcast.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A component name the frame kind does not use.
    #[error("{frame} has no component named '{name}'")]
    UnknownComponent {
        /// Frame kind.
        frame: FrameKind,
        /// Offending name.
        name: String,
    },

    /// An attribute name the frame kind does not accept.
    #[error("{frame} has no attribute named '{name}'")]
    UnknownAttribute {
        /// Frame kind.
        frame: FrameKind,
        /// Offending name.
        name: String,
    },

    /// An attribute value of the wrong kind.
    #[error("{frame} attribute '{name}' must be a {expected}")]
    AttributeType {
        /// Frame kind.
        frame: FrameKind,
        /// Attribute name.
        name: String,
        /// Expected value description.
        expected: String,
    },

    /// Both named components and a representation object were given.
    #[error("{0} data given both as components and as a representation")]
    ConflictingData(FrameKind),
}

/// How positional data was supplied to the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionMode {
    /// Named scalar components (`ra=…, dec=…`).
    Components,
    /// A single representation object.
    Representation,
}

/// Positional data of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    representation: Representation,
    differential: Option<Differential>,
    mode: ConstructionMode,
}

impl FrameData {
    /// The position.
    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    /// Rates of change, if any.
    pub fn differential(&self) -> Option<&Differential> {
        self.differential.as_ref()
    }

    /// How the data was supplied.
    pub fn mode(&self) -> ConstructionMode {
        self.mode
    }
}

/// Value of a frame-definition attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// An epoch such as `equinox` or `obstime`.
    Epoch(Epoch),
    /// A quantity such as `z_sun`.
    Quantity(Quantity),
    /// A representation such as `obsgeoloc`.
    Representation(Representation),
    /// A differential such as `galcen_v_sun`.
    Differential(Differential),
    /// A coordinate in another frame, such as `galcen_coord`.
    Coordinate(Box<Frame>),
}

impl AttributeValue {
    /// Shape this value contributes to the frame.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Epoch(t) => t.shape().to_vec(),
            Self::Quantity(q) => q.shape().to_vec(),
            Self::Representation(r) => r.shape(),
            Self::Differential(d) => d
                .components()
                .iter()
                .try_fold(Vec::new(), |acc, (_, q)| broadcast_shapes(&acc, q.shape()))
                .unwrap_or_default(),
            Self::Coordinate(frame) => frame.shape(),
        }
    }

    /// Whether the value has the declared kind.
    pub fn matches(&self, kind: AttributeKind) -> bool {
        match (self, kind) {
            (Self::Epoch(_), AttributeKind::Epoch) => true,
            (Self::Quantity(q), AttributeKind::Quantity(t)) => q.physical_type() == t,
            (Self::Representation(Representation::Cartesian { x, .. }), AttributeKind::CartesianRepresentation(t)) => {
                x.physical_type() == t
            }
            (Self::Differential(d), AttributeKind::CartesianDifferential(t)) => {
                d.kind() == crate::representation::DifferentialKind::Cartesian
                    && d.components().iter().all(|(_, q)| q.physical_type() == t)
            }
            (Self::Coordinate(frame), AttributeKind::Coordinate(kind)) => frame.kind() == kind,
            _ => false,
        }
    }
}

impl From<Epoch> for AttributeValue {
    fn from(t: Epoch) -> Self {
        Self::Epoch(t)
    }
}

impl From<Quantity> for AttributeValue {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

impl From<Representation> for AttributeValue {
    fn from(r: Representation) -> Self {
        Self::Representation(r)
    }
}

impl From<Differential> for AttributeValue {
    fn from(d: Differential) -> Self {
        Self::Differential(d)
    }
}

impl From<Frame> for AttributeValue {
    fn from(frame: Frame) -> Self {
        Self::Coordinate(Box::new(frame))
    }
}

/// An immutable coordinate frame, optionally carrying data.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    kind: FrameKind,
    data: Option<FrameData>,
    attributes: IndexMap<&'static str, AttributeValue>,
}

impl Frame {
    /// Start building a frame of `kind`.
    pub fn builder(kind: FrameKind) -> FrameBuilder {
        FrameBuilder::new(kind)
    }

    /// The frame kind.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Positional data, if any.
    pub fn data(&self) -> Option<&FrameData> {
        self.data.as_ref()
    }

    /// Whether the frame carries data.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// An explicitly given attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Explicitly given attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.attributes.iter().map(|(name, value)| (*name, value))
    }

    /// A data component by the frame's own name for it (`ra`, `l`, `x`, …).
    pub fn component(&self, name: &str) -> Option<Component> {
        let data = self.data.as_ref()?;
        let repr = &data.representation;
        let position = self
            .kind
            .position_names(repr.kind())
            .iter()
            .zip(repr.components())
            .find_map(|(alias, (_, c))| (*alias == name).then_some(c));
        position.or_else(|| {
            let diff = data.differential.as_ref()?;
            self.kind
                .velocity_names(diff.kind())
                .iter()
                .zip(diff.components())
                .find_map(|(alias, (_, q))| (*alias == name).then(|| Component::Quantity(q.clone())))
        })
    }

    /// Broadcast shape of the data and all attributes.
    pub fn shape(&self) -> Vec<usize> {
        let data_shape = self
            .data
            .as_ref()
            .map(|d| d.representation.shape())
            .unwrap_or_default();
        self.attributes
            .values()
            .try_fold(data_shape, |acc, v| broadcast_shapes(&acc, &v.shape()))
            .unwrap_or_default()
    }
}
