//! Error types for conversion operations.

use thiserror::Error;

use crate::frame::{FrameError, FrameKind};
use crate::quantity::AngleError;
use crate::representation::RepresentationError;
use crate::time::TimeError;
use crate::units::UnitError;

/// Error during frame ↔ tree conversion.
///
/// Every encode or decode call either returns a complete result or exactly
/// one of these; there are no partial results.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A unit is absent, unknown, or of the wrong dimension.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A node is missing a required field or has the wrong shape.
    #[error("schema error: {0}")]
    Schema(String),

    /// No converter is registered for the node's tag.
    #[error("unknown tag: '{0}'")]
    UnknownTag(String),

    /// A known tag carries a field its converter does not accept.
    #[error("unknown attribute '{name}' in node tagged '{tag}'")]
    UnknownAttribute {
        /// Tag of the enclosing node.
        tag: String,
        /// Offending field name.
        name: String,
    },

    /// A representation or differential kind with no codec.
    #[error("unsupported representation: '{0}'")]
    UnsupportedRepresentation(String),

    /// No converter is registered for the frame kind being encoded.
    #[error("no converter registered for {0}")]
    UnregisteredKind(FrameKind),

    /// The frame constructor rejected the decoded attribute set.
    #[error(transparent)]
    Frame(FrameError),

    /// The document text is not valid JSON.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Create a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Schema error for a required field that is absent.
    pub fn missing_field(field: &str, tag: &str) -> Self {
        Self::Schema(format!("node tagged '{tag}' is missing required field '{field}'"))
    }

    /// Whether this error is [`ConvertError::UnknownTag`].
    pub fn is_unknown_tag(&self) -> bool {
        matches!(self, Self::UnknownTag(_))
    }

    /// Whether this error is [`ConvertError::UnknownAttribute`].
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, Self::UnknownAttribute { .. })
    }
}

// Unit problems surface as `Unit` no matter which layer detected them.

impl From<AngleError> for ConvertError {
    fn from(err: AngleError) -> Self {
        match err {
            AngleError::Unit(e) => Self::Unit(e),
            other => Self::Frame(FrameError::Representation(RepresentationError::Angle(other))),
        }
    }
}

impl From<RepresentationError> for ConvertError {
    fn from(err: RepresentationError) -> Self {
        match err {
            RepresentationError::Unit(e) => Self::Unit(e),
            RepresentationError::Angle(AngleError::Unit(e)) => Self::Unit(e),
            other => Self::Frame(FrameError::Representation(other)),
        }
    }
}

impl From<FrameError> for ConvertError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Representation(e) => e.into(),
            other => Self::Frame(other),
        }
    }
}

impl From<TimeError> for ConvertError {
    fn from(err: TimeError) -> Self {
        Self::Schema(format!("invalid epoch: {err}"))
    }
}
