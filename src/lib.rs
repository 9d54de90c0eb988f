//! # frame-codec
//!
//! Lossless conversion of astronomical coordinate frames to and from tagged
//! serialization trees.
//!
//! A [`Frame`] (ICRS, FK5, Galactocentric, …) carries optional positional
//! data and a set of frame-definition attributes such as `equinox` or
//! `obstime`. The converters turn a frame into a tagged [`Node`] tree and
//! back, so that the decoded frame is equal to the original under the
//! [`oracle`]:
//!
//! - **Tags**: every node names its schema, e.g. `frame/fk5-1.0.0`
//! - **Defaults**: attributes equal to their documented default are left out
//!   on encode and restored on decode
//! - **Strict decoding**: unknown tags and unknown fields are errors, never
//!   silently dropped
//! - **Units**: values keep the units they were written in
//!
//! ## Quick Start
//!
//! ```
//! use frame_codec::prelude::*;
//!
//! let frame = Frame::builder(FrameKind::Fk5)
//!     .component("ra", Quantity::new(10.5, Unit::DEG))
//!     .component("dec", Quantity::new(-3.25, Unit::DEG))
//!     .attribute("equinox", Epoch::parse("J2010")?)
//!     .build()?;
//!
//! let node = encode_frame(&frame)?;
//! let text = json::to_string(&node)?;
//!
//! let decoded = decode_frame(&json::from_str(&text)?)?;
//! assert!(frames_equal(&frame, &decoded));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`frame`]: frame kinds, attributes and the validating builder
//! - [`converter`]: per-kind converters, default tables and the registry
//! - [`codec`]: encoders and decoders for quantities, angles, epochs and
//!   representations
//! - [`node`]: the tagged tree and its JSON document form
//! - [`oracle`]: tolerance-aware frame equality
//! - [`config`]: global comparison tolerances
//! - `batch`: parallel conversion (with the `batch` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod array;
pub mod codec;
pub mod config;
pub mod converter;
pub mod frame;
pub mod node;
pub mod oracle;
pub mod prelude;
pub mod quantity;
pub mod representation;
pub mod time;
pub mod units;

#[cfg(feature = "batch")]
pub mod batch;

// =============================================================================
// Conversion
// =============================================================================

pub use converter::{
    decode_frame, encode_frame, FrameConverter, Registry, RegistryBuilder, StandardConverter,
    DEFAULTS_VERSION, GLOBAL_REGISTRY,
};

// =============================================================================
// Data model
// =============================================================================

pub use frame::{AttributeValue, ConstructionMode, Frame, FrameBuilder, FrameError, FrameKind};
pub use node::{Mapping, Node};
pub use quantity::{AngleError, Latitude, Longitude, Quantity};
pub use representation::{Differential, DifferentialKind, Representation, RepresentationKind};
pub use time::{Epoch, TimeError, TimeFormat, TimeScale};
pub use units::{PhysicalType, Unit, UnitError};

// =============================================================================
// Errors and comparison
// =============================================================================

pub use codec::ConvertError;
pub use config::{Config, ConfigBuilder};
pub use oracle::{frames_equal, Comparator, Mismatch, Tolerance};
