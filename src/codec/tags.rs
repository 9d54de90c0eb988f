//! Type tags.
//!
//! Every tagged node carries `<family>/<name>-<version>`. There is exactly one
//! version per tag; a node written with any other version is not recognized.

use crate::frame::FrameKind;
use crate::representation::{DifferentialKind, RepresentationKind};

/// Version suffix of every tag.
pub const TAG_VERSION: &str = "1.0.0";

/// Plain quantity.
pub const QUANTITY: &str = "unit/quantity-1.0.0";
/// Angle quantity.
pub const ANGLE: &str = "coordinates/angle-1.0.0";
/// Longitude with wrap angle.
pub const LONGITUDE: &str = "coordinates/longitude-1.0.0";
/// Latitude.
pub const LATITUDE: &str = "coordinates/latitude-1.0.0";
/// Epoch.
pub const TIME: &str = "time/time-1.0.0";
/// Numeric array.
pub const NDARRAY: &str = "core/ndarray-1.0.0";
/// Non-finite float outside an array.
pub const FLOAT: &str = "core/float-1.0.0";

const FRAME_FAMILY: &str = "frame";
const REPRESENTATION_FAMILY: &str = "representation";
const DIFFERENTIAL_FAMILY: &str = "differential";

/// Tag of a frame kind, e.g. `frame/icrs-1.0.0`.
pub fn frame_tag(kind: FrameKind) -> String {
    versioned(FRAME_FAMILY, &kind.name().to_ascii_lowercase())
}

/// Tag of a representation kind, e.g. `representation/spherical-1.0.0`.
pub fn representation_tag(kind: RepresentationKind) -> String {
    versioned(REPRESENTATION_FAMILY, kind.name())
}

/// Tag of a differential kind, e.g. `differential/cartesian-1.0.0`.
pub fn differential_tag(kind: DifferentialKind) -> String {
    versioned(DIFFERENTIAL_FAMILY, kind.name())
}

/// Whether the tag belongs to the representation family (any name, any version).
pub fn is_representation_tag(tag: &str) -> bool {
    tag.starts_with("representation/")
}

/// Whether the tag belongs to the differential family (any name, any version).
pub fn is_differential_tag(tag: &str) -> bool {
    tag.starts_with("differential/")
}

/// Representation kind named by a tag of the current version.
pub fn representation_kind(tag: &str) -> Option<RepresentationKind> {
    unversioned(tag, REPRESENTATION_FAMILY).and_then(RepresentationKind::from_name)
}

/// Differential kind named by a tag of the current version.
pub fn differential_kind(tag: &str) -> Option<DifferentialKind> {
    unversioned(tag, DIFFERENTIAL_FAMILY).and_then(DifferentialKind::from_name)
}

fn versioned(family: &str, name: &str) -> String {
    format!("{family}/{name}-{TAG_VERSION}")
}

fn unversioned<'a>(tag: &'a str, family: &str) -> Option<&'a str> {
    tag.strip_prefix(family)?
        .strip_prefix('/')?
        .strip_suffix(TAG_VERSION)?
        .strip_suffix('-')
}
