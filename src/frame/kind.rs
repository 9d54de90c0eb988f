//! Frame kinds and the names each kind gives its components and attributes.

use std::fmt;

use crate::representation::{DifferentialKind, RepresentationKind};
use crate::units::PhysicalType;

/// Supported coordinate frame kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// International Celestial Reference System.
    Icrs,
    /// FK5, equinox-dependent.
    Fk5,
    /// FK4 with elliptic aberration terms.
    Fk4,
    /// FK4 without elliptic aberration terms.
    Fk4NoETerms,
    /// Galactic coordinates.
    Galactic,
    /// Galactocentric Cartesian frame.
    Galactocentric,
    /// Celestial Intermediate Reference System.
    Cirs,
    /// Geocentric Celestial Reference System.
    Gcrs,
    /// International Terrestrial Reference System.
    Itrs,
    /// Geocentric frame precessed to an equinox.
    PrecessedGeocentric,
}

/// What an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// An [`Epoch`](crate::time::Epoch).
    Epoch,
    /// A quantity of the given physical type.
    Quantity(PhysicalType),
    /// A Cartesian representation whose components have the given type.
    CartesianRepresentation(PhysicalType),
    /// A Cartesian differential whose components have the given type.
    CartesianDifferential(PhysicalType),
    /// A coordinate in another frame.
    Coordinate(FrameKind),
}

impl AttributeKind {
    /// Short description used in error messages.
    pub fn describe(self) -> String {
        match self {
            Self::Epoch => "epoch".to_string(),
            Self::Quantity(t) => format!("{t} quantity"),
            Self::CartesianRepresentation(t) => format!("cartesian representation of {t}"),
            Self::CartesianDifferential(t) => format!("cartesian differential of {t}"),
            Self::Coordinate(kind) => format!("{kind} coordinate"),
        }
    }
}

/// A frame-definition attribute a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDecl {
    /// Attribute name.
    pub name: &'static str,
    /// Value kind.
    pub kind: AttributeKind,
}

const fn decl(name: &'static str, kind: AttributeKind) -> AttributeDecl {
    AttributeDecl { name, kind }
}

const EQUINOX: AttributeDecl = decl("equinox", AttributeKind::Epoch);
const OBSTIME: AttributeDecl = decl("obstime", AttributeKind::Epoch);
const LOCATION: AttributeDecl =
    decl("location", AttributeKind::CartesianRepresentation(PhysicalType::Length));
const OBSGEOLOC: AttributeDecl =
    decl("obsgeoloc", AttributeKind::CartesianRepresentation(PhysicalType::Length));
const OBSGEOVEL: AttributeDecl =
    decl("obsgeovel", AttributeKind::CartesianRepresentation(PhysicalType::Speed));

const GALACTOCENTRIC_ATTRS: &[AttributeDecl] = &[
    decl("galcen_coord", AttributeKind::Coordinate(FrameKind::Icrs)),
    decl("galcen_distance", AttributeKind::Quantity(PhysicalType::Length)),
    decl("galcen_v_sun", AttributeKind::CartesianDifferential(PhysicalType::Speed)),
    decl("z_sun", AttributeKind::Quantity(PhysicalType::Length)),
    decl("roll", AttributeKind::Quantity(PhysicalType::Angle)),
];

const EQUATORIAL_POSITION: &[&str] = &["ra", "dec", "distance"];
const GALACTIC_POSITION: &[&str] = &["l", "b", "distance"];
const GENERIC_POSITION: &[&str] = &["lon", "lat", "distance"];
const CARTESIAN_POSITION: &[&str] = &["x", "y", "z"];
const CYLINDRICAL_POSITION: &[&str] = &["rho", "phi", "z"];

const EQUATORIAL_COSLAT: &[&str] = &["pm_ra_cosdec", "pm_dec", "radial_velocity"];
const EQUATORIAL_SPHERICAL: &[&str] = &["pm_ra", "pm_dec", "radial_velocity"];
const GALACTIC_COSLAT: &[&str] = &["pm_l_cosb", "pm_b", "radial_velocity"];
const GALACTIC_SPHERICAL: &[&str] = &["pm_l", "pm_b", "radial_velocity"];
const GENERIC_COSLAT: &[&str] = &["pm_lon_coslat", "pm_lat", "radial_velocity"];
const GENERIC_SPHERICAL: &[&str] = &["pm_lon", "pm_lat", "radial_velocity"];
const CARTESIAN_VELOCITY: &[&str] = &["v_x", "v_y", "v_z"];

impl FrameKind {
    /// All kinds.
    pub const ALL: &'static [FrameKind] = &[
        Self::Icrs,
        Self::Fk5,
        Self::Fk4,
        Self::Fk4NoETerms,
        Self::Galactic,
        Self::Galactocentric,
        Self::Cirs,
        Self::Gcrs,
        Self::Itrs,
        Self::PrecessedGeocentric,
    ];

    /// Conventional frame name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Icrs => "ICRS",
            Self::Fk5 => "FK5",
            Self::Fk4 => "FK4",
            Self::Fk4NoETerms => "FK4NoETerms",
            Self::Galactic => "Galactic",
            Self::Galactocentric => "Galactocentric",
            Self::Cirs => "CIRS",
            Self::Gcrs => "GCRS",
            Self::Itrs => "ITRS",
            Self::PrecessedGeocentric => "PrecessedGeocentric",
        }
    }

    /// Frame-definition attributes this kind accepts.
    pub fn attributes(self) -> &'static [AttributeDecl] {
        match self {
            Self::Icrs | Self::Galactic => &[],
            Self::Fk5 => &[EQUINOX],
            Self::Fk4 | Self::Fk4NoETerms => &[EQUINOX, OBSTIME],
            Self::Cirs | Self::Itrs => &[OBSTIME, LOCATION],
            Self::Gcrs => &[OBSTIME, OBSGEOLOC, OBSGEOVEL],
            Self::PrecessedGeocentric => &[EQUINOX, OBSTIME, OBSGEOLOC, OBSGEOVEL],
            Self::Galactocentric => GALACTOCENTRIC_ATTRS,
        }
    }

    /// Declaration of the named attribute, if this kind accepts it.
    pub fn attribute(self, name: &str) -> Option<&'static AttributeDecl> {
        self.attributes().iter().find(|decl| decl.name == name)
    }

    /// Representation the frame kind is conventionally expressed in.
    pub fn default_representation(self) -> RepresentationKind {
        match self {
            Self::Galactocentric | Self::Itrs => RepresentationKind::Cartesian,
            _ => RepresentationKind::Spherical,
        }
    }

    /// Names this kind gives the components of a representation.
    pub fn position_names(self, kind: RepresentationKind) -> &'static [&'static str] {
        match kind {
            RepresentationKind::Cartesian => CARTESIAN_POSITION,
            RepresentationKind::Cylindrical => CYLINDRICAL_POSITION,
            RepresentationKind::Spherical => self.spherical_names(),
            RepresentationKind::UnitSpherical => &self.spherical_names()[..2],
        }
    }

    /// Names this kind gives the components of a differential.
    pub fn velocity_names(self, kind: DifferentialKind) -> &'static [&'static str] {
        let (coslat, spherical) = match self.spherical_names() {
            names if names == EQUATORIAL_POSITION => (EQUATORIAL_COSLAT, EQUATORIAL_SPHERICAL),
            names if names == GALACTIC_POSITION => (GALACTIC_COSLAT, GALACTIC_SPHERICAL),
            _ => (GENERIC_COSLAT, GENERIC_SPHERICAL),
        };
        match kind {
            DifferentialKind::Cartesian => CARTESIAN_VELOCITY,
            DifferentialKind::SphericalCosLat => coslat,
            DifferentialKind::Spherical => spherical,
            DifferentialKind::UnitSphericalCosLat => &coslat[..2],
        }
    }

    fn spherical_names(self) -> &'static [&'static str] {
        match self {
            Self::Galactic => GALACTIC_POSITION,
            Self::Galactocentric | Self::Itrs => GENERIC_POSITION,
            _ => EQUATORIAL_POSITION,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
