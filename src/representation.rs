//! Positional representations and their differentials.
//!
//! A [`Representation`] is one choice of three (or two) coordinate components
//! describing a position; a [`Differential`] holds the matching rates of
//! change. Both can be reduced to a canonical Cartesian form in SI units,
//! which is how differently-represented positions are compared.

use std::fmt;

use thiserror::Error;

use crate::array::{broadcast_shapes, NdArray, ShapeError};
use crate::quantity::{AngleError, Latitude, Longitude, Quantity};
use crate::units::{PhysicalType, UnitError};

/// Error constructing a representation or differential.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepresentationError {
    /// A component has the wrong unit.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// An angle component is invalid.
    #[error(transparent)]
    Angle(#[from] AngleError),

    /// Component shapes do not broadcast.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Wrong number of components for the kind.
    #[error("{kind} expects {expected} components, got {found}")]
    ComponentCount {
        /// Representation or differential kind name.
        kind: &'static str,
        /// Expected count.
        expected: usize,
        /// Given count.
        found: usize,
    },

    /// Components that must share a physical type do not.
    #[error("{kind} components must share a physical type, found {first} and {second}")]
    MixedPhysicalTypes {
        /// Kind name.
        kind: &'static str,
        /// First type.
        first: PhysicalType,
        /// Mismatching type.
        second: PhysicalType,
    },

    /// The differential does not fit the representation.
    #[error("a {differential} differential cannot be attached to a {representation} representation")]
    IncompatibleDifferential {
        /// Representation kind name.
        representation: &'static str,
        /// Differential kind name.
        differential: &'static str,
    },
}

/// Kinds of positional representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepresentationKind {
    /// `x`, `y`, `z`.
    Cartesian,
    /// `lon`, `lat`, `distance`.
    Spherical,
    /// `lon`, `lat` on the unit sphere.
    UnitSpherical,
    /// `rho`, `phi`, `z`.
    Cylindrical,
}

impl RepresentationKind {
    /// All kinds.
    pub const ALL: &'static [RepresentationKind] = &[
        Self::Cartesian,
        Self::Spherical,
        Self::UnitSpherical,
        Self::Cylindrical,
    ];

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Spherical => "spherical",
            Self::UnitSpherical => "unitspherical",
            Self::Cylindrical => "cylindrical",
        }
    }

    /// Look up a kind by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Component names in constructor order.
    pub fn component_names(self) -> &'static [&'static str] {
        match self {
            Self::Cartesian => &["x", "y", "z"],
            Self::Spherical => &["lon", "lat", "distance"],
            Self::UnitSpherical => &["lon", "lat"],
            Self::Cylindrical => &["rho", "phi", "z"],
        }
    }

    /// Whether a differential of `kind` may accompany this representation.
    pub fn accepts(self, kind: DifferentialKind) -> bool {
        use DifferentialKind as D;
        matches!(
            (self, kind),
            (Self::Cartesian, D::Cartesian)
                | (Self::Spherical, D::Spherical | D::SphericalCosLat)
                | (Self::UnitSpherical, D::UnitSphericalCosLat | D::SphericalCosLat)
        )
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single representation component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Plain quantity.
    Quantity(Quantity),
    /// Wrapping longitude.
    Longitude(Longitude),
    /// Bounded latitude.
    Latitude(Latitude),
}

impl Component {
    /// The underlying quantity.
    pub fn quantity(&self) -> &Quantity {
        match self {
            Self::Quantity(q) => q,
            Self::Longitude(lon) => lon.angle(),
            Self::Latitude(lat) => lat.angle(),
        }
    }

    fn into_longitude(self) -> Result<Longitude, AngleError> {
        match self {
            Self::Longitude(lon) => Ok(lon),
            Self::Quantity(q) => Longitude::new(q),
            Self::Latitude(lat) => Longitude::new(lat.angle().clone()),
        }
    }

    fn into_latitude(self) -> Result<Latitude, AngleError> {
        match self {
            Self::Latitude(lat) => Ok(lat),
            Self::Quantity(q) => Latitude::new(q),
            Self::Longitude(lon) => Latitude::new(lon.angle().clone()),
        }
    }

    fn into_quantity(self) -> Quantity {
        match self {
            Self::Quantity(q) => q,
            Self::Longitude(lon) => lon.angle().clone(),
            Self::Latitude(lat) => lat.angle().clone(),
        }
    }
}

impl From<Quantity> for Component {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

impl From<Longitude> for Component {
    fn from(lon: Longitude) -> Self {
        Self::Longitude(lon)
    }
}

impl From<Latitude> for Component {
    fn from(lat: Latitude) -> Self {
        Self::Latitude(lat)
    }
}

/// A position expressed in one coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// Cartesian components.
    Cartesian {
        /// x.
        x: Quantity,
        /// y.
        y: Quantity,
        /// z.
        z: Quantity,
    },
    /// Spherical components with distance.
    Spherical {
        /// Longitude.
        lon: Longitude,
        /// Latitude.
        lat: Latitude,
        /// Radial distance.
        distance: Quantity,
    },
    /// Direction only.
    UnitSpherical {
        /// Longitude.
        lon: Longitude,
        /// Latitude.
        lat: Latitude,
    },
    /// Cylindrical components.
    Cylindrical {
        /// Distance from the z axis.
        rho: Quantity,
        /// Azimuth.
        phi: Quantity,
        /// Height.
        z: Quantity,
    },
}

/// Cartesian canonical form: three SI-valued arrays of one physical type.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalXyz {
    /// Physical type of the components.
    pub physical_type: PhysicalType,
    /// x, y and z in SI base units, broadcast to a common shape.
    pub xyz: [NdArray; 3],
}

impl Representation {
    /// Build a representation of `kind` from components in constructor order.
    pub fn from_components(
        kind: RepresentationKind,
        components: Vec<Component>,
    ) -> Result<Self, RepresentationError> {
        let expected = kind.component_names().len();
        if components.len() != expected {
            return Err(RepresentationError::ComponentCount {
                kind: kind.name(),
                expected,
                found: components.len(),
            });
        }
        let mut it = components.into_iter();
        let mut next = || it.next().ok_or(RepresentationError::ComponentCount {
            kind: kind.name(),
            expected,
            found: 0,
        });
        match kind {
            RepresentationKind::Cartesian => Self::cartesian(
                next()?.into_quantity(),
                next()?.into_quantity(),
                next()?.into_quantity(),
            ),
            RepresentationKind::Spherical => {
                let lon = next()?.into_longitude()?;
                let lat = next()?.into_latitude()?;
                Self::spherical(lon, lat, next()?.into_quantity())
            }
            RepresentationKind::UnitSpherical => {
                let lon = next()?.into_longitude()?;
                Self::unit_spherical(lon, next()?.into_latitude()?)
            }
            RepresentationKind::Cylindrical => Self::cylindrical(
                next()?.into_quantity(),
                next()?.into_quantity(),
                next()?.into_quantity(),
            ),
        }
    }

    /// Cartesian representation; all three components share a physical type.
    pub fn cartesian(x: Quantity, y: Quantity, z: Quantity) -> Result<Self, RepresentationError> {
        same_physical_type("cartesian", &[&x, &y, &z])?;
        check_shapes(&[&x, &y, &z])?;
        Ok(Self::Cartesian { x, y, z })
    }

    /// Spherical representation with a distance.
    pub fn spherical(
        lon: Longitude,
        lat: Latitude,
        distance: Quantity,
    ) -> Result<Self, RepresentationError> {
        if distance.physical_type() != PhysicalType::Dimensionless {
            distance.require(PhysicalType::Length)?;
        }
        check_shapes(&[lon.angle(), lat.angle(), &distance])?;
        Ok(Self::Spherical { lon, lat, distance })
    }

    /// Unit-sphere representation.
    pub fn unit_spherical(lon: Longitude, lat: Latitude) -> Result<Self, RepresentationError> {
        check_shapes(&[lon.angle(), lat.angle()])?;
        Ok(Self::UnitSpherical { lon, lat })
    }

    /// Cylindrical representation.
    pub fn cylindrical(rho: Quantity, phi: Quantity, z: Quantity) -> Result<Self, RepresentationError> {
        phi.require(PhysicalType::Angle)?;
        same_physical_type("cylindrical", &[&rho, &z])?;
        check_shapes(&[&rho, &phi, &z])?;
        Ok(Self::Cylindrical { rho, phi, z })
    }

    /// The kind of this representation.
    pub fn kind(&self) -> RepresentationKind {
        match self {
            Self::Cartesian { .. } => RepresentationKind::Cartesian,
            Self::Spherical { .. } => RepresentationKind::Spherical,
            Self::UnitSpherical { .. } => RepresentationKind::UnitSpherical,
            Self::Cylindrical { .. } => RepresentationKind::Cylindrical,
        }
    }

    /// Components with their names, in constructor order.
    pub fn components(&self) -> Vec<(&'static str, Component)> {
        let names = self.kind().component_names();
        let values = match self {
            Self::Cartesian { x, y, z } => vec![x.clone().into(), y.clone().into(), z.clone().into()],
            Self::Spherical { lon, lat, distance } => {
                vec![lon.clone().into(), lat.clone().into(), distance.clone().into()]
            }
            Self::UnitSpherical { lon, lat } => vec![lon.clone().into(), lat.clone().into()],
            Self::Cylindrical { rho, phi, z } => {
                vec![rho.clone().into(), phi.clone().into(), z.clone().into()]
            }
        };
        names.iter().copied().zip(values).collect()
    }

    /// Broadcast shape of the components.
    pub fn shape(&self) -> Vec<usize> {
        self.components()
            .iter()
            .try_fold(Vec::new(), |acc, (_, c)| broadcast_shapes(&acc, c.quantity().shape()))
            .unwrap_or_default()
    }

    /// Latitude in radians, for spherical-family representations.
    pub(crate) fn latitude_radians(&self) -> Option<NdArray> {
        match self {
            Self::Spherical { lat, .. } | Self::UnitSpherical { lat, .. } => {
                lat.angle().radians().ok()
            }
            _ => None,
        }
    }

    /// Convert to Cartesian SI components.
    ///
    /// A unit-spherical representation yields a dimensionless unit vector.
    pub fn to_canonical(&self) -> Result<CanonicalXyz, RepresentationError> {
        let shape = self.shape();
        let canonical = match self {
            Self::Cartesian { x, y, z } => CanonicalXyz {
                physical_type: x.physical_type(),
                xyz: [
                    x.to_si().broadcast_to(&shape)?,
                    y.to_si().broadcast_to(&shape)?,
                    z.to_si().broadcast_to(&shape)?,
                ],
            },
            Self::Spherical { lon, lat, distance } => CanonicalXyz {
                physical_type: distance.physical_type(),
                xyz: spherical_to_xyz(
                    &lon.angle().radians()?,
                    &lat.angle().radians()?,
                    &distance.to_si(),
                    &shape,
                )?,
            },
            Self::UnitSpherical { lon, lat } => CanonicalXyz {
                physical_type: PhysicalType::Dimensionless,
                xyz: spherical_to_xyz(
                    &lon.angle().radians()?,
                    &lat.angle().radians()?,
                    &NdArray::scalar(1.0),
                    &shape,
                )?,
            },
            Self::Cylindrical { rho, phi, z } => {
                let rho = rho.to_si().broadcast_to(&shape)?;
                let phi = phi.radians()?.broadcast_to(&shape)?;
                CanonicalXyz {
                    physical_type: z.physical_type(),
                    xyz: [
                        rho.zip_with(&phi, |r, p| r * p.cos())?,
                        rho.zip_with(&phi, |r, p| r * p.sin())?,
                        z.to_si().broadcast_to(&shape)?,
                    ],
                }
            }
        };
        Ok(canonical)
    }
}

fn spherical_to_xyz(
    lon: &NdArray,
    lat: &NdArray,
    r: &NdArray,
    shape: &[usize],
) -> Result<[NdArray; 3], ShapeError> {
    let lon = lon.broadcast_to(shape)?;
    let lat = lat.broadcast_to(shape)?;
    let r = r.broadcast_to(shape)?;
    let r_cos_lat = r.zip_with(&lat, |r, b| r * b.cos())?;
    Ok([
        r_cos_lat.zip_with(&lon, |rc, l| rc * l.cos())?,
        r_cos_lat.zip_with(&lon, |rc, l| rc * l.sin())?,
        r.zip_with(&lat, |r, b| r * b.sin())?,
    ])
}

fn same_physical_type(kind: &'static str, quantities: &[&Quantity]) -> Result<(), RepresentationError> {
    let first = quantities[0].physical_type();
    match quantities.iter().find(|q| q.physical_type() != first) {
        Some(q) => Err(RepresentationError::MixedPhysicalTypes {
            kind,
            first,
            second: q.physical_type(),
        }),
        None => Ok(()),
    }
}

fn check_shapes(quantities: &[&Quantity]) -> Result<(), ShapeError> {
    quantities
        .iter()
        .try_fold(Vec::new(), |acc, q| broadcast_shapes(&acc, q.shape()))
        .map(|_| ())
}

/// Kinds of differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferentialKind {
    /// `d_x`, `d_y`, `d_z`.
    Cartesian,
    /// `d_lon`, `d_lat`, `d_distance`.
    Spherical,
    /// `d_lon_coslat`, `d_lat`, `d_distance`.
    SphericalCosLat,
    /// `d_lon_coslat`, `d_lat`.
    UnitSphericalCosLat,
}

impl DifferentialKind {
    /// All kinds.
    pub const ALL: &'static [DifferentialKind] = &[
        Self::Cartesian,
        Self::Spherical,
        Self::SphericalCosLat,
        Self::UnitSphericalCosLat,
    ];

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Spherical => "spherical",
            Self::SphericalCosLat => "sphericalcoslat",
            Self::UnitSphericalCosLat => "unitsphericalcoslat",
        }
    }

    /// Look up a kind by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Component names in constructor order.
    pub fn component_names(self) -> &'static [&'static str] {
        match self {
            Self::Cartesian => &["d_x", "d_y", "d_z"],
            Self::Spherical => &["d_lon", "d_lat", "d_distance"],
            Self::SphericalCosLat => &["d_lon_coslat", "d_lat", "d_distance"],
            Self::UnitSphericalCosLat => &["d_lon_coslat", "d_lat"],
        }
    }

    fn physical_types(self) -> Option<&'static [PhysicalType]> {
        use PhysicalType::{AngularSpeed, Speed};
        match self {
            Self::Cartesian => None,
            Self::Spherical | Self::SphericalCosLat => Some(&[AngularSpeed, AngularSpeed, Speed]),
            Self::UnitSphericalCosLat => Some(&[AngularSpeed, AngularSpeed]),
        }
    }
}

impl fmt::Display for DifferentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rates of change matching a representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Differential {
    kind: DifferentialKind,
    components: Vec<Quantity>,
}

impl Differential {
    /// Build a differential from components in constructor order.
    pub fn new(kind: DifferentialKind, components: Vec<Quantity>) -> Result<Self, RepresentationError> {
        let expected = kind.component_names().len();
        if components.len() != expected {
            return Err(RepresentationError::ComponentCount {
                kind: kind.name(),
                expected,
                found: components.len(),
            });
        }
        match kind.physical_types() {
            Some(types) => {
                for (q, t) in components.iter().zip(types) {
                    q.require(*t)?;
                }
            }
            None => {
                let refs: Vec<&Quantity> = components.iter().collect();
                same_physical_type(kind.name(), &refs)?;
            }
        }
        check_shapes(&components.iter().collect::<Vec<_>>())?;
        Ok(Self { kind, components })
    }

    /// Cartesian differential.
    pub fn cartesian(d_x: Quantity, d_y: Quantity, d_z: Quantity) -> Result<Self, RepresentationError> {
        Self::new(DifferentialKind::Cartesian, vec![d_x, d_y, d_z])
    }

    /// The kind of this differential.
    pub fn kind(&self) -> DifferentialKind {
        self.kind
    }

    /// Components with their names, in constructor order.
    pub fn components(&self) -> Vec<(&'static str, &Quantity)> {
        self.kind
            .component_names()
            .iter()
            .copied()
            .zip(&self.components)
            .collect()
    }

    /// Component by name.
    pub fn component(&self, name: &str) -> Option<&Quantity> {
        self.components()
            .into_iter()
            .find_map(|(n, q)| (n == name).then_some(q))
    }

    /// Canonical comparison form relative to `base`.
    ///
    /// Spherical differentials are rewritten with `d_lon * cos(lat)` so they
    /// compare equal to the `coslat` variant. Over a spherical base with a
    /// distance, angular differentials become Cartesian velocities, so they
    /// compare equal to a Cartesian differential of the same motion. Each
    /// entry is the component's physical type and SI values.
    pub fn to_canonical(
        &self,
        base: &Representation,
    ) -> Result<(DifferentialKind, Vec<(PhysicalType, NdArray)>), RepresentationError> {
        let mut out: Vec<(PhysicalType, NdArray)> = self
            .components
            .iter()
            .map(|q| (q.physical_type(), q.to_si()))
            .collect();
        let kind = match self.kind {
            DifferentialKind::Spherical => {
                let lat = base.latitude_radians().ok_or(
                    RepresentationError::IncompatibleDifferential {
                        representation: base.kind().name(),
                        differential: self.kind.name(),
                    },
                )?;
                out[0].1 = out[0].1.zip_with(&lat, |d, b| d * b.cos())?;
                DifferentialKind::SphericalCosLat
            }
            other => other,
        };
        if kind == DifferentialKind::SphericalCosLat
            && let Representation::Spherical { lon, lat, distance } = base
            && distance.physical_type() == PhysicalType::Length
            && out[0].0 == PhysicalType::AngularSpeed
            && out[1].0 == PhysicalType::AngularSpeed
            && out[2].0 == PhysicalType::Speed
        {
            let velocity = spherical_velocity_to_xyz(
                [&lon.angle().radians()?, &lat.angle().radians()?, &distance.to_si()],
                [&out[0].1, &out[1].1, &out[2].1],
            )?;
            let out = velocity.into_iter().map(|v| (PhysicalType::Speed, v)).collect();
            return Ok((DifferentialKind::Cartesian, out));
        }
        Ok((kind, out))
    }
}

/// Velocity of a point at (lon, lat, r) moving with the given
/// `d_lon * cos(lat)`, `d_lat` and `d_r`, in SI units.
fn spherical_velocity_to_xyz(
    [lon, lat, r]: [&NdArray; 3],
    [pm_lon, pm_lat, d_r]: [&NdArray; 3],
) -> Result<[NdArray; 3], ShapeError> {
    let shape = [lon, lat, r, pm_lon, pm_lat, d_r]
        .iter()
        .try_fold(Vec::new(), |shape, a| broadcast_shapes(&shape, a.shape()))?;
    let lon = lon.broadcast_to(&shape)?;
    let lat = lat.broadcast_to(&shape)?;
    // Transverse speeds: r * d_lon * cos(lat) and r * d_lat.
    let v_lon = r.zip_with(pm_lon, |r, pm| r * pm)?.broadcast_to(&shape)?;
    let v_lat = r.zip_with(pm_lat, |r, pm| r * pm)?.broadcast_to(&shape)?;
    let d_r = d_r.broadcast_to(&shape)?;

    let d_x = lon
        .zip_with(&lat, |l, b| b.cos() * l.cos())?
        .zip_with(&d_r, |u, v| u * v)?
        .zip_with(&lon.zip_with(&v_lon, |l, v| l.sin() * v)?, |a, b| a - b)?
        .zip_with(
            &lon.zip_with(&lat, |l, b| b.sin() * l.cos())?.zip_with(&v_lat, |u, v| u * v)?,
            |a, b| a - b,
        )?;
    let d_y = lon
        .zip_with(&lat, |l, b| b.cos() * l.sin())?
        .zip_with(&d_r, |u, v| u * v)?
        .zip_with(&lon.zip_with(&v_lon, |l, v| l.cos() * v)?, |a, b| a + b)?
        .zip_with(
            &lon.zip_with(&lat, |l, b| b.sin() * l.sin())?.zip_with(&v_lat, |u, v| u * v)?,
            |a, b| a - b,
        )?;
    let d_z = lat
        .zip_with(&d_r, |b, v| b.sin() * v)?
        .zip_with(&lat.zip_with(&v_lat, |b, v| b.cos() * v)?, |a, b| a + b)?;
    Ok([d_x, d_y, d_z])
}
