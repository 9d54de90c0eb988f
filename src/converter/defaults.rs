//! Documented attribute defaults, one table per frame kind.
//!
//! The tables are owned here rather than discovered from the frame model, so
//! the contract can be tested on its own. They follow the conventions of
//! [`DEFAULTS_VERSION`].

use indexmap::IndexMap;

use crate::codec::ConvertError;
use crate::frame::{AttributeValue, Frame, FrameKind};
use crate::quantity::Quantity;
use crate::representation::{Differential, Representation};
use crate::time::Epoch;
use crate::units::Unit;

/// Version of the conventions the default tables encode.
///
/// Frame attributes are those of astropy 5.2, the first release with a
/// `location` on both CIRS and ITRS. Galactocentric parameters are the
/// "v4.0" set, which is still that release's default.
pub const DEFAULTS_VERSION: &str = "astropy-5.2";

/// How a default value is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// An epoch string such as `"J2000"`.
    Epoch(&'static str),
    /// Whatever the named attribute of the same frame resolved to.
    SameAs(&'static str),
    /// A scalar quantity.
    Quantity(f64, Unit),
    /// A Cartesian position.
    CartesianRepresentation([f64; 3], Unit),
    /// A Cartesian velocity.
    CartesianDifferential([f64; 3], Unit),
    /// An ICRS direction in degrees.
    IcrsDirection {
        /// Right ascension.
        ra_deg: f64,
        /// Declination.
        dec_deg: f64,
    },
}

impl DefaultValue {
    /// Materialize the default, given the attributes resolved so far.
    pub fn resolve(
        &self,
        resolved: &IndexMap<&'static str, AttributeValue>,
    ) -> Result<AttributeValue, ConvertError> {
        Ok(match *self {
            Self::Epoch(text) => Epoch::parse(text)?.into(),
            Self::SameAs(name) => resolved.get(name).cloned().ok_or_else(|| {
                ConvertError::schema(format!("default refers to unresolved attribute '{name}'"))
            })?,
            Self::Quantity(value, unit) => Quantity::new(value, unit).into(),
            Self::CartesianRepresentation([x, y, z], unit) => Representation::cartesian(
                Quantity::new(x, unit),
                Quantity::new(y, unit),
                Quantity::new(z, unit),
            )?
            .into(),
            Self::CartesianDifferential([x, y, z], unit) => Differential::cartesian(
                Quantity::new(x, unit),
                Quantity::new(y, unit),
                Quantity::new(z, unit),
            )?
            .into(),
            Self::IcrsDirection { ra_deg, dec_deg } => Frame::builder(FrameKind::Icrs)
                .component("ra", Quantity::new(ra_deg, Unit::DEG))
                .component("dec", Quantity::new(dec_deg, Unit::DEG))
                .build()?
                .into(),
        })
    }
}

/// The default of one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeDefault {
    /// Attribute name.
    pub name: &'static str,
    /// Default value.
    pub value: DefaultValue,
}

const fn default(name: &'static str, value: DefaultValue) -> AttributeDefault {
    AttributeDefault { name, value }
}

const ORIGIN_M: DefaultValue = DefaultValue::CartesianRepresentation([0.0; 3], Unit::M);
const AT_REST: DefaultValue = DefaultValue::CartesianRepresentation([0.0; 3], Unit::M_PER_S);
const J2000: DefaultValue = DefaultValue::Epoch("J2000");
const B1950: DefaultValue = DefaultValue::Epoch("B1950");

const FK5: &[AttributeDefault] = &[default("equinox", J2000)];

const FK4: &[AttributeDefault] = &[
    default("equinox", B1950),
    default("obstime", DefaultValue::SameAs("equinox")),
];

const OBSERVER_AT_GEOCENTER: &[AttributeDefault] =
    &[default("obstime", J2000), default("location", ORIGIN_M)];

const GCRS: &[AttributeDefault] = &[
    default("obstime", J2000),
    default("obsgeoloc", ORIGIN_M),
    default("obsgeovel", AT_REST),
];

const PRECESSED_GEOCENTRIC: &[AttributeDefault] = &[
    default("equinox", J2000),
    default("obstime", J2000),
    default("obsgeoloc", ORIGIN_M),
    default("obsgeovel", AT_REST),
];

const GALACTOCENTRIC: &[AttributeDefault] = &[
    default(
        "galcen_coord",
        DefaultValue::IcrsDirection {
            ra_deg: 266.4051,
            dec_deg: -28.936175,
        },
    ),
    default("galcen_distance", DefaultValue::Quantity(8.122, Unit::KPC)),
    default(
        "galcen_v_sun",
        DefaultValue::CartesianDifferential([12.9, 245.6, 7.78], Unit::KM_PER_S),
    ),
    default("z_sun", DefaultValue::Quantity(20.8, Unit::PC)),
    default("roll", DefaultValue::Quantity(0.0, Unit::DEG)),
];

/// Default table of `kind`, in attribute declaration order.
///
/// Entries that refer to another attribute come after it.
pub fn defaults_for(kind: FrameKind) -> &'static [AttributeDefault] {
    match kind {
        FrameKind::Icrs | FrameKind::Galactic => &[],
        FrameKind::Fk5 => FK5,
        FrameKind::Fk4 | FrameKind::Fk4NoETerms => FK4,
        FrameKind::Cirs | FrameKind::Itrs => OBSERVER_AT_GEOCENTER,
        FrameKind::Gcrs => GCRS,
        FrameKind::PrecessedGeocentric => PRECESSED_GEOCENTRIC,
        FrameKind::Galactocentric => GALACTOCENTRIC,
    }
}

/// Fill every attribute missing from `explicit` with its default.
///
/// The result is in table order.
pub fn resolve_attributes(
    table: &[AttributeDefault],
    explicit: &IndexMap<&'static str, AttributeValue>,
) -> Result<IndexMap<&'static str, AttributeValue>, ConvertError> {
    let mut resolved = IndexMap::with_capacity(table.len());
    for entry in table {
        let value = match explicit.get(entry.name) {
            Some(value) => value.clone(),
            None => entry.value.resolve(&resolved)?,
        };
        resolved.insert(entry.name, value);
    }
    Ok(resolved)
}

/// Value of every attribute of `frame`, explicit or defaulted.
pub fn effective_attributes(
    frame: &Frame,
) -> Result<IndexMap<&'static str, AttributeValue>, ConvertError> {
    let explicit: IndexMap<&'static str, AttributeValue> = frame
        .attributes()
        .map(|(name, value)| (name, value.clone()))
        .collect();
    resolve_attributes(defaults_for(frame.kind()), &explicit)
}
