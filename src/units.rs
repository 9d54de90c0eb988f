//! Unit vocabulary.
//!
//! Only the units that coordinate frames actually carry are known here: angles,
//! lengths, times and the velocity-like rates used by differentials. Each unit
//! records its physical type and its scale to the SI base of that type
//! (radian, metre, second, and their ratios).
//!
//! Unit strings use the spaced FITS-like spelling (`"km / s"`, `"mas / yr"`).
//! Parsing is whitespace-insensitive and accepts a few common aliases.

use std::fmt;

use thiserror::Error;

/// Physical dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// Plane angle.
    Angle,
    /// Distance.
    Length,
    /// Duration.
    Time,
    /// Length per time.
    Speed,
    /// Angle per time (proper motion).
    AngularSpeed,
    /// Pure number.
    Dimensionless,
}

impl PhysicalType {
    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Angle => "angle",
            Self::Length => "length",
            Self::Time => "time",
            Self::Speed => "speed",
            Self::AngularSpeed => "angular speed",
            Self::Dimensionless => "dimensionless",
        }
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when a unit is absent, unknown, or of the wrong dimension.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The unit string is not part of the vocabulary.
    #[error("unrecognized unit: '{0}'")]
    Unparseable(String),

    /// No unit was given where one is required.
    #[error("missing unit")]
    Missing,

    /// The unit measures a different physical type than required.
    #[error("unit '{unit}' measures {found}, expected {expected}")]
    Dimension {
        /// Offending unit.
        unit: String,
        /// Required physical type.
        expected: PhysicalType,
        /// Physical type of the offending unit.
        found: PhysicalType,
    },
}

/// A physical unit from the fixed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    name: &'static str,
    physical_type: PhysicalType,
    scale: f64,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Unit {}

const DEG: f64 = std::f64::consts::PI / 180.0;
const MAS: f64 = DEG / 3_600_000.0;
const JULIAN_YEAR_S: f64 = 365.25 * 86_400.0;
const PARSEC_M: f64 = 3.085_677_581_491_367e16;

impl Unit {
    /// Degree.
    pub const DEG: Unit = Unit::new("deg", PhysicalType::Angle, DEG);
    /// Radian.
    pub const RAD: Unit = Unit::new("rad", PhysicalType::Angle, 1.0);
    /// Arc minute.
    pub const ARCMIN: Unit = Unit::new("arcmin", PhysicalType::Angle, DEG / 60.0);
    /// Arc second.
    pub const ARCSEC: Unit = Unit::new("arcsec", PhysicalType::Angle, DEG / 3_600.0);
    /// Milliarcsecond.
    pub const MAS: Unit = Unit::new("mas", PhysicalType::Angle, MAS);
    /// Hour angle (15 degrees).
    pub const HOURANGLE: Unit = Unit::new("hourangle", PhysicalType::Angle, 15.0 * DEG);

    /// Metre.
    pub const M: Unit = Unit::new("m", PhysicalType::Length, 1.0);
    /// Centimetre.
    pub const CM: Unit = Unit::new("cm", PhysicalType::Length, 0.01);
    /// Kilometre.
    pub const KM: Unit = Unit::new("km", PhysicalType::Length, 1_000.0);
    /// Astronomical unit.
    pub const AU: Unit = Unit::new("AU", PhysicalType::Length, 1.495_978_707e11);
    /// Light year.
    pub const LYR: Unit = Unit::new("lyr", PhysicalType::Length, 9.460_730_472_580_8e15);
    /// Parsec.
    pub const PC: Unit = Unit::new("pc", PhysicalType::Length, PARSEC_M);
    /// Kiloparsec.
    pub const KPC: Unit = Unit::new("kpc", PhysicalType::Length, PARSEC_M * 1e3);
    /// Megaparsec.
    pub const MPC: Unit = Unit::new("Mpc", PhysicalType::Length, PARSEC_M * 1e6);

    /// Second.
    pub const S: Unit = Unit::new("s", PhysicalType::Time, 1.0);
    /// Minute.
    pub const MIN: Unit = Unit::new("min", PhysicalType::Time, 60.0);
    /// Hour.
    pub const H: Unit = Unit::new("h", PhysicalType::Time, 3_600.0);
    /// Day.
    pub const D: Unit = Unit::new("d", PhysicalType::Time, 86_400.0);
    /// Julian year.
    pub const YR: Unit = Unit::new("yr", PhysicalType::Time, JULIAN_YEAR_S);

    /// Metre per second.
    pub const M_PER_S: Unit = Unit::new("m / s", PhysicalType::Speed, 1.0);
    /// Kilometre per second.
    pub const KM_PER_S: Unit = Unit::new("km / s", PhysicalType::Speed, 1_000.0);
    /// Kilometre per hour.
    pub const KM_PER_H: Unit = Unit::new("km / h", PhysicalType::Speed, 1_000.0 / 3_600.0);

    /// Radian per second.
    pub const RAD_PER_S: Unit = Unit::new("rad / s", PhysicalType::AngularSpeed, 1.0);
    /// Degree per year.
    pub const DEG_PER_YR: Unit = Unit::new("deg / yr", PhysicalType::AngularSpeed, DEG / JULIAN_YEAR_S);
    /// Arc second per year.
    pub const ARCSEC_PER_YR: Unit =
        Unit::new("arcsec / yr", PhysicalType::AngularSpeed, DEG / 3_600.0 / JULIAN_YEAR_S);
    /// Milliarcsecond per year.
    pub const MAS_PER_YR: Unit = Unit::new("mas / yr", PhysicalType::AngularSpeed, MAS / JULIAN_YEAR_S);

    /// Dimensionless unit.
    pub const ONE: Unit = Unit::new("", PhysicalType::Dimensionless, 1.0);

    const fn new(name: &'static str, physical_type: PhysicalType, scale: f64) -> Self {
        Self {
            name,
            physical_type,
            scale,
        }
    }

    /// Every unit in the vocabulary.
    pub const ALL: &'static [Unit] = &[
        Self::DEG,
        Self::RAD,
        Self::ARCMIN,
        Self::ARCSEC,
        Self::MAS,
        Self::HOURANGLE,
        Self::M,
        Self::CM,
        Self::KM,
        Self::AU,
        Self::LYR,
        Self::PC,
        Self::KPC,
        Self::MPC,
        Self::S,
        Self::MIN,
        Self::H,
        Self::D,
        Self::YR,
        Self::M_PER_S,
        Self::KM_PER_S,
        Self::KM_PER_H,
        Self::RAD_PER_S,
        Self::DEG_PER_YR,
        Self::ARCSEC_PER_YR,
        Self::MAS_PER_YR,
        Self::ONE,
    ];

    /// Parse a unit string.
    ///
    /// Whitespace is ignored, so `"km/s"` and `"km / s"` are the same unit.
    /// Aliases such as `"degree"`, `"au"` and `"year"` are accepted.
    pub fn parse(s: &str) -> Result<Unit, UnitError> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let canonical = match compact.as_str() {
            "degree" | "degrees" => "deg",
            "radian" | "radians" => "rad",
            "au" => "AU",
            "lightyear" => "lyr",
            "year" | "a" => "yr",
            "day" => "d",
            "hour" => "h",
            "dimensionless" => "",
            other => other,
        };
        Self::ALL
            .iter()
            .find(|unit| unit.name.replace(' ', "") == canonical)
            .copied()
            .ok_or_else(|| UnitError::Unparseable(s.to_string()))
    }

    /// Canonical spelling of this unit.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Physical type this unit measures.
    pub fn physical_type(&self) -> PhysicalType {
        self.physical_type
    }

    /// Factor from this unit to the SI base of its physical type.
    pub fn si_scale(&self) -> f64 {
        self.scale
    }

    /// Fail with [`UnitError::Dimension`] unless this unit measures `expected`.
    pub fn require(&self, expected: PhysicalType) -> Result<(), UnitError> {
        if self.physical_type == expected {
            Ok(())
        } else {
            Err(UnitError::Dimension {
                unit: self.name.to_string(),
                expected,
                found: self.physical_type,
            })
        }
    }

    /// Multiplicative factor converting values in `self` to values in `target`.
    pub fn conversion_factor(&self, target: Unit) -> Result<f64, UnitError> {
        target.require(self.physical_type)?;
        if *self == target {
            return Ok(1.0);
        }
        Ok(self.scale / target.scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
