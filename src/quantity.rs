//! Quantities and angle types.
//!
//! A [`Quantity`] is an [`NdArray`] of values paired with a [`Unit`].
//! [`Longitude`] and [`Latitude`] are angle quantities with the extra rules
//! coordinate components need: longitudes wrap into a 360° window ending at
//! their `wrap_angle`, latitudes must lie within ±90°.

use thiserror::Error;

use crate::array::NdArray;
use crate::units::{PhysicalType, Unit, UnitError};

/// Wrap angle used when a longitude does not specify one.
pub const DEFAULT_WRAP_ANGLE_DEG: f64 = 360.0;

/// Error constructing an angle component.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AngleError {
    /// The quantity is not an angle.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A latitude value lies outside [-90°, 90°].
    #[error("latitude {0}° is outside [-90°, 90°]")]
    LatitudeOutOfRange(f64),
}

/// A numeric value (scalar or array) with a physical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: NdArray,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity.
    pub fn new(value: impl Into<NdArray>, unit: Unit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// The numeric values in [`Self::unit`].
    pub fn value(&self) -> &NdArray {
        &self.value
    }

    /// The unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Shape of the value array.
    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// Physical type of the unit.
    pub fn physical_type(&self) -> PhysicalType {
        self.unit.physical_type()
    }

    /// Fail unless the unit measures `expected`.
    pub fn require(&self, expected: PhysicalType) -> Result<(), UnitError> {
        self.unit.require(expected)
    }

    /// Express the quantity in another unit of the same physical type.
    pub fn to(&self, unit: Unit) -> Result<Quantity, UnitError> {
        let factor = self.unit.conversion_factor(unit)?;
        if factor == 1.0 {
            return Ok(Quantity::new(self.value.clone(), unit));
        }
        Ok(Quantity::new(self.value.map(|v| v * factor), unit))
    }

    /// Values in the SI base unit of the physical type.
    pub fn to_si(&self) -> NdArray {
        let scale = self.unit.si_scale();
        self.value.map(|v| v * scale)
    }

    /// Values of an angle quantity in radians.
    pub fn radians(&self) -> Result<NdArray, UnitError> {
        self.require(PhysicalType::Angle)?;
        Ok(self.to_si())
    }
}

/// An angle that wraps into the window `[wrap_angle - 360°, wrap_angle)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Longitude {
    angle: Quantity,
    wrap_angle: Quantity,
}

impl Longitude {
    /// Create a longitude with the default 360° wrap angle.
    pub fn new(angle: Quantity) -> Result<Self, AngleError> {
        Self::with_wrap_angle(angle, Quantity::new(DEFAULT_WRAP_ANGLE_DEG, Unit::DEG))
    }

    /// Create a longitude with an explicit wrap angle.
    ///
    /// Values outside the wrap window are shifted by whole turns; values
    /// already inside it are kept bit-for-bit.
    pub fn with_wrap_angle(angle: Quantity, wrap_angle: Quantity) -> Result<Self, AngleError> {
        angle.require(PhysicalType::Angle)?;
        wrap_angle.require(PhysicalType::Angle)?;

        let turn = Quantity::new(DEFAULT_WRAP_ANGLE_DEG, Unit::DEG)
            .to(angle.unit())?
            .value()
            .data()[0];
        let upper = wrap_angle
            .to(angle.unit())?
            .value()
            .as_scalar()
            .ok_or(UnitError::Missing)?;
        let lower = upper - turn;
        let wrapped = angle.value().map(|v| {
            if v >= lower && v < upper {
                return v;
            }
            let w = v - turn * ((v - lower) / turn).floor();
            // Rounding can land a value just below `lower` on `upper`.
            if w >= upper { w - turn } else { w }
        });

        Ok(Self {
            angle: Quantity::new(wrapped, angle.unit()),
            wrap_angle,
        })
    }

    /// The angle values.
    pub fn angle(&self) -> &Quantity {
        &self.angle
    }

    /// The wrap angle.
    pub fn wrap_angle(&self) -> &Quantity {
        &self.wrap_angle
    }

    /// Whether the wrap angle equals the 360° default.
    pub fn has_default_wrap(&self) -> bool {
        self.wrap_angle
            .to(Unit::DEG)
            .ok()
            .and_then(|q| q.value().as_scalar())
            .is_some_and(|deg| deg == DEFAULT_WRAP_ANGLE_DEG)
    }
}

/// An angle bounded to [-90°, 90°].
#[derive(Debug, Clone, PartialEq)]
pub struct Latitude {
    angle: Quantity,
}

impl Latitude {
    /// Create a latitude, rejecting values outside ±90°.
    pub fn new(angle: Quantity) -> Result<Self, AngleError> {
        angle.require(PhysicalType::Angle)?;
        let degrees = angle.to(Unit::DEG)?;
        if let Some(bad) = degrees
            .value()
            .data()
            .iter()
            .find(|d| d.abs() > 90.0 || d.is_nan())
        {
            return Err(AngleError::LatitudeOutOfRange(*bad));
        }
        Ok(Self { angle })
    }

    /// The angle values.
    pub fn angle(&self) -> &Quantity {
        &self.angle
    }
}
