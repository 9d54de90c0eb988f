//! Epochs used as frame parameters.
//!
//! An [`Epoch`] keeps the values exactly as they were given (text such as
//! `"B1950"` or numbers such as a Julian date) together with their
//! [`TimeFormat`] and [`TimeScale`]. Serializing writes those values back out
//! verbatim, so an encode/decode cycle reproduces the epoch bit-for-bit.
//!
//! Instants are compared on the TT axis: two epochs written in different
//! forms (`"J2000"` vs `"2000-01-01T11:58:55.816"` UTC) are the same instant
//! when their TT Julian dates agree.

mod parse;
mod scale;

use std::fmt;

use thiserror::Error;

pub use parse::detect_format;
pub use scale::TimeScale;

use scale::SECS_PER_DAY;

/// Error building an [`Epoch`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    /// Text that matches no epoch form.
    #[error("unrecognized epoch: '{0}'")]
    Unparseable(String),

    /// Unknown format name.
    #[error("unknown time format: '{0}'")]
    UnknownFormat(String),

    /// Unknown scale name.
    #[error("unknown time scale: '{0}'")]
    UnknownScale(String),

    /// A text value given to a numeric format or the reverse.
    #[error("time format '{format}' does not accept {kind} values")]
    ValueKind {
        /// The format.
        format: TimeFormat,
        /// `"text"` or `"numeric"`.
        kind: &'static str,
    },

    /// NaN or infinite numeric epoch.
    #[error("non-finite epoch value: {0}")]
    NonFinite(f64),

    /// Value count does not match the declared shape.
    #[error("{count} epoch values do not fill shape {shape:?}")]
    Shape {
        /// Number of values.
        count: usize,
        /// Declared shape.
        shape: Vec<usize>,
    },
}

/// How epoch values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// Julian epoch string, `"J2000"`.
    JyearStr,
    /// Besselian epoch string, `"B1950"`.
    ByearStr,
    /// ISO 8601 with a `T` separator.
    Isot,
    /// ISO 8601 with a space separator, or a bare date.
    Iso,
    /// Julian date.
    Jd,
    /// Modified Julian date.
    Mjd,
    /// Julian year as a number.
    Jyear,
    /// Besselian year as a number.
    Byear,
}

impl TimeFormat {
    /// Format name.
    pub fn name(self) -> &'static str {
        match self {
            Self::JyearStr => "jyear_str",
            Self::ByearStr => "byear_str",
            Self::Isot => "isot",
            Self::Iso => "iso",
            Self::Jd => "jd",
            Self::Mjd => "mjd",
            Self::Jyear => "jyear",
            Self::Byear => "byear",
        }
    }

    /// Parse a format name.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        match s {
            "jyear_str" => Ok(Self::JyearStr),
            "byear_str" => Ok(Self::ByearStr),
            "isot" => Ok(Self::Isot),
            "iso" => Ok(Self::Iso),
            "jd" => Ok(Self::Jd),
            "mjd" => Ok(Self::Mjd),
            "jyear" => Ok(Self::Jyear),
            "byear" => Ok(Self::Byear),
            _ => Err(TimeError::UnknownFormat(s.to_string())),
        }
    }

    /// Whether values in this format are strings.
    pub fn is_text(self) -> bool {
        matches!(self, Self::JyearStr | Self::ByearStr | Self::Isot | Self::Iso)
    }

    /// Scale assumed when none is given: TT for epoch years, UTC otherwise.
    pub fn default_scale(self) -> TimeScale {
        match self {
            Self::JyearStr | Self::ByearStr | Self::Jyear | Self::Byear => TimeScale::Tt,
            Self::Isot | Self::Iso | Self::Jd | Self::Mjd => TimeScale::Utc,
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single epoch value as given.
#[derive(Debug, Clone, PartialEq)]
pub enum EpochValue {
    /// String form.
    Text(String),
    /// Numeric form.
    Number(f64),
}

/// One instant or an array of instants.
#[derive(Debug, Clone, PartialEq)]
pub struct Epoch {
    format: TimeFormat,
    scale: TimeScale,
    shape: Vec<usize>,
    values: Vec<EpochValue>,
    jd: Vec<(f64, f64)>,
}

impl Epoch {
    /// Parse a single epoch string, detecting its format.
    ///
    /// Besselian and Julian epoch strings are TT; ISO strings are UTC.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let format = detect_format(s).ok_or_else(|| TimeError::Unparseable(s.to_string()))?;
        Self::new(
            vec![EpochValue::Text(s.trim().to_string())],
            Vec::new(),
            format,
            format.default_scale(),
        )
    }

    /// A single numeric epoch.
    pub fn from_number(value: f64, format: TimeFormat, scale: TimeScale) -> Result<Self, TimeError> {
        Self::new(vec![EpochValue::Number(value)], Vec::new(), format, scale)
    }

    /// An epoch (or array of epochs) with an explicit format and scale.
    ///
    /// `shape` is `[]` for a single value. Every value is validated against
    /// `format`.
    pub fn new(
        values: Vec<EpochValue>,
        shape: Vec<usize>,
        format: TimeFormat,
        scale: TimeScale,
    ) -> Result<Self, TimeError> {
        if shape.iter().product::<usize>() != values.len() {
            return Err(TimeError::Shape {
                count: values.len(),
                shape,
            });
        }
        let jd = values
            .iter()
            .map(|value| match value {
                EpochValue::Text(s) => parse::text_to_jd(s, format),
                EpochValue::Number(n) => parse::number_to_jd(*n, format),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            format,
            scale,
            shape,
            values,
            jd,
        })
    }

    /// J2000.0 (TT).
    pub fn j2000() -> Self {
        Self::julian_epoch(2000.0)
    }

    /// B1950.0 (TT).
    pub fn b1950() -> Self {
        Self {
            format: TimeFormat::ByearStr,
            scale: TimeScale::Tt,
            shape: Vec::new(),
            values: vec![EpochValue::Text("B1950.000".to_string())],
            jd: vec![(2_400_000.5, 15_019.813_52 + 50.0 * 365.242_198_781)],
        }
    }

    fn julian_epoch(year: f64) -> Self {
        Self {
            format: TimeFormat::JyearStr,
            scale: TimeScale::Tt,
            shape: Vec::new(),
            values: vec![EpochValue::Text(format!("J{year:.3}"))],
            jd: vec![(2_451_545.0, (year - 2000.0) * 365.25)],
        }
    }

    /// Format the values are written in.
    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// Time scale.
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Shape; `[]` for a single epoch.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Whether this is a single epoch.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Values as given, row-major.
    pub fn values(&self) -> &[EpochValue] {
        &self.values
    }

    /// Two-part Julian dates in the epoch's own scale.
    pub fn jd(&self) -> &[(f64, f64)] {
        &self.jd
    }

    /// Two-part Julian dates on the TT axis, or `None` for UT1.
    pub fn tt_jd(&self) -> Option<Vec<(f64, f64)>> {
        self.jd
            .iter()
            .map(|&(jd1, jd2)| self.scale.to_tt(jd1, jd2))
            .collect()
    }

    /// Whether both epochs denote the same instants within `tolerance_s`.
    ///
    /// Epochs with different shapes never match. UT1 epochs only match other
    /// UT1 epochs, compared directly.
    pub fn same_instant(&self, other: &Epoch, tolerance_s: f64) -> bool {
        if self.shape != other.shape {
            return false;
        }
        let (a, b) = match (self.tt_jd(), other.tt_jd()) {
            (Some(a), Some(b)) => (a, b),
            _ if self.scale == other.scale => (self.jd.clone(), other.jd.clone()),
            _ => return false,
        };
        a.iter().zip(&b).all(|(&(a1, a2), &(b1, b2))| {
            let seconds = ((a1 - b1) + (a2 - b2)) * SECS_PER_DAY;
            seconds.abs() <= tolerance_s
        })
    }
}

impl std::str::FromStr for Epoch {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_parse_keeps_text() {
        let t = Epoch::parse("B1950").unwrap();
        assert_eq!(t.format(), TimeFormat::ByearStr);
        assert_eq!(t.scale(), TimeScale::Tt);
        assert_eq!(t.values(), &[EpochValue::Text("B1950".to_string())]);
    }

    #[test]
    fn test_constants_match_parsed() {
        assert!(Epoch::j2000().same_instant(&Epoch::parse("J2000").unwrap(), 0.0));
        assert!(Epoch::b1950().same_instant(&Epoch::parse("B1950").unwrap(), 0.0));
    }

    #[test]
    fn test_julian_and_iso_same_instant() {
        // J2000.0 TT is 2000-01-01T11:58:55.816 UTC.
        let j2000 = Epoch::parse("J2000").unwrap();
        let iso = Epoch::parse("2000-01-01T11:58:55.816").unwrap();
        assert!(j2000.same_instant(&iso, TOL));
    }

    #[test]
    fn test_besselian_and_jd_same_instant() {
        let b1950 = Epoch::parse("B1950").unwrap();
        let jd = Epoch::from_number(2_433_282.423_459_05, TimeFormat::Jd, TimeScale::Tt).unwrap();
        assert!(b1950.same_instant(&jd, 1e-3));
    }

    #[test]
    fn test_different_instants() {
        let a = Epoch::parse("J2000").unwrap();
        let b = Epoch::parse("J2005").unwrap();
        assert!(!a.same_instant(&b, TOL));
    }

    #[test]
    fn test_ut1_only_matches_ut1() {
        let a = Epoch::from_number(2_451_545.0, TimeFormat::Jd, TimeScale::Ut1).unwrap();
        let b = Epoch::from_number(2_451_545.0, TimeFormat::Jd, TimeScale::Ut1).unwrap();
        let c = Epoch::from_number(2_451_545.0, TimeFormat::Jd, TimeScale::Tt).unwrap();
        assert!(a.same_instant(&b, 0.0));
        assert!(!a.same_instant(&c, 1.0));
    }

    #[test]
    fn test_array_epoch() {
        let t = Epoch::new(
            vec![EpochValue::Number(51_544.0), EpochValue::Number(51_545.0)],
            vec![2],
            TimeFormat::Mjd,
            TimeScale::Tai,
        )
        .unwrap();
        assert_eq!(t.shape(), &[2]);
        assert_eq!(t.jd().len(), 2);
        assert!(!t.same_instant(&Epoch::j2000(), 1e9));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = Epoch::new(
            vec![EpochValue::Number(1.0)],
            vec![2],
            TimeFormat::Jd,
            TimeScale::Tt,
        )
        .unwrap_err();
        assert!(matches!(err, TimeError::Shape { count: 1, .. }));
    }

    #[test]
    fn test_unparseable() {
        assert!(matches!(
            Epoch::parse("next tuesday"),
            Err(TimeError::Unparseable(_))
        ));
    }
}
