//! Time scales and their offsets from Terrestrial Time.

use std::fmt;

use super::TimeError;

/// Seconds per day.
pub(crate) const SECS_PER_DAY: f64 = 86_400.0;

/// TT − TAI in seconds.
const TT_MINUS_TAI: f64 = 32.184;

/// JD of 1977-01-01T00:00:32.184 TT, where TCG, TCB and TT coincide.
const TCG_TCB_EPOCH_JD: f64 = 2_443_144.500_372_5;

/// Rate difference between TCG and TT.
const L_G: f64 = 6.969_290_134e-10;

/// Rate difference between TCB and TDB.
const L_B: f64 = 1.550_519_768e-8;

/// TDB − TCB at the TCB epoch, in seconds.
const TDB0: f64 = -6.55e-5;

/// TAI − UTC by MJD of the UTC day it takes effect.
const LEAP_SECONDS: &[(f64, f64)] = &[
    (41_317.0, 10.0), // 1972-01-01
    (41_499.0, 11.0), // 1972-07-01
    (41_683.0, 12.0), // 1973-01-01
    (42_048.0, 13.0), // 1974-01-01
    (42_413.0, 14.0), // 1975-01-01
    (42_778.0, 15.0), // 1976-01-01
    (43_144.0, 16.0), // 1977-01-01
    (43_509.0, 17.0), // 1978-01-01
    (43_874.0, 18.0), // 1979-01-01
    (44_239.0, 19.0), // 1980-01-01
    (44_786.0, 20.0), // 1981-07-01
    (45_151.0, 21.0), // 1982-07-01
    (45_516.0, 22.0), // 1983-07-01
    (46_247.0, 23.0), // 1985-07-01
    (47_161.0, 24.0), // 1988-01-01
    (47_892.0, 25.0), // 1990-01-01
    (48_257.0, 26.0), // 1991-01-01
    (48_804.0, 27.0), // 1992-07-01
    (49_169.0, 28.0), // 1993-07-01
    (49_534.0, 29.0), // 1994-07-01
    (50_083.0, 30.0), // 1996-01-01
    (50_630.0, 31.0), // 1997-07-01
    (51_179.0, 32.0), // 1999-01-01
    (53_736.0, 33.0), // 2006-01-01
    (54_832.0, 34.0), // 2009-01-01
    (56_109.0, 35.0), // 2012-07-01
    (57_204.0, 36.0), // 2015-07-01
    (57_754.0, 37.0), // 2017-01-01
];

/// TAI − UTC before 1972, when UTC seconds were stretched to follow UT1.
///
/// Each entry is `(start MJD, offset, reference MJD, rate)`; the offset on a
/// date is `offset + (mjd - reference) * rate`.
const DRIFT_ERAS: &[(f64, f64, f64, f64)] = &[
    (36_934.0, 1.417_818_0, 37_300.0, 0.001_296_0), // 1960-01-01
    (37_300.0, 1.422_818_0, 37_300.0, 0.001_296_0), // 1961-01-01
    (37_512.0, 1.372_818_0, 37_300.0, 0.001_296_0), // 1961-08-01
    (37_665.0, 1.845_858_0, 37_665.0, 0.001_123_2), // 1962-01-01
    (38_334.0, 1.945_858_0, 37_665.0, 0.001_123_2), // 1963-11-01
    (38_395.0, 3.240_130_0, 38_761.0, 0.001_296_0), // 1964-01-01
    (38_486.0, 3.340_130_0, 38_761.0, 0.001_296_0), // 1964-04-01
    (38_639.0, 3.440_130_0, 38_761.0, 0.001_296_0), // 1964-09-01
    (38_761.0, 3.540_130_0, 38_761.0, 0.001_296_0), // 1965-01-01
    (38_820.0, 3.640_130_0, 38_761.0, 0.001_296_0), // 1965-03-01
    (38_942.0, 3.740_130_0, 38_761.0, 0.001_296_0), // 1965-07-01
    (39_004.0, 3.840_130_0, 38_761.0, 0.001_296_0), // 1965-09-01
    (39_126.0, 4.313_170_0, 39_126.0, 0.002_592_0), // 1966-01-01
    (39_887.0, 4.213_170_0, 39_126.0, 0.002_592_0), // 1968-02-01
];

/// A time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    /// Coordinated Universal Time.
    Utc,
    /// International Atomic Time.
    Tai,
    /// Terrestrial Time.
    Tt,
    /// Barycentric Dynamical Time.
    Tdb,
    /// Geocentric Coordinate Time.
    Tcg,
    /// Barycentric Coordinate Time.
    Tcb,
    /// Universal Time (Earth rotation).
    Ut1,
}

impl TimeScale {
    /// Lowercase scale name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utc => "utc",
            Self::Tai => "tai",
            Self::Tt => "tt",
            Self::Tdb => "tdb",
            Self::Tcg => "tcg",
            Self::Tcb => "tcb",
            Self::Ut1 => "ut1",
        }
    }

    /// Parse a scale name, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        match s.to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "tai" => Ok(Self::Tai),
            "tt" => Ok(Self::Tt),
            "tdb" => Ok(Self::Tdb),
            "tcg" => Ok(Self::Tcg),
            "tcb" => Ok(Self::Tcb),
            "ut1" => Ok(Self::Ut1),
            _ => Err(TimeError::UnknownScale(s.to_string())),
        }
    }

    /// Convert a two-part Julian date in this scale to TT.
    ///
    /// Returns `None` for UT1, which needs Earth orientation data.
    pub(crate) fn to_tt(self, jd1: f64, jd2: f64) -> Option<(f64, f64)> {
        let shift = |seconds: f64| Some((jd1, jd2 + seconds / SECS_PER_DAY));
        match self {
            Self::Tt => Some((jd1, jd2)),
            Self::Tai => shift(TT_MINUS_TAI),
            Self::Utc => {
                let mjd = (jd1 - 2_400_000.5) + jd2;
                shift(tai_minus_utc(mjd) + TT_MINUS_TAI)
            }
            Self::Tdb => shift(-tdb_minus_tt(jd1 + jd2)),
            Self::Tcg => {
                let elapsed = ((jd1 - TCG_TCB_EPOCH_JD) + jd2) * SECS_PER_DAY;
                shift(-L_G * elapsed)
            }
            Self::Tcb => {
                let elapsed = ((jd1 - TCG_TCB_EPOCH_JD) + jd2) * SECS_PER_DAY;
                let tdb = jd2 + (-L_B * elapsed + TDB0) / SECS_PER_DAY;
                Self::Tdb.to_tt(jd1, tdb)
            }
            Self::Ut1 => None,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// TAI − UTC in seconds on the given UTC MJD.
///
/// Zero before 1960, the drift formula from 1960 to 1972, whole leap
/// seconds afterwards.
pub(crate) fn tai_minus_utc(mjd: f64) -> f64 {
    if let Some((_, offset)) = LEAP_SECONDS.iter().rev().find(|(start, _)| mjd >= *start) {
        return *offset;
    }
    DRIFT_ERAS
        .iter()
        .rev()
        .find(|(start, ..)| mjd >= *start)
        .map_or(0.0, |(_, offset, reference, rate)| offset + (mjd - reference) * rate)
}

/// Two-term periodic approximation of TDB − TT, in seconds.
fn tdb_minus_tt(jd: f64) -> f64 {
    let g = (357.53 + 0.985_600_28 * (jd - 2_451_545.0)).to_radians();
    0.001_657 * g.sin() + 0.000_014 * (2.0 * g).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_seconds() {
        assert_eq!(tai_minus_utc(51_544.5), 32.0); // 2000-01-01
        assert_eq!(tai_minus_utc(55_562.0), 34.0); // 2011-01-01
        assert_eq!(tai_minus_utc(60_000.0), 37.0);
        assert_eq!(tai_minus_utc(41_317.0), 10.0); // 1972-01-01
    }

    #[test]
    fn test_pre_1972_offsets() {
        assert_eq!(tai_minus_utc(33_282.0), 0.0); // 1949-12-31
        assert_eq!(tai_minus_utc(36_933.9), 0.0);
        // 1960-01-01: 1.4178180 + (36934 - 37300) * 0.0012960
        assert!((tai_minus_utc(36_934.0) - 0.943_482).abs() < 1e-9);
        // 1971-12-31, just before the first leap second
        let last = 4.213_170_0 + (41_316.0 - 39_126.0) * 0.002_592_0;
        assert!((tai_minus_utc(41_316.0) - last).abs() < 1e-9);
    }

    #[test]
    fn test_tai_to_tt() {
        let (jd1, jd2) = TimeScale::Tai.to_tt(2_451_545.0, 0.0).unwrap();
        assert_eq!(jd1, 2_451_545.0);
        assert!((jd2 * SECS_PER_DAY - 32.184).abs() < 1e-9);
    }

    #[test]
    fn test_utc_to_tt_2000() {
        let (_, jd2) = TimeScale::Utc.to_tt(2_451_545.0, 0.0).unwrap();
        assert!((jd2 * SECS_PER_DAY - 64.184).abs() < 1e-9);
    }

    #[test]
    fn test_ut1_not_convertible() {
        assert!(TimeScale::Ut1.to_tt(2_451_545.0, 0.0).is_none());
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(TimeScale::parse("TDB").unwrap(), TimeScale::Tdb);
        assert!(TimeScale::parse("gps").is_err());
    }
}
