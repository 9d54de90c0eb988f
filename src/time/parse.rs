//! Textual and numeric epoch forms to two-part Julian dates.

use chrono::{NaiveDate, NaiveDateTime};

use super::scale::SECS_PER_DAY;
use super::{TimeError, TimeFormat};

const J2000_JD: f64 = 2_451_545.0;
const MJD_ZERO: f64 = 2_400_000.5;
const JULIAN_YEAR_DAYS: f64 = 365.25;
const TROPICAL_YEAR_DAYS: f64 = 365.242_198_781;
/// MJD of B1900.0.
const B1900_MJD: f64 = 15_019.813_52;

const ISOT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const ISO_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Guess the format of an epoch string.
///
/// - `J2000`, `J2005.5` → `jyear_str`
/// - `B1950`, `B1975.0` → `byear_str`
/// - `2011-01-01T00:00:00` → `isot`
/// - `2011-01-01 00:00:00`, `2011-01-01` → `iso`
pub fn detect_format(s: &str) -> Option<TimeFormat> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('J')
        && rest.parse::<f64>().is_ok()
    {
        return Some(TimeFormat::JyearStr);
    }
    if let Some(rest) = s.strip_prefix('B')
        && rest.parse::<f64>().is_ok()
    {
        return Some(TimeFormat::ByearStr);
    }
    if parse_calendar(s, ISOT_FORMATS).is_some() {
        return Some(TimeFormat::Isot);
    }
    if parse_calendar(s, ISO_FORMATS).is_some() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        return Some(TimeFormat::Iso);
    }
    None
}

/// Convert a string in a text format to a two-part Julian date.
pub fn text_to_jd(s: &str, format: TimeFormat) -> Result<(f64, f64), TimeError> {
    let unparseable = || TimeError::Unparseable(s.to_string());
    let s = s.trim();
    match format {
        TimeFormat::JyearStr => {
            let year = s
                .strip_prefix('J')
                .and_then(|y| y.parse::<f64>().ok())
                .filter(|y| y.is_finite());
            year.map(jyear_to_jd).ok_or_else(unparseable)
        }
        TimeFormat::ByearStr => {
            let year = s
                .strip_prefix('B')
                .and_then(|y| y.parse::<f64>().ok())
                .filter(|y| y.is_finite());
            year.map(byear_to_jd).ok_or_else(unparseable)
        }
        TimeFormat::Isot => parse_calendar(s, ISOT_FORMATS)
            .map(datetime_to_jd)
            .ok_or_else(unparseable),
        TimeFormat::Iso => parse_calendar(s, ISO_FORMATS)
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(datetime_to_jd)
            .ok_or_else(unparseable),
        other => Err(TimeError::ValueKind {
            format: other,
            kind: "text",
        }),
    }
}

/// Convert a number in a numeric format to a two-part Julian date.
pub fn number_to_jd(value: f64, format: TimeFormat) -> Result<(f64, f64), TimeError> {
    if !value.is_finite() {
        return Err(TimeError::NonFinite(value));
    }
    match format {
        TimeFormat::Jd => Ok((value, 0.0)),
        TimeFormat::Mjd => Ok((MJD_ZERO, value)),
        TimeFormat::Jyear => Ok(jyear_to_jd(value)),
        TimeFormat::Byear => Ok(byear_to_jd(value)),
        other => Err(TimeError::ValueKind {
            format: other,
            kind: "numeric",
        }),
    }
}

fn jyear_to_jd(year: f64) -> (f64, f64) {
    (J2000_JD, (year - 2000.0) * JULIAN_YEAR_DAYS)
}

fn byear_to_jd(year: f64) -> (f64, f64) {
    (MJD_ZERO, B1900_MJD + (year - 1900.0) * TROPICAL_YEAR_DAYS)
}

fn parse_calendar(s: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn datetime_to_jd(dt: NaiveDateTime) -> (f64, f64) {
    let j2000 = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default();
    let delta = dt.signed_duration_since(j2000);
    let seconds = delta.num_seconds();
    let nanos = delta.subsec_nanos() as f64;
    let days = seconds.div_euclid(86_400);
    let rem = seconds.rem_euclid(86_400) as f64 + nanos * 1e-9;
    (J2000_JD + days as f64, rem / SECS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd(pair: (f64, f64)) -> f64 {
        pair.0 + pair.1
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("J2000"), Some(TimeFormat::JyearStr));
        assert_eq!(detect_format("B1950.0"), Some(TimeFormat::ByearStr));
        assert_eq!(detect_format("2011-01-01T00:00:00"), Some(TimeFormat::Isot));
        assert_eq!(detect_format("2011-01-01 00:00:00.000"), Some(TimeFormat::Iso));
        assert_eq!(detect_format("2011-01-01"), Some(TimeFormat::Iso));
        assert_eq!(detect_format("yesterday"), None);
        assert_eq!(detect_format("Jupiter"), None);
    }

    #[test]
    fn test_julian_epochs() {
        assert_eq!(jd(text_to_jd("J2000", TimeFormat::JyearStr).unwrap()), 2_451_545.0);
        assert_eq!(
            jd(text_to_jd("J2005", TimeFormat::JyearStr).unwrap()),
            2_451_545.0 + 5.0 * 365.25
        );
    }

    #[test]
    fn test_besselian_epoch() {
        let b1950 = jd(text_to_jd("B1950", TimeFormat::ByearStr).unwrap());
        assert!((b1950 - 2_433_282.423_459_05).abs() < 1e-6);
    }

    #[test]
    fn test_iso_epochs() {
        let noon = text_to_jd("2000-01-01T12:00:00", TimeFormat::Isot).unwrap();
        assert_eq!(noon, (2_451_545.0, 0.0));

        let midnight = text_to_jd("2011-01-01", TimeFormat::Iso).unwrap();
        assert_eq!(jd(midnight), 2_455_562.5);

        let spaced = text_to_jd("2011-01-01 00:00:00.000", TimeFormat::Iso).unwrap();
        assert_eq!(spaced, midnight);
    }

    #[test]
    fn test_numeric_epochs() {
        assert_eq!(number_to_jd(51_544.5, TimeFormat::Mjd).unwrap(), (MJD_ZERO, 51_544.5));
        assert_eq!(jd(number_to_jd(2000.0, TimeFormat::Jyear).unwrap()), 2_451_545.0);
        assert!(number_to_jd(f64::NAN, TimeFormat::Jd).is_err());
        assert!(number_to_jd(1.0, TimeFormat::Isot).is_err());
    }

    #[test]
    fn test_unparseable_text() {
        assert!(text_to_jd("Jxyz", TimeFormat::JyearStr).is_err());
        assert!(text_to_jd("2011-13-01T00:00:00", TimeFormat::Isot).is_err());
    }
}
