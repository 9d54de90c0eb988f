//! Edge cases: minimal nodes, alternative epoch forms, malformed input.

use super::common::*;
use crate::codec::{encode_quantity, tags, ConvertError};
use crate::converter::{decode_frame, encode_frame};
use crate::frame::{AttributeValue, Frame, FrameKind};
use crate::node::{json, Mapping, Node};
use crate::oracle::{frames_equal, Comparator};
use crate::quantity::Quantity;
use crate::time::{Epoch, TimeFormat, TimeScale};
use crate::units::{Unit, UnitError};

fn decode_json(text: &str) -> Result<Frame, ConvertError> {
    decode_frame(&json::from_str(text)?)
}

#[test]
fn minimal_node_fills_defaults() {
    let frame = decode_json(r#"{"_tag": "frame/fk4-1.0.0"}"#).unwrap();
    let Some(AttributeValue::Epoch(equinox)) = frame.attribute("equinox") else {
        panic!("equinox missing");
    };
    assert!(equinox.same_instant(&Epoch::b1950(), 1e-6));
    assert_eq!(frame.attribute("obstime"), frame.attribute("equinox"));
    assert!(!frame.has_data());
}

#[test]
fn hand_written_document() {
    let text = r#"{
        "_tag": "frame/fk5-1.0.0",
        "ra": {"_tag": "coordinates/longitude-1.0.0", "value": 10.5, "unit": "deg"},
        "dec": {"_tag": "coordinates/latitude-1.0.0", "value": -3.25, "unit": "deg"},
        "equinox": "J2010"
    }"#;
    let frame = decode_json(text).unwrap();
    let expected = Frame::builder(FrameKind::Fk5)
        .component("ra", deg(10.5))
        .component("dec", deg(-3.25))
        .attribute("equinox", Epoch::parse("J2010").unwrap())
        .build()
        .unwrap();
    assert!(frames_equal(&frame, &expected));
}

#[test]
fn julian_date_equals_epoch_string() {
    let jd = Epoch::from_number(2_451_545.0, TimeFormat::Jd, TimeScale::Tt).unwrap();
    let frame = with_test_data(FrameKind::Fk5).attribute("equinox", jd).build().unwrap();
    let default = with_test_data(FrameKind::Fk5).build().unwrap();
    assert!(frames_equal(&frame, &default));

    // Equal to the default instant, so nothing is written.
    assert_eq!(encoded_keys(&frame), ["ra", "dec"]);
}

#[test]
fn modified_julian_date_node() {
    let text = r#"{
        "_tag": "frame/fk5-1.0.0",
        "equinox": {"_tag": "time/time-1.0.0", "value": 51544.5, "format": "mjd", "scale": "tt"}
    }"#;
    let frame = decode_json(text).unwrap();
    assert!(frames_equal(&frame, &Frame::builder(FrameKind::Fk5).build().unwrap()));
}

#[test]
fn besselian_equinox_equals_iso_utc() {
    let frame = with_test_data(FrameKind::Fk5)
        .attribute("equinox", Epoch::parse("B1950").unwrap())
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);

    // B1950.0 TT printed as UTC; TAI - UTC was zero before 1960.
    let iso = with_test_data(FrameKind::Fk5)
        .attribute("equinox", Epoch::parse("1949-12-31T22:09:14.6779200").unwrap())
        .build()
        .unwrap();
    if let Err(mismatch) = Comparator::default().check(&decoded, &iso) {
        panic!("{}", mismatch.report(false));
    }
}

#[test]
fn utc_drift_era_epoch() {
    // 1965-06-01 UTC (MJD 38912): TAI - UTC = 3.6401300 + (38912 - 38761) * 0.0012960 s.
    let utc = Epoch::parse("1965-06-01T00:00:00").unwrap();
    let tai_offset = 3.640_130_0 + (38_912.0 - 38_761.0) * 0.001_296_0;
    let mjd = 38_912.0 + (tai_offset + 32.184) / 86_400.0;
    let tt = Epoch::from_number(mjd, TimeFormat::Mjd, TimeScale::Tt).unwrap();
    assert!(utc.same_instant(&tt, 1e-5));
}

#[test]
fn bare_number_epoch_is_julian_year() {
    let frame = decode_json(r#"{"_tag": "frame/cirs-1.0.0", "obstime": 2005.0}"#).unwrap();
    let expected = Frame::builder(FrameKind::Cirs)
        .attribute("obstime", Epoch::parse("J2005").unwrap())
        .build()
        .unwrap();
    assert!(frames_equal(&frame, &expected));
}

#[test]
fn epoch_scale_preserved() {
    let tai = Epoch::from_number(2_455_000.5, TimeFormat::Jd, TimeScale::Tai).unwrap();
    let frame = Frame::builder(FrameKind::Cirs).attribute("obstime", tai).build().unwrap();
    let decoded = assert_roundtrip(&frame);
    let Some(AttributeValue::Epoch(obstime)) = decoded.attribute("obstime") else {
        panic!("obstime missing");
    };
    assert_eq!(obstime.scale(), TimeScale::Tai);
    assert_eq!(obstime.format(), TimeFormat::Jd);
}

#[test]
fn unknown_attribute_rejected() {
    let err = decode_json(r#"{"_tag": "frame/galactic-1.0.0", "equinox": "J2000"}"#).unwrap_err();
    assert!(err.is_unknown_attribute(), "{err}");
}

#[test]
fn unknown_tag_rejected() {
    let err = decode_json(r#"{"_tag": "frame/hcrs-1.0.0"}"#).unwrap_err();
    assert!(err.is_unknown_tag(), "{err}");
    let err = decode_json(r#"{"_tag": "frame/icrs-9.0.0"}"#).unwrap_err();
    assert!(err.is_unknown_tag(), "{err}");
}

#[test]
fn unknown_field_inside_quantity_rejected() {
    let text = r#"{
        "_tag": "frame/galactocentric-1.0.0",
        "z_sun": {"_tag": "unit/quantity-1.0.0", "value": 1.0, "unit": "pc", "extra": true}
    }"#;
    let err = decode_json(text).unwrap_err();
    assert!(err.is_unknown_attribute(), "{err}");
}

#[test]
fn missing_unit_is_schema_error() {
    let text = r#"{
        "_tag": "frame/galactocentric-1.0.0",
        "z_sun": {"_tag": "unit/quantity-1.0.0", "value": 1.0}
    }"#;
    assert!(matches!(decode_json(text), Err(ConvertError::Schema(_))));
}

#[test]
fn unparseable_unit_is_unit_error() {
    let text = r#"{
        "_tag": "frame/galactocentric-1.0.0",
        "z_sun": {"_tag": "unit/quantity-1.0.0", "value": 1.0, "unit": "furlong"}
    }"#;
    assert!(matches!(decode_json(text), Err(ConvertError::Unit(UnitError::Unparseable(_)))));
}

#[test]
fn wrong_dimension_rejected() {
    let node = Mapping::tagged(tags::frame_tag(FrameKind::Galactocentric))
        .with("galcen_distance", encode_quantity(&Quantity::new(1.0, Unit::S)));
    let err = decode_frame(&node.into()).unwrap_err();
    assert!(matches!(err, ConvertError::Unit(UnitError::Dimension { .. })), "{err}");
}

#[test]
fn non_frame_root_rejected() {
    assert!(matches!(decode_frame(&Node::Str("ICRS".into())), Err(ConvertError::Schema(_))));
    assert!(matches!(decode_json(r#"{"ra": 1.0}"#), Err(ConvertError::Schema(_))));
}

#[test]
fn latitude_out_of_range_rejected() {
    let text = r#"{
        "_tag": "frame/icrs-1.0.0",
        "ra": {"_tag": "coordinates/longitude-1.0.0", "value": 1.0, "unit": "deg"},
        "dec": {"_tag": "coordinates/latitude-1.0.0", "value": 91.0, "unit": "deg"}
    }"#;
    assert!(decode_json(text).is_err());
}

#[test]
fn nan_values_survive() {
    let frame = Frame::builder(FrameKind::Galactocentric)
        .component("x", Quantity::new([f64::NAN, 1.0], Unit::KPC))
        .component("y", Quantity::new([0.0, f64::INFINITY], Unit::KPC))
        .component("z", Quantity::new([0.0, 0.0], Unit::KPC))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    let x = decoded.component("x").unwrap();
    assert!(x.quantity().value().data()[0].is_nan());
    let y = decoded.component("y").unwrap();
    assert_eq!(y.quantity().value().data()[1], f64::INFINITY);
}

#[test]
fn scalar_and_length_one_array_differ() {
    let scalar = with_test_data(FrameKind::Icrs).build().unwrap();
    let array = Frame::builder(FrameKind::Icrs)
        .component("ra", Quantity::new([1.0], Unit::DEG))
        .component("dec", Quantity::new([2.0], Unit::DEG))
        .build()
        .unwrap();
    assert!(!Comparator::default().equal(&scalar, &array));
    let decoded = assert_roundtrip(&array);
    assert_eq!(decoded.shape(), [1]);
}

#[test]
fn units_are_not_normalized() {
    let frame = Frame::builder(FrameKind::Icrs)
        .component("ra", Quantity::new(1.5, Unit::HOURANGLE))
        .component("dec", Quantity::new(30.0, Unit::ARCMIN))
        .build()
        .unwrap();
    let node = encode_frame(&frame).unwrap();
    let ra = node.as_mapping().unwrap().get("ra").unwrap();
    assert_eq!(ra.as_mapping().unwrap().get("unit").and_then(Node::as_str), Some("hourangle"));

    let decoded = assert_roundtrip(&frame);
    assert_eq!(decoded.component("dec").unwrap().quantity().unit(), Unit::ARCMIN);
}
