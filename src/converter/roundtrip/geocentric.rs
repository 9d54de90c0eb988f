//! Earth-bound frames: CIRS, GCRS, ITRS, PrecessedGeocentric.

use super::common::*;
use crate::codec::tags;
use crate::converter::{encode_frame, DATA_KEY};
use crate::frame::{AttributeValue, ConstructionMode, Frame, FrameKind};
use crate::quantity::{Latitude, Longitude, Quantity};
use crate::representation::{Representation, RepresentationKind};
use crate::time::Epoch;
use crate::units::Unit;

fn metres(x: f64, y: f64, z: f64) -> Representation {
    Representation::cartesian(
        Quantity::new(x, Unit::M),
        Quantity::new(y, Unit::M),
        Quantity::new(z, Unit::M),
    )
    .unwrap()
}

#[test]
fn cirs() {
    assert_roundtrip(&with_test_data(FrameKind::Cirs).build().unwrap());

    let frame = with_test_data(FrameKind::Cirs)
        .attribute("obstime", Epoch::parse("J2005").unwrap())
        .build()
        .unwrap();
    assert_roundtrip(&frame);
    assert_eq!(encoded_keys(&frame), ["ra", "dec", "obstime"]);
}

#[test]
fn gcrs() {
    assert_roundtrip(&with_test_data(FrameKind::Gcrs).build().unwrap());
}

#[test]
fn gcrs_obsgeoloc() {
    let frame = with_test_data(FrameKind::Gcrs)
        .attribute("obsgeoloc", metres(1.0, 2.0, 3.0))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    assert_eq!(decoded.attribute("obsgeoloc"), Some(&AttributeValue::from(metres(1.0, 2.0, 3.0))));

    let node = encode_frame(&frame).unwrap();
    let obsgeoloc = node.as_mapping().unwrap().get("obsgeoloc").unwrap();
    assert_eq!(obsgeoloc.tag(), Some(tags::representation_tag(RepresentationKind::Cartesian).as_str()));
}

#[test]
fn gcrs_obsgeoloc_at_origin_is_elided() {
    let frame = with_test_data(FrameKind::Gcrs)
        .attribute("obsgeoloc", metres(0.0, 0.0, 0.0))
        .build()
        .unwrap();
    assert_eq!(encoded_keys(&frame), ["ra", "dec"]);
}

#[test]
fn itrs_spherical_representation() {
    let repr = Representation::spherical(
        Longitude::new(deg(12.3)).unwrap(),
        Latitude::new(deg(45.6)).unwrap(),
        Quantity::new(1.0, Unit::KM),
    )
    .unwrap();
    let frame = Frame::builder(FrameKind::Itrs).representation(repr).build().unwrap();
    let decoded = assert_roundtrip(&frame);

    let data = decoded.data().unwrap();
    assert_eq!(data.mode(), ConstructionMode::Representation);
    assert_eq!(data.representation().kind(), RepresentationKind::Spherical);
    assert_eq!(encoded_keys(&frame), [DATA_KEY]);
}

#[test]
fn precessed_geocentric() {
    assert_roundtrip(&with_test_data(FrameKind::PrecessedGeocentric).build().unwrap());

    let frame = with_test_data(FrameKind::PrecessedGeocentric)
        .attribute("equinox", Epoch::parse("B1975").unwrap())
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    assert!(decoded.attribute("obstime").is_some());
    assert_eq!(encoded_keys(&frame), ["ra", "dec", "equinox"]);
}

#[test]
fn file_roundtrip() {
    let frame = with_test_data(FrameKind::Gcrs)
        .attribute("obstime", Epoch::parse("2010-06-01T12:00:00").unwrap())
        .attribute("obsgeoloc", metres(1.0, 2.0, 3.0))
        .build()
        .unwrap();
    assert_file_roundtrip(&frame);
}
