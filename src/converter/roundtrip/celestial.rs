//! Celestial frames: ICRS, FK5, FK4, FK4NoETerms, Galactic.

use super::common::*;
use crate::frame::{ConstructionMode, Frame, FrameKind};
use crate::oracle::Comparator;
use crate::quantity::{Latitude, Longitude, Quantity};
use crate::time::Epoch;
use crate::units::Unit;

fn epoch(s: &str) -> Epoch {
    Epoch::parse(s).unwrap()
}

#[test]
fn icrs_with_data() {
    let frame = with_test_data(FrameKind::Icrs).build().unwrap();
    let decoded = assert_roundtrip(&frame);
    assert_eq!(decoded.data().unwrap().mode(), ConstructionMode::Components);
    assert_eq!(encoded_keys(&frame), ["ra", "dec"]);
}

#[test]
fn icrs_from_longitude_latitude() {
    let frame = Frame::builder(FrameKind::Icrs)
        .component("ra", Longitude::new(deg(25.0)).unwrap())
        .component("dec", Latitude::new(deg(45.0)).unwrap())
        .build()
        .unwrap();
    assert_roundtrip(&frame);
}

#[test]
fn icrs_custom_wrap_angle() {
    let lon = Longitude::with_wrap_angle(deg(25.0), Quantity::new(1.5, Unit::RAD)).unwrap();
    let frame = Frame::builder(FrameKind::Icrs)
        .component("ra", lon)
        .component("dec", Latitude::new(deg(45.0)).unwrap())
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);

    let ra = decoded.component("ra").unwrap();
    let crate::representation::Component::Longitude(lon) = ra else {
        panic!("ra decoded as {ra:?}");
    };
    assert_eq!(lon.wrap_angle(), &Quantity::new(1.5, Unit::RAD));
}

#[test]
fn icrs_longitude_just_below_zero() {
    let frame = Frame::builder(FrameKind::Icrs)
        .component("ra", deg(-1e-14))
        .component("dec", deg(0.0))
        .build()
        .unwrap();
    let decoded = assert_roundtrip_with(Comparator::exact(), &frame);
    let ra = decoded.component("ra").unwrap().quantity().value().as_scalar().unwrap();
    assert!((0.0..360.0).contains(&ra), "ra = {ra}");
}

#[test]
fn icrs_arrays_compare_exactly() {
    let frame = Frame::builder(FrameKind::Icrs)
        .component("ra", Quantity::new([0.0, 1.0, 2.0], Unit::DEG))
        .component("dec", Quantity::new([3.0, 4.0, 5.0], Unit::DEG))
        .build()
        .unwrap();
    let decoded = assert_roundtrip_with(Comparator::exact(), &frame);
    assert_eq!(decoded.shape(), [3]);
}

#[test]
fn icrs_without_data() {
    let frame = Frame::builder(FrameKind::Icrs).build().unwrap();
    let decoded = assert_roundtrip(&frame);
    assert!(!decoded.has_data());
    assert!(encoded_keys(&frame).is_empty());
}

#[test]
fn fk5_default_equinox() {
    let frame = with_test_data(FrameKind::Fk5).build().unwrap();
    let decoded = assert_roundtrip(&frame);
    assert!(decoded.attribute("equinox").is_some());
    assert!(!encoded_keys(&frame).contains(&"equinox".to_string()));
}

#[test]
fn fk5_julian_equinox() {
    let frame = with_test_data(FrameKind::Fk5)
        .attribute("equinox", epoch("J2005"))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
    assert!(encoded_keys(&frame).contains(&"equinox".to_string()));
}

#[test]
fn fk5_iso_equinox() {
    let frame = with_test_data(FrameKind::Fk5)
        .attribute("equinox", epoch("2011-01-01T00:00:00"))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
}

#[test]
fn fk4_with_data() {
    let frame = with_test_data(FrameKind::Fk4).build().unwrap();
    assert_roundtrip(&frame);
}

#[test]
fn fk4_obstime_b1950() {
    let frame = with_test_data(FrameKind::Fk4)
        .attribute("obstime", epoch("B1950"))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    assert!(decoded.attribute("obstime").is_some());
    // obstime equal to the equinox is the default.
    assert_eq!(encoded_keys(&frame), ["ra", "dec"]);
}

#[test]
fn fk4_no_e_terms() {
    let frame = with_test_data(FrameKind::Fk4NoETerms).build().unwrap();
    assert_roundtrip(&frame);
    let frame = with_test_data(FrameKind::Fk4NoETerms)
        .attribute("obstime", epoch("J1975"))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
    assert_eq!(encoded_keys(&frame), ["ra", "dec", "obstime"]);
}

#[test]
fn galactic_components() {
    let frame = Frame::builder(FrameKind::Galactic)
        .component("l", deg(47.37))
        .component("b", deg(6.32))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
    assert_eq!(encoded_keys(&frame), ["l", "b"]);
}

#[test]
fn proper_motions() {
    let frame = with_test_data(FrameKind::Icrs)
        .component("distance", Quantity::new(10.0, Unit::PC))
        .component("pm_ra_cosdec", Quantity::new(1.5, Unit::MAS_PER_YR))
        .component("pm_dec", Quantity::new(-2.0, Unit::MAS_PER_YR))
        .component("radial_velocity", Quantity::new(20.0, Unit::KM_PER_S))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    let diff = decoded.data().unwrap().differential().unwrap();
    assert_eq!(diff.component("d_lon_coslat").map(|q| q.unit()), Some(Unit::MAS_PER_YR));
    assert_eq!(
        encoded_keys(&frame),
        ["ra", "dec", "distance", "pm_ra_cosdec", "pm_dec", "radial_velocity"]
    );
}
