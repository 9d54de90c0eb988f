//! Galactocentric frames and their nested attributes.

use super::common::*;
use crate::array::NdArray;
use crate::converter::encode_frame;
use crate::frame::{AttributeValue, Frame, FrameKind};
use crate::node::Node;
use crate::quantity::Quantity;
use crate::representation::Differential;
use crate::units::Unit;

fn kpc(values: NdArray) -> Quantity {
    Quantity::new(values, Unit::KPC)
}

#[test]
fn linspace_positions_with_z_sun() {
    let frame = Frame::builder(FrameKind::Galactocentric)
        .component("x", kpc(NdArray::linspace(-10.0, 10.0, 100)))
        .component("y", kpc(NdArray::linspace(-10.0, 10.0, 100)))
        .component("z", kpc(NdArray::zeros(&[100])))
        .attribute("z_sun", Quantity::new(15.0, Unit::PC))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);
    assert_eq!(decoded.shape(), [100]);
    assert_eq!(encoded_keys(&frame), ["x", "y", "z", "z_sun"]);

    let node = encode_frame(&frame).unwrap();
    let x = node.as_mapping().unwrap().get("x").unwrap();
    let value = x.as_mapping().unwrap().get("value").unwrap();
    assert!(matches!(value, Node::NdArray(a) if a.shape() == [100]));
}

#[test]
fn defaults_only() {
    let frame = Frame::builder(FrameKind::Galactocentric).build().unwrap();
    let decoded = assert_roundtrip(&frame);
    for name in ["galcen_coord", "galcen_distance", "galcen_v_sun", "z_sun", "roll"] {
        assert!(decoded.attribute(name).is_some(), "{name} not materialized");
    }
    assert!(encoded_keys(&frame).is_empty());
}

#[test]
fn nested_galcen_coord() {
    let center = Frame::builder(FrameKind::Icrs)
        .component("ra", deg(266.0))
        .component("dec", deg(-29.0))
        .build()
        .unwrap();
    let frame = Frame::builder(FrameKind::Galactocentric)
        .attribute("galcen_coord", center)
        .attribute("galcen_distance", Quantity::new(8.3, Unit::KPC))
        .build()
        .unwrap();
    let decoded = assert_roundtrip(&frame);

    let Some(AttributeValue::Coordinate(inner)) = decoded.attribute("galcen_coord") else {
        panic!("galcen_coord not decoded as a coordinate");
    };
    assert_eq!(inner.kind(), FrameKind::Icrs);

    let node = encode_frame(&frame).unwrap();
    let nested = node.as_mapping().unwrap().get("galcen_coord").unwrap();
    assert_eq!(nested.tag(), Some("frame/icrs-1.0.0"));
}

#[test]
fn solar_velocity() {
    let v_sun = Differential::cartesian(
        Quantity::new(11.1, Unit::KM_PER_S),
        Quantity::new(232.24, Unit::KM_PER_S),
        Quantity::new(7.25, Unit::KM_PER_S),
    )
    .unwrap();
    let frame = Frame::builder(FrameKind::Galactocentric)
        .attribute("galcen_v_sun", v_sun)
        .attribute("roll", deg(1.0))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
    assert_eq!(encoded_keys(&frame), ["galcen_v_sun", "roll"]);
}

#[test]
fn cartesian_velocities() {
    let speed = |v| Quantity::new(v, Unit::KM_PER_S);
    let frame = Frame::builder(FrameKind::Galactocentric)
        .component("x", kpc(NdArray::scalar(1.0)))
        .component("y", kpc(NdArray::scalar(2.0)))
        .component("z", kpc(NdArray::scalar(3.0)))
        .component("v_x", speed(10.0))
        .component("v_y", speed(-20.0))
        .component("v_z", speed(0.5))
        .build()
        .unwrap();
    assert_roundtrip(&frame);
}
