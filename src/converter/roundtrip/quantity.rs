//! Property tests: values and units survive any roundtrip unchanged.

use proptest::prelude::*;

use super::common::*;
use crate::array::NdArray;
use crate::frame::{Frame, FrameKind};
use crate::oracle::Comparator;
use crate::quantity::Quantity;
use crate::units::{PhysicalType, Unit};

fn length_unit() -> impl Strategy<Value = Unit> {
    prop::sample::select(
        Unit::ALL
            .iter()
            .copied()
            .filter(|u| u.physical_type() == PhysicalType::Length)
            .collect::<Vec<_>>(),
    )
}

fn cartesian(values: [NdArray; 3], unit: Unit) -> Frame {
    let [x, y, z] = values;
    Frame::builder(FrameKind::Galactocentric)
        .component("x", Quantity::new(x, unit))
        .component("y", Quantity::new(y, unit))
        .component("z", Quantity::new(z, unit))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn scalar_units_preserved(
        x in -1e6f64..1e6,
        y in -1e6f64..1e6,
        z in -1e6f64..1e6,
        unit in length_unit(),
    ) {
        let frame = cartesian([x.into(), y.into(), z.into()], unit);
        let decoded = assert_roundtrip_with(Comparator::exact(), &frame);
        let got = decoded.component("x").unwrap();
        prop_assert_eq!(got.quantity().unit(), unit);
        prop_assert_eq!(got.quantity().value().as_scalar(), Some(x));
    }

    #[test]
    fn array_values_preserved(
        xs in prop::collection::vec(-1e3f64..1e3, 1..32),
        unit in length_unit(),
    ) {
        let n = xs.len();
        let frame = cartesian(
            [NdArray::from_vec(xs.clone()), NdArray::zeros(&[n]), NdArray::linspace(0.0, 1.0, n)],
            unit,
        );
        let decoded = assert_roundtrip_with(Comparator::exact(), &frame);
        let got = decoded.component("x").unwrap();
        prop_assert_eq!(got.quantity().value().data(), xs.as_slice());
        prop_assert_eq!(decoded.shape(), vec![n]);
    }

    #[test]
    fn angles_preserved(ra in 0f64..360.0, dec in -90f64..=90.0) {
        let frame = Frame::builder(FrameKind::Icrs)
            .component("ra", deg(ra))
            .component("dec", deg(dec))
            .build()
            .unwrap();
        let decoded = assert_roundtrip_with(Comparator::exact(), &frame);
        prop_assert_eq!(decoded.component("ra").unwrap().quantity().value().as_scalar(), Some(ra));
        prop_assert_eq!(decoded.component("dec").unwrap().quantity().value().as_scalar(), Some(dec));
    }
}
