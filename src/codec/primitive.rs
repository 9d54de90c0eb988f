//! Codecs for the leaf values frames are made of: arrays, quantities, angles
//! and epochs.

use tracing::trace;

use crate::array::NdArray;
use crate::node::{Mapping, Node};
use crate::quantity::{Latitude, Longitude, Quantity};
use crate::representation::Component;
use crate::time::{detect_format, Epoch, EpochValue, TimeFormat, TimeScale};
use crate::units::{PhysicalType, Unit};

use super::{tags, ConvertError};

// =============================================================================
// Mapping helpers
// =============================================================================

/// Required entry of a tagged mapping.
pub(crate) fn required<'a>(mapping: &'a Mapping, key: &str) -> Result<&'a Node, ConvertError> {
    mapping
        .get(key)
        .ok_or_else(|| ConvertError::missing_field(key, mapping.tag().unwrap_or("<untagged>")))
}

/// Fail with [`ConvertError::UnknownAttribute`] on the first key not in `allowed`.
pub(crate) fn reject_unknown(mapping: &Mapping, allowed: &[&str]) -> Result<(), ConvertError> {
    match mapping.keys().find(|k| !allowed.contains(k)) {
        Some(name) => Err(ConvertError::UnknownAttribute {
            tag: mapping.tag().unwrap_or("<untagged>").to_string(),
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// The node as a mapping carrying one of `expected` tags.
pub(crate) fn expect_tagged<'a>(node: &'a Node, expected: &[&str]) -> Result<&'a Mapping, ConvertError> {
    let mapping = node.as_mapping().ok_or_else(|| {
        ConvertError::schema(format!("expected {}, found {}", expected.join(" or "), node.type_name()))
    })?;
    match mapping.tag() {
        Some(tag) if expected.contains(&tag) => Ok(mapping),
        Some(tag) => Err(ConvertError::schema(format!(
            "expected {}, found node tagged '{tag}'",
            expected.join(" or ")
        ))),
        None => Err(ConvertError::schema(format!(
            "expected {}, found untagged mapping",
            expected.join(" or ")
        ))),
    }
}

// =============================================================================
// Arrays
// =============================================================================

/// Encode numeric values: a bare float for a scalar, an array node otherwise.
pub fn encode_array(array: &NdArray) -> Node {
    match (array.is_scalar(), array.as_scalar()) {
        (true, Some(v)) => Node::Float(v),
        _ => Node::NdArray(array.clone()),
    }
}

/// Decode numeric values from a number, an array node, or a flat list of numbers.
pub fn decode_array(node: &Node) -> Result<NdArray, ConvertError> {
    match node {
        Node::Float(_) | Node::Int(_) => Ok(NdArray::scalar(node.as_f64().unwrap_or(f64::NAN))),
        Node::NdArray(array) => Ok(array.clone()),
        Node::List(items) => items
            .iter()
            .map(|item| {
                item.as_f64().ok_or_else(|| {
                    ConvertError::schema(format!("expected number in list, found {}", item.type_name()))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NdArray::from_vec),
        other => Err(ConvertError::schema(format!(
            "expected numeric value, found {}",
            other.type_name()
        ))),
    }
}

// =============================================================================
// Quantities and angles
// =============================================================================

fn quantity_fields(tag: &str, q: &Quantity) -> Mapping {
    Mapping::tagged(tag)
        .with("value", encode_array(q.value()))
        .with("unit", q.unit().name())
}

fn decode_quantity_fields(mapping: &Mapping) -> Result<Quantity, ConvertError> {
    let value = decode_array(required(mapping, "value")?)?;
    let unit = match required(mapping, "unit")? {
        Node::Str(s) => Unit::parse(s)?,
        other => {
            return Err(ConvertError::schema(format!(
                "unit must be a string, found {}",
                other.type_name()
            )));
        }
    };
    Ok(Quantity::new(value, unit))
}

/// Encode a plain quantity.
pub fn encode_quantity(q: &Quantity) -> Node {
    quantity_fields(tags::QUANTITY, q).into()
}

/// Encode a quantity after checking it measures `expected`.
pub fn encode_quantity_as(q: &Quantity, expected: PhysicalType) -> Result<Node, ConvertError> {
    q.require(expected)?;
    Ok(encode_quantity(q))
}

/// Decode any quantity-like node (plain quantity, angle, longitude, latitude).
pub fn decode_quantity(node: &Node) -> Result<Quantity, ConvertError> {
    decode_component(node).map(|c| c.quantity().clone())
}

/// Decode a quantity and check it measures `expected`.
pub fn decode_quantity_as(node: &Node, expected: PhysicalType) -> Result<Quantity, ConvertError> {
    let q = decode_quantity(node)?;
    q.require(expected)?;
    Ok(q)
}

/// Encode an angle.
pub fn encode_angle(q: &Quantity) -> Result<Node, ConvertError> {
    q.require(PhysicalType::Angle)?;
    Ok(quantity_fields(tags::ANGLE, q).into())
}

/// Encode a longitude; the wrap angle is written only when it is not 360°.
pub fn encode_longitude(lon: &Longitude) -> Result<Node, ConvertError> {
    let mut mapping = quantity_fields(tags::LONGITUDE, lon.angle());
    if !lon.has_default_wrap() {
        mapping.insert("wrap_angle", encode_angle(lon.wrap_angle())?);
    }
    Ok(mapping.into())
}

/// Encode a latitude.
pub fn encode_latitude(lat: &Latitude) -> Node {
    quantity_fields(tags::LATITUDE, lat.angle()).into()
}

/// Encode a representation component according to its kind.
pub fn encode_component(component: &Component) -> Result<Node, ConvertError> {
    match component {
        Component::Quantity(q) => Ok(encode_quantity(q)),
        Component::Longitude(lon) => encode_longitude(lon),
        Component::Latitude(lat) => Ok(encode_latitude(lat)),
    }
}

/// Decode a representation component, keeping longitude and latitude typing.
pub fn decode_component(node: &Node) -> Result<Component, ConvertError> {
    let mapping = expect_tagged(
        node,
        &[tags::QUANTITY, tags::ANGLE, tags::LONGITUDE, tags::LATITUDE],
    )?;
    match mapping.tag() {
        Some(tags::LONGITUDE) => {
            reject_unknown(mapping, &["value", "unit", "wrap_angle"])?;
            let angle = decode_quantity_fields(mapping)?;
            let lon = match mapping.get("wrap_angle") {
                Some(wrap) => Longitude::with_wrap_angle(angle, decode_quantity(wrap)?)?,
                None => Longitude::new(angle)?,
            };
            Ok(Component::Longitude(lon))
        }
        Some(tags::LATITUDE) => {
            reject_unknown(mapping, &["value", "unit"])?;
            Ok(Component::Latitude(Latitude::new(decode_quantity_fields(mapping)?)?))
        }
        Some(tags::ANGLE) => {
            reject_unknown(mapping, &["value", "unit"])?;
            let q = decode_quantity_fields(mapping)?;
            q.require(PhysicalType::Angle)?;
            Ok(Component::Quantity(q))
        }
        _ => {
            reject_unknown(mapping, &["value", "unit"])?;
            Ok(Component::Quantity(decode_quantity_fields(mapping)?))
        }
    }
}

// =============================================================================
// Epochs
// =============================================================================

/// Encode an epoch.
///
/// Values are written exactly as given. `format` is omitted when it can be
/// inferred from the values, `scale` when it is the format's natural scale.
pub fn encode_epoch(epoch: &Epoch) -> Node {
    let mut mapping = Mapping::tagged(tags::TIME).with("value", epoch_values(epoch));
    if infer_format(epoch.values()) != Some(epoch.format()) {
        mapping.insert("format", epoch.format().name());
    }
    if epoch.scale() != epoch.format().default_scale() {
        mapping.insert("scale", epoch.scale().name());
    } else {
        trace!(format = %epoch.format(), "elided natural time scale");
    }
    mapping.into()
}

fn epoch_values(epoch: &Epoch) -> Node {
    let numbers: Option<Vec<f64>> = epoch
        .values()
        .iter()
        .map(|v| match v {
            EpochValue::Number(n) => Some(*n),
            EpochValue::Text(_) => None,
        })
        .collect();
    let leaves: Vec<Node> = epoch
        .values()
        .iter()
        .map(|v| match v {
            EpochValue::Text(s) => Node::Str(s.clone()),
            EpochValue::Number(n) => Node::Float(*n),
        })
        .collect();

    if epoch.is_scalar() {
        return leaves.into_iter().next().unwrap_or(Node::List(Vec::new()));
    }
    match numbers.and_then(|data| NdArray::from_shape_vec(epoch.shape().to_vec(), data)) {
        Some(array) => Node::NdArray(array),
        None => nest(&mut leaves.into_iter(), epoch.shape()),
    }
}

fn nest(leaves: &mut impl Iterator<Item = Node>, shape: &[usize]) -> Node {
    match shape.split_first() {
        None => leaves.next().unwrap_or(Node::List(Vec::new())),
        Some((&n, rest)) => Node::List((0..n).map(|_| nest(leaves, rest)).collect()),
    }
}

fn infer_format(values: &[EpochValue]) -> Option<TimeFormat> {
    match values.first()? {
        EpochValue::Text(s) => detect_format(s),
        EpochValue::Number(_) => Some(TimeFormat::Jyear),
    }
}

/// Decode an epoch.
///
/// Besides the full `time/time-1.0.0` node this accepts a bare string (format
/// detected from the text) and a bare number (a Julian year in TT).
pub fn decode_epoch(node: &Node) -> Result<Epoch, ConvertError> {
    match node {
        Node::Str(s) => return Ok(Epoch::parse(s)?),
        Node::Float(_) | Node::Int(_) => {
            let year = node.as_f64().unwrap_or(f64::NAN);
            return Ok(Epoch::from_number(year, TimeFormat::Jyear, TimeScale::Tt)?);
        }
        _ => {}
    }

    let mapping = expect_tagged(node, &[tags::TIME])?;
    reject_unknown(mapping, &["value", "format", "scale"])?;

    let (values, shape) = flatten_epoch_values(required(mapping, "value")?)?;
    let format = match mapping.get("format") {
        Some(Node::Str(name)) => TimeFormat::parse(name)?,
        Some(other) => {
            return Err(ConvertError::schema(format!(
                "time format must be a string, found {}",
                other.type_name()
            )));
        }
        None => infer_format(&values)
            .ok_or_else(|| ConvertError::schema("cannot infer time format from value"))?,
    };
    let scale = match mapping.get("scale") {
        Some(Node::Str(name)) => TimeScale::parse(name)?,
        Some(other) => {
            return Err(ConvertError::schema(format!(
                "time scale must be a string, found {}",
                other.type_name()
            )));
        }
        None => format.default_scale(),
    };
    Ok(Epoch::new(values, shape, format, scale)?)
}

fn flatten_epoch_values(node: &Node) -> Result<(Vec<EpochValue>, Vec<usize>), ConvertError> {
    match node {
        Node::Str(s) => Ok((vec![EpochValue::Text(s.clone())], Vec::new())),
        Node::Float(_) | Node::Int(_) => Ok((
            vec![EpochValue::Number(node.as_f64().unwrap_or(f64::NAN))],
            Vec::new(),
        )),
        Node::NdArray(array) => Ok((
            array.data().iter().map(|v| EpochValue::Number(*v)).collect(),
            array.shape().to_vec(),
        )),
        Node::List(items) => {
            let mut shape = vec![items.len()];
            let mut values = Vec::new();
            let mut inner: Option<Vec<usize>> = None;
            for item in items {
                let (mut v, s) = flatten_epoch_values(item)?;
                match &inner {
                    None => inner = Some(s),
                    Some(expected) if *expected == s => {}
                    Some(_) => return Err(ConvertError::schema("ragged epoch array")),
                }
                values.append(&mut v);
            }
            shape.extend(inner.unwrap_or_default());
            Ok((values, shape))
        }
        other => Err(ConvertError::schema(format!(
            "epoch value must be a string or number, found {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitError;

    fn deg(v: f64) -> Quantity {
        Quantity::new(v, Unit::DEG)
    }

    #[test]
    fn test_quantity_node() {
        let node = encode_quantity(&Quantity::new(8.122, Unit::KPC));
        let m = node.as_mapping().unwrap();
        assert_eq!(m.tag(), Some(tags::QUANTITY));
        assert_eq!(m.get("value"), Some(&Node::Float(8.122)));
        assert_eq!(m.get("unit"), Some(&Node::from("kpc")));
        assert_eq!(decode_quantity(&node).unwrap(), Quantity::new(8.122, Unit::KPC));
    }

    #[test]
    fn test_quantity_missing_value() {
        let node = Node::from(Mapping::tagged(tags::QUANTITY).with("unit", "m"));
        assert!(matches!(decode_quantity(&node), Err(ConvertError::Schema(_))));
    }

    #[test]
    fn test_quantity_unparseable_unit() {
        let node = Node::from(Mapping::tagged(tags::QUANTITY).with("value", 1.0).with("unit", "furlong"));
        assert!(matches!(
            decode_quantity(&node),
            Err(ConvertError::Unit(UnitError::Unparseable(_)))
        ));
    }

    #[test]
    fn test_quantity_wrong_dimension() {
        let q = Quantity::new(1.0, Unit::KM);
        assert!(matches!(
            encode_quantity_as(&q, PhysicalType::Angle),
            Err(ConvertError::Unit(UnitError::Dimension { .. }))
        ));
        assert!(matches!(
            decode_quantity_as(&encode_quantity(&q), PhysicalType::Angle),
            Err(ConvertError::Unit(UnitError::Dimension { .. }))
        ));
    }

    #[test]
    fn test_longitude_wrap_angle_written_only_when_custom() {
        let plain = encode_longitude(&Longitude::new(deg(25.0)).unwrap()).unwrap();
        assert!(!plain.as_mapping().unwrap().contains_key("wrap_angle"));

        let lon = Longitude::with_wrap_angle(deg(25.0), Quantity::new(1.5, Unit::RAD)).unwrap();
        let node = encode_longitude(&lon).unwrap();
        assert!(node.as_mapping().unwrap().contains_key("wrap_angle"));
        assert_eq!(decode_component(&node).unwrap(), Component::Longitude(lon));
    }

    #[test]
    fn test_latitude_range_checked_on_decode() {
        let node = Node::from(Mapping::tagged(tags::LATITUDE).with("value", 120.0).with("unit", "deg"));
        assert!(matches!(decode_component(&node), Err(ConvertError::Frame(_))));
    }

    #[test]
    fn test_component_rejects_extra_fields() {
        let node = Node::from(
            Mapping::tagged(tags::LATITUDE)
                .with("value", 10.0)
                .with("unit", "deg")
                .with("bogus", 1.0),
        );
        assert!(decode_component(&node).unwrap_err().is_unknown_attribute());
    }

    #[test]
    fn test_array_value() {
        let q = Quantity::new([0.0, 1.0, 2.0], Unit::DEG);
        let node = encode_quantity(&q);
        assert!(matches!(node.as_mapping().unwrap().get("value"), Some(Node::NdArray(_))));
        assert_eq!(decode_quantity(&node).unwrap(), q);
    }

    #[test]
    fn test_epoch_minimal_node() {
        let node = encode_epoch(&Epoch::j2000());
        let m = node.as_mapping().unwrap();
        assert_eq!(m.get("value"), Some(&Node::from("J2000.000")));
        assert!(!m.contains_key("format"));
        assert!(!m.contains_key("scale"));
        assert_eq!(decode_epoch(&node).unwrap(), Epoch::j2000());
    }

    #[test]
    fn test_epoch_explicit_scale_kept() {
        let epoch = Epoch::from_number(2_451_545.0, TimeFormat::Jd, TimeScale::Tdb).unwrap();
        let node = encode_epoch(&epoch);
        let m = node.as_mapping().unwrap();
        assert_eq!(m.get("format"), Some(&Node::from("jd")));
        assert_eq!(m.get("scale"), Some(&Node::from("tdb")));
        assert_eq!(decode_epoch(&node).unwrap(), epoch);
    }

    #[test]
    fn test_epoch_bare_forms() {
        let from_str = decode_epoch(&Node::from("J2000")).unwrap();
        let from_num = decode_epoch(&Node::Float(2000.0)).unwrap();
        let from_iso = decode_epoch(&Node::from("2000-01-01T11:58:55.816")).unwrap();
        assert!(from_str.same_instant(&Epoch::j2000(), 1e-6));
        assert!(from_num.same_instant(&Epoch::j2000(), 1e-6));
        assert!(from_iso.same_instant(&Epoch::j2000(), 1e-3));
    }

    #[test]
    fn test_epoch_text_array() {
        let epoch = Epoch::new(
            vec![
                EpochValue::Text("J2000".into()),
                EpochValue::Text("J2001".into()),
                EpochValue::Text("J2002".into()),
                EpochValue::Text("J2003".into()),
            ],
            vec![2, 2],
            TimeFormat::JyearStr,
            TimeScale::Tt,
        )
        .unwrap();
        let node = encode_epoch(&epoch);
        assert!(matches!(node.as_mapping().unwrap().get("value"), Some(Node::List(_))));
        assert_eq!(decode_epoch(&node).unwrap(), epoch);
    }

    #[test]
    fn test_epoch_numeric_array() {
        let epoch = Epoch::new(
            vec![EpochValue::Number(51_544.0), EpochValue::Number(51_545.0)],
            vec![2],
            TimeFormat::Mjd,
            TimeScale::Utc,
        )
        .unwrap();
        assert_eq!(decode_epoch(&encode_epoch(&epoch)).unwrap(), epoch);
    }

    #[test]
    fn test_epoch_garbage() {
        assert!(matches!(decode_epoch(&Node::from("yesterday")), Err(ConvertError::Schema(_))));
        let ragged = Node::from(Mapping::tagged(tags::TIME).with(
            "value",
            Node::List(vec![Node::List(vec![Node::from("J2000")]), Node::from("J2001")]),
        ));
        assert!(matches!(decode_epoch(&ragged), Err(ConvertError::Schema(_))));
    }
}
