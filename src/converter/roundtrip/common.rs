//! Test infrastructure for roundtrip tests.

use tempfile::TempDir;

use crate::converter::{decode_frame, encode_frame};
use crate::frame::{Frame, FrameBuilder, FrameKind};
use crate::node::{json, Node};
use crate::oracle::Comparator;
use crate::quantity::Quantity;
use crate::units::Unit;

/// Degrees.
pub fn deg(value: f64) -> Quantity {
    Quantity::new(value, Unit::DEG)
}

/// Builder for `kind` carrying `ra = 1°, dec = 2°`.
pub fn with_test_data(kind: FrameKind) -> FrameBuilder {
    Frame::builder(kind)
        .component("ra", deg(1.0))
        .component("dec", deg(2.0))
}

/// Encode `frame` into a tree, pass it through JSON text, and decode it.
///
/// Returns the encoded tree and the decoded frame.
pub fn through_json(frame: &Frame) -> (Node, Frame) {
    let node = encode_frame(frame).expect("encode_frame failed");
    let text = json::to_string(&node).expect("to_string failed");
    let parsed = json::from_str(&text).expect("from_str failed");
    let decoded = decode_frame(&parsed).unwrap_or_else(|e| panic!("decode_frame failed: {e}\n{text}"));
    (node, decoded)
}

/// Test Frame → tree → JSON → tree → Frame roundtrip under `comparator`.
///
/// Also checks that re-encoding the decoded frame gives the same tree.
pub fn assert_roundtrip_with(comparator: Comparator, frame: &Frame) -> Frame {
    let (node, decoded) = through_json(frame);
    if let Err(mismatch) = comparator.check(frame, &decoded) {
        panic!(
            "Roundtrip mismatch at {}\nEncoded: {}",
            mismatch.report(false),
            json::to_string(&node).unwrap()
        );
    }

    let again = encode_frame(&decoded).expect("re-encode failed");
    assert_eq!(
        json::to_json(&node),
        json::to_json(&again),
        "Re-encoding mismatch:\nFirst:  {}\nSecond: {}",
        json::to_string(&node).unwrap(),
        json::to_string(&again).unwrap()
    );
    decoded
}

/// Test roundtrip with the configured tolerances.
pub fn assert_roundtrip(frame: &Frame) -> Frame {
    assert_roundtrip_with(Comparator::default(), frame)
}

/// Test roundtrip through a document file on disk.
pub fn assert_file_roundtrip(frame: &Frame) -> Frame {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.json");

    let node = encode_frame(frame).expect("encode_frame failed");
    json::write_document(&path, "frame", &node).expect("write_document failed");
    let read = json::read_document(&path, "frame").expect("read_document failed");
    let decoded = decode_frame(&read).expect("decode_frame failed");

    if let Err(mismatch) = Comparator::default().check(frame, &decoded) {
        panic!("File roundtrip mismatch at {}", mismatch.report(false));
    }
    decoded
}

/// The encoded entries of `frame`, without the tag.
pub fn encoded_keys(frame: &Frame) -> Vec<String> {
    let node = encode_frame(frame).expect("encode_frame failed");
    node.as_mapping()
        .expect("frame node is a mapping")
        .keys()
        .map(str::to_string)
        .collect()
}
