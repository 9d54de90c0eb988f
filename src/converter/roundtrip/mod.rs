//! Roundtrip tests for Frame ↔ tree conversion.
//!
//! Tests verify that:
//! - Frame → tree → JSON → tree → Frame gives an equal frame
//! - Re-encoding a decoded frame gives the same tree
//! - Defaults are elided on encode and restored on decode
//! - Malformed and unknown input is rejected

pub(crate) mod common;

mod celestial;
mod edge;
mod galactocentric;
mod geocentric;
mod quantity;
