//! Value codecs shared by all frame converters.
//!
//! - [`primitive`]: arrays, quantities, angles, epochs
//! - [`representation`]: representations and differentials
//! - [`tags`]: the tag vocabulary
//! - [`ConvertError`]: the conversion error taxonomy

mod error;
pub mod primitive;
pub mod representation;
pub mod tags;

pub use error::ConvertError;
pub use primitive::{
    decode_array, decode_component, decode_epoch, decode_quantity, decode_quantity_as, encode_angle,
    encode_array, encode_component, encode_epoch, encode_latitude, encode_longitude, encode_quantity,
    encode_quantity_as,
};
pub use representation::{
    decode_differential, decode_representation, encode_differential, encode_representation,
};
