//! Prelude module for convenient imports.
//!
//! ```
//! use frame_codec::prelude::*;
//! ```

// Conversion
pub use crate::converter::{decode_frame, encode_frame, FrameConverter, Registry};
#[cfg(feature = "batch")]
pub use crate::batch::{decode_batch, encode_batch};

// Frames
pub use crate::frame::{AttributeValue, Frame, FrameKind};
pub use crate::quantity::{Latitude, Longitude, Quantity};
pub use crate::representation::{Differential, Representation};
pub use crate::time::{Epoch, TimeFormat, TimeScale};
pub use crate::units::Unit;

// Documents
pub use crate::node::{json, Mapping, Node};

// Errors & comparison
pub use crate::codec::ConvertError;
pub use crate::oracle::{frames_equal, Comparator};
