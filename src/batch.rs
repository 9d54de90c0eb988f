//! Parallel conversion of many frames.
//!
//! Each frame is converted independently; a failure is reported in that
//! frame's slot and never aborts the rest of the batch. Results come back in
//! input order.
//!
//! # Example
//!
//! ```
//! use frame_codec::batch::{decode_batch, encode_batch};
//! use frame_codec::frame::{Frame, FrameKind};
//!
//! let frames: Vec<Frame> = FrameKind::ALL
//!     .iter()
//!     .map(|kind| Frame::builder(*kind).build().unwrap())
//!     .collect();
//! let nodes: Vec<_> = encode_batch(&frames).into_iter().map(Result::unwrap).collect();
//! let decoded = decode_batch(&nodes);
//! assert!(decoded.iter().all(Result::is_ok));
//! ```

use rayon::prelude::*;
use tracing::warn;

use crate::codec::ConvertError;
use crate::converter::Registry;
use crate::frame::Frame;
use crate::node::Node;

impl Registry {
    /// Encode frames in parallel, one result per frame.
    pub fn encode_batch(&self, frames: &[Frame]) -> Vec<Result<Node, ConvertError>> {
        self.encode_batch_each(frames, |_, _| {})
    }

    /// Encode frames in parallel, invoking `on_each` with the index and result
    /// of every frame as it completes.
    pub fn encode_batch_each<F>(&self, frames: &[Frame], on_each: F) -> Vec<Result<Node, ConvertError>>
    where
        F: Fn(usize, &Result<Node, ConvertError>) + Sync,
    {
        if frames.is_empty() {
            return vec![];
        }

        frames
            .par_iter()
            .enumerate()
            .map(|(index, frame)| {
                let result = self.encode(frame);
                if let Err(err) = &result {
                    warn!(index, frame = %frame.kind(), error = %err, "batch encode failed");
                }
                on_each(index, &result);
                result
            })
            .collect()
    }

    /// Decode nodes in parallel, one result per node.
    pub fn decode_batch(&self, nodes: &[Node]) -> Vec<Result<Frame, ConvertError>> {
        if nodes.is_empty() {
            return vec![];
        }

        nodes
            .par_iter()
            .enumerate()
            .map(|(index, node)| {
                let result = self.decode(node);
                if let Err(err) = &result {
                    warn!(index, tag = node.tag().unwrap_or("<untagged>"), error = %err, "batch decode failed");
                }
                result
            })
            .collect()
    }
}

/// Encode frames in parallel with the global registry.
pub fn encode_batch(frames: &[Frame]) -> Vec<Result<Node, ConvertError>> {
    Registry::global().encode_batch(frames)
}

/// Decode nodes in parallel with the global registry.
pub fn decode_batch(nodes: &[Node]) -> Vec<Result<Frame, ConvertError>> {
    Registry::global().decode_batch(nodes)
}
