//! Motion clip binary format
//!
//! A clip is one contiguous blob. Every internal reference is a byte offset
//! from the start of the blob, so a file can be read into a single buffer and
//! queried in place. All fields use native byte order.
//!
//! # Layout
//! ```text
//! Header (0x60 bytes):
//! 0x00: magic [u8; 4]        - "MCLP"
//! 0x04: total_size u32       - Blob size in bytes
//! 0x08: sample_rate f32      - Frames per second
//! 0x0C: frame_count u32
//! 0x10: node_count u32
//! 0x14: hash_offset u32      - Sorted node-name hash table (0 = absent)
//! 0x18: ext_offset u32       - Eval-info block (0 = absent)
//! 0x1C: pad u32
//! 0x20: name [u8; 64]        - Length byte + up to 62 chars + NUL
//!
//! Node table (node_count × 0xB0 bytes, directly after the header):
//! 0x00: name [u8; 64]
//! 0x40: offsets [u32; 3]     - Sample arrays for pos / rot / scl (0 = none)
//! 0x4C: xform_order u8
//! 0x4D: rot_order u8
//! 0x4E: reserved [u8; 2]
//! 0x50: tracks [TrackInfo; 3]
//!
//! TrackInfo (0x20 bytes):
//! 0x00: vmin [f32; 3]
//! 0x0C: vmax [f32; 3]
//! 0x18: src_mask u8          - Axes with any value
//! 0x19: data_mask u8         - Axes stored per frame
//! 0x1A: stride u8
//! 0x1B: reserved [u8; 5]
//!
//! Hash table (node_count × u32, ascending, same order as the node table)
//!
//! Sample arrays: frame_count × popcount(data_mask) f32, packed per frame
//! ```
//!
//! Rotation samples are log-quaternion tangent vectors.

mod eval_info;
mod header;
mod node;
mod order;
mod record;

#[cfg(any(test, feature = "writer"))]
mod writer;

#[cfg(test)]
mod tests;

pub use eval_info::{ChannelMapEntry, EvalInfo, EvalInfoHeader};
pub use header::{ClipHeader, FIXED_NAME_SIZE, FixedName, MAX_NAME_LEN};
pub use node::{NodeRecord, TrackInfo};
pub use order::{RotOrder, TrackKind, XformOrder, XformStage};
pub use record::{Record, read_pod};

#[cfg(any(test, feature = "writer"))]
pub use writer::{ClipWriter, NodeSpec, TrackSpec};

/// Format tag at the start of every clip
pub const CLIP_MAGIC: [u8; 4] = *b"MCLP";
