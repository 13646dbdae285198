//! Node record and per-kind track metadata

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::{FixedName, Record, RotOrder, TrackKind, XformOrder};

/// Track metadata (32 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TrackInfo {
    /// Per-axis minimum; also the stored value of constant axes
    pub vmin: [f32; 3],
    /// Per-axis maximum
    pub vmax: [f32; 3],
    /// Axes that carry any source value (bit 0 = X)
    pub src_mask: u8,
    /// Axes stored per frame (subset of `src_mask`)
    pub data_mask: u8,
    /// Exporter's copy of the per-frame stride; informational only
    pub stride_hint: u8,
    pub reserved: [u8; 5],
}

impl Record for TrackInfo {}

impl TrackInfo {
    /// Floats stored per frame
    #[inline]
    pub fn stride(&self) -> usize {
        (self.data_mask & 0b111).count_ones() as usize
    }

    /// Track carries any source value
    #[inline]
    pub fn is_present(&self) -> bool {
        self.src_mask & 0b111 != 0
    }

    /// Track has source values but nothing varies per frame
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.is_present() && self.stride() == 0
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        Vec3::from_array(self.vmin)
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        Vec3::from_array(self.vmax)
    }

    /// Number of packed floats for `frame_count` frames
    pub fn sample_count(&self, frame_count: u32) -> Option<usize> {
        (frame_count as usize).checked_mul(self.stride())
    }
}

/// Node record (176 bytes)
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct NodeRecord {
    pub name: FixedName,
    /// Sample-array byte offsets per track kind (0 = no stored samples)
    pub offsets: [u32; 3],
    pub xform_order: u8,
    pub rot_order: u8,
    pub reserved: [u8; 2],
    pub tracks: [TrackInfo; 3],
}

impl Record for NodeRecord {}

impl NodeRecord {
    /// Offset of the `offsets` array within a record
    pub const OFFSETS_AT: usize = std::mem::offset_of!(NodeRecord, offsets);
    /// Offset of the order bytes within a record
    pub const XFORM_ORDER_AT: usize = std::mem::offset_of!(NodeRecord, xform_order);
    pub const ROT_ORDER_AT: usize = std::mem::offset_of!(NodeRecord, rot_order);
    /// Offset of the track metadata array within a record
    pub const TRACKS_AT: usize = std::mem::offset_of!(NodeRecord, tracks);

    pub fn new(name: &str) -> Self {
        Self {
            name: FixedName::new(name),
            offsets: [0; 3],
            xform_order: XformOrder::default().code(),
            rot_order: RotOrder::default().code(),
            reserved: [0; 2],
            tracks: [TrackInfo::default(); 3],
        }
    }

    #[inline]
    pub fn track(&self, kind: TrackKind) -> &TrackInfo {
        &self.tracks[kind.index()]
    }

    #[inline]
    pub fn offset(&self, kind: TrackKind) -> u32 {
        self.offsets[kind.index()]
    }

    pub fn xform_order(&self) -> XformOrder {
        XformOrder::from_code(self.xform_order)
    }

    pub fn rot_order(&self) -> RotOrder {
        RotOrder::from_code(self.rot_order)
    }
}
