//! Validated, borrowed view over a clip blob
//!
//! [`Clip::from_bytes`] checks the header and every offset once; after that
//! all queries are infallible reads. Out-of-range node or frame indices yield
//! the track kind's default value instead of an error, so callers that need to
//! tell "no data" from "default data" check [`Clip::node_index_ok`] and
//! [`Clip::frame_no_ok`] first.

mod decode;
mod eval;
mod index;


pub use eval::FrameInfo;
pub use index::{HASH_LOOKUP_THRESHOLD, LookupStrategy, name_hash};

use tracing::debug;

use crate::error::ClipError;
use crate::format::{
    ClipHeader, EvalInfo, FIXED_NAME_SIZE, FixedName, NodeRecord, Record, RotOrder, TrackInfo,
    TrackKind, XformOrder, read_pod,
};

/// A clip blob that passed the magic and bounds checks
#[derive(Debug, Clone, Copy)]
pub struct Clip<'a> {
    bytes: &'a [u8],
    header: ClipHeader,
}

impl<'a> Clip<'a> {
    /// Validate `bytes` as a clip.
    ///
    /// Checks the magic tag, the declared size, and that the node table, the
    /// hash table and every stored sample array lie inside the buffer.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ClipError> {
        let header = ClipHeader::from_bytes(bytes).ok_or(ClipError::TooSmall(bytes.len()))?;
        if !header.has_valid_magic() {
            return Err(ClipError::BadMagic(header.magic));
        }
        if header.total_size as usize > bytes.len() {
            return Err(ClipError::Truncated {
                declared: header.total_size as usize,
                actual: bytes.len(),
            });
        }

        let node_table_ok = header
            .node_table_end()
            .is_some_and(|end| end <= bytes.len());
        if !node_table_ok {
            return Err(ClipError::NodeTableOutOfBounds {
                nodes: header.node_count,
            });
        }

        if header.hash_offset != 0 {
            let end = (header.node_count as usize)
                .checked_mul(size_of::<u32>())
                .and_then(|len| len.checked_add(header.hash_offset as usize));
            if !end.is_some_and(|end| end <= bytes.len()) {
                return Err(ClipError::HashTableOutOfBounds {
                    offset: header.hash_offset,
                });
            }
        }

        let clip = Self { bytes, header };
        for node in 0..clip.node_count() {
            for kind in TrackKind::ALL {
                clip.check_track(node, kind)?;
            }
        }

        debug!(
            clip = %clip.name(),
            frames = header.frame_count,
            nodes = header.node_count,
            hashed = header.hash_offset != 0,
            "accepted clip"
        );
        Ok(clip)
    }

    /// Build a view over bytes that already passed [`Clip::from_bytes`]
    pub(crate) fn from_validated(bytes: &'a [u8], header: ClipHeader) -> Self {
        Self { bytes, header }
    }

    fn check_track(&self, node: usize, kind: TrackKind) -> Result<(), ClipError> {
        let offset = self.track_offset(node, kind);
        let Some(info) = self.track_info(node, kind) else {
            return Ok(());
        };
        if offset == 0 || info.stride() == 0 {
            return Ok(());
        }
        let end = info
            .sample_count(self.header.frame_count)
            .and_then(|n| n.checked_mul(size_of::<f32>()))
            .and_then(|len| len.checked_add(offset as usize));
        if end.is_some_and(|end| end <= self.bytes.len()) {
            Ok(())
        } else {
            Err(ClipError::TrackOutOfBounds { node, kind, offset })
        }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn header(&self) -> &ClipHeader {
        &self.header
    }

    /// Clip display name
    pub fn name(&self) -> String {
        self.header.name.to_string_lossy()
    }

    pub fn frame_count(&self) -> u32 {
        self.header.frame_count
    }

    pub fn node_count(&self) -> usize {
        self.header.node_count as usize
    }

    pub fn sample_rate(&self) -> f32 {
        self.header.sample_rate
    }

    pub fn has_hash_table(&self) -> bool {
        self.header.hash_offset != 0
    }

    #[inline]
    pub fn node_index_ok(&self, node: usize) -> bool {
        node < self.node_count()
    }

    #[inline]
    pub fn frame_no_ok(&self, fno: usize) -> bool {
        fno < self.header.frame_count as usize
    }

    #[inline]
    fn node_base(&self, node: usize) -> usize {
        ClipHeader::SIZE + node * NodeRecord::SIZE
    }

    pub fn node_record(&self, node: usize) -> Option<NodeRecord> {
        if !self.node_index_ok(node) {
            return None;
        }
        NodeRecord::read_at(self.bytes, self.node_base(node))
    }

    /// Name bytes of a node, borrowed from the blob
    pub fn node_name(&self, node: usize) -> Option<&'a [u8]> {
        if !self.node_index_ok(node) {
            return None;
        }
        let base = self.node_base(node);
        let raw = self.bytes.get(base..base + FIXED_NAME_SIZE)?;
        let name: &'a FixedName = bytemuck::try_from_bytes(raw).ok()?;
        Some(name.as_bytes())
    }

    pub fn track_info(&self, node: usize, kind: TrackKind) -> Option<TrackInfo> {
        if !self.node_index_ok(node) {
            return None;
        }
        let at = self.node_base(node) + NodeRecord::TRACKS_AT + kind.index() * TrackInfo::SIZE;
        TrackInfo::read_at(self.bytes, at)
    }

    fn track_offset(&self, node: usize, kind: TrackKind) -> u32 {
        if !self.node_index_ok(node) {
            return 0;
        }
        let at = self.node_base(node) + NodeRecord::OFFSETS_AT + kind.index() * size_of::<u32>();
        read_pod(self.bytes, at).unwrap_or(0)
    }

    /// Node has any source value for `kind`
    pub fn has_track(&self, node: usize, kind: TrackKind) -> bool {
        self.track_info(node, kind)
            .is_some_and(|info| info.is_present())
    }

    /// Number of nodes with a track of `kind`
    pub fn track_count(&self, kind: TrackKind) -> usize {
        (0..self.node_count())
            .filter(|&node| self.has_track(node, kind))
            .count()
    }

    /// Stored per-frame samples of a track. `None` for absent and constant tracks.
    pub fn track_data(&self, node: usize, kind: TrackKind) -> Option<TrackData<'a>> {
        let info = self.track_info(node, kind)?;
        let offset = self.track_offset(node, kind) as usize;
        let stride = info.stride();
        if offset == 0 || stride == 0 {
            return None;
        }
        let len = info.sample_count(self.header.frame_count)? * size_of::<f32>();
        let bytes = self.bytes.get(offset..offset + len)?;
        Some(TrackData { bytes, stride })
    }

    /// One axis of a track: a per-frame curve or the stored constant.
    ///
    /// `None` when the axis has no source value.
    pub fn chan_data(&self, node: usize, kind: TrackKind, axis: usize) -> Option<ChannelData<'a>> {
        if axis >= 3 {
            return None;
        }
        let info = self.track_info(node, kind)?;
        let bit = 1u8 << axis;
        if info.data_mask & bit != 0 {
            let track = self.track_data(node, kind)?;
            let slot = (info.data_mask & (bit - 1)).count_ones() as usize;
            Some(ChannelData::Curve { track, slot })
        } else if info.src_mask & bit != 0 {
            Some(ChannelData::Constant(info.vmin[axis]))
        } else {
            None
        }
    }

    /// Rotation-axis order of a node (`Xyz` for invalid nodes)
    pub fn rot_order(&self, node: usize) -> RotOrder {
        if !self.node_index_ok(node) {
            return RotOrder::default();
        }
        let at = self.node_base(node) + NodeRecord::ROT_ORDER_AT;
        self.bytes
            .get(at)
            .map_or_else(RotOrder::default, |&code| RotOrder::from_code(code))
    }

    /// Transform composition order of a node (`Srt` for invalid nodes)
    pub fn xform_order(&self, node: usize) -> XformOrder {
        if !self.node_index_ok(node) {
            return XformOrder::default();
        }
        let at = self.node_base(node) + NodeRecord::XFORM_ORDER_AT;
        self.bytes
            .get(at)
            .map_or_else(XformOrder::default, |&code| XformOrder::from_code(code))
    }

    /// Extension block listing animated and constant channels, if present and well-formed
    pub fn eval_info(&self) -> Option<EvalInfo<'a>> {
        match self.header.ext_offset {
            0 => None,
            offset => EvalInfo::parse(self.bytes, offset as usize),
        }
    }
}

/// Packed samples of one track: `frame_count × stride` floats
#[derive(Debug, Clone, Copy)]
pub struct TrackData<'a> {
    bytes: &'a [u8],
    stride: usize,
}

impl<'a> TrackData<'a> {
    /// Floats per frame
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn frame_count(&self) -> usize {
        self.bytes.len() / (self.stride * size_of::<f32>())
    }

    /// Sample `slot` (0..stride) of frame `fno`
    #[inline]
    pub fn sample(&self, fno: usize, slot: usize) -> Option<f32> {
        if slot >= self.stride {
            return None;
        }
        let index = fno.checked_mul(self.stride)?.checked_add(slot)?;
        read_pod(self.bytes, index.checked_mul(size_of::<f32>())?)
    }

    /// All samples in storage order
    pub fn samples(&self) -> impl Iterator<Item = f32> + 'a {
        self.bytes
            .chunks_exact(size_of::<f32>())
            .map(bytemuck::pod_read_unaligned)
    }
}

/// Value source for one axis of a track
#[derive(Debug, Clone, Copy)]
pub enum ChannelData<'a> {
    /// Strided per-frame values
    Curve { track: TrackData<'a>, slot: usize },
    /// Same value on every frame
    Constant(f32),
}

impl ChannelData<'_> {
    pub fn is_constant(&self) -> bool {
        matches!(self, ChannelData::Constant(_))
    }

    /// Value at frame `fno`; `None` past the last frame of a curve
    pub fn value(&self, fno: usize) -> Option<f32> {
        match self {
            ChannelData::Curve { track, slot } => track.sample(fno, *slot),
            ChannelData::Constant(v) => Some(*v),
        }
    }
}
