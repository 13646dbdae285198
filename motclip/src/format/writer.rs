//! Clip blob writer for fixtures and tooling
//!
//! Playback never writes clips; this builds blobs in the exact on-disk layout
//! so tests and the CLI can produce inputs without an external exporter.

use anyhow::{Result, bail, ensure};
use glam::{Quat, Vec3};
use tracing::trace;

use super::{
    ChannelMapEntry, ClipHeader, EvalInfoHeader, MAX_NAME_LEN, NodeRecord, Record,
    RotOrder, TrackInfo, TrackKind, XformOrder,
};
use crate::clip::name_hash;
use crate::math::quat::log_map;

/// Samples and masks for one track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSpec {
    vmin: Vec3,
    vmax: Vec3,
    src_mask: u8,
    data_mask: u8,
    samples: Vec<f32>,
}

impl TrackSpec {
    /// Per-frame values. Axes that never change are stored as constants.
    pub fn sampled(values: &[Vec3]) -> Self {
        let Some(first) = values.first() else {
            return Self::raw(Vec3::ZERO, 0, 0, Vec::new());
        };
        let (vmin, vmax) = values
            .iter()
            .fold((*first, *first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

        let mut data_mask = 0u8;
        for axis in 0..3 {
            if vmax[axis] > vmin[axis] {
                data_mask |= 1 << axis;
            }
        }

        let mut samples = Vec::with_capacity(values.len() * data_mask.count_ones() as usize);
        if data_mask != 0 {
            for v in values {
                for axis in 0..3 {
                    if data_mask & (1 << axis) != 0 {
                        samples.push(v[axis]);
                    }
                }
            }
        }

        Self {
            vmin,
            vmax,
            src_mask: 0b111,
            data_mask,
            samples,
        }
    }

    /// Same value on every frame
    pub fn constant(value: Vec3) -> Self {
        Self::raw(value, 0b111, 0, Vec::new())
    }

    /// Rotations, stored as log-quaternion tangents. Consecutive quaternions
    /// are kept in the same hemisphere so the tangents stay continuous.
    pub fn rotations(quats: &[Quat]) -> Self {
        let mut prev = Quat::IDENTITY;
        let tangents: Vec<Vec3> = quats
            .iter()
            .map(|&q| {
                let q = if q.dot(prev) < 0.0 { -q } else { q };
                prev = q;
                log_map(q)
            })
            .collect();
        Self::sampled(&tangents)
    }

    /// Explicit masks and packed samples (`frame_count × popcount(data_mask)` floats)
    pub fn raw(vmin: Vec3, src_mask: u8, data_mask: u8, samples: Vec<f32>) -> Self {
        Self {
            vmin,
            vmax: vmin,
            src_mask,
            data_mask,
            samples,
        }
    }

    fn stride(&self) -> usize {
        (self.data_mask & 0b111).count_ones() as usize
    }

    fn info(&self) -> TrackInfo {
        TrackInfo {
            vmin: self.vmin.to_array(),
            vmax: self.vmax.to_array(),
            src_mask: self.src_mask,
            data_mask: self.data_mask,
            stride_hint: self.stride() as u8,
            reserved: [0; 5],
        }
    }
}

/// One node and its tracks
#[derive(Debug, Clone)]
pub struct NodeSpec {
    name: String,
    xform_order: XformOrder,
    rot_order: RotOrder,
    tracks: [Option<TrackSpec>; 3],
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xform_order: XformOrder::default(),
            rot_order: RotOrder::default(),
            tracks: [None, None, None],
        }
    }

    pub fn xform_order(mut self, order: XformOrder) -> Self {
        self.xform_order = order;
        self
    }

    pub fn rot_order(mut self, order: RotOrder) -> Self {
        self.rot_order = order;
        self
    }

    pub fn track(mut self, kind: TrackKind, track: TrackSpec) -> Self {
        self.tracks[kind.index()] = Some(track);
        self
    }

    pub fn pos(self, track: TrackSpec) -> Self {
        self.track(TrackKind::Position, track)
    }

    pub fn rot(self, track: TrackSpec) -> Self {
        self.track(TrackKind::Rotation, track)
    }

    pub fn scl(self, track: TrackSpec) -> Self {
        self.track(TrackKind::Scale, track)
    }

    fn present(&self, kind: TrackKind) -> Option<&TrackSpec> {
        self.tracks[kind.index()]
            .as_ref()
            .filter(|t| t.src_mask & 0b111 != 0)
    }
}

/// Builds a clip blob
#[derive(Debug, Clone)]
pub struct ClipWriter {
    name: String,
    sample_rate: f32,
    frame_count: u32,
    nodes: Vec<NodeSpec>,
    hash_table: bool,
    eval_info: bool,
}

impl ClipWriter {
    pub fn new(name: impl Into<String>, sample_rate: f32, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            sample_rate,
            frame_count,
            nodes: Vec::new(),
            hash_table: true,
            eval_info: true,
        }
    }

    /// Emit the sorted hash table (and sort the node table to match). On by default.
    pub fn hash_table(mut self, enabled: bool) -> Self {
        self.hash_table = enabled;
        self
    }

    /// Emit the eval-info block. On by default.
    pub fn eval_info(mut self, enabled: bool) -> Self {
        self.eval_info = enabled;
        self
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    /// Node names in the order they will appear in the node table
    pub fn table_order(&self) -> Vec<&str> {
        self.ordered().into_iter().map(|n| n.name.as_str()).collect()
    }

    fn ordered(&self) -> Vec<&NodeSpec> {
        let mut nodes: Vec<&NodeSpec> = self.nodes.iter().collect();
        if self.hash_table {
            nodes.sort_by_key(|n| name_hash(n.name.as_bytes()));
        }
        nodes
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.name.len() <= MAX_NAME_LEN,
            "clip name is {} bytes, limit is {}",
            self.name.len(),
            MAX_NAME_LEN
        );
        ensure!(
            !self.eval_info || self.nodes.len() <= u16::MAX as usize + 1,
            "{} nodes do not fit the channel map",
            self.nodes.len()
        );
        for node in &self.nodes {
            if node.name.len() > MAX_NAME_LEN {
                bail!(
                    "node name '{}' is {} bytes, limit is {}",
                    node.name,
                    node.name.len(),
                    MAX_NAME_LEN
                );
            }
            for kind in TrackKind::ALL {
                let Some(track) = &node.tracks[kind.index()] else {
                    continue;
                };
                ensure!(
                    track.data_mask & !track.src_mask == 0,
                    "node '{}' {}: data mask {:#05b} is not a subset of source mask {:#05b}",
                    node.name,
                    kind.name(),
                    track.data_mask,
                    track.src_mask
                );
                let expected = self.frame_count as usize * track.stride();
                ensure!(
                    track.samples.len() == expected,
                    "node '{}' {}: {} samples, expected {}",
                    node.name,
                    kind.name(),
                    track.samples.len(),
                    expected
                );
            }
        }
        Ok(())
    }

    fn build_eval_info(nodes: &[&NodeSpec]) -> Vec<u8> {
        let mut header = EvalInfoHeader::default();
        let mut curves = Vec::new();
        let mut constants = Vec::new();

        for kind in TrackKind::ALL {
            let k = kind.index();
            for (idx, node) in nodes.iter().enumerate() {
                let Some(track) = node.present(kind) else {
                    continue;
                };
                header.tracks[k] += 1;
                for axis in 0..3u8 {
                    let bit = 1 << axis;
                    if track.src_mask & bit == 0 {
                        continue;
                    }
                    header.channels[k] += 1;
                    let entry = ChannelMapEntry::new(idx as u16, kind, axis);
                    if track.data_mask & bit != 0 {
                        header.curves[k] += 1;
                        curves.push(entry);
                    } else {
                        constants.push(entry);
                    }
                }
            }
        }

        let mut bytes = header.serialize();
        for entry in curves.iter().chain(constants.iter()) {
            bytes.extend_from_slice(&entry.serialize());
        }
        bytes
    }

    /// Serialize the clip
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let nodes = self.ordered();
        let node_count = nodes.len();

        let mut header = ClipHeader::new(
            &self.name,
            self.sample_rate,
            self.frame_count,
            node_count as u32,
        );
        let mut cursor = ClipHeader::SIZE + node_count * NodeRecord::SIZE;

        let hash_table: Vec<u8> = if self.hash_table {
            header.hash_offset = cursor as u32;
            nodes
                .iter()
                .flat_map(|n| name_hash(n.name.as_bytes()).to_ne_bytes())
                .collect()
        } else {
            Vec::new()
        };
        cursor += hash_table.len();

        let eval_info = if self.eval_info {
            header.ext_offset = cursor as u32;
            Self::build_eval_info(&nodes)
        } else {
            Vec::new()
        };
        cursor += eval_info.len();

        let mut records = Vec::with_capacity(node_count);
        let mut samples: Vec<u8> = Vec::new();
        for node in &nodes {
            let mut record = NodeRecord::new(&node.name);
            record.xform_order = node.xform_order.code();
            record.rot_order = node.rot_order.code();
            for kind in TrackKind::ALL {
                let Some(track) = &node.tracks[kind.index()] else {
                    continue;
                };
                record.tracks[kind.index()] = track.info();
                // Constant tracks keep a zero offset and decode from vmin
                if track.data_mask != 0 && !track.samples.is_empty() {
                    record.offsets[kind.index()] = (cursor + samples.len()) as u32;
                    samples.extend_from_slice(bytemuck::cast_slice(&track.samples));
                }
            }
            records.push(record);
        }

        let total = cursor + samples.len();
        ensure!(
            u32::try_from(total).is_ok(),
            "clip is {} bytes, larger than a u32 offset can address",
            total
        );
        header.total_size = total as u32;

        let mut bytes = Vec::with_capacity(total);
        bytes.extend_from_slice(&header.serialize());
        for record in &records {
            bytes.extend_from_slice(&record.serialize());
        }
        bytes.extend_from_slice(&hash_table);
        bytes.extend_from_slice(&eval_info);
        bytes.extend_from_slice(&samples);

        trace!(
            clip = %self.name,
            nodes = node_count,
            frames = self.frame_count,
            bytes = bytes.len(),
            "wrote clip"
        );
        Ok(bytes)
    }
}
