//! Track kinds and the composition / rotation-axis order codes stored per node
//!
//! Both order families are six-way permutations. Each is resolved through a
//! small constant table indexed by the enum discriminant, so the tables can be
//! checked independently of the math that consumes them.

use glam::Vec3;

/// Channel kind of a node track (index into the per-node offset and metadata arrays)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TrackKind {
    Position = 0,
    Rotation = 1,
    Scale = 2,
}

impl TrackKind {
    pub const ALL: [TrackKind; 3] = [TrackKind::Position, TrackKind::Rotation, TrackKind::Scale];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Value of an axis that carries no source data
    #[inline]
    pub fn default_component(self) -> f32 {
        match self {
            TrackKind::Scale => 1.0,
            TrackKind::Position | TrackKind::Rotation => 0.0,
        }
    }

    /// Vector returned when the track (or the queried node/frame) has no data
    #[inline]
    pub fn default_vector(self) -> Vec3 {
        Vec3::splat(self.default_component())
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackKind::Position => "pos",
            TrackKind::Rotation => "rot",
            TrackKind::Scale => "scl",
        }
    }
}

/// Order in which elemental axis rotations are applied.
///
/// The name lists axes first-applied to last-applied: `Xyz` rotates about X
/// first, so the combined quaternion is `qz * qy * qx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RotOrder {
    #[default]
    Xyz = 0,
    Xzy = 1,
    Yxz = 2,
    Yzx = 3,
    Zxy = 4,
    Zyx = 5,
}

/// Axis indices per rotation order, first-applied to last-applied,
/// followed by the parity sign used by the Euler extraction.
const ROT_ORDER_TABLE: [([usize; 3], f32); 6] = [
    ([0, 1, 2], 1.0),  // XYZ
    ([0, 2, 1], -1.0), // XZY
    ([1, 0, 2], -1.0), // YXZ
    ([1, 2, 0], 1.0),  // YZX
    ([2, 0, 1], 1.0),  // ZXY
    ([2, 1, 0], -1.0), // ZYX
];

impl RotOrder {
    pub const ALL: [RotOrder; 6] = [
        RotOrder::Xyz,
        RotOrder::Xzy,
        RotOrder::Yxz,
        RotOrder::Yzx,
        RotOrder::Zxy,
        RotOrder::Zyx,
    ];

    /// Decode a stored order byte. Unknown codes fall back to `Xyz`.
    pub fn from_code(code: u8) -> Self {
        Self::ALL.get(code as usize).copied().unwrap_or_default()
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Axis indices (0 = X, 1 = Y, 2 = Z), first-applied to last-applied
    #[inline]
    pub fn axes(self) -> [usize; 3] {
        ROT_ORDER_TABLE[self as usize].0
    }

    /// +1 for even axis permutations, -1 for odd ones
    #[inline]
    pub fn parity(self) -> f32 {
        ROT_ORDER_TABLE[self as usize].1
    }

    pub fn name(self) -> &'static str {
        match self {
            RotOrder::Xyz => "XYZ",
            RotOrder::Xzy => "XZY",
            RotOrder::Yxz => "YXZ",
            RotOrder::Yzx => "YZX",
            RotOrder::Zxy => "ZXY",
            RotOrder::Zyx => "ZYX",
        }
    }
}

/// One elemental stage of a node's local transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XformStage {
    Scale,
    Rotate,
    Translate,
}

/// Order in which scale, rotate and translate are applied to a point.
///
/// `Srt` scales first and translates last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum XformOrder {
    #[default]
    Srt = 0,
    Str = 1,
    Rst = 2,
    Rts = 3,
    Tsr = 4,
    Trs = 5,
}

const XFORM_ORDER_TABLE: [[XformStage; 3]; 6] = {
    use XformStage::{Rotate as R, Scale as S, Translate as T};
    [
        [S, R, T], // SRT
        [S, T, R], // STR
        [R, S, T], // RST
        [R, T, S], // RTS
        [T, S, R], // TSR
        [T, R, S], // TRS
    ]
};

impl XformOrder {
    pub const ALL: [XformOrder; 6] = [
        XformOrder::Srt,
        XformOrder::Str,
        XformOrder::Rst,
        XformOrder::Rts,
        XformOrder::Tsr,
        XformOrder::Trs,
    ];

    /// Decode a stored order byte. Unknown codes fall back to `Srt`.
    pub fn from_code(code: u8) -> Self {
        Self::ALL.get(code as usize).copied().unwrap_or_default()
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Stages in application order
    #[inline]
    pub fn stages(self) -> [XformStage; 3] {
        XFORM_ORDER_TABLE[self as usize]
    }

    /// True when translation is applied before rotation
    pub fn translates_before_rotating(self) -> bool {
        let stages = self.stages();
        let pos = |stage| stages.iter().position(|&s| s == stage);
        pos(XformStage::Translate) < pos(XformStage::Rotate)
    }

    pub fn name(self) -> &'static str {
        match self {
            XformOrder::Srt => "SRT",
            XformOrder::Str => "STR",
            XformOrder::Rst => "RST",
            XformOrder::Rts => "RTS",
            XformOrder::Tsr => "TSR",
            XformOrder::Trs => "TRS",
        }
    }
}
