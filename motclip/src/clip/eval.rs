//! Pose evaluation at continuous frame numbers
//!
//! Frames wrap cyclically: `|frame| mod frame_count` splits into an integer
//! frame and a blend factor toward the next frame, and the last frame blends
//! back into frame 0.

use glam::{Mat4, Quat, Vec3};

use super::Clip;
use crate::config::{PlaybackConfig, RotationInterp};
use crate::format::TrackKind;
use crate::math::quat::{exp_map, quat_to_degrees, quat_to_radians, slerp};
use crate::math::vec_lerp;
use crate::math::xform::{make_transform, make_transform_r, make_transform_t, make_transform_tr};

/// Bracketing frames and blend factor for a continuous frame number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub fno: usize,
    pub next: usize,
    pub t: f32,
}

impl FrameInfo {
    /// `None` for a clip without frames. Non-finite input resolves to frame 0.
    pub fn new(frame: f32, frame_count: u32) -> Option<Self> {
        if frame_count == 0 {
            return None;
        }
        let last = frame_count as usize - 1;
        let (fno, t) = if frame.is_finite() {
            let f = frame.abs() % frame_count as f32;
            let fno = (f as usize).min(last);
            (fno, f - fno as f32)
        } else {
            (0, 0.0)
        };
        let next = if fno < last { fno + 1 } else { 0 };
        Some(Self { fno, next, t })
    }
}

impl Clip<'_> {
    pub fn frame_info(&self, frame: f32) -> Option<FrameInfo> {
        FrameInfo::new(frame, self.frame_count())
    }

    /// Track value at a continuous frame, linearly interpolated
    pub fn eval_vec(&self, node: usize, frame: f32, kind: TrackKind) -> Vec3 {
        let Some(fi) = self.frame_info(frame) else {
            return kind.default_vector();
        };
        let v = self.get_vec(node, fi.fno, kind);
        if fi.t != 0.0 {
            vec_lerp(v, self.get_vec(node, fi.next, kind), fi.t)
        } else {
            v
        }
    }

    pub fn eval_pos(&self, node: usize, frame: f32) -> Vec3 {
        self.eval_vec(node, frame, TrackKind::Position)
    }

    pub fn eval_scl(&self, node: usize, frame: f32) -> Vec3 {
        self.eval_vec(node, frame, TrackKind::Scale)
    }

    /// Rotation from interpolated tangent vectors. Cheaper than
    /// [`Clip::eval_quat_slerp`], less exact for large steps between frames.
    pub fn eval_quat(&self, node: usize, frame: f32) -> Quat {
        exp_map(self.eval_vec(node, frame, TrackKind::Rotation))
    }

    /// Rotation slerped between the two bracketing frames
    pub fn eval_quat_slerp(&self, node: usize, frame: f32) -> Quat {
        let Some(fi) = self.frame_info(frame) else {
            return Quat::IDENTITY;
        };
        let q = self.get_quat(node, fi.fno);
        if fi.t != 0.0 {
            slerp(q, self.get_quat(node, fi.next), fi.t)
        } else {
            q
        }
    }

    pub fn eval_radians(&self, node: usize, frame: f32) -> Vec3 {
        quat_to_radians(self.eval_quat(node, frame), self.rot_order(node))
    }

    pub fn eval_degrees(&self, node: usize, frame: f32) -> Vec3 {
        quat_to_degrees(self.eval_quat(node, frame), self.rot_order(node))
    }

    /// Local transform of a node at a continuous frame.
    ///
    /// Only the tracks the node carries take part. When the node has no
    /// position track, `default_translation` (if given) is used in its place.
    pub fn eval_transform(&self, node: usize, frame: f32, default_translation: Option<Vec3>) -> Mat4 {
        self.compose(node, frame, default_translation, RotationInterp::Lerp)
    }

    /// [`Clip::eval_transform`] with interpolation and default translation from `config`
    pub fn eval_transform_with(&self, node: usize, frame: f32, config: &PlaybackConfig) -> Mat4 {
        self.compose(node, frame, config.default_translation(), config.rotation)
    }

    fn compose(
        &self,
        node: usize,
        frame: f32,
        default_translation: Option<Vec3>,
        interp: RotationInterp,
    ) -> Mat4 {
        const POS: u8 = 1;
        const ROT: u8 = 2;
        const SCL: u8 = 4;

        let mut mask = 0u8;
        let translation = if self.has_track(node, TrackKind::Position) {
            mask |= POS;
            self.eval_pos(node, frame)
        } else if let Some(t) = default_translation {
            mask |= POS;
            t
        } else {
            Vec3::ZERO
        };
        let rotation = if self.has_track(node, TrackKind::Rotation) {
            mask |= ROT;
            match interp {
                RotationInterp::Lerp => self.eval_quat(node, frame),
                RotationInterp::Slerp => self.eval_quat_slerp(node, frame),
            }
        } else {
            Quat::IDENTITY
        };
        if self.has_track(node, TrackKind::Scale) {
            mask |= SCL;
        }

        match mask {
            0 => Mat4::IDENTITY,
            POS => make_transform_t(translation),
            ROT => make_transform_r(rotation),
            m if m == POS | ROT => {
                make_transform_tr(translation, rotation, self.xform_order(node))
            }
            _ => make_transform(
                translation,
                rotation,
                self.eval_scl(node, frame),
                self.xform_order(node),
            ),
        }
    }
}
