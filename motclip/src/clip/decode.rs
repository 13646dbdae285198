//! Per-frame track decoding

use glam::{Quat, Vec3};

use super::Clip;
use crate::format::TrackKind;
use crate::math::quat::{exp_map, quat_to_degrees, quat_to_radians};

impl Clip<'_> {
    /// Decode the value of track `kind` at integer frame `fno`.
    ///
    /// Axes stored per frame read the next packed sample, constant axes read
    /// `vmin`, and axes without source data take the kind default. Invalid
    /// nodes or frames, absent tracks and tracks whose samples are missing all
    /// return the kind default vector.
    pub fn get_vec(&self, node: usize, fno: usize, kind: TrackKind) -> Vec3 {
        let default = kind.default_vector();
        if !self.frame_no_ok(fno) {
            return default;
        }
        let Some(info) = self.track_info(node, kind) else {
            return default;
        };
        if !info.is_present() {
            return default;
        }

        let data = if info.stride() > 0 {
            match self.track_data(node, kind) {
                Some(data) => Some(data),
                None => return default,
            }
        } else {
            None
        };

        let mut out = default;
        let mut slot = 0;
        for axis in 0..3 {
            let bit = 1u8 << axis;
            if info.data_mask & bit != 0 {
                if let Some(v) = data.and_then(|d| d.sample(fno, slot)) {
                    out[axis] = v;
                }
                slot += 1;
            } else if info.src_mask & bit != 0 {
                out[axis] = info.vmin[axis];
            }
        }
        out
    }

    pub fn get_pos(&self, node: usize, fno: usize) -> Vec3 {
        self.get_vec(node, fno, TrackKind::Position)
    }

    pub fn get_scl(&self, node: usize, fno: usize) -> Vec3 {
        self.get_vec(node, fno, TrackKind::Scale)
    }

    /// Rotation at frame `fno`, decoded from its stored tangent vector
    pub fn get_quat(&self, node: usize, fno: usize) -> Quat {
        exp_map(self.get_vec(node, fno, TrackKind::Rotation))
    }

    /// Euler angles in the node's rotation-axis order
    pub fn get_radians(&self, node: usize, fno: usize) -> Vec3 {
        quat_to_radians(self.get_quat(node, fno), self.rot_order(node))
    }

    pub fn get_degrees(&self, node: usize, fno: usize) -> Vec3 {
        quat_to_degrees(self.get_quat(node, fno), self.rot_order(node))
    }
}
