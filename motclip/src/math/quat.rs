//! Quaternion rotation codec
//!
//! Rotations are stored as 3-component log-quaternions ("tangent vectors"):
//! the rotation axis scaled by the half-angle. [`exp_map`] turns a stored
//! vector back into a unit quaternion and [`log_map`] is its inverse.
//!
//! All functions use `[x, y, z, w]` quaternions via [`glam::Quat`], with the
//! arithmetic spelled out component-wise so playback stays bit-compatible with
//! clips baked by other tools.

use glam::{Mat3, Quat, Vec3};

use super::{degrees, radians, sinc, sq, wrap_pi};
use crate::format::RotOrder;

/// Absolute tolerance used to detect pure single-axis rotations
pub const SINGLE_AXIS_EPSILON: f32 = 1.0e-6;

/// Hamilton product `q1 * q2`
pub fn quat_mul(q1: Quat, q2: Quat) -> Quat {
    Quat::from_xyzw(
        q1.w * q2.x + q1.x * q2.w + q1.y * q2.z - q1.z * q2.y,
        q1.w * q2.y + q1.y * q2.w + q1.z * q2.x - q1.x * q2.z,
        q1.w * q2.z + q1.z * q2.w + q1.x * q2.y - q1.y * q2.x,
        q1.w * q2.w - q1.x * q2.x - q1.y * q2.y - q1.z * q2.z,
    )
}

/// Scale to unit length. A zero quaternion is returned unchanged.
pub fn quat_normalize(q: Quat) -> Quat {
    let len = (sq(q.x) + sq(q.y) + sq(q.z) + sq(q.w)).sqrt();
    if len > 0.0 {
        let s = 1.0 / len;
        Quat::from_xyzw(q.x * s, q.y * s, q.z * s, q.w * s)
    } else {
        q
    }
}

/// Exponential map: log-quaternion tangent vector → unit quaternion
pub fn exp_map(v: Vec3) -> Quat {
    let half_angle = (sq(v.x) + sq(v.y) + sq(v.z)).sqrt();
    let s = sinc(half_angle);
    quat_normalize(Quat::from_xyzw(
        v.x * s,
        v.y * s,
        v.z * s,
        half_angle.cos(),
    ))
}

/// Log map: unit quaternion → tangent vector (axis × half-angle)
pub fn log_map(q: Quat) -> Vec3 {
    let half_angle = q.w.clamp(-1.0, 1.0).acos();
    let norm = (sq(q.x) + sq(q.y) + sq(q.z)).sqrt();
    let s = if norm > 0.0 { half_angle / norm } else { 0.0 };
    Vec3::new(q.x * s, q.y * s, q.z * s)
}

/// Apply [`exp_map`] over parallel slices. Extra elements in the longer slice are untouched.
pub fn quat_exp_slice(out: &mut [Quat], vecs: &[Vec3]) {
    for (q, v) in out.iter_mut().zip(vecs) {
        *q = exp_map(*v);
    }
}

/// Spherical interpolation along the shortest arc.
///
/// The arc angle is computed as `2·atan2(|q1 - s·q2|, |q1 + s·q2|)` where `s`
/// is the sign of `dot(q1, q2)`; the operands themselves are never negated.
pub fn slerp(q1: Quat, q2: Quat, t: f32) -> Quat {
    let a = q1.to_array();
    let b = q2.to_array();

    let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    let sign = if dot < 0.0 { -1.0 } else { 1.0 };

    let mut u = 0.0;
    let mut v = 0.0;
    for i in 0..4 {
        u += sq(a[i] - b[i] * sign);
        v += sq(a[i] + b[i] * sign);
    }
    let angle = 2.0 * u.sqrt().atan2(v.sqrt());

    let s = 1.0 - t;
    let r = 1.0 / sinc(angle);
    let w1 = sinc(angle * s) * r * s;
    let w2 = sinc(angle * t) * r * t * sign;

    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = a[i] * w1 + b[i] * w2;
    }
    quat_normalize(Quat::from_array(out))
}

/// Compose three elemental axis rotations in the given order
pub fn quat_from_radians(rx: f32, ry: f32, rz: f32, order: RotOrder) -> Quat {
    let elemental = [
        Quat::from_xyzw((rx * 0.5).sin(), 0.0, 0.0, (rx * 0.5).cos()),
        Quat::from_xyzw(0.0, (ry * 0.5).sin(), 0.0, (ry * 0.5).cos()),
        Quat::from_xyzw(0.0, 0.0, (rz * 0.5).sin(), (rz * 0.5).cos()),
    ];
    let [first, second, third] = order.axes();
    // The first-applied rotation is the rightmost factor
    quat_mul(
        quat_mul(elemental[third], elemental[second]),
        elemental[first],
    )
}

pub fn quat_from_degrees(dx: f32, dy: f32, dz: f32, order: RotOrder) -> Quat {
    quat_from_radians(radians(dx), radians(dy), radians(dz), order)
}

/// Rotation matrix of `q` in row-vector layout: row `i` is the image of basis axis `i`.
///
/// In glam terms the returned matrix's column `i` holds that row, so the
/// result is the ordinary column-vector rotation matrix.
pub fn rotation_matrix(q: Quat) -> Mat3 {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    Mat3::from_cols(
        Vec3::new(
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y + 2.0 * w * z,
            2.0 * x * z - 2.0 * w * y,
        ),
        Vec3::new(
            2.0 * x * y - 2.0 * w * z,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z + 2.0 * w * x,
        ),
        Vec3::new(
            2.0 * x * z + 2.0 * w * y,
            2.0 * y * z - 2.0 * w * x,
            1.0 - 2.0 * x * x - 2.0 * y * y,
        ),
    )
}

/// Extract Euler angles (radians, each wrapped to `[-π, π]`) for the given axis order.
///
/// Pure single-axis rotations are detected first and answered exactly from
/// `w`, which keeps them free of decomposition noise.
pub fn quat_to_radians(q: Quat, order: RotOrder) -> Vec3 {
    let (x, y, z) = (q.x, q.y, q.z);
    let w = q.w.clamp(-1.0, 1.0);

    let mut axis_mask = 0u8;
    if x.abs() < SINGLE_AXIS_EPSILON {
        axis_mask |= 1;
    }
    if y.abs() < SINGLE_AXIS_EPSILON {
        axis_mask |= 2;
    }
    if z.abs() < SINGLE_AXIS_EPSILON {
        axis_mask |= 4;
    }
    if w.abs() < SINGLE_AXIS_EPSILON {
        axis_mask |= 8;
    }

    let single = |component: f32| {
        let angle = w.acos() * 2.0;
        wrap_pi(if component < 0.0 { -angle } else { angle })
    };
    match axis_mask {
        0b0110 => return Vec3::new(single(x), 0.0, 0.0),
        0b0101 => return Vec3::new(0.0, single(y), 0.0),
        0b0011 => return Vec3::new(0.0, 0.0, single(z)),
        0b0111 => return Vec3::ZERO,
        _ => {}
    }

    let [i0, i1, i2] = order.axes();
    let sign = order.parity();
    let m = rotation_matrix(q);
    // Row-vector element m[r][c], with rows and columns permuted into the order's frame
    let e = |r: usize, c: usize| m.col([i0, i1, i2][r])[[i0, i1, i2][c]];

    let mut r = [0.0f32; 3];
    r[i0] = e(1, 2).atan2(e(2, 2));
    r[i1] = (-e(0, 2)).atan2((sq(e(0, 0)) + sq(e(0, 1))).sqrt());
    let s = r[i0].sin();
    let c = r[i0].cos();
    r[i2] = (s * e(2, 0) - c * e(1, 0)).atan2(c * e(1, 1) - s * e(2, 1));

    Vec3::from_array(r.map(|a| wrap_pi(a * sign)))
}

pub fn quat_to_degrees(q: Quat, order: RotOrder) -> Vec3 {
    quat_to_radians(q, order).to_array().map(degrees).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn quat_close(a: Quat, b: Quat, eps: f32) -> bool {
        // q and -q encode the same rotation
        let d = a.dot(b).abs();
        (d - 1.0).abs() < eps
    }

    fn angles_close(a: Vec3, b: Vec3, eps: f32) -> bool {
        (0..3).all(|i| {
            let d = wrap_pi(a[i] - b[i]);
            d.abs() < eps
        })
    }

    #[test]
    fn test_quat_mul_identity() {
        let q = Quat::from_xyzw(0.1, -0.2, 0.3, 0.927);
        assert_eq!(quat_mul(Quat::IDENTITY, q), q);
        assert_eq!(quat_mul(q, Quat::IDENTITY), q);
    }

    #[test]
    fn test_quat_mul_axis_products() {
        let i = Quat::from_xyzw(1.0, 0.0, 0.0, 0.0);
        let j = Quat::from_xyzw(0.0, 1.0, 0.0, 0.0);
        let k = Quat::from_xyzw(0.0, 0.0, 1.0, 0.0);
        // i * j = k, j * i = -k
        assert_eq!(quat_mul(i, j), k);
        assert_eq!(quat_mul(j, i), Quat::from_xyzw(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_normalize_zero_is_unchanged() {
        let z = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(quat_normalize(z).to_array(), [0.0; 4]);
    }

    #[test]
    fn test_normalize_unit_length() {
        let q = quat_normalize(Quat::from_xyzw(1.0, 2.0, 3.0, 4.0));
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_exp_map_origin_is_identity() {
        let q = exp_map(Vec3::ZERO);
        assert_eq!(q.to_array(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_exp_map_half_angle() {
        // Tangent length is the half-angle: |v| = π/4 is a 90° turn about Z
        let q = exp_map(Vec3::new(0.0, 0.0, PI / 4.0));
        assert!((q.z - FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((q.w - FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_log_exp_roundtrip() {
        let samples = [
            Vec3::new(0.3, -0.2, 0.1),
            Vec3::new(0.0, 1.2, 0.0),
            Vec3::new(-0.7, 0.4, 0.9),
        ];
        for v in samples {
            let back = log_map(exp_map(v));
            assert!((back - v).length() < 1e-5, "{v:?} -> {back:?}");
        }
        assert_eq!(log_map(Quat::IDENTITY), Vec3::ZERO);
    }

    #[test]
    fn test_quat_exp_slice() {
        let vecs = [Vec3::ZERO, Vec3::new(0.0, 0.0, PI / 4.0)];
        let mut out = [Quat::from_xyzw(9.0, 9.0, 9.0, 9.0); 3];
        quat_exp_slice(&mut out, &vecs);
        assert_eq!(out[0], Quat::IDENTITY);
        assert!(quat_close(out[1], exp_map(vecs[1]), 1e-6));
        assert_eq!(out[2].x, 9.0);
    }

    #[test]
    fn test_slerp_same_quat() {
        let q = quat_from_radians(0.3, -0.5, 1.1, RotOrder::Xyz);
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!(quat_close(slerp(q, q, t), q, 1e-6));
        }
    }

    #[test]
    fn test_slerp_endpoints() {
        let q1 = quat_from_radians(0.3, 0.0, 0.2, RotOrder::Xyz);
        let q2 = quat_from_radians(-1.0, 0.8, 0.4, RotOrder::Zyx);
        assert!(quat_close(slerp(q1, q2, 0.0), q1, 1e-6));
        assert!(quat_close(slerp(q1, q2, 1.0), q2, 1e-6));
    }

    #[test]
    fn test_slerp_midpoint_about_z() {
        let q1 = Quat::IDENTITY;
        let q2 = quat_from_radians(0.0, 0.0, PI / 2.0, RotOrder::Xyz);
        let mid = slerp(q1, q2, 0.5);
        let expected = quat_from_radians(0.0, 0.0, PI / 4.0, RotOrder::Xyz);
        assert!(quat_close(mid, expected, 1e-6));
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        let q1 = quat_from_radians(0.0, 0.0, 0.2, RotOrder::Xyz);
        let q2 = quat_from_radians(0.0, 0.0, 0.6, RotOrder::Xyz);
        let neg = Quat::from_xyzw(-q2.x, -q2.y, -q2.z, -q2.w);
        let a = slerp(q1, q2, 0.5);
        let b = slerp(q1, neg, 0.5);
        assert!(quat_close(a, b, 1e-6));
        assert!(quat_close(a, quat_from_radians(0.0, 0.0, 0.4, RotOrder::Xyz), 1e-6));
    }

    #[test]
    fn test_from_radians_xyz_applies_x_first() {
        let rx = Quat::from_xyzw((0.25f32).sin(), 0.0, 0.0, (0.25f32).cos());
        let rz = Quat::from_xyzw(0.0, 0.0, (0.35f32).sin(), (0.35f32).cos());
        let q = quat_from_radians(0.5, 0.0, 0.7, RotOrder::Xyz);
        assert!(quat_close(q, quat_mul(rz, rx), 1e-6));
        let q = quat_from_radians(0.5, 0.0, 0.7, RotOrder::Zyx);
        assert!(quat_close(q, quat_mul(rx, rz), 1e-6));
    }

    #[test]
    fn test_angles_roundtrip_all_orders() {
        let angles = [
            Vec3::new(0.3, -0.4, 0.5),
            Vec3::new(-1.2, 0.7, 2.5),
            Vec3::new(2.9, -1.1, -0.3),
            Vec3::new(0.05, 0.05, -3.0),
        ];
        for order in RotOrder::ALL {
            for a in angles {
                let q = quat_from_radians(a.x, a.y, a.z, order);
                let r = quat_to_radians(q, order);
                let back = quat_from_radians(r.x, r.y, r.z, order);
                assert!(quat_close(q, back, 1e-5), "{}: {a:?} -> {r:?}", order.name());

                // Outside the principal range the equivalent triple comes back instead
                if a[order.axes()[1]].abs() < FRAC_PI_2 - 0.05 {
                    assert!(
                        angles_close(r, a, 1e-4),
                        "{}: {a:?} -> {r:?}",
                        order.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_angles_middle_axis_out_of_range() {
        let a = Vec3::new(-1.2, 0.7, 2.5);
        let q = quat_from_radians(a.x, a.y, a.z, RotOrder::Xzy);
        let r = quat_to_radians(q, RotOrder::Xzy);
        assert!(r.z.abs() <= FRAC_PI_2 + 1e-5);
        assert!(angles_close(r, Vec3::new(a.x + PI, a.y - PI, PI - a.z), 1e-4));
        let back = quat_from_radians(r.x, r.y, r.z, RotOrder::Xzy);
        assert!(quat_close(q, back, 1e-5));
    }

    #[test]
    fn test_single_axis_exact() {
        for order in RotOrder::ALL {
            let q = quat_from_radians(0.0, -2.0, 0.0, order);
            let r = quat_to_radians(q, order);
            assert_eq!(r.x, 0.0);
            assert_eq!(r.z, 0.0);
            assert!((r.y + 2.0).abs() < 1e-5);
        }
        assert_eq!(quat_to_radians(Quat::IDENTITY, RotOrder::Zxy), Vec3::ZERO);
    }

    #[test]
    fn test_degrees_roundtrip() {
        let q = quat_from_degrees(30.0, 45.0, -60.0, RotOrder::Yzx);
        let d = quat_to_degrees(q, RotOrder::Yzx);
        assert!((d.x - 30.0).abs() < 1e-2);
        assert!((d.y - 45.0).abs() < 1e-2);
        assert!((d.z + 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_rotation_matrix_90_z() {
        let q = quat_from_radians(0.0, 0.0, PI / 2.0, RotOrder::Xyz);
        let m = rotation_matrix(q);
        let v = m * Vec3::X;
        assert!((v - Vec3::Y).length() < 1e-6);
    }
}
