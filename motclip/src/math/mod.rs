//! Scalar and vector helpers shared by the rotation codec and the evaluator
//!
//! Everything here is a pure function over `f32` / [`glam::Vec3`]. The
//! quaternion codec lives in [`quat`] and the matrix composer in [`xform`].

pub mod quat;
pub mod xform;

use glam::Vec3;

/// Below this magnitude `sinc` returns its limit value of 1
pub const SINC_EPSILON: f32 = 1.0e-4;

#[inline]
pub fn sq(x: f32) -> f32 {
    x * x
}

/// `sin(x) / x` with the removable singularity at the origin patched to 1
#[inline]
pub fn sinc(x: f32) -> f32 {
    if x.abs() < SINC_EPSILON {
        return 1.0;
    }
    x.sin() / x
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation
pub fn vec_lerp(v1: Vec3, v2: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        lerp(v1.x, v2.x, t),
        lerp(v1.y, v2.y, t),
        lerp(v1.z, v2.z, t),
    )
}

/// Radians to degrees
#[inline]
pub fn degrees(rad: f32) -> f32 {
    rad * (45.0 / 1.0f32.atan())
}

/// Degrees to radians
#[inline]
pub fn radians(deg: f32) -> f32 {
    deg * (1.0f32.atan() / 45.0)
}

/// Wrap an angle into `[-π, π]`.
///
/// Uses a truncating remainder first, so `-π` stays `-π`.
pub fn wrap_pi(rad: f32) -> f32 {
    let pi = 1.0f32.atan() * 4.0;
    let rad = rad % (pi * 2.0);
    if rad.abs() > pi {
        if rad < 0.0 { pi * 2.0 + rad } else { rad - pi * 2.0 }
    } else {
        rad
    }
}
