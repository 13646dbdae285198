//! Local transform composition
//!
//! Matrices follow the row-vector convention of the clip format: a point is
//! transformed as `p · M`, rows 0..3 hold the basis images and row 3 holds the
//! translation. A [`glam::Mat4`] stores that matrix with row `i` in column `i`,
//! which makes it the ordinary glam (column-vector) matrix as well;
//! `to_cols_array_2d()` yields the row-vector layout directly.

use glam::{Mat4, Quat, Vec3, Vec4};

use super::quat::rotation_matrix;
use crate::format::{XformOrder, XformStage};

/// Translation-only transform
pub fn make_transform_t(translation: Vec3) -> Mat4 {
    Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, translation.extend(1.0))
}

/// Rotation-only transform
pub fn make_transform_r(rotation: Quat) -> Mat4 {
    let m = rotation_matrix(rotation);
    Mat4::from_cols(
        m.x_axis.extend(0.0),
        m.y_axis.extend(0.0),
        m.z_axis.extend(0.0),
        Vec4::W,
    )
}

/// Scale-only transform
fn make_transform_s(scale: Vec3) -> Mat4 {
    Mat4::from_cols(
        Vec4::X * scale.x,
        Vec4::Y * scale.y,
        Vec4::Z * scale.z,
        Vec4::W,
    )
}

/// Translate + rotate without a scale stage.
///
/// When the order translates before rotating, the translation row is carried
/// through the rotation; otherwise it is placed as-is.
pub fn make_transform_tr(translation: Vec3, rotation: Quat, order: XformOrder) -> Mat4 {
    let m = rotation_matrix(rotation);
    let t = if order.translates_before_rotating() {
        m * translation
    } else {
        translation
    };
    Mat4::from_cols(
        m.x_axis.extend(0.0),
        m.y_axis.extend(0.0),
        m.z_axis.extend(0.0),
        t.extend(1.0),
    )
}

/// Full scale / rotate / translate composition in the given order
pub fn make_transform(
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    order: XformOrder,
) -> Mat4 {
    let stage = |s: XformStage| match s {
        XformStage::Scale => make_transform_s(scale),
        XformStage::Rotate => make_transform_r(rotation),
        XformStage::Translate => make_transform_t(translation),
    };
    let [first, second, third] = order.stages();
    // Row-vector product first·second·third, written in glam's column order
    stage(third) * (stage(second) * stage(first))
}
