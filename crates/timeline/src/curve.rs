//! Shared curve math: basis-weight blending and yaw direction vectors.
//!
//! Position evaluation blends vectors, rotation evaluation blends the
//! scalar pitch and a yaw direction vector through the same weights.

use camline_common::{weights, Basis, Vec3};

/// Blend four control points with the given basis at normalized `t`.
pub fn blend_point(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    t: f64,
    basis: &Basis,
    scale: f64,
) -> Vec3 {
    let w = weights(basis, t, scale);
    p0 * w[0] + p1 * w[1] + p2 * w[2] + p3 * w[3]
}

/// Blend four scalar control values with the given basis at normalized `t`.
pub fn blend_value(v0: f64, v1: f64, v2: f64, v3: f64, t: f64, basis: &Basis, scale: f64) -> f64 {
    let w = weights(basis, t, scale);
    v0 * w[0] + v1 * w[1] + v2 * w[2] + v3 * w[3]
}

/// Unit direction of a rotation sample's yaw in the ground plane.
///
/// Raw yaw angles jump at the ±180° wrap; directions blend continuously
/// and convert back with [`direction_yaw`].
pub fn yaw_direction(rot: Vec3) -> Vec3 {
    let yaw = rot.y.to_radians();
    Vec3::new(yaw.cos(), yaw.sin(), 0.0)
}

/// Yaw angle in degrees recovered from a blended direction vector.
pub fn direction_yaw(dir: Vec3) -> f64 {
    dir.y.atan2(dir.x).to_degrees()
}
