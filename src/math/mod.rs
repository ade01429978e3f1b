pub mod vec3;
pub mod mat4;
pub mod ray;
pub mod aabb;

pub use self::vec3::Vec3;
pub use self::mat4::Mat4;
pub use self::ray::Ray;
pub use self::aabb::AABB;
pub use std::f32::{INFINITY, NEG_INFINITY};
pub use std::f32::consts::*;

pub const INV_PI: f32 = FRAC_1_PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis { X, Y, Z }

/// Approximate float equality used for degeneracy tests
#[inline(always)]
pub fn nearly_zero(v: f32) -> bool {
	v.abs() < 1e-6
}

pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
	(1.0 - t) * a + t * b
}
