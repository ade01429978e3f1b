use crate::math::*;

/// Index into the scene's material list
pub type MaterialIndex = usize;

/// Closest intersection found so far along a ray.
///
/// A fresh record has `t = INFINITY` and `did_hit = false`, so any valid
/// candidate improves on it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
	pub did_hit: bool,
	pub point: Vec3,
	pub normal: Vec3,
	pub material: MaterialIndex,
	pub t: f32,
}

impl HitRecord {
	pub fn none() -> HitRecord {
		HitRecord {
			did_hit: false,
			point: Vec3::zero(),
			normal: Vec3::zero(),
			material: 0,
			t: INFINITY,
		}
	}

	/// Keep whichever of `self` and `other` is nearer; ties keep `self`
	#[inline(always)]
	pub fn nearest(self, other: HitRecord) -> HitRecord {
		if other.t < self.t { other } else { self }
	}
}

impl Default for HitRecord {
	fn default() -> HitRecord {
		HitRecord::none()
	}
}

/// Something a ray can be tested against.
///
/// `closest_hit` is a fold step: it returns `best` unchanged unless the surface
/// yields a valid hit nearer than `best.t`. `does_hit` only answers whether any
/// valid hit exists and must agree with `closest_hit(ray, HitRecord::none()).did_hit`.
pub trait Surface {
	fn closest_hit(&self, ray: &Ray, best: HitRecord) -> HitRecord;

	fn does_hit(&self, ray: &Ray) -> bool {
		self.closest_hit(ray, HitRecord::none()).did_hit
	}
}

/// Fold `closest_hit` over a list of surfaces
pub fn closest_of<'a, S, I>(surfaces: I, ray: &Ray, best: HitRecord) -> HitRecord
	where S: Surface + 'a, I: IntoIterator<Item=&'a S>
{
	surfaces.into_iter().fold(best, |best, s| s.closest_hit(ray, best))
}

pub fn any_of<'a, S, I>(surfaces: I, ray: &Ray) -> bool
	where S: Surface + 'a, I: IntoIterator<Item=&'a S>
{
	surfaces.into_iter().any(|s| s.does_hit(ray))
}
