use crate::math::{Vec3, INFINITY};

/// Half-line restricted to the open parameter interval `(min, max)`.
///
/// `direction` is expected to be normalized; it is not checked.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
	pub min: f32,
	pub max: f32,
}

impl Ray {
	pub fn new(origin: Vec3, direction: Vec3) -> Ray {
		Ray { origin, direction, min: 0.0, max: INFINITY }
	}

	pub fn bounded(origin: Vec3, direction: Vec3, min: f32, max: f32) -> Ray {
		debug_assert!(min < max);
		Ray { origin, direction, min, max }
	}

	pub fn point_at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}

	/// Same segment walked from its far end back to its start.
	///
	/// The far end is `point_at(max)`, so `max` must be finite.
	pub fn reversed(&self) -> Ray {
		Ray {
			origin: self.point_at(self.max),
			direction: -self.direction,
			min: self.min,
			max: self.max - self.min,
		}
	}

	#[inline(always)]
	pub fn contains(&self, t: f32) -> bool {
		self.min < t && t < self.max
	}
}
