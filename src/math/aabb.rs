use crate::math::*;

/// Axis-Aligned Bounding Box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
	pub min: Vec3,
	pub max: Vec3,
}

impl AABB {
	/// Slab test: clip the ray interval against each axis in turn.
	///
	/// Returns false as soon as the running `[t_near, t_far]` interval is empty,
	/// which also covers boxes lying entirely behind the ray origin or beyond `ray.max`.
	pub fn hit(&self, ray: &Ray) -> bool {
		let mut t_near = ray.min;
		let mut t_far = ray.max;

		for &axis in &[Axis::X, Axis::Y, Axis::Z] {
			let inv_dir = 1.0 / ray.direction[axis];
			let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_dir;
			let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_dir;
			if inv_dir < 0.0 {
				::std::mem::swap(&mut t0, &mut t1);
			}
			// f32::max/min drop a NaN operand, so a ray lying in a slab plane keeps its interval
			t_near = t0.max(t_near);
			t_far = t1.min(t_far);
			if t_far < t_near {
				return false;
			}
		}

		true
	}

	pub fn empty() -> AABB {
		AABB { min: Vec3::thrice(INFINITY), max: Vec3::thrice(NEG_INFINITY) }
	}

	pub fn from_points<I: IntoIterator<Item=Vec3>>(points: I) -> AABB {
		let mut aabb = AABB::empty();
		for p in points {
			aabb.extend_point(p);
		}
		aabb
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
	}

	pub fn extend_point(&mut self, p: Vec3) {
		self.min = Vec3::min(self.min, p);
		self.max = Vec3::max(self.max, p);
	}

	pub fn corners(&self) -> [Vec3; 8] {
		let (a, b) = (self.min, self.max);
		[
			Vec3::new(a.x, a.y, a.z),
			Vec3::new(b.x, a.y, a.z),
			Vec3::new(a.x, b.y, a.z),
			Vec3::new(b.x, b.y, a.z),
			Vec3::new(a.x, a.y, b.z),
			Vec3::new(b.x, a.y, b.z),
			Vec3::new(a.x, b.y, b.z),
			Vec3::new(b.x, b.y, b.z),
		]
	}

	/// Bounding box of the 8 transformed corners
	pub fn transformed(&self, transform: &Mat4) -> AABB {
		if self.is_empty() {
			return *self;
		}
		AABB::from_points(self.corners().iter().map(|&c| transform.transform_point(c)))
	}
}
