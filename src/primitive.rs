use crate::geometry::*;
use crate::math::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
	pub center: Vec3,
	pub radius: f32,
	pub material: MaterialIndex,
}

impl Sphere {
	pub fn new(center: Vec3, radius: f32, material: MaterialIndex) -> Sphere {
		debug_assert!(radius > 0.0);
		Sphere { center, radius, material }
	}

	// Geometric solution: project the center on the ray, then walk back by the half chord.
	fn intersect(&self, ray: &Ray) -> Option<f32> {
		let to_center = self.center - ray.origin;
		let t_ca = Vec3::dot(to_center, ray.direction);
		let od_sqr = to_center.sqr_length() - t_ca * t_ca;
		let r_sqr = self.radius * self.radius;
		if r_sqr <= od_sqr {
			return None;
		}

		let t_hc = (r_sqr - od_sqr).sqrt();
		let mut t = t_ca - t_hc;
		if t < ray.min {
			t = t_ca + t_hc;
		}
		if ray.contains(t) { Some(t) } else { None }
	}
}

impl Surface for Sphere {
	fn closest_hit(&self, ray: &Ray, best: HitRecord) -> HitRecord {
		match self.intersect(ray) {
			Some(t) if t < best.t => {
				let point = ray.point_at(t);
				HitRecord {
					did_hit: true,
					point,
					normal: (point - self.center) / self.radius,
					material: self.material,
					t,
				}
			}
			_ => best,
		}
	}

	fn does_hit(&self, ray: &Ray) -> bool {
		self.intersect(ray).is_some()
	}
}

/// Infinite two-sided plane
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
	pub origin: Vec3,
	pub normal: Vec3,
	pub material: MaterialIndex,
}

impl Plane {
	pub fn new(origin: Vec3, normal: Vec3, material: MaterialIndex) -> Plane {
		Plane { origin, normal, material }
	}

	fn intersect(&self, ray: &Ray) -> Option<f32> {
		// a ray parallel to the plane divides by zero; the resulting inf/NaN falls outside the interval
		let t = Vec3::dot(self.origin - ray.origin, self.normal) / Vec3::dot(ray.direction, self.normal);
		if ray.contains(t) { Some(t) } else { None }
	}
}

impl Surface for Plane {
	fn closest_hit(&self, ray: &Ray, best: HitRecord) -> HitRecord {
		match self.intersect(ray) {
			Some(t) if t < best.t => HitRecord {
				did_hit: true,
				point: ray.point_at(t),
				normal: self.normal,
				material: self.material,
				t,
			},
			_ => best,
		}
	}

	fn does_hit(&self, ray: &Ray) -> bool {
		self.intersect(ray).is_some()
	}
}

/// Which side of a triangle, if any, is invisible to rays.
///
/// The front side is the one the winding-derived normal points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
	None,
	FrontFace,
	BackFace,
}

impl Default for CullMode {
	fn default() -> CullMode {
		CullMode::None
	}
}

impl CullMode {
	/// True when a ray travelling along a direction with `n_dot_d = dot(normal, direction)` is culled
	#[inline(always)]
	pub fn culls(self, n_dot_d: f32) -> bool {
		match self {
			CullMode::None => false,
			CullMode::FrontFace => n_dot_d < 0.0,
			CullMode::BackFace => n_dot_d > 0.0,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
	pub v0: Vec3,
	pub v1: Vec3,
	pub v2: Vec3,
	pub normal: Vec3,
	pub material: MaterialIndex,
	pub cull_mode: CullMode,
}

impl Triangle {
	/// Counter-clockwise winding (seen from the front) gives the face normal
	pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material: MaterialIndex) -> Triangle {
		let normal = Vec3::cross(v1 - v0, v2 - v0).normalized();
		Triangle::with_normal([v0, v1, v2], normal, cull_mode, material)
	}

	pub fn with_normal([v0, v1, v2]: [Vec3; 3], normal: Vec3, cull_mode: CullMode, material: MaterialIndex) -> Triangle {
		Triangle { v0, v1, v2, normal, material, cull_mode }
	}

	pub fn intersect(&self, ray: &Ray) -> Option<f32> {
		let n_dot_d = Vec3::dot(self.normal, ray.direction);
		if self.cull_mode.culls(n_dot_d) || nearly_zero(n_dot_d) {
			return None;
		}

		let t = Vec3::dot(self.v0 - ray.origin, self.normal) / n_dot_d;
		if !(ray.min <= t && t <= ray.max) {
			return None;
		}

		// the hit must lie on the inner side of every edge
		let p = ray.point_at(t);
		let vertices = [self.v0, self.v1, self.v2];
		for i in 0..3 {
			let start = vertices[i];
			let edge = vertices[(i + 1) % 3] - start;
			if Vec3::dot(Vec3::cross(edge, p - start), self.normal) < 0.0 {
				return None;
			}
		}

		Some(t)
	}
}

impl Surface for Triangle {
	fn closest_hit(&self, ray: &Ray, best: HitRecord) -> HitRecord {
		match self.intersect(ray) {
			Some(t) if t < best.t => HitRecord {
				did_hit: true,
				point: ray.point_at(t),
				normal: self.normal,
				material: self.material,
				t,
			},
			_ => best,
		}
	}

	fn does_hit(&self, ray: &Ray) -> bool {
		self.intersect(ray).is_some()
	}
}
