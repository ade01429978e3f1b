use crate::math::*;

/// Length of shadow rays towards a directional light.
///
/// Occluders further than this from the shaded point, measured towards the
/// light, cast no shadow. Larger values lose precision at the far end of the
/// reversed ray.
pub const DIRECTIONAL_LIGHT_DISTANCE: f32 = 1e3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LightKind {
	Point { origin: Vec3 },
	/// `direction` is the direction the light travels in
	Directional { direction: Vec3 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
	pub kind: LightKind,
	pub intensity: f32,
	pub color: Vec3,
}

impl Light {
	pub fn point(origin: Vec3, intensity: f32, color: Vec3) -> Light {
		Light { kind: LightKind::Point { origin }, intensity, color }
	}

	pub fn directional(direction: Vec3, intensity: f32, color: Vec3) -> Light {
		Light { kind: LightKind::Directional { direction: direction.normalized() }, intensity, color }
	}

	/// Unit direction from `p` towards the light and the distance to it
	pub fn direction_to(&self, p: Vec3) -> (Vec3, f32) {
		match self.kind {
			LightKind::Point { origin } => Vec3::dir_and_dist(p, origin),
			LightKind::Directional { direction } => (-direction, DIRECTIONAL_LIGHT_DISTANCE),
		}
	}

	/// Radiance arriving at `p`; point lights fall off with the squared distance
	pub fn radiance(&self, p: Vec3) -> Vec3 {
		let emitted = self.color * self.intensity;
		match self.kind {
			LightKind::Point { origin } => emitted / (origin - p).sqr_length(),
			LightKind::Directional { .. } => emitted,
		}
	}
}
