use crate::math::*;

pub const MIN_FOV: f32 = 20.0;
pub const MAX_FOV: f32 = 120.0;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Pinhole camera looking down its local +Z axis.
///
/// Orientation is stored as accumulated yaw (around world Y) and pitch (around
/// the camera's right axis), both in radians. `forward` is derived from them;
/// `right` and `up` are rebuilt from `forward` by `camera_to_world`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
	pub origin: Vec3,
	/// Vertical field of view in degrees
	pub fov_angle: f32,
	pub forward: Vec3,
	pub up: Vec3,
	pub right: Vec3,
	total_yaw: f32,
	total_pitch: f32,
}

/// Per-frame constants shared by every pixel ray
#[derive(Copy, Clone, Debug)]
pub struct ViewParams {
	pub width: usize,
	pub height: usize,
	pub aspect_ratio: f32,
	pub fov_scale: f32,
	pub camera_to_world: Mat4,
}

impl Camera {
	pub fn new(origin: Vec3, fov_angle: f32) -> Camera {
		Camera {
			origin,
			fov_angle,
			forward: Vec3::UNIT_Z,
			up: Vec3::UNIT_Y,
			right: Vec3::UNIT_X,
			total_yaw: 0.0,
			total_pitch: 0.0,
		}
	}

	/// Camera placed at `origin` with the given orientation, in radians
	pub fn looking(origin: Vec3, fov_angle: f32, yaw: f32, pitch: f32) -> Camera {
		let mut camera = Camera::new(origin, fov_angle);
		camera.rotate(yaw, pitch);
		camera
	}

	pub fn pitch(&self) -> f32 {
		self.total_pitch
	}

	/// Re-derive `right` and `up` from `forward` and return the view-to-world transform
	pub fn camera_to_world(&mut self) -> Mat4 {
		self.right = Vec3::cross(Vec3::UNIT_Y, self.forward).normalized();
		self.up = Vec3::cross(self.forward, self.right).normalized();
		Mat4::from_basis(self.right, self.up, self.forward, self.origin)
	}

	/// Add to the accumulated yaw and pitch; pitch stays short of straight up or down
	pub fn rotate(&mut self, yaw: f32, pitch: f32) {
		self.total_yaw += yaw;
		self.total_pitch = (self.total_pitch + pitch).max(-MAX_PITCH).min(MAX_PITCH);

		let (sin_yaw, cos_yaw) = self.total_yaw.sin_cos();
		let (sin_pitch, cos_pitch) = self.total_pitch.sin_cos();
		self.forward = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw).normalized();
		self.camera_to_world();
	}

	/// Move along the camera's own axes: `delta.x` right, `delta.y` up, `delta.z` forward
	pub fn translate_local(&mut self, delta: Vec3) {
		self.origin += self.right * delta.x + self.up * delta.y + self.forward * delta.z;
	}

	pub fn set_fov(&mut self, fov_angle: f32) {
		self.fov_angle = fov_angle.max(MIN_FOV).min(MAX_FOV);
	}

	pub fn view_params(&mut self, width: usize, height: usize) -> ViewParams {
		ViewParams {
			width,
			height,
			aspect_ratio: width as f32 / height as f32,
			fov_scale: (self.fov_angle.to_radians() * 0.5).tan(),
			camera_to_world: self.camera_to_world(),
		}
	}
}

impl Default for Camera {
	fn default() -> Camera {
		Camera::new(Vec3::zero(), 90.0)
	}
}

impl ViewParams {
	/// World-space ray through the center of pixel (`px`, `py`); row 0 is the top of the image
	pub fn make_ray(&self, px: usize, py: usize) -> Ray {
		let cx = (2.0 * (px as f32 + 0.5) / self.width as f32 - 1.0) * self.aspect_ratio * self.fov_scale;
		let cy = (1.0 - 2.0 * (py as f32 + 0.5) / self.height as f32) * self.fov_scale;
		let direction = self.camera_to_world.transform_vector(Vec3::new(cx, cy, 1.0)).normalized();
		Ray::new(self.camera_to_world.transform_point(Vec3::zero()), direction)
	}
}
