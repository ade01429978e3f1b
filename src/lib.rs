extern crate image;
extern crate rayon;
extern crate serde_json;
extern crate time;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod brdf;
pub mod camera;
pub mod demo;
pub mod description;
pub mod framebuffer;
pub mod geometry;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod options;
pub mod primitive;
pub mod scene;

use rayon::prelude::*;
use time::PreciseTime;

use crate::camera::{Camera, ViewParams};
use crate::framebuffer::{quantize, FrameBuffer, Tonemap};
use crate::geometry::HitRecord;
use crate::light::Light;
use crate::math::*;
use crate::options::{LightingMode, RenderOptions};
use crate::scene::Scene;

/// Offset of shadow ray origins off the surface, and their near bound
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Render a full frame. Rows are shaded in parallel; the result only depends
/// on the inputs.
pub fn render(scene: &Scene, camera: &Camera, options: &RenderOptions) -> FrameBuffer {
	let mut camera = *camera;
	let params = camera.view_params(options.width, options.height);
	let tonemap = options.tonemap.function();
	let mut frame = FrameBuffer::new(options.width, options.height);

	info!("Start rendering {}x{} ({:?}, shadows {})...",
		options.width, options.height, options.lighting_mode, if options.shadows { "on" } else { "off" });
	let start = PreciseTime::now();

	let row_len = 3 * options.width;
	if row_len > 0 {
		frame.pixels_mut().par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
			for (x, p) in row.chunks_mut(3).enumerate() {
				p.copy_from_slice(&render_pixel(scene, &params, options, tonemap, x, y));
			}
		});
	}

	let end = PreciseTime::now();
	let tot_s = start.to(end).num_milliseconds() as f32 / 1000.0;
	info!("Rendered {} pixels in {:.3}s", options.width * options.height, tot_s);

	frame
}

/// Color of a single pixel, tonemapped and quantized
pub fn render_pixel(scene: &Scene, params: &ViewParams, options: &RenderOptions, tonemap: Tonemap, px: usize, py: usize) -> [u8; 3] {
	let ray = params.make_ray(px, py);
	quantize(tonemap(trace(scene, &ray, options)))
}

/// Sum of every light's contribution at the first hit along `ray`, black on a miss
pub fn trace(scene: &Scene, ray: &Ray, options: &RenderOptions) -> Vec3 {
	let hit = scene.closest_hit(ray);
	if !hit.did_hit {
		return Vec3::zero();
	}
	shade_hit(scene, &hit, -ray.direction, options)
}

/// Accumulate the lights visible from `hit`; `v` points back towards the viewer
pub fn shade_hit(scene: &Scene, hit: &HitRecord, v: Vec3, options: &RenderOptions) -> Vec3 {
	let material = scene.material(hit.material);
	let mut color = Vec3::zero();

	for light in scene.lights() {
		if options.shadows {
			if let Some(light_ray) = shadow_ray(hit, light) {
				if scene.occluded(&light_ray) {
					continue;
				}
			}
		}

		let (l, _) = light.direction_to(hit.point);
		let cos = Vec3::dot(l, hit.normal).max(0.0);
		color += match options.lighting_mode {
			LightingMode::ObservedArea => Vec3::thrice(cos),
			LightingMode::Radiance => light.radiance(hit.point),
			LightingMode::Brdf => material.shade(hit, l, v),
			LightingMode::Combined => light.radiance(hit.point) * material.shade(hit, l, v) * cos,
		};
	}

	color
}

/// Segment from just off `hit` to `light`, or `None` when the light sits on the surface.
///
/// The origin is lifted along the normal on the side facing the light, and the
/// length is measured from there so the far end lands on a point light.
pub fn shadow_ray(hit: &HitRecord, light: &Light) -> Option<Ray> {
	let (l, dist) = light.direction_to(hit.point);
	if dist <= SHADOW_EPSILON {
		return None;
	}
	let offset = if Vec3::dot(l, hit.normal) < 0.0 { -hit.normal } else { hit.normal };
	let origin = hit.point + offset * SHADOW_EPSILON;
	let (l, dist) = light.direction_to(origin);
	if dist <= SHADOW_EPSILON {
		return None;
	}
	Some(Ray::bounded(origin, l, SHADOW_EPSILON, dist))
}
