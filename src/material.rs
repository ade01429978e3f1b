use crate::brdf;
use crate::geometry::HitRecord;
use crate::math::*;

/// Roughness values below this make the GGX distribution degenerate
pub const MIN_ROUGHNESS: f32 = 0.01;

/// Surface response to a single light.
///
/// `shade` returns the BRDF value for light arriving from `l` and leaving
/// towards `v`; it does not include the light's radiance nor the cosine term.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
	/// Constant color, ignores lighting geometry
	SolidColor { color: Vec3 },
	Lambert { color: Vec3, diffuse_reflectance: Vec3 },
	LambertPhong {
		color: Vec3,
		diffuse_reflectance: f32,
		specular_reflectance: f32,
		phong_exponent: f32,
	},
	/// Microfacet model; `metalness` in `[0, 1]`, `roughness` in `[MIN_ROUGHNESS, 1]`
	CookTorrance { albedo: Vec3, metalness: f32, roughness: f32 },
}

impl Material {
	pub fn solid_color(color: Vec3) -> Material {
		Material::SolidColor { color }
	}

	pub fn lambert(color: Vec3, diffuse_reflectance: f32) -> Material {
		Material::Lambert { color, diffuse_reflectance: Vec3::thrice(diffuse_reflectance) }
	}

	pub fn lambert_phong(color: Vec3, diffuse_reflectance: f32, specular_reflectance: f32, phong_exponent: f32) -> Material {
		Material::LambertPhong { color, diffuse_reflectance, specular_reflectance, phong_exponent }
	}

	pub fn cook_torrance(albedo: Vec3, metalness: f32, roughness: f32) -> Material {
		Material::CookTorrance {
			albedo,
			metalness: metalness.max(0.0).min(1.0),
			roughness: roughness.max(MIN_ROUGHNESS).min(1.0),
		}
	}

	pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Vec3 {
		match *self {
			Material::SolidColor { color } => color,
			Material::Lambert { color, diffuse_reflectance } => {
				brdf::lambert_rgb(diffuse_reflectance, color)
			}
			Material::LambertPhong { color, diffuse_reflectance, specular_reflectance, phong_exponent } => {
				brdf::lambert(diffuse_reflectance, color)
					+ brdf::phong(specular_reflectance, phong_exponent, l, v, hit.normal)
			}
			Material::CookTorrance { albedo, metalness, roughness } => {
				brdf::cook_torrance(albedo, metalness, roughness, hit.normal, l, v)
			}
		}
	}
}

impl Default for Material {
	/// Red solid color, the scene's fallback
	fn default() -> Material {
		Material::solid_color(Vec3::new(1.0, 0.0, 0.0))
	}
}
