//! Reflectance functions used by the materials.
//!
//! Every direction is a unit vector pointing away from the surface: `l` towards
//! the light, `v` towards the viewer. Results are never clamped to `[0, 1]`.

use crate::math::*;

/// Lambert diffuse: `kd * cd / pi`
pub fn lambert(kd: f32, cd: Vec3) -> Vec3 {
	cd * kd * INV_PI
}

/// Lambert diffuse with a per-channel reflection coefficient
pub fn lambert_rgb(kd: Vec3, cd: Vec3) -> Vec3 {
	cd * kd * INV_PI
}

/// Phong specular lobe, achromatic.
///
/// `reflect(l, n)` mirrors the light direction through the tangent plane, so the
/// lobe peaks when it lines up with `-v`.
pub fn phong(ks: f32, exponent: f32, l: Vec3, v: Vec3, n: Vec3) -> Vec3 {
	let reflected = Vec3::reflect(l, n);
	let cos_alpha = Vec3::dot(reflected, -v).max(0.0);
	Vec3::thrice(ks * cos_alpha.powf(exponent))
}

/// Schlick approximation of the Fresnel reflectance.
///
/// `f0` is the reflectance at normal incidence: about 0.04 for dielectrics,
/// the albedo for metals.
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Vec3) -> Vec3 {
	let c = (1.0 - Vec3::dot(h, v)).powi(5);
	f0 + (Vec3::thrice(1.0) - f0) * c
}

/// Trowbridge-Reitz GGX normal distribution with `alpha = roughness^4`.
///
/// A roughness of exactly zero with `n == h` divides zero by zero; callers keep
/// roughness away from zero.
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
	let alpha = roughness.powi(4);
	let n_dot_h = Vec3::dot(n, h);
	let d = n_dot_h * n_dot_h * (alpha - 1.0) + 1.0;
	alpha / (PI * d * d)
}

/// Schlick-GGX geometry term for direct lighting, `k = (roughness^2 + 1)^2 / 8`
pub fn geometry_schlick_ggx(n: Vec3, v: Vec3, roughness: f32) -> f32 {
	let n_dot_v = Vec3::dot(n, v).max(0.0);
	let a = roughness * roughness + 1.0;
	let k = a * a / 8.0;
	n_dot_v / (n_dot_v * (1.0 - k) + k)
}

/// Smith masking-shadowing: Schlick-GGX towards the viewer times towards the light
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
	geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}

/// Reflectance at normal incidence of common dielectrics
pub const DIELECTRIC_F0: f32 = 0.04;

const COOK_TORRANCE_EPSILON: f32 = 1e-4;

/// Cook-Torrance microfacet BRDF plus an energy conserving Lambert base.
///
/// The diffuse part is weighted by `(1 - F) * (1 - metalness)`, so pure metals
/// only reflect specularly.
pub fn cook_torrance(albedo: Vec3, metalness: f32, roughness: f32, n: Vec3, l: Vec3, v: Vec3) -> Vec3 {
	let f0 = lerp(Vec3::thrice(DIELECTRIC_F0), albedo, metalness);
	let h = (v + l).normalized();

	let f = fresnel_schlick(h, v, f0);
	let d = normal_distribution_ggx(n, h, roughness);
	let g = geometry_smith(n, v, l, roughness);

	let n_dot_v = Vec3::dot(n, v).max(COOK_TORRANCE_EPSILON);
	let n_dot_l = Vec3::dot(n, l).max(COOK_TORRANCE_EPSILON);
	let specular = f * (d * g / (4.0 * n_dot_v * n_dot_l));

	let kd = (Vec3::thrice(1.0) - f) * (1.0 - metalness);
	lambert_rgb(kd, albedo) + specular
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{Rng, SeedableRng, XorShiftRng};

	fn random_hemisphere<R: Rng>(rng: &mut R, n: Vec3) -> Vec3 {
		loop {
			let v = Vec3::new(rng.gen_range(-1.0, 1.0), rng.gen_range(-1.0, 1.0), rng.gen_range(-1.0, 1.0));
			let l = v.length();
			if l > 0.1 && l <= 1.0 {
				let v = v / l;
				return if Vec3::dot(v, n) < 0.0 { -v } else { v };
			}
		}
	}

	#[test]
	fn lambert_divides_by_pi() {
		let c = lambert(0.5, Vec3::new(1.0, 0.5, 0.0));
		assert!((c.x - 0.5 / PI).abs() < 1e-7);
		assert!((c.y - 0.25 / PI).abs() < 1e-7);
		assert_eq!(c.z, 0.0);
		assert_eq!(lambert_rgb(Vec3::thrice(0.5), Vec3::new(1.0, 0.5, 0.0)), c);
	}

	#[test]
	fn phong_peaks_at_mirror_direction() {
		let n = Vec3::UNIT_Y;
		let l = Vec3::new(1.0, 1.0, 0.0).normalized();
		let v = Vec3::new(-1.0, 1.0, 0.0).normalized();
		let peak = phong(0.7, 20.0, l, v, n);
		assert!((peak.x - 0.7).abs() < 1e-5);
		assert_eq!(peak.x, peak.y);
		assert_eq!(peak.y, peak.z);

		// viewing from the light's side falls off
		let off = phong(0.7, 20.0, l, l, n);
		assert!(off.x < 1e-5);
	}

	#[test]
	fn fresnel_bounds() {
		let mut rng = XorShiftRng::from_seed([9, 10, 11, 12]);
		for _ in 0..1000 {
			let f0 = Vec3::new(rng.gen(), rng.gen(), rng.gen());
			let h = random_hemisphere(&mut rng, Vec3::UNIT_Y);
			let v = random_hemisphere(&mut rng, h);
			let f = fresnel_schlick(h, v, f0);
			for &(fc, f0c) in &[(f.x, f0.x), (f.y, f0.y), (f.z, f0.z)] {
				assert!(fc >= f0c - 1e-6 && fc <= 1.0 + 1e-6, "{} not in [{}, 1]", fc, f0c);
			}
		}
	}

	#[test]
	fn fresnel_limits() {
		let f0 = Vec3::thrice(0.04);
		assert_eq!(fresnel_schlick(Vec3::UNIT_Y, Vec3::UNIT_Y, f0), f0);
		let grazing = fresnel_schlick(Vec3::UNIT_Y, Vec3::UNIT_X, f0);
		assert!((grazing - Vec3::thrice(1.0)).length() < 1e-6);
	}

	#[test]
	fn smith_is_product_of_schlick_ggx() {
		let mut rng = XorShiftRng::from_seed([13, 14, 15, 16]);
		for _ in 0..1000 {
			let n = random_hemisphere(&mut rng, Vec3::UNIT_Y);
			let v = random_hemisphere(&mut rng, Vec3::UNIT_Y);
			let l = random_hemisphere(&mut rng, Vec3::UNIT_Y);
			let r: f32 = rng.gen();
			assert_eq!(
				geometry_smith(n, v, l, r),
				geometry_schlick_ggx(n, v, r) * geometry_schlick_ggx(n, l, r)
			);
		}
	}

	#[test]
	fn schlick_ggx_clamps_back_facing() {
		assert_eq!(geometry_schlick_ggx(Vec3::UNIT_Y, -Vec3::UNIT_Y, 0.5), 0.0);
		assert!((geometry_schlick_ggx(Vec3::UNIT_Y, Vec3::UNIT_Y, 0.5) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn ggx_peaks_when_smooth() {
		let n = Vec3::UNIT_Y;
		let rough = normal_distribution_ggx(n, n, 1.0);
		let smooth = normal_distribution_ggx(n, n, 0.1);
		assert!((rough - INV_PI).abs() < 1e-6);
		assert!(smooth > rough);
		assert!(normal_distribution_ggx(n, Vec3::UNIT_X, 0.1) < rough);
	}

	#[test]
	fn cook_torrance_is_non_negative() {
		let mut rng = XorShiftRng::from_seed([17, 18, 19, 20]);
		for _ in 0..1000 {
			let n = Vec3::UNIT_Y;
			let l = random_hemisphere(&mut rng, n);
			let v = random_hemisphere(&mut rng, n);
			let albedo = Vec3::new(rng.gen(), rng.gen(), rng.gen());
			let c = cook_torrance(albedo, rng.gen(), rng.gen_range(0.05, 1.0), n, l, v);
			assert!(c.min_elem() >= 0.0 && c.all_finite(), "{:?}", c);
		}
	}

	#[test]
	fn metals_have_no_diffuse_term() {
		// with the light below the horizon the specular term vanishes through the geometry term
		let n = Vec3::UNIT_Y;
		let l = Vec3::new(1.0, -1.0, 0.0).normalized();
		let v = Vec3::UNIT_Y;
		let metal = cook_torrance(Vec3::thrice(0.9), 1.0, 0.5, n, l, v);
		assert_eq!(metal, Vec3::zero());
		// a dielectric keeps its diffuse base even with no specular contribution
		let plastic = cook_torrance(Vec3::thrice(0.9), 0.0, 0.5, n, l, v);
		assert!(plastic.min_elem() > 0.0);
	}

	#[test]
	fn cook_torrance_combines_its_terms() {
		let n = Vec3::UNIT_Y;
		let l = Vec3::new(0.6, 0.8, 0.0);
		let v = Vec3::new(0.0, 0.6, -0.8);
		let albedo = Vec3::new(0.9, 0.6, 0.3);
		let (metalness, roughness) = (0.25, 0.5);

		// 0.04 blended towards the albedo by a quarter
		let f0 = Vec3::new(0.255, 0.18, 0.105);
		let h = (v + l).normalized();
		let f = fresnel_schlick(h, v, f0);
		let d = normal_distribution_ggx(n, h, roughness);
		let g = geometry_smith(n, v, l, roughness);
		let specular = f * (d * g / (4.0 * 0.6 * 0.8));
		let diffuse = (Vec3::thrice(1.0) - f) * 0.75 * albedo / PI;
		let expected = specular + diffuse;

		let c = cook_torrance(albedo, metalness, roughness, n, l, v);
		assert!((c - expected).length() < 1e-5, "{:?} != {:?}", c, expected);

		// dropping either lobe moves the result well past the tolerance
		assert!((c - diffuse).length() > 1e-3);
		assert!((c - specular).length() > 1e-3);
	}
}
