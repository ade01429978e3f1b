use crate::geometry::*;
use crate::light::Light;
use crate::material::Material;
use crate::math::*;
use crate::mesh::TriangleMesh;
use crate::primitive::*;

/// Everything a render reads: primitives, lights and the material list.
///
/// Material 0 always exists and is the fallback for indices that do not
/// resolve. Primitives refer to materials by index only.
#[derive(Clone, Debug)]
pub struct Scene {
	spheres: Vec<Sphere>,
	planes: Vec<Plane>,
	triangles: Vec<Triangle>,
	meshes: Vec<TriangleMesh>,
	lights: Vec<Light>,
	materials: Vec<Material>,
}

impl Scene {
	pub fn new() -> Scene {
		Scene {
			spheres: Vec::new(),
			planes: Vec::new(),
			triangles: Vec::new(),
			meshes: Vec::new(),
			lights: Vec::with_capacity(32),
			materials: vec![Material::default()],
		}
	}

	pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialIndex) -> usize {
		self.spheres.push(Sphere::new(center, radius, material));
		self.spheres.len() - 1
	}

	pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material: MaterialIndex) -> usize {
		self.planes.push(Plane::new(origin, normal, material));
		self.planes.len() - 1
	}

	pub fn add_triangle(&mut self, triangle: Triangle) -> usize {
		self.triangles.push(triangle);
		self.triangles.len() - 1
	}

	/// Add an empty mesh, to be filled through `mesh_mut`
	pub fn add_triangle_mesh(&mut self, cull_mode: CullMode, material: MaterialIndex) -> usize {
		self.add_mesh(TriangleMesh::new(cull_mode, material))
	}

	pub fn add_mesh(&mut self, mesh: TriangleMesh) -> usize {
		self.meshes.push(mesh);
		self.meshes.len() - 1
	}

	pub fn mesh_mut(&mut self, i: usize) -> Option<&mut TriangleMesh> {
		self.meshes.get_mut(i)
	}

	pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Vec3) {
		self.lights.push(Light::point(origin, intensity, color));
	}

	pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Vec3) {
		self.lights.push(Light::directional(direction, intensity, color));
	}

	pub fn add_material(&mut self, material: Material) -> MaterialIndex {
		self.materials.push(material);
		self.materials.len() - 1
	}

	/// Material `i`, or the default material when `i` is out of range
	pub fn material(&self, i: MaterialIndex) -> &Material {
		self.materials.get(i).unwrap_or(&self.materials[0])
	}

	pub fn material_count(&self) -> usize {
		self.materials.len()
	}

	pub fn lights(&self) -> &[Light] {
		&self.lights
	}

	pub fn spheres(&self) -> &[Sphere] {
		&self.spheres
	}

	pub fn planes(&self) -> &[Plane] {
		&self.planes
	}

	pub fn triangles(&self) -> &[Triangle] {
		&self.triangles
	}

	pub fn meshes(&self) -> &[TriangleMesh] {
		&self.meshes
	}

	/// Nearest valid hit over every primitive: spheres, planes, triangles, then meshes
	pub fn closest_hit(&self, ray: &Ray) -> HitRecord {
		let best = HitRecord::none();
		let best = closest_of(&self.spheres, ray, best);
		let best = closest_of(&self.planes, ray, best);
		let best = closest_of(&self.triangles, ray, best);
		closest_of(&self.meshes, ray, best)
	}

	/// Whether any primitive has a valid hit on `ray`; stops at the first one
	pub fn does_hit(&self, ray: &Ray) -> bool {
		any_of(&self.spheres, ray)
			|| any_of(&self.planes, ray)
			|| any_of(&self.triangles, ray)
			|| any_of(&self.meshes, ray)
	}

	/// Whether something blocks `light_ray`, a bounded ray leaving a surface towards a light.
	///
	/// The segment is tested from the light's end back to the surface, so
	/// one-sided geometry facing the light still casts a shadow.
	pub fn occluded(&self, light_ray: &Ray) -> bool {
		self.does_hit(&light_ray.reversed())
	}

	/// Log a one-line summary of the scene content
	pub fn log_summary(&self) {
		let faces: usize = self.meshes.iter().map(|m| m.face_count()).sum();
		info!("Scene: {} spheres, {} planes, {} triangles, {} meshes ({} faces), {} lights, {} materials",
			self.spheres.len(), self.planes.len(), self.triangles.len(),
			self.meshes.len(), faces, self.lights.len(), self.materials.len());

		let count = self.materials.len();
		let unresolved = self.spheres.iter().map(|s| s.material)
			.chain(self.planes.iter().map(|p| p.material))
			.chain(self.triangles.iter().map(|t| t.material))
			.chain(self.meshes.iter().map(|m| m.material))
			.filter(|&m| m >= count)
			.count();
		if unresolved > 0 {
			warn!("{} primitives use an unknown material and will be shaded with the default one", unresolved);
		}
	}
}

impl Default for Scene {
	fn default() -> Scene {
		Scene::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_material_is_present() {
		let scene = Scene::new();
		assert_eq!(scene.material_count(), 1);
		assert_eq!(*scene.material(0), Material::default());
	}

	#[test]
	fn unknown_material_falls_back() {
		let mut scene = Scene::new();
		let blue = scene.add_material(Material::solid_color(Vec3::new(0.0, 0.0, 1.0)));
		assert_eq!(blue, 1);
		assert_eq!(*scene.material(blue), Material::solid_color(Vec3::new(0.0, 0.0, 1.0)));
		assert_eq!(*scene.material(42), Material::default());
	}

	#[test]
	fn closest_hit_prefers_nearest_primitive() {
		let mut scene = Scene::new();
		scene.add_plane(Vec3::new(0.0, 0.0, 10.0), -Vec3::UNIT_Z, 2);
		scene.add_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0, 1);
		scene.add_triangle(Triangle::new(
			Vec3::new(-1.0, -1.0, 5.0), Vec3::new(0.0, 1.0, 5.0), Vec3::new(1.0, -1.0, 5.0),
			CullMode::None, 3));

		let hit = scene.closest_hit(&Ray::new(Vec3::zero(), Vec3::UNIT_Z));
		assert!(hit.did_hit);
		assert_eq!(hit.material, 3);
		assert_eq!(hit.t, 5.0);
	}

	#[test]
	fn empty_scene_misses() {
		let scene = Scene::new();
		let ray = Ray::new(Vec3::zero(), Vec3::UNIT_Z);
		assert!(!scene.closest_hit(&ray).did_hit);
		assert!(!scene.does_hit(&ray));
	}

	#[test]
	fn mesh_is_filled_after_creation() {
		let mut scene = Scene::new();
		let m = scene.add_triangle_mesh(CullMode::None, 0);
		let mesh = scene.mesh_mut(m).unwrap();
		mesh.append_triangle(&Triangle::new(
			Vec3::new(-1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0),
			CullMode::None, 0), false);
		mesh.translate(Vec3::new(0.0, 0.0, 4.0));
		mesh.update_transforms();

		let hit = scene.closest_hit(&Ray::new(Vec3::zero(), Vec3::UNIT_Z));
		assert!(hit.did_hit);
		assert!((hit.t - 4.0).abs() < 1e-6);
	}

	#[test]
	fn culled_blocker_still_shadows() {
		// triangle facing the light (+Y), culled for rays travelling up from below
		let mut scene = Scene::new();
		scene.add_triangle(Triangle::new(
			Vec3::new(-1.0, 2.0, -1.0), Vec3::new(-1.0, 2.0, 1.0), Vec3::new(1.0, 2.0, 0.0),
			CullMode::BackFace, 0));
		assert!(Vec3::dot(scene.triangles()[0].normal, Vec3::UNIT_Y) > 0.0);

		let light_ray = Ray::bounded(Vec3::zero(), Vec3::UNIT_Y, 1e-3, 5.0);
		assert!(!scene.does_hit(&light_ray));
		assert!(scene.occluded(&light_ray));
	}

	#[test]
	fn blocker_beyond_light_does_not_shadow() {
		let mut scene = Scene::new();
		scene.add_sphere(Vec3::new(0.0, 10.0, 0.0), 1.0, 0);
		let light_ray = Ray::bounded(Vec3::zero(), Vec3::UNIT_Y, 1e-3, 5.0);
		assert!(!scene.occluded(&light_ray));
	}
}
