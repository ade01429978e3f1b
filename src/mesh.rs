use crate::geometry::*;
use crate::math::*;
use crate::primitive::{CullMode, Triangle};

/// Represent vertex indices in triangles; 2^32 vertices should be enough
pub type Index = u32;

/// Indexed triangle mesh with one flat normal per face.
///
/// Authoring data (`positions`, `normals`, `indices`) lives in object space.
/// Hit tests only ever read the transformed copies, which are rebuilt by
/// `update_transforms` after the data or the transform changed. Faces added
/// since the last update are not hit until the next one.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
	pub positions: Vec<Vec3>,
	/// one normal per face, i.e. per index triple
	pub normals: Vec<Vec3>,
	pub indices: Vec<Index>,
	pub cull_mode: CullMode,
	pub material: MaterialIndex,

	translation: Mat4,
	rotation: Mat4,
	scale: Mat4,

	local_aabb: AABB,
	transformed_positions: Vec<Vec3>,
	transformed_normals: Vec<Vec3>,
	transformed_indices: Vec<Index>,
	transformed_aabb: AABB,
}

impl TriangleMesh {
	pub fn new(cull_mode: CullMode, material: MaterialIndex) -> TriangleMesh {
		TriangleMesh {
			positions: Vec::new(),
			normals: Vec::new(),
			indices: Vec::new(),
			cull_mode,
			material,
			translation: Mat4::identity(),
			rotation: Mat4::identity(),
			scale: Mat4::identity(),
			local_aabb: AABB::empty(),
			transformed_positions: Vec::new(),
			transformed_normals: Vec::new(),
			transformed_indices: Vec::new(),
			transformed_aabb: AABB::empty(),
		}
	}

	/// Build a mesh from positions and index triples, deriving face normals
	pub fn from_data(positions: Vec<Vec3>, indices: Vec<Index>, cull_mode: CullMode, material: MaterialIndex) -> TriangleMesh {
		let mut mesh = TriangleMesh::new(cull_mode, material);
		mesh.positions = positions;
		mesh.indices = indices;
		mesh.calculate_normals();
		mesh.update_aabb();
		mesh.update_transforms();
		mesh
	}

	pub fn face_count(&self) -> usize {
		self.indices.len() / 3
	}

	/// Append a triangle as three new vertices; its precomputed normal is kept as is
	pub fn append_triangle(&mut self, triangle: &Triangle, ignore_transform_update: bool) {
		let start = self.positions.len() as Index;
		self.positions.extend_from_slice(&[triangle.v0, triangle.v1, triangle.v2]);
		self.indices.extend_from_slice(&[start, start + 1, start + 2]);
		self.normals.push(triangle.normal);

		if !ignore_transform_update {
			self.update_aabb();
			self.update_transforms();
		}
	}

	/// Recompute face normals from the winding of each index triple.
	///
	/// Zero-area faces end up with a non-finite normal; they can never be hit.
	pub fn calculate_normals(&mut self) {
		self.normals = face_normals(&self.positions, &self.indices);
	}

	pub fn translate(&mut self, offset: Vec3) {
		self.translation = Mat4::translate(offset);
	}

	/// Rotation around the Y axis, in degrees
	pub fn rotate_y(&mut self, yaw: f32) {
		self.rotation = Mat4::rot_yxz(Vec3::new(0.0, yaw, 0.0));
	}

	pub fn scale(&mut self, factors: Vec3) {
		self.scale = Mat4::scale(factors);
	}

	pub fn transform(&self) -> Mat4 {
		self.translation * self.rotation * self.scale
	}

	pub fn update_aabb(&mut self) {
		self.local_aabb = AABB::from_points(self.positions.iter().cloned());
	}

	pub fn update_transforms(&mut self) {
		let transform = self.transform();
		let normal_matrix = transform.normal_matrix();

		self.transformed_positions = self.positions.iter()
			.map(|&p| transform.transform_point(p))
			.collect();
		self.transformed_normals = self.normals.iter()
			.map(|&n| normal_matrix.transform_vector(n).normalized())
			.collect();
		self.transformed_indices = self.indices.clone();
		self.transformed_aabb = self.local_aabb.transformed(&transform);

		debug!("Updated mesh transforms: {} vertices, {} faces, bounds {:?}",
			self.transformed_positions.len(), self.face_count(), self.transformed_aabb);
	}

	pub fn aabb(&self) -> AABB {
		self.transformed_aabb
	}

	/// Face `i` in world space, as of the last `update_transforms`
	pub fn triangle(&self, i: usize) -> Option<Triangle> {
		let idxs = self.transformed_indices.get(3 * i..3 * i + 3)?;
		let normal = *self.transformed_normals.get(i)?;
		self.world_triangle(idxs, normal)
	}

	/// Every face in world space, as of the last `update_transforms`
	pub fn triangles<'a>(&'a self) -> impl Iterator<Item=Triangle> + 'a {
		self.transformed_indices.chunks_exact(3)
			.zip(self.transformed_normals.iter())
			.filter_map(move |(idxs, &normal)| self.world_triangle(idxs, normal))
	}

	fn world_triangle(&self, idxs: &[Index], normal: Vec3) -> Option<Triangle> {
		let vertex = |k: usize| self.transformed_positions.get(idxs[k] as usize).cloned();
		Some(Triangle::with_normal([vertex(0)?, vertex(1)?, vertex(2)?], normal, self.cull_mode, self.material))
	}
}

impl Surface for TriangleMesh {
	fn closest_hit(&self, ray: &Ray, best: HitRecord) -> HitRecord {
		if !self.transformed_aabb.hit(ray) {
			return best;
		}
		self.triangles().fold(best, |best, tri| tri.closest_hit(ray, best))
	}

	fn does_hit(&self, ray: &Ray) -> bool {
		self.transformed_aabb.hit(ray) && self.triangles().any(|tri| tri.does_hit(ray))
	}
}

/// Normalized `cross(v1 - v0, v2 - v0)` for each index triple
pub fn face_normals(positions: &[Vec3], indices: &[Index]) -> Vec<Vec3> {
	indices.chunks(3)
		.filter(|idxs| idxs.len() == 3)
		.map(|idxs| {
			let v0 = positions[idxs[0] as usize];
			let v1 = positions[idxs[1] as usize];
			let v2 = positions[idxs[2] as usize];
			Vec3::cross(v1 - v0, v2 - v0).normalized()
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	// unit quad in the XY plane facing -Z
	fn quad(cull_mode: CullMode) -> TriangleMesh {
		TriangleMesh::from_data(
			vec![
				Vec3::new(-1.0, -1.0, 0.0),
				Vec3::new(-1.0, 1.0, 0.0),
				Vec3::new(1.0, 1.0, 0.0),
				Vec3::new(1.0, -1.0, 0.0),
			],
			vec![0, 1, 2, 0, 2, 3],
			cull_mode,
			1,
		)
	}

	#[test]
	fn normals_follow_winding() {
		let mesh = quad(CullMode::None);
		assert_eq!(mesh.normals.len(), 2);
		for n in &mesh.normals {
			assert!((*n - -Vec3::UNIT_Z).length() < 1e-6);
		}
	}

	#[test]
	fn degenerate_face_has_non_finite_normal() {
		let normals = face_normals(&[Vec3::zero(), Vec3::UNIT_X, Vec3::UNIT_X * 2.0], &[0, 1, 2]);
		assert!(!normals[0].all_finite());
	}

	#[test]
	fn closest_hit_on_quad() {
		let mesh = quad(CullMode::BackFace);
		let ray = Ray::new(Vec3::new(0.5, -0.5, -3.0), Vec3::UNIT_Z);
		let hit = mesh.closest_hit(&ray, HitRecord::none());
		assert!(hit.did_hit);
		assert_eq!(hit.t, 3.0);
		assert_eq!(hit.material, 1);
	}

	#[test]
	fn culled_from_behind() {
		let mesh = quad(CullMode::BackFace);
		let ray = Ray::new(Vec3::new(0.5, -0.5, 3.0), -Vec3::UNIT_Z);
		assert!(!mesh.does_hit(&ray));
		assert!(!mesh.closest_hit(&ray, HitRecord::none()).did_hit);
	}

	#[test]
	fn transforms_move_hit_geometry() {
		let mut mesh = quad(CullMode::None);
		mesh.translate(Vec3::new(0.0, 0.0, 2.0));
		mesh.rotate_y(180.0);
		mesh.scale(Vec3::thrice(2.0));
		mesh.update_transforms();

		let aabb = mesh.aabb();
		assert!((aabb.min - Vec3::new(-2.0, -2.0, 2.0)).length() < 1e-5);
		assert!((aabb.max - Vec3::new(2.0, 2.0, 2.0)).length() < 1e-5);

		// half turn flips the face to +Z
		let hit = mesh.closest_hit(&Ray::new(Vec3::new(1.5, 1.5, -3.0), Vec3::UNIT_Z), HitRecord::none());
		assert!(hit.did_hit);
		assert!((hit.t - 5.0).abs() < 1e-5);
		assert!((hit.normal - Vec3::UNIT_Z).length() < 1e-5);
	}

	#[test]
	fn transform_is_deferred_until_update() {
		let mut mesh = quad(CullMode::None);
		mesh.translate(Vec3::new(10.0, 0.0, 0.0));
		let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::UNIT_Z);
		assert!(mesh.does_hit(&ray));
		mesh.update_transforms();
		assert!(!mesh.does_hit(&ray));
	}

	#[test]
	fn append_triangle_keeps_its_normal() {
		let tri = Triangle::new(Vec3::zero(), Vec3::UNIT_Y, Vec3::UNIT_X, CullMode::None, 0);
		let mut mesh = TriangleMesh::new(CullMode::None, 2);
		mesh.append_triangle(&tri, false);
		assert_eq!(mesh.face_count(), 1);
		let face = mesh.triangle(0).unwrap();
		assert_eq!(face.normal, tri.normal);
		assert_eq!(face.material, 2);
		assert!(mesh.triangle(1).is_none());
	}

	#[test]
	fn faces_appended_without_update_are_ignored() {
		let back = Triangle::new(
			Vec3::new(-1.0, -1.0, 2.0), Vec3::new(0.0, 1.0, 2.0), Vec3::new(1.0, -1.0, 2.0),
			CullMode::None, 0);
		let front = Triangle::new(
			Vec3::new(-1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0),
			CullMode::None, 0);
		let mut mesh = TriangleMesh::new(CullMode::None, 0);
		mesh.append_triangle(&back, false);
		mesh.append_triangle(&front, true);
		assert_eq!(mesh.face_count(), 2);
		assert_eq!(mesh.triangles().count(), 1);

		let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::UNIT_Z);
		let hit = mesh.closest_hit(&ray, HitRecord::none());
		assert!(hit.did_hit);
		assert!((hit.t - 5.0).abs() < 1e-6);
		assert!(mesh.does_hit(&ray));

		mesh.update_aabb();
		mesh.update_transforms();
		assert_eq!(mesh.triangles().count(), 2);
		let hit = mesh.closest_hit(&ray, HitRecord::none());
		assert!((hit.t - 3.0).abs() < 1e-6);
	}

	#[test]
	fn box_rejection_skips_faces() {
		// shrink the box away from the geometry: a ray that would hit a face
		// but misses the box must be rejected without any face test
		let mut mesh = quad(CullMode::None);
		let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::UNIT_Z);
		assert!(mesh.does_hit(&ray));

		mesh.transformed_aabb = AABB { min: Vec3::thrice(5.0), max: Vec3::thrice(6.0) };
		assert!(mesh.triangles().any(|tri| tri.does_hit(&ray)));
		assert!(!mesh.does_hit(&ray));
		assert!(!mesh.closest_hit(&ray, HitRecord::none()).did_hit);
	}

	#[test]
	fn empty_mesh_never_hits() {
		let mesh = TriangleMesh::new(CullMode::None, 0);
		assert!(!mesh.does_hit(&Ray::new(Vec3::zero(), Vec3::UNIT_Z)));
	}
}
