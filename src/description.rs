//! JSON scene descriptor.
//!
//! A descriptor names its materials and lists primitives, meshes, lights, the
//! camera and optionally the render options:
//!
//! ```json
//! {
//!   "materials": [
//!     { "type": "lambert", "name": "white", "color": 1.0, "diffuse_reflectance": 1.0 },
//!     { "type": "cook_torrance", "name": "gold", "albedo": [1.0, 0.78, 0.34], "metalness": 1.0, "roughness": 0.3 }
//!   ],
//!   "spheres": [ { "center": [0, 1, 0], "radius": 0.75, "material": "gold" } ],
//!   "planes": [ { "origin": 0, "normal": [0, 1, 0], "material": "white" } ],
//!   "meshes": [ { "file": "cube.obj", "cull_mode": "back_face", "material": "white", "translate": [0, 1, 0] } ],
//!   "lights": [ { "type": "point", "origin": [0, 5, -5], "intensity": 70, "color": 1 } ],
//!   "camera": { "origin": [0, 3, -9], "fov": 45 },
//!   "options": { "width": 640, "height": 480, "lighting_mode": "combined" }
//! }
//! ```
//!
//! Vectors are either `[x, y, z]` or a single number used for all three
//! components. Camera angles are in degrees. A primitive without a material
//! uses the default one; mesh files are resolved relative to the descriptor.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::camera;
use crate::geometry::MaterialIndex;
use crate::material::Material;
use crate::math;
use crate::mesh::{Index, TriangleMesh};
use crate::obj::{self, ObjError};
use crate::options::RenderOptions;
use crate::primitive::{CullMode, Triangle};
use crate::scene;

#[derive(Debug, Error)]
pub enum SceneError {
	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	#[error("Invalid scene description: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Mesh import failed: {0}")]
	Obj(#[from] ObjError),

	#[error("Unknown material '{0}'")]
	UnknownMaterial(String),

	#[error("Invalid mesh: {0}")]
	InvalidMesh(String),

	#[error("Invalid sphere radius {0}, must be positive")]
	InvalidSphere(f32),

	#[error("Invalid plane normal {0:?}")]
	InvalidPlane(math::Vec3),

	#[error("Unknown demo scene '{0}'")]
	UnknownDemo(String),
}

/// A scene ready to render
#[derive(Clone, Debug)]
pub struct Setup {
	pub scene: scene::Scene,
	pub camera: camera::Camera,
	pub options: RenderOptions,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Vec3 {
	Thrice(f32),
	Explicit(f32, f32, f32),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Scene {
	#[serde(default)]
	materials: Vec<MaterialDesc>,
	#[serde(default)]
	spheres: Vec<Sphere>,
	#[serde(default)]
	planes: Vec<Plane>,
	#[serde(default)]
	triangles: Vec<TriangleDesc>,
	#[serde(default)]
	meshes: Vec<Mesh>,
	#[serde(default)]
	lights: Vec<Light>,
	#[serde(default)]
	camera: Camera,
	#[serde(default)]
	options: RenderOptions,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MaterialDesc {
	SolidColor { name: String, color: Vec3 },
	Lambert { name: String, color: Vec3, diffuse_reflectance: f32 },
	LambertPhong { name: String, color: Vec3, diffuse_reflectance: f32, specular_reflectance: f32, phong_exponent: f32 },
	CookTorrance { name: String, albedo: Vec3, metalness: f32, roughness: f32 },
}

#[derive(Deserialize, Debug)]
struct Sphere {
	center: Vec3,
	radius: f32,
	material: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Plane {
	origin: Vec3,
	normal: Vec3,
	material: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TriangleDesc {
	vertices: (Vec3, Vec3, Vec3),
	#[serde(default)]
	cull_mode: CullMode,
	material: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MeshSource {
	File { file: String },
	Inline { positions: Vec<Vec3>, indices: Vec<Index> },
}

#[derive(Deserialize, Debug)]
struct Mesh {
	#[serde(flatten)]
	source: MeshSource,
	#[serde(default)]
	cull_mode: CullMode,
	material: Option<String>,
	translate: Option<Vec3>,
	/// degrees around Y
	rotate_y: Option<f32>,
	scale: Option<Vec3>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Light {
	Point { origin: Vec3, intensity: f32, color: Vec3 },
	Directional { direction: Vec3, intensity: f32, color: Vec3 },
}

#[derive(Deserialize, Debug)]
struct Camera {
	origin: Vec3,
	#[serde(default)]
	yaw: f32,
	#[serde(default)]
	pitch: f32,
	fov: f32,
}

impl Default for Camera {
	fn default() -> Camera {
		Camera { origin: Vec3::Thrice(0.0), yaw: 0.0, pitch: 0.0, fov: 90.0 }
	}
}

impl Vec3 {
	fn convert(self) -> math::Vec3 {
		match self {
			Vec3::Thrice(v) => math::Vec3::thrice(v),
			Vec3::Explicit(x, y, z) => math::Vec3 { x, y, z },
		}
	}
}

type Materials = HashMap<String, MaterialIndex>;

fn lookup(materials: &Materials, name: Option<String>) -> Result<MaterialIndex, SceneError> {
	match name {
		None => Ok(0),
		Some(name) => materials.get(&name).cloned().ok_or(SceneError::UnknownMaterial(name)),
	}
}

impl Scene {
	fn convert(self, dir: &Path) -> Result<Setup, SceneError> {
		let mut scene = scene::Scene::new();

		let mut materials = Materials::new();
		materials.insert("default".to_owned(), 0);
		for m in self.materials {
			let (name, material) = m.convert();
			let idx = scene.add_material(material);
			materials.insert(name, idx);
		}

		for s in self.spheres {
			if !(s.radius > 0.0) {
				return Err(SceneError::InvalidSphere(s.radius));
			}
			scene.add_sphere(s.center.convert(), s.radius, lookup(&materials, s.material)?);
		}
		for p in self.planes {
			let normal = p.normal.convert();
			if !normal.all_finite() || normal.sqr_length() == 0.0 {
				return Err(SceneError::InvalidPlane(normal));
			}
			scene.add_plane(p.origin.convert(), normal.normalized(), lookup(&materials, p.material)?);
		}
		for t in self.triangles {
			let (v0, v1, v2) = t.vertices;
			let material = lookup(&materials, t.material)?;
			scene.add_triangle(Triangle::new(v0.convert(), v1.convert(), v2.convert(), t.cull_mode, material));
		}
		for m in self.meshes {
			let mesh = m.convert(dir, &materials)?;
			scene.add_mesh(mesh);
		}
		for l in self.lights {
			match l {
				Light::Point { origin, intensity, color } => {
					scene.add_point_light(origin.convert(), intensity, color.convert())
				}
				Light::Directional { direction, intensity, color } => {
					scene.add_directional_light(direction.convert(), intensity, color.convert())
				}
			}
		}

		scene.log_summary();
		Ok(Setup { scene, camera: self.camera.convert(), options: self.options })
	}
}

impl MaterialDesc {
	fn convert(self) -> (String, Material) {
		match self {
			MaterialDesc::SolidColor { name, color } => {
				(name, Material::solid_color(color.convert()))
			}
			MaterialDesc::Lambert { name, color, diffuse_reflectance } => {
				(name, Material::lambert(color.convert(), diffuse_reflectance))
			}
			MaterialDesc::LambertPhong { name, color, diffuse_reflectance, specular_reflectance, phong_exponent } => {
				(name, Material::lambert_phong(color.convert(), diffuse_reflectance, specular_reflectance, phong_exponent))
			}
			MaterialDesc::CookTorrance { name, albedo, metalness, roughness } => {
				(name, Material::cook_torrance(albedo.convert(), metalness, roughness))
			}
		}
	}
}

impl Mesh {
	fn convert(self, dir: &Path, materials: &Materials) -> Result<TriangleMesh, SceneError> {
		let material = lookup(materials, self.material)?;
		let mut mesh = match self.source {
			MeshSource::File { file } => obj::load_mesh(dir.join(file), self.cull_mode, material)?,
			MeshSource::Inline { positions, indices } => {
				if indices.len() % 3 != 0 {
					return Err(SceneError::InvalidMesh(format!("{} indices do not form triangles", indices.len())));
				}
				if let Some(&i) = indices.iter().find(|&&i| i as usize >= positions.len()) {
					return Err(SceneError::InvalidMesh(format!("index {} out of range ({} vertices)", i, positions.len())));
				}
				let positions = positions.into_iter().map(Vec3::convert).collect();
				TriangleMesh::from_data(positions, indices, self.cull_mode, material)
			}
		};

		if let Some(t) = self.translate {
			mesh.translate(t.convert());
		}
		if let Some(yaw) = self.rotate_y {
			mesh.rotate_y(yaw);
		}
		if let Some(s) = self.scale {
			mesh.scale(s.convert());
		}
		mesh.update_transforms();
		Ok(mesh)
	}
}

impl Camera {
	fn convert(self) -> camera::Camera {
		let mut c = camera::Camera::looking(self.origin.convert(), 90.0, self.yaw.to_radians(), self.pitch.to_radians());
		c.set_fov(self.fov);
		c
	}
}

/// Build a scene from a JSON string; mesh files are looked up in `dir`
pub fn from_str(json: &str, dir: &Path) -> Result<Setup, SceneError> {
	let desc: Scene = serde_json::from_str(json)?;
	desc.convert(dir)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Setup, SceneError> {
	let path = path.as_ref();
	info!("Loading scene {}", path.display());
	let f = BufReader::new(File::open(path)?);
	let desc: Scene = serde_json::from_reader(f)?;
	desc.convert(path.parent().unwrap_or_else(|| Path::new(".")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geometry::Surface;
	use crate::math::Ray;
	use crate::options::LightingMode;

	const SCENE: &str = r#"{
		"materials": [
			{ "type": "solid_color", "name": "blue", "color": [0, 0, 1] },
			{ "type": "lambert", "name": "white", "color": 1, "diffuse_reflectance": 1 },
			{ "type": "lambert_phong", "name": "shiny", "color": [0, 0, 1], "diffuse_reflectance": 1, "specular_reflectance": 1, "phong_exponent": 60 },
			{ "type": "cook_torrance", "name": "metal", "albedo": [0.972, 0.960, 0.915], "metalness": 1, "roughness": 0.6 }
		],
		"spheres": [ { "center": [0, 1, 0], "radius": 0.75, "material": "metal" } ],
		"planes": [ { "origin": 0, "normal": [0, 2, 0], "material": "white" } ],
		"triangles": [ { "vertices": [[-1, 0, 5], [0, 2, 5], [1, 0, 5]], "cull_mode": "back_face" } ],
		"meshes": [ {
			"positions": [[-1, -1, 0], [-1, 1, 0], [1, 1, 0], [1, -1, 0]],
			"indices": [0, 1, 2, 0, 2, 3],
			"material": "shiny",
			"translate": [0, 1, 3]
		} ],
		"lights": [
			{ "type": "point", "origin": [0, 5, -5], "intensity": 70, "color": 1 },
			{ "type": "directional", "direction": [0, -1, 0], "intensity": 1, "color": [1, 0.5, 0.5] }
		],
		"camera": { "origin": [0, 3, -9], "fov": 45 },
		"options": { "width": 64, "height": 48, "lighting_mode": "brdf" }
	}"#;

	#[test]
	fn loads_every_section() {
		let setup = from_str(SCENE, Path::new(".")).unwrap();
		let scene = &setup.scene;
		assert_eq!(scene.material_count(), 5);
		assert_eq!(scene.spheres().len(), 1);
		assert_eq!(scene.spheres()[0].material, 4);
		assert_eq!(scene.planes()[0].normal, math::Vec3::UNIT_Y);
		assert_eq!(scene.triangles()[0].material, 0);
		assert_eq!(scene.triangles()[0].cull_mode, CullMode::BackFace);
		assert_eq!(scene.meshes()[0].face_count(), 2);
		assert_eq!(scene.meshes()[0].material, 3);
		assert_eq!(scene.lights().len(), 2);

		assert_eq!(setup.camera.origin, math::Vec3::new(0.0, 3.0, -9.0));
		assert_eq!(setup.camera.fov_angle, 45.0);
		assert_eq!((setup.options.width, setup.options.height), (64, 48));
		assert_eq!(setup.options.lighting_mode, LightingMode::Brdf);
		assert!(setup.options.shadows);
	}

	#[test]
	fn mesh_transform_is_applied() {
		let setup = from_str(SCENE, Path::new(".")).unwrap();
		let mesh = &setup.scene.meshes()[0];
		let ray = Ray::new(math::Vec3::new(0.5, 1.5, 0.0), math::Vec3::UNIT_Z);
		let hit = mesh.closest_hit(&ray, Default::default());
		assert!(hit.did_hit);
		assert!((hit.t - 3.0).abs() < 1e-5);
	}

	#[test]
	fn unknown_material_is_an_error() {
		let json = r#"{ "spheres": [ { "center": 0, "radius": 1, "material": "nope" } ] }"#;
		match from_str(json, Path::new(".")) {
			Err(SceneError::UnknownMaterial(ref name)) if name == "nope" => {}
			r => panic!("unexpected result {:?}", r.map(|_| ())),
		}
	}

	#[test]
	fn non_positive_radius_is_an_error() {
		for radius in &["0", "-1.5"] {
			let json = format!(r#"{{ "spheres": [ {{ "center": 0, "radius": {} }} ] }}"#, radius);
			match from_str(&json, Path::new(".")) {
				Err(SceneError::InvalidSphere(r)) => assert!(r <= 0.0),
				r => panic!("unexpected result {:?}", r.map(|_| ())),
			}
		}
	}

	#[test]
	fn zero_plane_normal_is_an_error() {
		let json = r#"{ "planes": [ { "origin": 0, "normal": 0 } ] }"#;
		match from_str(json, Path::new(".")) {
			Err(SceneError::InvalidPlane(n)) => assert_eq!(n, math::Vec3::zero()),
			r => panic!("unexpected result {:?}", r.map(|_| ())),
		}
	}

	#[test]
	fn bad_inline_mesh_is_an_error() {
		let json = r#"{ "meshes": [ { "positions": [0, 1, 2], "indices": [0, 1, 3] } ] }"#;
		match from_str(json, Path::new(".")) {
			Err(SceneError::InvalidMesh(_)) => {}
			r => panic!("unexpected result {:?}", r.map(|_| ())),
		}
	}

	#[test]
	fn missing_mesh_file_is_an_error() {
		let json = r#"{ "meshes": [ { "file": "does-not-exist.obj" } ] }"#;
		match from_str(json, Path::new("/nonexistent")) {
			Err(SceneError::Obj(ObjError::Io(_))) => {}
			r => panic!("unexpected result {:?}", r.map(|_| ())),
		}
	}

	#[test]
	fn malformed_json_is_an_error() {
		match from_str("{ \"spheres\": [ ", Path::new(".")) {
			Err(SceneError::Json(_)) => {}
			r => panic!("unexpected result {:?}", r.map(|_| ())),
		}
	}

	#[test]
	fn empty_descriptor_uses_defaults() {
		let setup = from_str("{}", Path::new(".")).unwrap();
		assert_eq!(setup.scene.material_count(), 1);
		assert_eq!(setup.options, RenderOptions::default());
		assert_eq!(setup.camera.fov_angle, 90.0);
	}
}
