//! Built-in scenes.

use crate::camera::Camera;
use crate::description::SceneError;
use crate::material::Material;
use crate::math::*;
use crate::mesh::TriangleMesh;
use crate::obj;
use crate::primitive::{CullMode, Triangle};
use crate::scene::Scene;

pub const NAMES: [&str; 5] = ["week1", "week2", "week3", "week4", "cube"];

const SIMPLE_CUBE: &str = include_str!("../assets/simple_cube.obj");

const BLUE: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };
const GREEN: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
const YELLOW: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 0.0 };
const MAGENTA: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 1.0 };
const WHITE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };

pub fn by_name(name: &str) -> Result<(Scene, Camera), SceneError> {
	let (scene, camera) = match name {
		"week1" => week1(),
		"week2" => week2(),
		"week3" => week3(),
		"week4" => week4(),
		"cube" => cube()?,
		_ => return Err(SceneError::UnknownDemo(name.to_owned())),
	};
	info!("Built demo scene '{}'", name);
	scene.log_summary();
	Ok((scene, camera))
}

/// Two large unlit spheres in a colored box
pub fn week1() -> (Scene, Camera) {
	let mut scene = Scene::new();
	let red = 0;
	let blue = scene.add_material(Material::solid_color(BLUE));
	let yellow = scene.add_material(Material::solid_color(YELLOW));
	let green = scene.add_material(Material::solid_color(GREEN));
	let magenta = scene.add_material(Material::solid_color(MAGENTA));

	scene.add_sphere(Vec3::new(-25.0, 0.0, 100.0), 50.0, red);
	scene.add_sphere(Vec3::new(25.0, 0.0, 100.0), 50.0, blue);

	scene.add_plane(Vec3::new(-75.0, 0.0, 0.0), Vec3::UNIT_X, green);
	scene.add_plane(Vec3::new(75.0, 0.0, 0.0), -Vec3::UNIT_X, green);
	scene.add_plane(Vec3::new(0.0, -75.0, 0.0), Vec3::UNIT_Y, yellow);
	scene.add_plane(Vec3::new(0.0, 75.0, 0.0), -Vec3::UNIT_Y, yellow);
	scene.add_plane(Vec3::new(0.0, 0.0, 125.0), -Vec3::UNIT_Z, magenta);

	(scene, Camera::new(Vec3::zero(), 90.0))
}

/// Grid of solid color spheres lit by one point light
pub fn week2() -> (Scene, Camera) {
	let mut scene = Scene::new();
	let red = 0;
	let blue = scene.add_material(Material::solid_color(BLUE));
	let yellow = scene.add_material(Material::solid_color(YELLOW));
	let green = scene.add_material(Material::solid_color(GREEN));
	let magenta = scene.add_material(Material::solid_color(MAGENTA));

	sphere_grid(&mut scene, [red, blue, red, blue, red, blue]);

	scene.add_plane(Vec3::new(-5.0, 1.0, 0.0), Vec3::UNIT_X, green);
	scene.add_plane(Vec3::new(5.0, 1.0, 0.0), -Vec3::UNIT_X, green);
	scene.add_plane(Vec3::zero(), Vec3::UNIT_Y, yellow);
	scene.add_plane(Vec3::new(0.0, 10.0, 0.0), -Vec3::UNIT_Y, yellow);
	scene.add_plane(Vec3::new(0.0, 0.0, 10.0), -Vec3::UNIT_Z, magenta);

	scene.add_point_light(Vec3::new(0.0, 5.0, -5.0), 70.0, WHITE);

	(scene, Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0))
}

/// Cook-Torrance metals (bottom row) and plastics (top row), rough to smooth
pub fn week3() -> (Scene, Camera) {
	let mut scene = Scene::new();
	let metal = Vec3::new(0.972, 0.960, 0.915);
	let plastic = Vec3::thrice(0.75);
	let rough_metal = scene.add_material(Material::cook_torrance(metal, 1.0, 1.0));
	let medium_metal = scene.add_material(Material::cook_torrance(metal, 1.0, 0.6));
	let smooth_metal = scene.add_material(Material::cook_torrance(metal, 1.0, 0.1));
	let rough_plastic = scene.add_material(Material::cook_torrance(plastic, 0.0, 1.0));
	let medium_plastic = scene.add_material(Material::cook_torrance(plastic, 0.0, 0.6));
	let smooth_plastic = scene.add_material(Material::cook_torrance(plastic, 0.0, 0.1));

	let walls = scene.add_material(Material::lambert(Vec3::new(0.49, 0.57, 0.57), 1.0));
	gray_box(&mut scene, walls);

	sphere_grid(&mut scene, [rough_metal, medium_metal, smooth_metal, rough_plastic, medium_plastic, smooth_plastic]);

	three_point_lights(&mut scene);

	(scene, Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0))
}

/// A single back-face culled triangle and a tilted quad mesh
pub fn week4() -> (Scene, Camera) {
	let mut scene = Scene::new();
	let walls = scene.add_material(Material::lambert(Vec3::new(0.49, 0.57, 0.57), 1.0));
	let white = scene.add_material(Material::lambert(WHITE, 1.0));
	gray_box(&mut scene, walls);

	scene.add_triangle(Triangle::new(
		Vec3::new(-0.75, 0.5, 0.0),
		Vec3::new(-0.75, 2.0, 0.0),
		Vec3::new(0.75, 0.5, 0.0),
		CullMode::BackFace,
		white,
	));

	let mut quad = TriangleMesh::from_data(
		vec![
			Vec3::new(-0.75, -1.0, 0.0),
			Vec3::new(-0.75, 1.0, 0.0),
			Vec3::new(0.75, 1.0, 1.0),
			Vec3::new(0.75, -1.0, 0.0),
		],
		vec![0, 1, 2, 0, 2, 3],
		CullMode::None,
		white,
	);
	quad.translate(Vec3::new(2.5, 1.5, 0.0));
	quad.update_transforms();
	scene.add_mesh(quad);

	three_point_lights(&mut scene);

	(scene, Camera::new(Vec3::new(0.0, 1.0, -5.0), 45.0))
}

/// Imported cube, scaled and turned, under a key light and a directional fill
pub fn cube() -> Result<(Scene, Camera), SceneError> {
	let mut scene = Scene::new();
	let walls = scene.add_material(Material::lambert(Vec3::new(0.49, 0.57, 0.57), 1.0));
	let white = scene.add_material(Material::lambert_phong(WHITE, 1.0, 0.5, 30.0));
	gray_box(&mut scene, walls);

	let mut mesh = obj::parse(SIMPLE_CUBE.as_bytes())?.into_mesh(CullMode::BackFace, white);
	mesh.scale(Vec3::thrice(0.7));
	mesh.rotate_y(45.0);
	mesh.translate(Vec3::new(0.0, 1.0, 0.0));
	mesh.update_transforms();
	scene.add_mesh(mesh);

	scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Vec3::new(1.0, 0.8, 0.45));
	scene.add_directional_light(Vec3::new(0.5, -1.0, 0.5), 0.5, Vec3::new(0.34, 0.47, 0.68));

	Ok((scene, Camera::new(Vec3::new(0.0, 1.0, -5.0), 45.0)))
}

// two rows of three spheres, bottom row first, left to right
fn sphere_grid(scene: &mut Scene, materials: [usize; 6]) {
	for (i, &m) in materials.iter().enumerate() {
		let x = (i % 3) as f32 * 1.75 - 1.75;
		let y = if i < 3 { 1.0 } else { 3.0 };
		scene.add_sphere(Vec3::new(x, y, 0.0), 0.75, m);
	}
}

fn gray_box(scene: &mut Scene, material: usize) {
	scene.add_plane(Vec3::new(0.0, 0.0, 10.0), -Vec3::UNIT_Z, material);
	scene.add_plane(Vec3::zero(), Vec3::UNIT_Y, material);
	scene.add_plane(Vec3::new(0.0, 10.0, 0.0), -Vec3::UNIT_Y, material);
	scene.add_plane(Vec3::new(5.0, 0.0, 0.0), -Vec3::UNIT_X, material);
	scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::UNIT_X, material);
}

fn three_point_lights(scene: &mut Scene) {
	// back, front left, front right
	scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Vec3::new(1.0, 0.61, 0.45));
	scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Vec3::new(1.0, 0.8, 0.45));
	scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Vec3::new(0.34, 0.47, 0.68));
}
