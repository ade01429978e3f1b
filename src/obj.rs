//! Minimal Wavefront OBJ reader: vertex positions (`v`) and faces (`f`) only.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::geometry::MaterialIndex;
use crate::math::*;
use crate::mesh::{face_normals, Index, TriangleMesh};
use crate::primitive::CullMode;

#[derive(Debug, Error)]
pub enum ObjError {
	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	#[error("Parse error at line {line}: {message}")]
	Parse { line: usize, message: String },

	#[error("Face index {index} at line {line} is out of range ({count} vertices)")]
	IndexOutOfRange { line: usize, index: isize, count: usize },
}

/// Positions, per-face normals and index triples read from an OBJ stream
#[derive(Clone, Debug, Default)]
pub struct ObjData {
	pub positions: Vec<Vec3>,
	pub normals: Vec<Vec3>,
	pub indices: Vec<Index>,
}

impl ObjData {
	pub fn into_mesh(self, cull_mode: CullMode, material: MaterialIndex) -> TriangleMesh {
		let mut mesh = TriangleMesh::new(cull_mode, material);
		mesh.positions = self.positions;
		mesh.normals = self.normals;
		mesh.indices = self.indices;
		mesh.update_aabb();
		mesh.update_transforms();
		mesh
	}
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<ObjData, ObjError> {
	info!("Loading mesh {}", path.as_ref().display());
	let f = BufReader::new(File::open(path)?);
	parse(f)
}

pub fn load_mesh<P: AsRef<Path>>(path: P, cull_mode: CullMode, material: MaterialIndex) -> Result<TriangleMesh, ObjError> {
	Ok(load(path)?.into_mesh(cull_mode, material))
}

/// Parse an OBJ stream; any line that is not a `v` or `f` statement is skipped.
///
/// Faces with more than three vertices are fan-triangulated. Face normals are
/// `normalize(cross(v1 - v0, v2 - v0))` and are not sanitized: a zero-area face
/// keeps its non-finite normal.
pub fn parse<R: BufRead>(reader: R) -> Result<ObjData, ObjError> {
	let mut positions: Vec<Vec3> = Vec::new();
	let mut indices: Vec<Index> = Vec::new();

	for (i, line) in reader.lines().enumerate() {
		let line_nb = i + 1;
		let s = line?;
		let mut iter = s.split_whitespace();
		match iter.next() {
			Some("v") => {
				let vs = iter.take(3)
					.map(|t| t.parse::<f32>().map_err(|e| parse_error(line_nb, format!("invalid coordinate '{}': {}", t, e))))
					.collect::<Result<Vec<f32>, ObjError>>()?;
				if vs.len() < 3 {
					return Err(parse_error(line_nb, "vertex needs 3 coordinates".to_owned()));
				}
				positions.push(Vec3::new(vs[0], vs[1], vs[2]));
			},
			Some("f") => {
				let g = iter
					.map(|group| parse_face_index(group, line_nb, positions.len()))
					.collect::<Result<Vec<Index>, ObjError>>()?;
				if g.len() < 3 {
					return Err(parse_error(line_nb, "face needs at least 3 vertices".to_owned()));
				}
				for i in 2..g.len() {
					indices.extend_from_slice(&[g[0], g[i-1], g[i]]);
				}
			},
			_ => {}
		}
	}

	let normals = face_normals(&positions, &indices);
	let degenerate = normals.iter().filter(|n| !n.all_finite()).count();
	if degenerate > 0 {
		warn!("{} degenerate faces have a non-finite normal", degenerate);
	}

	info!("Loaded mesh with {} vertices and {} triangles", positions.len(), indices.len() / 3);
	Ok(ObjData { positions, normals, indices })
}

fn parse_error(line: usize, message: String) -> ObjError {
	ObjError::Parse { line, message }
}

// Accepts `v`, `v/vt`, `v//vn` and `v/vt/vn`; only the position index is kept.
// Indices are 1-based, negative ones count back from the last vertex.
fn parse_face_index(group: &str, line: usize, count: usize) -> Result<Index, ObjError> {
	let token = group.split('/').next().unwrap_or("");
	let idx = token.parse::<isize>()
		.map_err(|e| parse_error(line, format!("invalid face index '{}': {}", token, e)))?;

	let resolved = if idx < 0 { count as isize + idx } else { idx - 1 };
	if idx == 0 || resolved < 0 || resolved >= count as isize {
		return Err(ObjError::IndexOutOfRange { line, index: idx, count });
	}
	Ok(resolved as Index)
}
