use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use derive_more::{Add, Mul};
use log::debug;
use thiserror::Error;
use vek::*;

use crate::interpolate::Vertex;
use crate::mesh::Mesh;

/// Errors produced while loading a Wavefront OBJ model.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read OBJ data: {0}")]
    Io(#[from] io::Error),
    #[error("OBJ data contains no renderable faces")]
    NoGeometry,
}

/// The vertex payload produced by the OBJ loader.
///
/// `color` starts out zeroed; vertex-lighting shaders conventionally write into it.
#[derive(Clone, Debug, PartialEq, Add, Mul)]
pub struct ObjVertex {
    pub pos: Vec4<f32>,
    pub uv: Vec2<f32>,
    pub normal: Vec3<f32>,
    pub color: Vec3<f32>,
}

impl Vertex for ObjVertex {
    #[inline(always)]
    fn position(&self) -> Vec4<f32> {
        self.pos
    }

    #[inline(always)]
    fn position_mut(&mut self) -> &mut Vec4<f32> {
        &mut self.pos
    }
}

/// Load a mesh from a Wavefront OBJ file on disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh<ObjVertex>, ObjError> {
    from_reader(BufReader::new(File::open(path)?))
}

/// Load a mesh from Wavefront OBJ data.
///
/// Parsing is deliberately lenient: data-lines other than `v`, `vt`, `vn` and `f` are
/// skipped, as are lines with too few fields; malformed numeric fields read as zero.
/// Faces may use `v`, `v/vt`, `v//vn` or `v/vt/vn` references with 1-based or negative
/// (relative) indices; an out-of-range reference drops that corner. Faces with more than
/// three corners are fan-triangulated. Missing UVs and normals default to zero vectors.
pub fn from_reader<R: BufRead>(reader: R) -> Result<Mesh<ObjVertex>, ObjError> {
    let mut positions: Vec<Vec4<f32>> = Vec::new();
    let mut uvs: Vec<Vec2<f32>> = Vec::new();
    let mut normals: Vec<Vec3<f32>> = Vec::new();

    let mut vertices: Vec<ObjVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();

        match fields.next() {
            Some("v") => {
                let mut coords = fields.map(parse_or_zero);
                if let (Some(x), Some(y), Some(z)) = (coords.next(), coords.next(), coords.next())
                {
                    let w = coords.next().unwrap_or(1.0);
                    positions.push(Vec4::new(x, y, z, w));
                }
            }
            Some("vt") => {
                let mut coords = fields.map(parse_or_zero);
                if let (Some(u), Some(v)) = (coords.next(), coords.next()) {
                    uvs.push(Vec2::new(u, v));
                }
            }
            Some("vn") => {
                let mut coords = fields.map(parse_or_zero);
                if let (Some(x), Some(y), Some(z)) = (coords.next(), coords.next(), coords.next())
                {
                    normals.push(Vec3::new(x, y, z));
                }
            }
            Some("f") => {
                let mut corners: Vec<u32> = Vec::new();
                for entry in fields {
                    if let Some(vertex) = resolve_corner(entry, &positions, &uvs, &normals) {
                        corners.push(vertices.len() as u32);
                        vertices.push(vertex);
                    }
                }

                // Fan-triangulate anything beyond a triangle.
                if corners.len() >= 3 {
                    for i in 1..corners.len() - 1 {
                        indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                    }
                }
            }
            _ => {}
        }
    }

    if vertices.len() < 3 || indices.is_empty() {
        return Err(ObjError::NoGeometry);
    }

    debug!(
        "loaded OBJ model: {} vertices, {} triangles",
        vertices.len(),
        indices.len() / 3
    );

    Ok(Mesh::new(vertices, indices))
}

fn parse_or_zero(field: &str) -> f32 {
    field.parse().unwrap_or(0.0)
}

/// Resolve one `v[/vt][/vn]` face entry against the attribute tables.
fn resolve_corner(
    entry: &str,
    positions: &[Vec4<f32>],
    uvs: &[Vec2<f32>],
    normals: &[Vec3<f32>],
) -> Option<ObjVertex> {
    let mut parts = entry.split('/');

    let pos = lookup(parts.next()?, positions)?;
    let uv = match parts.next() {
        None | Some("") => Vec2::zero(),
        Some(field) => lookup(field, uvs)?,
    };
    let normal = match parts.next() {
        None | Some("") => Vec3::zero(),
        Some(field) => lookup(field, normals)?,
    };

    Some(ObjVertex {
        pos,
        uv,
        normal,
        color: Vec3::zero(),
    })
}

/// Resolve a 1-based (or negative, relative-to-end) OBJ index into `items`.
fn lookup<T: Copy>(field: &str, items: &[T]) -> Option<T> {
    let raw: i64 = field.parse().ok()?;
    let resolved = if raw < 0 {
        items.len() as i64 + raw
    } else {
        raw - 1
    };

    if resolved < 0 || resolved >= items.len() as i64 {
        return None;
    }

    Some(items[resolved as usize])
}
