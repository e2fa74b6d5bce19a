//! Loading of Wavefront OBJ style model files.
//!
//! Only geometry is read: positions, normals, texture coordinates and faces. Material libraries,
//! groups and smoothing directives are skipped. Faces with more than three corners are split
//! into a triangle fan, and identical corners share one vertex in the output.

use std::path::Path;

use fxhash::FxHashMap;
use glam::Vec3;

/// One interleaved vertex as it is laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec3,
}

impl ModelVertex {
    fn key(&self) -> [u32; 9] {
        let p = self.position;
        let n = self.normal;
        let t = self.tex_coord;
        [p.x, p.y, p.z, n.x, n.y, n.z, t.x, t.y, t.z].map(f32::to_bits)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: index {index} is out of range")]
    IndexOutOfRange { line: usize, index: i64 },
    #[error("model contains no faces")]
    Empty,
}

/// Deduplicated vertices and triangle indices ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the axis aligned bounds of all vertex positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }
}

/// A face corner as written in the file, with indices already resolved to 0-based.
#[derive(Clone, Copy)]
struct Corner {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

/// Loads and parses the model file at `path`.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, ObjError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let data = parse_obj(&source)?;
    log::debug!(
        "Loaded model {}: {} vertices, {} triangles",
        path.display(),
        data.vertices.len(),
        data.triangle_count()
    );
    Ok(data)
}

/// Parses model source text.
pub fn parse_obj(source: &str) -> Result<MeshData, ObjError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec3> = Vec::new();

    let mut data = MeshData::default();
    let mut seen: FxHashMap<[u32; 9], u32> = FxHashMap::default();

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let line = match line.split_once('#') {
            Some((content, _)) => content,
            None => line,
        };
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => positions.push(parse_vec3(&args, 3, line_no)?),
            "vn" => normals.push(parse_vec3(&args, 3, line_no)?),
            "vt" => tex_coords.push(parse_vec3(&args, 1, line_no)?),
            "f" => {
                if args.len() < 3 {
                    return Err(ObjError::Parse {
                        line: line_no,
                        message: format!("face needs at least 3 corners, found {}", args.len()),
                    });
                }
                let corners = args
                    .iter()
                    .map(|arg| {
                        parse_corner(arg, line_no, positions.len(), tex_coords.len(), normals.len())
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                for i in 1..corners.len() - 1 {
                    let tri = [corners[0], corners[i], corners[i + 1]];
                    let face_normal = face_normal(
                        positions[tri[0].position],
                        positions[tri[1].position],
                        positions[tri[2].position],
                    );
                    for corner in tri {
                        let vertex = ModelVertex {
                            position: positions[corner.position],
                            normal: corner.normal.map_or(face_normal, |n| normals[n]),
                            tex_coord: corner.tex_coord.map_or(Vec3::ZERO, |t| tex_coords[t]),
                        };
                        let index = *seen.entry(vertex.key()).or_insert_with(|| {
                            data.vertices.push(vertex);
                            (data.vertices.len() - 1) as u32
                        });
                        data.indices.push(index);
                    }
                }
            }
            _ => {}
        }
    }

    if data.indices.is_empty() {
        return Err(ObjError::Empty);
    }
    Ok(data)
}

/// Parses up to three floats, requiring at least `required`. Missing trailing components are
/// zero and extra components (such as a homogeneous `w`) are ignored.
fn parse_vec3(args: &[&str], required: usize, line: usize) -> Result<Vec3, ObjError> {
    if args.len() < required {
        return Err(ObjError::Parse {
            line,
            message: format!("expected at least {} components, found {}", required, args.len()),
        });
    }
    let mut out = [0.0f32; 3];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| ObjError::Parse {
            line,
            message: format!("invalid number '{}'", arg),
        })?;
    }
    Ok(Vec3::from(out))
}

fn parse_corner(
    arg: &str,
    line: usize,
    position_count: usize,
    tex_coord_count: usize,
    normal_count: usize,
) -> Result<Corner, ObjError> {
    let mut fields = arg.split('/');
    let position = match fields.next() {
        Some(s) if !s.is_empty() => resolve_index(s, position_count, line)?,
        _ => {
            return Err(ObjError::Parse {
                line,
                message: format!("face corner '{}' has no position", arg),
            });
        }
    };
    let tex_coord = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, tex_coord_count, line)?),
        _ => None,
    };
    let normal = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, normal_count, line)?),
        _ => None,
    };
    Ok(Corner {
        position,
        tex_coord,
        normal,
    })
}

/// Turns a 1-based (or negative, relative to the end) index into a 0-based one.
fn resolve_index(s: &str, count: usize, line: usize) -> Result<usize, ObjError> {
    let index: i64 = s.parse().map_err(|_| ObjError::Parse {
        line,
        message: format!("invalid index '{}'", s),
    })?;
    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(ObjError::IndexOutOfRange { line, index });
    }
    Ok(resolved as usize)
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    const QUAD: &str = "\
# a unit quad in the xy plane
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_is_fan_triangulated_and_deduplicated() {
        let data = parse_obj(QUAD).unwrap();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(data.triangle_count(), 2);
        assert_eq!(data.vertices[2].tex_coord.truncate(), Vec2::new(1.0, 1.0));
        assert!(data.vertices.iter().all(|v| v.normal == Vec3::Z));
    }

    #[test]
    fn test_same_position_different_normal_is_not_merged() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
vn 0 0 1
vn 0 1 0
f 1//1 2//1 3//1
f 1//2 4//2 2//2
";
        let data = parse_obj(src).unwrap();
        // vertex 1 and 2 appear with two different normals
        assert_eq!(data.vertices.len(), 6);
        assert_eq!(data.indices.len(), 6);
    }

    #[test]
    fn test_identical_values_from_different_indices_are_merged() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 0
f 1 2 3
f 4 2 3
";
        let data = parse_obj(src).unwrap();
        assert_eq!(data.vertices.len(), 3);
        assert_eq!(data.indices, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_missing_normals_use_face_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nf 1/1 2/1 3/1\n";
        let data = parse_obj(src).unwrap();
        for v in &data.vertices {
            assert!(v.normal.abs_diff_eq(Vec3::Z, 1e-6));
            assert_eq!(v.tex_coord, Vec3::new(0.5, 0.5, 0.0));
        }
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let data = parse_obj(src).unwrap();
        assert_eq!(data.vertices[0].position, Vec3::ZERO);
        assert_eq!(data.vertices[2].position, Vec3::Y);
    }

    #[test]
    fn test_ignored_directives_and_comments() {
        let src = "\
mtllib scene.mtl
o Triangle
g group
s off
usemtl red
v 0 0 0 # origin
v 1 0 0
v 0 1 0

f 1 2 3
";
        let data = parse_obj(src).unwrap();
        assert_eq!(data.triangle_count(), 1);
    }

    #[test]
    fn test_out_of_range_index() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, ObjError::IndexOutOfRange { line: 3, index: 3 }));
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::IndexOutOfRange { line: 4, index: 0 }));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_obj("v 0 zero 0\n").unwrap_err(),
            ObjError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err(),
            ObjError::Parse { line: 3, .. }
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/x 2 3\n").unwrap_err(),
            ObjError::Parse { line: 4, .. }
        ));
    }

    #[test]
    fn test_no_faces_is_an_error() {
        assert!(matches!(parse_obj("v 0 0 0\n").unwrap_err(), ObjError::Empty));
        assert!(matches!(parse_obj("").unwrap_err(), ObjError::Empty));
    }

    #[test]
    fn test_bounds() {
        let data = parse_obj(QUAD).unwrap();
        assert_eq!(data.bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
        assert_eq!(MeshData::default().bounds(), None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }
}
