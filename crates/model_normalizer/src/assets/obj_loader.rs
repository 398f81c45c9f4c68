//! OBJ file importer for 3D models
//!
//! Reads Wavefront OBJ (`v`, `vt`, `vn`, `f`, `o`, `g`) into a [`SceneGraph`]:
//! an identity root node with one child node per object or group, each
//! referencing its own mesh. Polygons are fan-triangulated on import; faces
//! with fewer than three corners are passed through untouched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ModelConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::scene::{Face, ImportError, SceneGraph, SceneImporter, SceneNode, SourceMesh};

const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];
const DEFAULT_TEXCOORD: [f32; 2] = [0.0, 0.0];

/// Imports OBJ files as scene graphs
#[derive(Debug, Clone)]
pub struct ObjImporter {
    config: ModelConfig,
}

/// One face corner: position, texcoord and normal indices (0-based)
type Corner = (usize, Option<usize>, Option<usize>);

#[derive(Default)]
struct Group {
    name: String,
    faces: Vec<Vec<Corner>>,
}

impl ObjImporter {
    /// Create an importer using `config` for path lookup and attribute selection
    pub fn new(config: &ModelConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Parse OBJ text from any reader
    ///
    /// `name` labels the default group for faces that appear before any
    /// `o` or `g` statement.
    pub fn parse<R: BufRead>(&self, reader: R, name: &str) -> Result<SceneGraph, ImportError> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut groups = vec![Group { name: name.to_string(), ..Default::default() }];

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let at = |what: &str| format!("{} on line {}", what, line_number + 1);

            match parts[0] {
                "v" => {
                    let [x, y, z] = parse_floats::<3>(&parts[1..]).ok_or_else(|| ImportError::ParseError(at("Invalid vertex")))?;
                    positions.push(Vec3::new(x, y, z));
                }
                "vn" => {
                    let [x, y, z] = parse_floats::<3>(&parts[1..]).ok_or_else(|| ImportError::ParseError(at("Invalid normal")))?;
                    normals.push(Vec3::new(x, y, z));
                }
                "vt" => {
                    // v is optional and defaults to 0
                    let [u] = parse_floats::<1>(&parts[1..]).ok_or_else(|| ImportError::ParseError(at("Invalid tex coord")))?;
                    let v = match parts.get(2) {
                        Some(token) => token.parse().map_err(|_| ImportError::ParseError(at("Invalid tex coord")))?,
                        None => 0.0,
                    };
                    tex_coords.push(Vec2::new(u, v));
                }
                "o" | "g" => {
                    let group_name = parts[1..].join(" ");
                    let current = groups.last_mut().ok_or_else(|| ImportError::InvalidFormat(at("Missing group")))?;
                    if current.faces.is_empty() {
                        // Nothing was added under the previous name, rename instead of splitting
                        current.name = group_name;
                    } else {
                        groups.push(Group { name: group_name, ..Default::default() });
                    }
                }
                "f" => {
                    let mut corners = Vec::with_capacity(parts.len() - 1);
                    for vertex_data in &parts[1..] {
                        let mut indices = vertex_data.split('/');
                        let pos_idx = indices
                            .next()
                            .and_then(|s| resolve_index(s, positions.len()))
                            .ok_or_else(|| ImportError::InvalidFormat(at("Position index out of bounds")))?;
                        let tex_idx = indices.next().and_then(|s| resolve_index(s, tex_coords.len()));
                        let normal_idx = indices.next().and_then(|s| resolve_index(s, normals.len()));
                        corners.push((pos_idx, tex_idx, normal_idx));
                    }
                    if let Some(current) = groups.last_mut() {
                        current.faces.push(corners);
                    }
                }
                _ => {
                    // Ignore other commands (materials, smoothing groups, ...)
                }
            }
        }

        if positions.is_empty() {
            return Err(ImportError::EmptyScene(name.to_string()));
        }

        let with_normals = self.config.import_normals && !normals.is_empty();
        let with_texcoords = self.config.import_texcoords && !tex_coords.is_empty();

        let mut root = SceneNode::new(name);
        let mut meshes = Vec::new();
        for group in groups.into_iter().filter(|g| !g.faces.is_empty()) {
            let mut mesh = SourceMesh::default().with_name(group.name.clone());

            // Every face corner becomes its own vertex
            for corners in group.faces {
                let first = mesh.positions.len();
                for (pos_idx, tex_idx, normal_idx) in corners {
                    mesh.positions.push(positions[pos_idx]);
                    if with_normals {
                        mesh.normals.push(normal_idx.map_or_else(|| DEFAULT_NORMAL.into(), |i| normals[i]));
                    }
                    if with_texcoords {
                        mesh.texcoords.push(tex_idx.map_or_else(|| DEFAULT_TEXCOORD.into(), |i| tex_coords[i]));
                    }
                }
                let indices = (first..mesh.positions.len()).map(index_u32).collect::<Result<Vec<_>, _>>()?;
                if indices.len() > 3 {
                    // Fan triangulation around the first corner
                    for i in 1..(indices.len() - 1) {
                        mesh.faces.push(Face::triangle(indices[0], indices[i], indices[i + 1]));
                    }
                } else {
                    mesh.faces.push(Face::new(indices));
                }
            }

            root.children.push(SceneNode::new(group.name).with_mesh(meshes.len()));
            meshes.push(mesh);
        }

        log::debug!(
            "Parsed OBJ '{}': {} positions, {} normals, {} tex coords, {} meshes",
            name, positions.len(), normals.len(), tex_coords.len(), meshes.len()
        );

        Ok(SceneGraph::new(root, meshes))
    }
}

impl SceneImporter for ObjImporter {
    fn import(&mut self, source: &Path) -> Result<SceneGraph, ImportError> {
        let path = self
            .config
            .resolve_asset_path(source)
            .ok_or_else(|| ImportError::NotFound(source.display().to_string()))?;

        log::debug!("Loading OBJ from: {:?}", path);

        let file = File::open(&path)?;
        let name = path
            .file_stem()
            .map_or_else(|| "model".to_string(), |stem| stem.to_string_lossy().into_owned());
        self.parse(BufReader::new(file), &name)
    }
}

fn parse_floats<const N: usize>(parts: &[&str]) -> Option<[f32; N]> {
    if parts.len() < N {
        return None;
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part.parse().ok()?;
    }
    Some(values)
}

/// Convert a 1-based (or negative, relative) OBJ index to 0-based
fn resolve_index(token: &str, len: usize) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let index: i64 = token.parse().ok()?;
    let resolved = match index {
        i if i > 0 => usize::try_from(i - 1).ok()?,
        i if i < 0 => len.checked_sub(usize::try_from(-i).ok()?)?,
        _ => return None,
    };
    (resolved < len).then_some(resolved)
}

fn index_u32(index: usize) -> Result<u32, ImportError> {
    u32::try_from(index).map_err(|_| ImportError::InvalidFormat("Mesh exceeds u32 vertex indices".to_string()))
}
