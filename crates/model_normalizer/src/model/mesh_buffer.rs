//! Render-ready mesh buffers
//!
//! A [`MeshBuffer`] holds one mesh expanded into independent triangles: every
//! face corner gets its own entry in each attribute sequence, so a backend can
//! draw the buffer as a plain triangle list without an index buffer.

use crate::foundation::math::{Vec2, Vec3};
use crate::scene::SourceMesh;

use super::ModelError;

/// De-indexed triangle attributes for one mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Triangle corner positions, three per triangle
    pub triangle_vertices: Vec<Vec3>,
    /// Normals parallel to `triangle_vertices`, empty without source normals
    pub triangle_normals: Vec<Vec3>,
    /// Texture coordinates parallel to `triangle_vertices`, V flipped
    pub triangle_texcoords: Vec<Vec2>,
    /// Source mesh supplied normals
    pub has_normals: bool,
    /// Source mesh supplied texture coordinates
    pub has_texcoords: bool,
    /// Faces dropped because they were not triangles
    pub skipped_faces: usize,
}

impl MeshBuffer {
    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.triangle_vertices.len()
    }

    /// Number of triangles in the buffer
    pub fn triangle_count(&self) -> usize {
        self.triangle_vertices.len() / 3
    }

    /// Whether the buffer has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.triangle_vertices.is_empty()
    }

    /// Positions as raw bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_vertices)
    }

    /// Normals as raw bytes for GPU upload
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_normals)
    }

    /// Texture coordinates as raw bytes for GPU upload
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_texcoords)
    }
}

/// Convert a texture coordinate into the renderer's texture space
///
/// Asset V runs bottom-up; the renderer samples top-down.
pub fn flip_texcoord_v(texcoord: Vec2) -> Vec2 {
    Vec2::new(texcoord.x, 1.0 - texcoord.y)
}

/// Builds [`MeshBuffer`]s from indexed source meshes
pub struct MeshBufferBuilder;

impl MeshBufferBuilder {
    /// Expand `mesh` into a triangle list
    ///
    /// Faces that are not triangles are skipped with a warning. `mesh_index`
    /// is the mesh's position in the scene's global mesh array and is only
    /// used for diagnostics.
    pub fn build(mesh: &SourceMesh, mesh_index: usize) -> Result<MeshBuffer, ModelError> {
        let mut buffer = MeshBuffer {
            has_normals: mesh.has_normals(),
            has_texcoords: mesh.has_texcoords(),
            ..Default::default()
        };

        let triangle_faces = mesh.faces.iter().filter(|face| face.is_triangle()).count();
        buffer.triangle_vertices.reserve(triangle_faces * 3);
        if buffer.has_normals {
            buffer.triangle_normals.reserve(triangle_faces * 3);
        }
        if buffer.has_texcoords {
            buffer.triangle_texcoords.reserve(triangle_faces * 3);
        }

        for (face_index, face) in mesh.faces.iter().enumerate() {
            if !face.is_triangle() {
                log::warn!(
                    "Ignoring non-triangle face {} of mesh {} '{}' ({} indices)",
                    face_index, mesh_index, mesh.name, face.indices.len()
                );
                buffer.skipped_faces += 1;
                continue;
            }

            for &index in &face.indices {
                let out_of_range = || ModelError::VertexIndexOutOfRange {
                    mesh: mesh_index,
                    face: face_index,
                    index,
                };
                let i = index as usize;

                let position = mesh.positions.get(i).ok_or_else(out_of_range)?;
                buffer.triangle_vertices.push(*position);

                if buffer.has_normals {
                    let normal = mesh.normals.get(i).ok_or_else(out_of_range)?;
                    buffer.triangle_normals.push(*normal);
                }

                if buffer.has_texcoords {
                    let texcoord = mesh.texcoords.get(i).ok_or_else(out_of_range)?;
                    buffer.triangle_texcoords.push(flip_texcoord_v(*texcoord));
                }
            }
        }

        log::debug!(
            "Built mesh {} '{}': {} triangles, {} faces skipped",
            mesh_index, mesh.name, buffer.triangle_count(), buffer.skipped_faces
        );

        Ok(buffer)
    }
}
