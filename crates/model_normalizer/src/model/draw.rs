//! Draw contract between a normalized model and a rendering backend
//!
//! The model never touches the GPU. It works out the per-node matrices and
//! hands each mesh buffer to a [`RenderBackend`], which binds the attribute
//! sequences and issues a triangle-list draw of `vertex_count` vertices.

use crate::foundation::math::{Mat4, Mat4Ext};

use super::{MeshBuffer, ModelError};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, ModelError>;

/// Per-draw switches chosen by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawOptions {
    /// Backend should bind model textures when it has them
    pub use_model_textures: bool,
}

/// Everything a backend needs to draw one mesh of one node
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Index of the node in the model's flattened node list
    pub node_index: usize,
    /// Index of the mesh within its node
    pub mesh_index: usize,
    /// Centered, scaled view matrix times the node's local transform
    pub model_view: Mat4,
    /// `projection * model_view`
    pub model_view_projection: Mat4,
    /// Attribute sequences to bind
    pub mesh: &'a MeshBuffer,
    /// Options the draw was requested with
    pub options: DrawOptions,
}

impl DrawCall<'_> {
    /// Number of vertices to draw as a triangle list
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Whether the backend should enable the normal attribute
    pub fn uses_normals(&self) -> bool {
        self.mesh.has_normals
    }

    /// Whether the backend should enable the texture coordinate attribute
    pub fn uses_texcoords(&self) -> bool {
        self.mesh.has_texcoords
    }

    /// `model_view` in column-major order for uniform upload
    pub fn model_view_uniform(&self) -> [[f32; 4]; 4] {
        self.model_view.to_column_major()
    }

    /// `model_view_projection` in column-major order for uniform upload
    pub fn mvp_uniform(&self) -> [[f32; 4]; 4] {
        self.model_view_projection.to_column_major()
    }
}

/// Rendering backend fed by [`NormalizationModel::draw`](super::NormalizationModel::draw)
pub trait RenderBackend {
    /// Draw one mesh buffer with the supplied matrices
    fn draw_mesh(&mut self, call: &DrawCall<'_>) -> BackendResult<()>;
}
