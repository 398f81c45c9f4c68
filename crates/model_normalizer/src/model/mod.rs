//! Model normalization
//!
//! Converts an imported scene into flat, render-ready buffers and derives the
//! centering offset and scale that fit the asset into a fixed display extent.
//!
//! - [`MeshBufferBuilder`] de-indexes one mesh into triangle attribute lists
//! - [`SceneFlattener`] walks the hierarchy into an ordered [`FlatNode`] list
//! - [`BoundsCalculator`] measures the scene in composed transform space
//! - [`NormalizationModel`] owns the result and exposes the draw contract

pub mod mesh_buffer;
pub mod flatten;
pub mod bounds;
pub mod draw;
pub mod normalized_model;

#[cfg(test)]
mod tests;

pub use mesh_buffer::{MeshBuffer, MeshBufferBuilder, flip_texcoord_v};
pub use flatten::{FlatNode, SceneFlattener};
pub use bounds::{Bounds, BoundsCalculator};
pub use draw::{DrawCall, DrawOptions, RenderBackend, BackendResult};
pub use normalized_model::{NormalizationModel, ModelStats};

use thiserror::Error;

use crate::scene::ImportError;

/// Errors from loading, normalizing or drawing a model
#[derive(Error, Debug)]
pub enum ModelError {
    /// The importer produced no scene
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Operation needs a successfully loaded model
    #[error("Model file not loaded yet")]
    UnloadedModel,

    /// A node references a mesh the scene does not have
    #[error("Node '{node}' references mesh {mesh}, but the scene has {mesh_count} meshes")]
    MeshIndexOutOfRange {
        /// Name of the referencing node
        node: String,
        /// Requested global mesh index
        mesh: usize,
        /// Size of the global mesh array
        mesh_count: usize,
    },

    /// A face references a vertex the mesh does not have
    #[error("Face {face} of mesh {mesh} references missing vertex {index}")]
    VertexIndexOutOfRange {
        /// Global mesh index
        mesh: usize,
        /// Face index within the mesh
        face: usize,
        /// Offending vertex index
        index: u32,
    },

    /// Bounds have no extent to scale against
    #[error("Cannot scale a model whose longest extent is {longest_extent}")]
    DegenerateBounds {
        /// Longest side of the bounding box
        longest_extent: f32,
    },

    /// Rendering backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}
