//! Scene flattening
//!
//! Walks the imported hierarchy once, parent before children and siblings in
//! asset order, and copies every node into a [`FlatNode`]. Parent/child links
//! are not kept, so the result owns no reference to the imported scene.

use std::collections::VecDeque;

use crate::foundation::math::Mat4;
use crate::scene::{SceneGraph, SceneNode};

use super::{MeshBuffer, MeshBufferBuilder, ModelError};

/// A scene node reduced to its own transform and built meshes
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode {
    /// Node name from the asset
    pub name: String,
    /// The node's local transform
    ///
    /// This is not composed with any ancestor. Drawing places each node with
    /// this matrix alone, while bounds use the full parent chain, so assets
    /// with transformed inner nodes render offset from their reported bounds.
    pub transform: Mat4,
    /// Built buffers for every mesh the node references
    pub meshes: Vec<MeshBuffer>,
}

/// Produces the ordered [`FlatNode`] list for a scene
pub struct SceneFlattener;

impl SceneFlattener {
    /// Flatten `scene` in pre-order
    pub fn flatten(scene: &SceneGraph) -> Result<Vec<FlatNode>, ModelError> {
        let mut nodes = Vec::with_capacity(scene.node_count());
        let mut pending: VecDeque<&SceneNode> = VecDeque::new();
        pending.push_front(&scene.root);

        while let Some(node) = pending.pop_front() {
            // Reverse push so the first child is popped next
            for child in node.children.iter().rev() {
                pending.push_front(child);
            }

            let mut flat = FlatNode {
                name: node.name.clone(),
                transform: node.transform,
                meshes: Vec::with_capacity(node.mesh_indices.len()),
            };

            for &mesh_index in &node.mesh_indices {
                let mesh = scene.mesh(mesh_index).ok_or_else(|| ModelError::MeshIndexOutOfRange {
                    node: node.name.clone(),
                    mesh: mesh_index,
                    mesh_count: scene.meshes.len(),
                })?;
                flat.meshes.push(MeshBufferBuilder::build(mesh, mesh_index)?);
            }

            log::trace!("Flattened node '{}' with {} meshes", flat.name, flat.meshes.len());
            nodes.push(flat);
        }

        Ok(nodes)
    }
}
