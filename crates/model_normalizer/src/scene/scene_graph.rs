//! Imported scene graph
//!
//! The immutable tree an importer hands over: nodes with local transforms,
//! mesh references into a global mesh array, and child nodes. Meshes keep
//! their shared vertex attribute arrays and indexed faces exactly as the
//! importer produced them.

use crate::foundation::math::{Mat4, Vec2, Vec3};

/// One polygon of a mesh, as a list of vertex indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Indices into the owning mesh's vertex attribute arrays
    pub indices: Vec<u32>,
}

impl Face {
    /// Create a face from its vertex indices
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Create a triangle face
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self { indices: vec![a, b, c] }
    }

    /// Whether the face has exactly three corners
    pub fn is_triangle(&self) -> bool {
        self.indices.len() == 3
    }
}

/// Mesh data as supplied by the importer
///
/// `normals` and `texcoords` are either empty (attribute absent) or indexed
/// in parallel with `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    /// Mesh name, if the asset provided one
    pub name: String,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals, empty when the asset has none
    pub normals: Vec<Vec3>,
    /// First texture coordinate channel, empty when the asset has none
    pub texcoords: Vec<Vec2>,
    /// Faces indexing into the attribute arrays
    pub faces: Vec<Face>,
}

impl SourceMesh {
    /// Create a mesh from positions and faces
    pub fn new(positions: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            positions,
            faces,
            ..Default::default()
        }
    }

    /// Attach a name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach per-vertex normals
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    /// Attach per-vertex texture coordinates
    #[must_use]
    pub fn with_texcoords(mut self, texcoords: Vec<Vec2>) -> Self {
        self.texcoords = texcoords;
        self
    }

    /// Whether the mesh carries normals
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && !self.positions.is_empty()
    }

    /// Whether the mesh carries texture coordinates
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty() && !self.positions.is_empty()
    }
}

/// A node of the imported hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name, if the asset provided one
    pub name: String,
    /// Transform relative to the parent node
    pub transform: Mat4,
    /// Indices into [`SceneGraph::meshes`]
    pub mesh_indices: Vec<usize>,
    /// Child nodes in asset order
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Mat4::identity(),
            mesh_indices: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    /// Create an empty node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Reference a mesh from the global mesh array
    #[must_use]
    pub fn with_mesh(mut self, mesh_index: usize) -> Self {
        self.mesh_indices.push(mesh_index);
        self
    }

    /// Append a child node
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}

/// Complete imported scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    /// Root of the node hierarchy
    pub root: SceneNode,
    /// Global mesh array referenced by node mesh indices
    pub meshes: Vec<SourceMesh>,
}

impl SceneGraph {
    /// Create a scene from its root node and mesh array
    pub fn new(root: SceneNode, meshes: Vec<SourceMesh>) -> Self {
        Self { root, meshes }
    }

    /// Look up a mesh by global index
    pub fn mesh(&self, index: usize) -> Option<&SourceMesh> {
        self.meshes.get(index)
    }

    /// Total number of nodes in the hierarchy
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }
}
