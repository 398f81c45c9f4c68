//! Bounding volume computation
//!
//! Unlike flattening, this walk respects the hierarchy: each vertex is placed
//! with the product of every ancestor transform and its own node's transform
//! before it is folded into the box.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::scene::{SceneGraph, SceneNode};

use super::ModelError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Create bounds from min and max corners
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds containing nothing, ready to grow
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Whether no point has been folded in yet
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to contain `point`, independently per axis
    pub fn include(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Midpoint of the box, the origin for empty bounds
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zeros();
        }
        (self.min + self.max) * 0.5
    }

    /// Side lengths along each axis, zero for empty bounds
    pub fn extents(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zeros();
        }
        self.max - self.min
    }

    /// Length of the longest side
    pub fn longest_extent(&self) -> f32 {
        self.extents().max()
    }
}

/// Computes scene bounds in composed (parent-chain) space
pub struct BoundsCalculator;

impl BoundsCalculator {
    /// Bounds of every vertex of every mesh in `scene`
    pub fn compute(scene: &SceneGraph) -> Result<Bounds, ModelError> {
        let mut bounds = Bounds::empty();
        Self::visit(scene, &scene.root, Mat4::identity(), &mut bounds)?;
        Ok(bounds)
    }

    // `parent` arrives by value, so siblings each start from the same matrix
    fn visit(
        scene: &SceneGraph,
        node: &SceneNode,
        parent: Mat4,
        bounds: &mut Bounds,
    ) -> Result<(), ModelError> {
        let composed = parent * node.transform;

        for &mesh_index in &node.mesh_indices {
            let mesh = scene.mesh(mesh_index).ok_or_else(|| ModelError::MeshIndexOutOfRange {
                node: node.name.clone(),
                mesh: mesh_index,
                mesh_count: scene.meshes.len(),
            })?;
            for position in &mesh.positions {
                bounds.include(&composed.transform_position(position));
            }
        }

        for child in &node.children {
            Self::visit(scene, child, composed, bounds)?;
        }

        Ok(())
    }
}
