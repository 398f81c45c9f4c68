//! Normalized model
//!
//! [`NormalizationModel`] ties the pieces together: it runs an importer,
//! flattens the scene, measures it, and afterwards serves the centered and
//! scaled matrices a backend needs to draw every node.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::scene::{ImportedScene, SceneImporter};

use super::{
    Bounds, BoundsCalculator, DrawCall, DrawOptions, FlatNode, ModelError, RenderBackend,
    SceneFlattener,
};

/// Summary of a loaded model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Flattened nodes
    pub nodes: usize,
    /// Mesh buffers across all nodes
    pub meshes: usize,
    /// Triangles across all mesh buffers
    pub triangles: usize,
    /// Faces dropped for not being triangles
    pub skipped_faces: usize,
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} meshes, {} triangles, {} faces skipped",
            self.nodes, self.meshes, self.triangles, self.skipped_faces
        )
    }
}

/// A loaded asset, flattened and ready to be centered and scaled for display
///
/// # Lifecycle
///
/// 1. [`load`](Self::load) imports, flattens and measures an asset. Any
///    previous content is discarded first, and a failed load leaves the
///    model empty.
/// 2. [`set_scale`](Self::set_scale) fits the longest side of the bounds to a
///    target size. Scale defaults to 1.0 after every load.
/// 3. [`draw`](Self::draw) / [`draw_calls`](Self::draw_calls) produce the
///    per-node matrices for a backend.
///
/// Node transforms are applied on their own, without their ancestors'
/// transforms, whereas the bounds account for the full hierarchy.
#[derive(Debug)]
pub struct NormalizationModel {
    nodes: Vec<FlatNode>,
    bounds: Bounds,
    center: Vec3,
    scale: f32,
    loaded: bool,
    source: Option<PathBuf>,
}

impl Default for NormalizationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationModel {
    /// Create an empty, unloaded model
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            bounds: Bounds::empty(),
            center: Vec3::zeros(),
            scale: 1.0,
            loaded: false,
            source: None,
        }
    }

    /// Load an asset through `importer`
    ///
    /// The imported scene is handed back to the importer before this returns,
    /// whether extraction succeeded or not.
    pub fn load<I, P>(&mut self, importer: &mut I, source: P) -> Result<ModelStats, ModelError>
    where
        I: SceneImporter + ?Sized,
        P: AsRef<Path>,
    {
        let source = source.as_ref();
        self.unload();

        let scene = ImportedScene::import(importer, source).map_err(|e| {
            log::error!("Couldn't load model file {}: {}", source.display(), e);
            ModelError::from(e)
        })?;

        log::debug!(
            "Imported {}: {} nodes, {} meshes",
            source.display(), scene.node_count(), scene.meshes.len()
        );

        let extracted = SceneFlattener::flatten(&scene)
            .and_then(|nodes| Ok((nodes, BoundsCalculator::compute(&scene)?)));
        drop(scene);

        let (nodes, bounds) = extracted.map_err(|e| {
            log::error!("Couldn't extract model {}: {}", source.display(), e);
            e
        })?;

        self.nodes = nodes;
        self.bounds = bounds;
        self.center = bounds.center();
        self.scale = 1.0;
        self.loaded = true;
        self.source = Some(source.to_path_buf());

        let stats = self.stats();
        log::info!(
            "Loaded {}: {} (bounds {:?} .. {:?})",
            source.display(), stats, bounds.min.as_slice(), bounds.max.as_slice()
        );
        Ok(stats)
    }

    /// Drop all content and return to the unloaded state
    pub fn unload(&mut self) {
        self.nodes.clear();
        self.bounds = Bounds::empty();
        self.center = Vec3::zeros();
        self.scale = 1.0;
        self.loaded = false;
        self.source = None;
    }

    /// Fit the longest side of the bounds to `target_size`
    ///
    /// Leaves the scale untouched on error.
    pub fn set_scale(&mut self, target_size: f32) -> Result<(), ModelError> {
        self.ensure_loaded()?;

        let longest_extent = self.bounds.longest_extent();
        if longest_extent <= 0.0 || !longest_extent.is_finite() {
            log::error!("Cannot scale model with longest extent {}", longest_extent);
            return Err(ModelError::DegenerateBounds { longest_extent });
        }

        self.scale = target_size / longest_extent;
        log::debug!("Scale set to {} for target size {}", self.scale, target_size);
        Ok(())
    }

    /// View matrix with the model's scale and centering applied
    ///
    /// Scale is applied after centering, so the model's center ends up at the
    /// view's origin.
    pub fn base_model_view(&self, view: &Mat4) -> Result<Mat4, ModelError> {
        self.ensure_loaded()?;
        Ok(view.scaled(self.scale).translated(&-self.center))
    }

    /// Draw calls for every mesh of every node, in node order
    pub fn draw_calls(
        &self,
        view: &Mat4,
        projection: &Mat4,
        options: DrawOptions,
    ) -> Result<Vec<DrawCall<'_>>, ModelError> {
        let base = self.base_model_view(view)?;
        let mut calls = Vec::new();

        for (node_index, node) in self.nodes.iter().enumerate() {
            // Local transform only, no ancestor composition
            let model_view = base * node.transform;
            let model_view_projection = projection * model_view;

            for (mesh_index, mesh) in node.meshes.iter().enumerate() {
                calls.push(DrawCall {
                    node_index,
                    mesh_index,
                    model_view,
                    model_view_projection,
                    mesh,
                    options,
                });
            }
        }

        Ok(calls)
    }

    /// Feed every draw call to `backend`
    pub fn draw(
        &self,
        view: &Mat4,
        projection: &Mat4,
        options: DrawOptions,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), ModelError> {
        for call in self.draw_calls(view, projection, options)? {
            backend.draw_mesh(&call)?;
        }
        Ok(())
    }

    /// Flattened nodes in pre-order
    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    /// Bounds of the whole asset in composed transform space
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Midpoint of the bounds
    pub const fn center(&self) -> Vec3 {
        self.center
    }

    /// Current uniform scale factor
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether a load has succeeded
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Asset the model was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Counts over the loaded content
    pub fn stats(&self) -> ModelStats {
        self.nodes.iter().flat_map(|node| &node.meshes).fold(
            ModelStats { nodes: self.nodes.len(), ..Default::default() },
            |mut stats, mesh| {
                stats.meshes += 1;
                stats.triangles += mesh.triangle_count();
                stats.skipped_faces += mesh.skipped_faces;
                stats
            },
        )
    }

    fn ensure_loaded(&self) -> Result<(), ModelError> {
        if self.loaded {
            Ok(())
        } else {
            log::error!("Model file not loaded yet");
            Err(ModelError::UnloadedModel)
        }
    }
}
