//! # Model Normalizer
//!
//! Turns an imported, hierarchical 3D scene into flat, render-ready triangle
//! buffers and derives the centering offset and uniform scale needed to show
//! an asset of arbitrary size inside a fixed viewport extent.
//!
//! ## Features
//!
//! - **Scene Flattening**: Pre-order walk producing one entry per scene node
//! - **De-indexing**: Face/index lists expanded into flat triangle attribute arrays
//! - **Bounds**: Axis-aligned box over all vertices in composed (parent-chain) space
//! - **Normalization**: Center offset and uniform scale for display
//! - **Draw Contract**: Per-node matrices and per-mesh buffers for a rendering backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use model_normalizer::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ModelConfig::default();
//!     let mut importer = ObjImporter::new(&config);
//!     let mut model = NormalizationModel::new();
//!
//!     model.load(&mut importer, "teapot.obj")?;
//!     model.set_scale(config.target_size)?;
//!
//!     for call in model.draw_calls(&Mat4::identity(), &Mat4::identity(), DrawOptions::default())? {
//!         println!("{} vertices", call.vertex_count());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod assets;
pub mod model;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec2, Vec3, Mat4, Mat4Ext},
        config::{Config, ConfigError, ModelConfig},
        scene::{SceneGraph, SceneNode, SourceMesh, Face, SceneImporter, ImportError},
        assets::ObjImporter,
        model::{
            NormalizationModel, ModelError, ModelStats,
            MeshBuffer, FlatNode, Bounds,
            DrawCall, DrawOptions, RenderBackend,
        },
    };
}
