//! Scene graph input
//!
//! Types describing an imported asset hierarchy and the importer seam that
//! produces it.

pub mod scene_graph;
pub mod importer;

pub use scene_graph::{SceneGraph, SceneNode, SourceMesh, Face};
pub use importer::{SceneImporter, ImportError, ImportedScene};
