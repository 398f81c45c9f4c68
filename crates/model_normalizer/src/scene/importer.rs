//! Importer interface
//!
//! Importers turn an asset source into a [`SceneGraph`] and take it back once
//! the caller has extracted what it needs. [`ImportedScene`] scopes that
//! hand-off so the scene is returned to its importer on every exit path.

use std::ops::Deref;
use std::path::Path;

use thiserror::Error;

use super::SceneGraph;

/// Errors reported by scene importers
#[derive(Error, Debug)]
pub enum ImportError {
    /// IO error while reading the asset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset could not be located
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Malformed numeric or index data
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Structurally invalid asset
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The importer produced no scene
    #[error("No scene could be imported from {0}")]
    EmptyScene(String),
}

/// Produces scene graphs from asset sources
pub trait SceneImporter {
    /// Import the asset at `source`
    fn import(&mut self, source: &Path) -> Result<SceneGraph, ImportError>;

    /// Take back a scene produced by [`SceneImporter::import`]
    ///
    /// Importers holding per-scene resources free them here. The default
    /// simply drops the scene.
    fn release(&mut self, scene: SceneGraph) {
        drop(scene);
    }
}

/// A scene borrowed from its importer for the duration of extraction
///
/// Dropping the guard releases the scene back to the importer.
pub struct ImportedScene<'a, I: SceneImporter + ?Sized> {
    importer: &'a mut I,
    scene: SceneGraph,
}

impl<'a, I: SceneImporter + ?Sized> ImportedScene<'a, I> {
    /// Run the importer and wrap the resulting scene
    pub fn import(importer: &'a mut I, source: &Path) -> Result<Self, ImportError> {
        let scene = importer.import(source)?;
        Ok(Self { importer, scene })
    }
}

impl<I: SceneImporter + ?Sized> Deref for ImportedScene<'_, I> {
    type Target = SceneGraph;

    fn deref(&self) -> &SceneGraph {
        &self.scene
    }
}

impl<I: SceneImporter + ?Sized> Drop for ImportedScene<'_, I> {
    fn drop(&mut self) {
        let scene = std::mem::take(&mut self.scene);
        log::trace!("Releasing imported scene ({} meshes)", scene.meshes.len());
        self.importer.release(scene);
    }
}
