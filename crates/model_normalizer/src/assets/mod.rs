//! Asset importers
//!
//! Concrete [`SceneImporter`](crate::scene::SceneImporter) implementations for
//! asset files on disk.

pub mod obj_loader;

pub use obj_loader::ObjImporter;
