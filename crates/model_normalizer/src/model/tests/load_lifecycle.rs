//! Integration tests for loading, resetting and scaling a model
//!
//! Uses a stub importer that serves a fixed scene and counts how often the
//! scene is handed back.

use std::path::Path;

use crate::foundation::math::{Mat4, Vec3};
use crate::model::{ModelError, NormalizationModel};
use crate::scene::{Face, ImportError, SceneGraph, SceneImporter, SceneNode, SourceMesh};
use approx::assert_relative_eq;

const EPSILON: f32 = 1e-5;

struct StubImporter {
    scene: Option<SceneGraph>,
    released: usize,
}

impl StubImporter {
    fn serving(scene: SceneGraph) -> Self {
        Self { scene: Some(scene), released: 0 }
    }

    fn failing() -> Self {
        Self { scene: None, released: 0 }
    }
}

impl SceneImporter for StubImporter {
    fn import(&mut self, source: &Path) -> Result<SceneGraph, ImportError> {
        self.scene
            .clone()
            .ok_or_else(|| ImportError::EmptyScene(source.display().to_string()))
    }

    fn release(&mut self, _scene: SceneGraph) {
        self.released += 1;
    }
}

/// Axis-aligned cube of side `side` with its minimum corner at `origin`
fn cube_mesh(origin: Vec3, side: f32) -> SourceMesh {
    let mut positions = Vec::with_capacity(8);
    for i in 0..8u8 {
        let corner = Vec3::new(
            f32::from(i & 1),
            f32::from((i >> 1) & 1),
            f32::from((i >> 2) & 1),
        );
        positions.push(origin + corner * side);
    }
    let faces = vec![
        Face::triangle(0, 1, 3), Face::triangle(0, 3, 2),
        Face::triangle(4, 6, 7), Face::triangle(4, 7, 5),
        Face::triangle(0, 4, 5), Face::triangle(0, 5, 1),
        Face::triangle(2, 3, 7), Face::triangle(2, 7, 6),
        Face::triangle(0, 2, 6), Face::triangle(0, 6, 4),
        Face::triangle(1, 5, 7), Face::triangle(1, 7, 3),
    ];
    SourceMesh::new(positions, faces).with_name("cube")
}

fn cube_scene(side: f32) -> SceneGraph {
    SceneGraph::new(SceneNode::new("root").with_mesh(0), vec![cube_mesh(Vec3::zeros(), side)])
}

#[test]
fn test_load_populates_model() {
    let mut importer = StubImporter::serving(cube_scene(4.0));
    let mut model = NormalizationModel::new();

    let stats = model.load(&mut importer, "cube.obj").unwrap();

    assert!(model.is_loaded());
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.meshes, 1);
    assert_eq!(stats.triangles, 12);
    assert_eq!(stats.skipped_faces, 0);
    assert_eq!(model.source(), Some(Path::new("cube.obj")));
    assert_relative_eq!(model.center(), Vec3::new(2.0, 2.0, 2.0), epsilon = EPSILON);
    assert_relative_eq!(model.scale(), 1.0);
    assert_eq!(importer.released, 1);
}

#[test]
fn test_set_scale_fits_longest_side() {
    let mut importer = StubImporter::serving(cube_scene(4.0));
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "cube.obj").unwrap();

    model.set_scale(2.0).unwrap();
    assert_relative_eq!(model.scale(), 0.5, epsilon = EPSILON);

    model.set_scale(10.0).unwrap();
    assert_relative_eq!(model.scale(), 2.5, epsilon = EPSILON);
}

#[test]
fn test_set_scale_uses_longest_axis() {
    let mut mesh = cube_mesh(Vec3::zeros(), 1.0);
    for p in &mut mesh.positions {
        p.y *= 8.0;
    }
    let scene = SceneGraph::new(SceneNode::new("root").with_mesh(0), vec![mesh]);
    let mut importer = StubImporter::serving(scene);
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "tall.obj").unwrap();

    model.set_scale(4.0).unwrap();

    assert_relative_eq!(model.scale(), 0.5, epsilon = EPSILON);
}

#[test]
fn test_set_scale_before_load_is_rejected() {
    let mut model = NormalizationModel::new();

    let result = model.set_scale(2.0);

    assert!(matches!(result, Err(ModelError::UnloadedModel)));
    assert_relative_eq!(model.scale(), 1.0);
}

#[test]
fn test_set_scale_on_degenerate_bounds() {
    let scene = SceneGraph::new(
        SceneNode::new("root").with_mesh(0),
        vec![SourceMesh::new(vec![Vec3::new(1.0, 1.0, 1.0)], vec![])],
    );
    let mut importer = StubImporter::serving(scene);
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "point.obj").unwrap();

    let result = model.set_scale(2.0);

    assert!(matches!(result, Err(ModelError::DegenerateBounds { .. })));
    assert_relative_eq!(model.scale(), 1.0);
}

#[test]
fn test_failed_import_on_fresh_model() {
    let mut importer = StubImporter::failing();
    let mut model = NormalizationModel::new();

    let result = model.load(&mut importer, "missing.obj");

    assert!(matches!(result, Err(ModelError::Import(ImportError::EmptyScene(_)))));
    assert!(!model.is_loaded());
    assert!(model.nodes().is_empty());
    assert!(model.bounds().is_empty());
    assert_eq!(importer.released, 0);
}

#[test]
fn test_failed_import_discards_previous_model() {
    let mut good = StubImporter::serving(cube_scene(4.0));
    let mut bad = StubImporter::failing();
    let mut model = NormalizationModel::new();
    model.load(&mut good, "cube.obj").unwrap();
    model.set_scale(2.0).unwrap();

    assert!(model.load(&mut bad, "missing.obj").is_err());

    assert!(!model.is_loaded());
    assert!(model.nodes().is_empty());
    assert_relative_eq!(model.scale(), 1.0);
    assert_eq!(model.center(), Vec3::zeros());
    assert!(matches!(model.set_scale(2.0), Err(ModelError::UnloadedModel)));
}

#[test]
fn test_reload_replaces_nodes_and_resets_scale() {
    let two_nodes = SceneGraph::new(
        SceneNode::new("root").with_child(SceneNode::new("child").with_mesh(0)),
        vec![cube_mesh(Vec3::new(10.0, 0.0, 0.0), 2.0)],
    );
    let mut first = StubImporter::serving(cube_scene(4.0));
    let mut second = StubImporter::serving(two_nodes);
    let mut model = NormalizationModel::new();

    model.load(&mut first, "a.obj").unwrap();
    model.set_scale(1.0).unwrap();
    model.load(&mut second, "b.obj").unwrap();

    assert_eq!(model.nodes().len(), 2);
    assert_relative_eq!(model.scale(), 1.0);
    assert_relative_eq!(model.center(), Vec3::new(11.0, 1.0, 1.0), epsilon = EPSILON);
    assert_eq!(first.released, 1);
    assert_eq!(second.released, 1);
}

#[test]
fn test_extraction_error_releases_scene_and_publishes_nothing() {
    let scene = SceneGraph::new(
        SceneNode::new("root").with_mesh(0).with_child(SceneNode::new("dangling").with_mesh(5)),
        vec![cube_mesh(Vec3::zeros(), 1.0)],
    );
    let mut importer = StubImporter::serving(scene);
    let mut model = NormalizationModel::new();

    let result = model.load(&mut importer, "broken.obj");

    assert!(matches!(result, Err(ModelError::MeshIndexOutOfRange { mesh: 5, .. })));
    assert!(!model.is_loaded());
    assert!(model.nodes().is_empty());
    assert_eq!(importer.released, 1);
}

#[test]
fn test_bounds_compose_but_flat_transform_stays_local() {
    let child_offset = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
    let scene = SceneGraph::new(
        SceneNode::new("root")
            .with_transform(Mat4::new_translation(&Vec3::new(0.0, 5.0, 0.0)))
            .with_child(SceneNode::new("child").with_transform(child_offset).with_mesh(0)),
        vec![SourceMesh::new(vec![Vec3::zeros()], vec![Face::triangle(0, 0, 0)])],
    );
    let mut importer = StubImporter::serving(scene);
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "offset.obj").unwrap();

    assert_relative_eq!(model.bounds().max, Vec3::new(10.0, 5.0, 0.0), epsilon = EPSILON);
    assert_eq!(model.nodes()[1].transform, child_offset);
}

#[test]
fn test_unload_clears_everything() {
    let mut importer = StubImporter::serving(cube_scene(4.0));
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "cube.obj").unwrap();

    model.unload();

    assert!(!model.is_loaded());
    assert!(model.nodes().is_empty());
    assert!(model.source().is_none());
    assert_eq!(model.stats().nodes, 0);
}
