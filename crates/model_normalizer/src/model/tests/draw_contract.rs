//! Draw contract tests
//!
//! Checks the matrices handed to a backend: centering and scaling in the base
//! view, then each node's local transform on top of it.

use std::path::Path;

use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3};
use crate::model::{BackendResult, DrawCall, DrawOptions, ModelError, NormalizationModel, RenderBackend};
use crate::scene::{Face, ImportError, SceneGraph, SceneImporter, SceneNode, SourceMesh};
use approx::assert_relative_eq;

const EPSILON: f32 = 1e-5;

struct FixedImporter(SceneGraph);

impl SceneImporter for FixedImporter {
    fn import(&mut self, _source: &Path) -> Result<SceneGraph, ImportError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingBackend {
    draws: Vec<(usize, usize, Mat4, usize, bool, bool)>,
    fail_after: Option<usize>,
}

impl RenderBackend for RecordingBackend {
    fn draw_mesh(&mut self, call: &DrawCall<'_>) -> BackendResult<()> {
        if self.fail_after == Some(self.draws.len()) {
            return Err(ModelError::Backend("device lost".to_string()));
        }
        self.draws.push((
            call.node_index,
            call.mesh_index,
            call.model_view,
            call.vertex_count(),
            call.uses_normals(),
            call.uses_texcoords(),
        ));
        Ok(())
    }
}

fn unit_triangle() -> SourceMesh {
    SourceMesh::new(
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 4.0)],
        vec![Face::triangle(0, 1, 2)],
    )
}

fn two_level_scene() -> SceneGraph {
    let textured = unit_triangle().with_texcoords(vec![Vec2::zeros(); 3]);
    let lit = unit_triangle().with_normals(vec![Vec3::z(); 3]);
    SceneGraph::new(
        SceneNode::new("root")
            .with_transform(Mat4::new_translation(&Vec3::new(0.0, 0.0, 100.0)))
            .with_mesh(0)
            .with_child(
                SceneNode::new("child")
                    .with_transform(Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)))
                    .with_mesh(0)
                    .with_mesh(1),
            ),
        vec![textured, lit],
    )
}

fn loaded_model(scene: SceneGraph) -> NormalizationModel {
    let mut importer = FixedImporter(scene);
    let mut model = NormalizationModel::new();
    model.load(&mut importer, "scene.obj").unwrap();
    model
}

#[test]
fn test_base_view_centers_then_scales() {
    let mut model = loaded_model(SceneGraph::new(SceneNode::new("root").with_mesh(0), vec![unit_triangle()]));
    model.set_scale(2.0).unwrap();

    let base = model.base_model_view(&Mat4::identity()).unwrap();

    // Bounds run 0..4 on every axis: center 2, scale 0.5
    assert_relative_eq!(base.transform_position(&Vec3::new(2.0, 2.0, 2.0)), Vec3::zeros(), epsilon = EPSILON);
    assert_relative_eq!(base.transform_position(&Vec3::new(4.0, 4.0, 4.0)), Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
}

#[test]
fn test_node_view_uses_local_transform_only() {
    let model = loaded_model(two_level_scene());
    let view = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
    let base = model.base_model_view(&view).unwrap();

    let calls = model.draw_calls(&view, &Mat4::identity(), DrawOptions::default()).unwrap();

    assert_eq!(calls.len(), 3);
    let child_call = calls.iter().find(|c| c.node_index == 1).unwrap();
    let expected = base * Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(child_call.model_view, expected, epsilon = EPSILON);
}

#[test]
fn test_mvp_is_projection_times_model_view() {
    let model = loaded_model(two_level_scene());
    let projection = Mat4::new_perspective(1.5, 1.0, 0.1, 100.0);

    let calls = model.draw_calls(&Mat4::identity(), &projection, DrawOptions::default()).unwrap();

    for call in &calls {
        assert_relative_eq!(call.model_view_projection, projection * call.model_view, epsilon = EPSILON);
        assert_eq!(call.mvp_uniform(), call.model_view_projection.to_column_major());
    }
}

#[test]
fn test_backend_receives_calls_in_node_order() {
    let model = loaded_model(two_level_scene());
    let mut backend = RecordingBackend::default();
    let options = DrawOptions { use_model_textures: true };

    model.draw(&Mat4::identity(), &Mat4::identity(), options, &mut backend).unwrap();

    let order: Vec<(usize, usize)> = backend.draws.iter().map(|d| (d.0, d.1)).collect();
    assert_eq!(order, [(0, 0), (1, 0), (1, 1)]);
    assert!(backend.draws.iter().all(|d| d.3 == 3));
    // Attribute enables follow the source meshes
    assert_eq!((backend.draws[0].4, backend.draws[0].5), (false, true));
    assert_eq!((backend.draws[2].4, backend.draws[2].5), (true, false));
}

#[test]
fn test_draw_before_load_is_rejected() {
    let model = NormalizationModel::new();
    let mut backend = RecordingBackend::default();

    let result = model.draw(&Mat4::identity(), &Mat4::identity(), DrawOptions::default(), &mut backend);

    assert!(matches!(result, Err(ModelError::UnloadedModel)));
    assert!(backend.draws.is_empty());
    assert!(matches!(
        model.draw_calls(&Mat4::identity(), &Mat4::identity(), DrawOptions::default()),
        Err(ModelError::UnloadedModel)
    ));
}

#[test]
fn test_backend_error_stops_drawing() {
    let model = loaded_model(two_level_scene());
    let mut backend = RecordingBackend { fail_after: Some(1), ..Default::default() };

    let result = model.draw(&Mat4::identity(), &Mat4::identity(), DrawOptions::default(), &mut backend);

    assert!(matches!(result, Err(ModelError::Backend(_))));
    assert_eq!(backend.draws.len(), 1);
}
