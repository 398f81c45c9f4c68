//! Math utilities and types
//!
//! Provides the fundamental math types for scene processing. All matrices use
//! nalgebra's column-vector convention: a point is transformed as `M * p` and
//! transforms compose as `parent * local`.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Build a matrix from sixteen values laid out row by row
    ///
    /// Importers commonly hand transforms over as `a1..a4, b1..b4, ...` where
    /// `a` is the first row; this keeps that layout without transposing.
    fn from_row_major(rows: [[f32; 4]; 4]) -> Mat4;

    /// Flatten into column-major order, the layout GPU uniform uploads expect
    fn to_column_major(&self) -> [[f32; 4]; 4];

    /// Transform a position (w = 1) by this matrix, keeping xyz without a w divide
    fn transform_position(&self, position: &Vec3) -> Vec3;

    /// Post-multiply a uniform scale, like scaling a modelview matrix in place
    fn scaled(&self, factor: f32) -> Mat4;

    /// Post-multiply a translation, like translating a modelview matrix in place
    fn translated(&self, offset: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn from_row_major(rows: [[f32; 4]; 4]) -> Mat4 {
        let [a, b, c, d] = rows;
        Mat4::new(
            a[0], a[1], a[2], a[3],
            b[0], b[1], b[2], b[3],
            c[0], c[1], c[2], c[3],
            d[0], d[1], d[2], d[3],
        )
    }

    fn to_column_major(&self) -> [[f32; 4]; 4] {
        (*self).into()
    }

    fn transform_position(&self, position: &Vec3) -> Vec3 {
        (self * position.push(1.0)).xyz()
    }

    fn scaled(&self, factor: f32) -> Mat4 {
        self * Mat4::new_scaling(factor)
    }

    fn translated(&self, offset: &Vec3) -> Mat4 {
        self * Mat4::new_translation(offset)
    }
}
