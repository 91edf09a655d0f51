use glam::{Mat4, Vec3};

use crate::error::{check_finite_position, check_non_degenerate, ShapeResult};
use crate::math::orthonormal_basis;

/// Infinite static collider.
///
/// The model matrix maps the plane's local frame to world space: local +Y is
/// the normal, local X and Z span the plane, and the translation is `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    /// Unit normal.
    pub normal: Vec3,
    pub model_matrix: Mat4,
}

impl Plane {
    /// `normal` is normalised; it must be finite and non-zero.
    pub fn new(origin: Vec3, normal: Vec3) -> ShapeResult<Self> {
        check_finite_position("origin", origin)?;
        check_non_degenerate("normal", normal)?;
        let normal = normal.normalize();
        let (x_basis, y_basis) = orthonormal_basis(normal);
        let model_matrix = Mat4::from_cols(
            y_basis.extend(0.0),
            normal.extend(0.0),
            x_basis.extend(0.0),
            origin.extend(1.0),
        );
        Ok(Self {
            origin,
            normal,
            model_matrix,
        })
    }

    /// Signed distance of `point` above the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal)
    }
}
