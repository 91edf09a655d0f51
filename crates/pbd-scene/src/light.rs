use glam::{Mat4, Vec2, Vec3};

use crate::math::look_at_up;

/// Spot-shaped point light used for shading and shadow maps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub intensity: Vec3,
    /// Inner and outer cone half-angles in radians.
    pub theta_min_max: Vec2,
}

impl PointLight {
    pub const NEAR: f32 = 0.5;
    pub const FAR: f32 = 100.0;

    /// Light with the default 45°/50° cone.
    pub fn new(position: Vec3, direction: Vec3, intensity: Vec3) -> Self {
        Self {
            position,
            direction,
            intensity,
            theta_min_max: Vec2::new(45f32.to_radians(), 50f32.to_radians()),
        }
    }

    /// View-projection of the light's shadow map; the frustum covers the outer cone.
    pub fn shadow_matrix(&self) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(self.theta_min_max.y * 2.0, 1.0, Self::NEAR, Self::FAR);
        let view = Mat4::look_at_rh(
            self.position,
            self.position + self.direction,
            look_at_up(self.direction),
        );
        proj * view
    }
}
