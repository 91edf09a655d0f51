use glam::{Mat4, Vec2, Vec3};

use crate::error::{check_finite_position, check_non_degenerate, check_positive, ShapeResult};
use crate::math::{look_at_up, spherical_to_world, world_to_spherical};

/// Perspective camera.
///
/// Orientation is stored only as spherical angles `(polar, azimuth)`; the
/// view direction is derived from them, so the two can never disagree.
/// `rotate` does not clamp the polar angle: rotating past a pole flips the
/// view over it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec3,
    angles: Vec2,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect_ratio: f32,
}

impl Camera {
    pub const NEAR: f32 = 0.05;
    pub const FAR: f32 = 100.0;

    /// Camera at `pos` looking at `look_at`; `fov_y` in radians.
    pub fn new(pos: Vec3, look_at: Vec3, fov_y: f32, aspect_ratio: f32) -> ShapeResult<Self> {
        check_finite_position("pos", pos)?;
        check_non_degenerate("look_at - pos", look_at - pos)?;
        check_positive("fov_y", fov_y)?;
        check_positive("aspect_ratio", aspect_ratio)?;
        Ok(Self {
            pos,
            angles: world_to_spherical(look_at - pos),
            up: Vec3::Y,
            fov_y,
            aspect_ratio,
        })
    }

    /// `(polar, azimuth)` in radians.
    pub fn angles(&self) -> Vec2 {
        self.angles
    }

    pub fn dir(&self) -> Vec3 {
        spherical_to_world(self.angles)
    }

    /// Move by `offset` given in camera space: x right, y up, z forward.
    pub fn shift(&mut self, offset: Vec3) {
        let forward = self.dir();
        let right = self.up.cross(forward).try_normalize().unwrap_or(Vec3::X);
        self.pos += forward * offset.z + right * offset.x + self.up * offset.y;
    }

    /// Add `delta` to `(polar, azimuth)`.
    pub fn rotate(&mut self, delta: Vec2) {
        self.angles += delta;
    }

    pub fn view_matrix(&self) -> Mat4 {
        let dir = self.dir();
        Mat4::look_at_rh(self.pos, self.pos + dir, look_at_up(dir))
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect_ratio, Self::NEAR, Self::FAR)
    }

    pub fn vp_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
