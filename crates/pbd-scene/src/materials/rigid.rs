use glam::Vec3;

use super::BlockDesc;
use crate::constraints::RigidRestPose;
use crate::error::ShapeResult;
use crate::scene::IndexRange;

/// Rigid body sampled by particles.
#[derive(Clone, Debug)]
pub struct RigidBody {
    pub positions: Vec<Vec3>,
    /// Rest pose over the local range `[0, positions.len())`.
    pub rest_pose: RigidRestPose,
    pub mass_per_particle: f32,
}

impl RigidBody {
    /// Solid box filling `desc`'s lattice.
    pub fn create_box(desc: &BlockDesc) -> ShapeResult<Self> {
        let positions = desc.positions()?;
        let local = IndexRange::new(0, positions.len() as u32);
        let rest_pose = RigidRestPose::from_positions(local, &positions);
        Ok(Self {
            positions,
            rest_pose,
            mass_per_particle: desc.mass_per_particle,
        })
    }

    /// Half extents of the box spanned by the lattice cells.
    pub fn half_extents(desc: &BlockDesc) -> Vec3 {
        desc.step * desc.dimension.as_vec3() * 0.5
    }
}
