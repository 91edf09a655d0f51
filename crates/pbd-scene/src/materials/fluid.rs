use glam::Vec3;

use super::BlockDesc;
use crate::error::ShapeResult;

/// Fluid particles; the solver drives them with density constraints.
#[derive(Clone, Debug)]
pub struct Fluid {
    pub positions: Vec<Vec3>,
    pub mass_per_particle: f32,
}

impl Fluid {
    pub fn create_block(desc: &BlockDesc) -> ShapeResult<Self> {
        Ok(Self {
            positions: desc.positions()?,
            mass_per_particle: desc.mass_per_particle,
        })
    }
}
