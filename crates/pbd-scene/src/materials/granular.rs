use glam::Vec3;

use super::BlockDesc;
use crate::error::ShapeResult;

/// Unconstrained solid particles; behaviour comes from contacts and friction.
#[derive(Clone, Debug)]
pub struct Granulars {
    pub positions: Vec<Vec3>,
    pub mass_per_particle: f32,
}

impl Granulars {
    pub fn create_block(desc: &BlockDesc) -> ShapeResult<Self> {
        Ok(Self {
            positions: desc.positions()?,
            mass_per_particle: desc.mass_per_particle,
        })
    }
}
