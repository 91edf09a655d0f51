//! Material builders.
//!
//! Each builder runs a geometry generator and attaches the material's derived
//! data. Indices in the output are local to the body (the first particle is
//! 0); the scene rebases them when the body is inserted.
pub mod cloth;
pub mod fluid;
pub mod granular;
pub mod rigid;
pub mod rope;

pub use cloth::{Cloth, ClothDesc, Corner};
pub use fluid::Fluid;
pub use granular::Granulars;
pub use rigid::RigidBody;
pub use rope::{Rope, RopeDesc};

use glam::{UVec3, Vec3};

use crate::error::{check_positive, ShapeResult};
use crate::shapes::lattice;

/// Box of particles on a regular lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockDesc {
    /// Particle count along each axis.
    pub dimension: UVec3,
    /// Position of particle `(0, 0, 0)`.
    pub start: Vec3,
    /// Spacing along each axis.
    pub step: Vec3,
    pub mass_per_particle: f32,
}

impl BlockDesc {
    pub fn new(dimension: UVec3, start: Vec3, step: Vec3, mass_per_particle: f32) -> Self {
        Self {
            dimension,
            start,
            step,
            mass_per_particle,
        }
    }

    /// Cubic spacing shortcut.
    pub fn uniform(dimension: UVec3, start: Vec3, spacing: f32, mass_per_particle: f32) -> Self {
        Self::new(dimension, start, Vec3::splat(spacing), mass_per_particle)
    }

    pub fn particle_count(&self) -> usize {
        self.dimension.x as usize * self.dimension.y as usize * self.dimension.z as usize
    }

    /// `None` when the count does not fit `usize`.
    pub fn checked_particle_count(&self) -> Option<usize> {
        self.dimension
            .to_array()
            .iter()
            .try_fold(1usize, |n, &d| n.checked_mul(d as usize))
    }

    pub(crate) fn positions(&self) -> ShapeResult<Vec<Vec3>> {
        check_positive("mass_per_particle", self.mass_per_particle)?;
        lattice(self.dimension, self.start, self.step)
    }
}
