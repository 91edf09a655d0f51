use glam::Vec3;

use crate::config::RopeStiffness;
use crate::constraints::DistanceConstraint;
use crate::error::{check_positive, check_stiffness, ShapeResult};
use crate::shapes::line;

/// Straight rope between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeDesc {
    pub start: Vec3,
    pub end: Vec3,
    pub num_joints: u32,
    pub mass_per_particle: f32,
}

impl RopeDesc {
    pub fn between(start: Vec3, end: Vec3, num_joints: u32, mass_per_particle: f32) -> Self {
        Self {
            start,
            end,
            num_joints,
            mass_per_particle,
        }
    }

    /// Rope starting at `start` with `step` between consecutive joints.
    pub fn from_step(start: Vec3, step: Vec3, num_joints: u32, mass_per_particle: f32) -> Self {
        let segments = num_joints.saturating_sub(1) as f32;
        Self::between(start, start + step * segments, num_joints, mass_per_particle)
    }
}

/// Chain of joints held by two layers of distance constraints.
///
/// Adjacent joints carry the structural constraint. Joints two apart carry a
/// softer constraint at twice the spacing, which resists bending without an
/// angular constraint.
#[derive(Clone, Debug)]
pub struct Rope {
    pub positions: Vec<Vec3>,
    pub distances: Vec<DistanceConstraint>,
    pub mass_per_particle: f32,
}

impl Rope {
    pub fn create(desc: &RopeDesc, stiffness: &RopeStiffness) -> ShapeResult<Self> {
        check_positive("mass_per_particle", desc.mass_per_particle)?;
        check_stiffness("rope.structural", stiffness.structural)?;
        check_stiffness("rope.bending", stiffness.bending)?;
        let positions = line(desc.start, desc.end, desc.num_joints)?;

        let n = desc.num_joints;
        let spacing = (desc.end - desc.start).length() / (n - 1) as f32;
        let mut distances = Vec::with_capacity(2 * n as usize - 3);
        for i in 0..n - 1 {
            distances.push(DistanceConstraint::new(i, i + 1, spacing, stiffness.structural));
        }
        for i in 1..n - 1 {
            distances.push(DistanceConstraint::new(
                i - 1,
                i + 1,
                spacing * 2.0,
                stiffness.bending,
            ));
        }

        Ok(Self {
            positions,
            distances,
            mass_per_particle: desc.mass_per_particle,
        })
    }
}
