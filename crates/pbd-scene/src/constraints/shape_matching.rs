use glam::Vec3;

use crate::scene::IndexRange;

/// Rest pose of one rigid body for shape matching.
///
/// Stores every particle's rest position relative to the rest center of mass.
/// Each step the solver:
/// 1. Computes the current center of mass
/// 2. Builds the cross-covariance matrix A_pq against `rest_positions`
/// 3. Extracts the rotation via polar decomposition
/// 4. Moves particles toward their rotated rest positions
///
/// Reference: "Meshless Deformations Based on Shape Matching", Mueller et al., 2005
#[derive(Clone, Debug, PartialEq)]
pub struct RigidRestPose {
    /// Global particles of the body; `rest_positions[n]` belongs to `range.start + n`.
    pub range: IndexRange,
    /// Rest positions relative to the rest center of mass. Sums to zero.
    pub rest_positions: Vec<Vec3>,
    pub center_of_mass: Vec3,
}

impl RigidRestPose {
    /// Rest pose of `positions`, assuming uniform mass.
    pub fn from_positions(range: IndexRange, positions: &[Vec3]) -> Self {
        let center_of_mass = center_of_mass(positions);
        let rest_positions = positions.iter().map(|&p| p - center_of_mass).collect();
        Self {
            range,
            rest_positions,
            center_of_mass,
        }
    }

    /// Same pose with its range shifted by `base`.
    pub fn offset(self, base: u32) -> Self {
        Self {
            range: IndexRange::new(self.range.start + base, self.range.end + base),
            ..self
        }
    }
}

/// Arithmetic mean of `positions`; zero for an empty slice.
pub fn center_of_mass(positions: &[Vec3]) -> Vec3 {
    if positions.is_empty() {
        return Vec3::ZERO;
    }
    positions.iter().copied().sum::<Vec3>() / positions.len() as f32
}
