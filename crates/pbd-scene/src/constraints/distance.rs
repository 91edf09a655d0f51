/// Position-based distance constraint between two particles.
///
/// Keeps particles `i` and `j` at `rest_length`. The rest length is fixed when
/// the constraint is built and never recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceConstraint {
    /// Particle index A.
    pub i: u32,
    /// Particle index B.
    pub j: u32,
    /// Rest length (initial distance between the two particles).
    pub rest_length: f32,
    /// Stiffness in `[0..1]`; `1.0` fully restores the rest length each iteration.
    pub stiffness: f32,
}

impl DistanceConstraint {
    /// Create a new distance constraint between particles `i` and `j`.
    pub fn new(i: u32, j: u32, rest_length: f32, stiffness: f32) -> Self {
        Self {
            i,
            j,
            rest_length,
            stiffness,
        }
    }

    /// Same constraint with both indices shifted by `base`.
    pub fn offset(self, base: u32) -> Self {
        Self {
            i: self.i + base,
            j: self.j + base,
            ..self
        }
    }
}
