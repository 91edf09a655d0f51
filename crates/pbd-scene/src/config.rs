use serde::{Deserialize, Serialize};

/// How the cloth builder expresses bending resistance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendingMode {
    /// Skip-one distance constraints around every interior grid vertex.
    #[default]
    LongRange,
    /// Dihedral-angle quads, one per grid cell.
    Dihedral,
    /// Both of the above.
    Both,
}

impl BendingMode {
    pub fn long_range(self) -> bool {
        matches!(self, BendingMode::LongRange | BendingMode::Both)
    }

    pub fn dihedral(self) -> bool {
        matches!(self, BendingMode::Dihedral | BendingMode::Both)
    }
}

/// Stiffness pair used for every rope.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeStiffness {
    /// Adjacent joints.
    pub structural: f32,
    /// Skip-one joints.
    pub bending: f32,
}

impl Default for RopeStiffness {
    fn default() -> Self {
        Self {
            structural: 1.0,
            bending: 0.1,
        }
    }
}

/// Scene-wide parameters forwarded to the solver with the particle data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub particle_radius: f32,
    /// Fluid kernel radius as a multiple of `particle_radius`.
    pub fluid_kernel_scale: f32,
    pub fluid_rest_density: f32,
    pub bending_mode: BendingMode,
    pub rope: RopeStiffness,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_radius: 0.05,
            fluid_kernel_scale: 2.3,
            fluid_rest_density: 1000.0,
            bending_mode: BendingMode::LongRange,
            rope: RopeStiffness::default(),
        }
    }
}

impl SceneConfig {
    pub fn fluid_kernel_radius(&self) -> f32 {
        self.fluid_kernel_scale * self.particle_radius
    }
}
