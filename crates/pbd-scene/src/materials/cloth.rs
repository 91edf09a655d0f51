use glam::{UVec3, Vec3};

use crate::config::BendingMode;
use crate::constraints::{BendingConstraint, DistanceConstraint};
use crate::error::{check_positive, check_stiffness, ShapeResult};
use crate::shapes::{grid, grid_index};

/// Grid corner that can be pinned in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Vertex `(0, 0)`.
    MinXMinY,
    /// Vertex `(nx - 1, 0)`.
    MaxXMinY,
    /// Vertex `(0, ny - 1)`.
    MinXMaxY,
    /// Vertex `(nx - 1, ny - 1)`.
    MaxXMaxY,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::MinXMinY,
        Corner::MaxXMinY,
        Corner::MinXMaxY,
        Corner::MaxXMaxY,
    ];

    /// Local particle index of this corner in a `num_joints_x` by `num_joints_y` grid.
    pub fn index(self, num_joints_x: u32, num_joints_y: u32) -> u32 {
        match self {
            Corner::MinXMinY => 0,
            Corner::MaxXMinY => num_joints_x - 1,
            Corner::MinXMaxY => num_joints_x * (num_joints_y - 1),
            Corner::MaxXMaxY => num_joints_x * num_joints_y - 1,
        }
    }
}

/// Rectangular cloth sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct ClothDesc {
    pub start: Vec3,
    /// Offset between neighbouring joints along a row.
    pub step_x: Vec3,
    /// Offset between neighbouring rows.
    pub step_y: Vec3,
    pub num_joints_x: u32,
    pub num_joints_y: u32,
    pub mass_per_particle: f32,
    /// Structural and shear constraints.
    pub stretch_stiffness: f32,
    /// Long-range and dihedral bending constraints.
    pub bending_stiffness: f32,
    /// Indexed like [`Corner::ALL`].
    pub pinned_corners: [bool; 4],
    pub self_collidable: bool,
}

impl ClothDesc {
    pub fn new(
        start: Vec3,
        step_x: Vec3,
        step_y: Vec3,
        num_joints_x: u32,
        num_joints_y: u32,
        mass_per_particle: f32,
    ) -> Self {
        Self {
            start,
            step_x,
            step_y,
            num_joints_x,
            num_joints_y,
            mass_per_particle,
            stretch_stiffness: 0.2,
            bending_stiffness: 0.1,
            pinned_corners: [false; 4],
            self_collidable: true,
        }
    }

    pub fn with_stiffness(mut self, stretch: f32, bending: f32) -> Self {
        self.stretch_stiffness = stretch;
        self.bending_stiffness = bending;
        self
    }

    pub fn pin(mut self, corner: Corner) -> Self {
        self.pinned_corners[corner as usize] = true;
        self
    }

    pub fn self_collidable(mut self, enabled: bool) -> Self {
        self.self_collidable = enabled;
        self
    }

    pub fn particle_count(&self) -> usize {
        self.num_joints_x as usize * self.num_joints_y as usize
    }

    pub fn checked_particle_count(&self) -> Option<usize> {
        (self.num_joints_x as usize).checked_mul(self.num_joints_y as usize)
    }
}

/// Cloth sheet with its full constraint network, in local indices.
#[derive(Clone, Debug)]
pub struct Cloth {
    pub positions: Vec<Vec3>,
    pub distances: Vec<DistanceConstraint>,
    pub bendings: Vec<BendingConstraint>,
    /// Triangles for wind and drag.
    pub faces: Vec<UVec3>,
    /// Pinned corners.
    pub immovables: Vec<u32>,
    pub mass_per_particle: f32,
}

impl Cloth {
    /// Build the sheet described by `desc`.
    ///
    /// For every grid vertex `(x, y)`, with `p1..p4` the corners of the cell
    /// it opens:
    ///
    /// ```text
    ///   p3 --- p4        y + 1
    ///   |  \ /  |
    ///   |  / \  |
    ///   p1 --- p2        y
    ///   x     x + 1
    /// ```
    ///
    /// * faces `(p1, p2, p3)` and `(p2, p3, p4)`,
    /// * structural pairs `p1-p2` and `p1-p3`, shear pairs `p1-p4` and `p2-p3`,
    /// * in long-range bending mode, around every vertex with all eight
    ///   neighbours: the three horizontal and three vertical pairs that skip it,
    /// * in dihedral bending mode, one quad per cell whose hinge alternates
    ///   between the two diagonals.
    ///
    /// Grids with fewer than three joints on an axis get no long-range pairs.
    pub fn create(desc: &ClothDesc, mode: BendingMode) -> ShapeResult<Self> {
        check_positive("mass_per_particle", desc.mass_per_particle)?;
        check_stiffness("stretch_stiffness", desc.stretch_stiffness)?;
        check_stiffness("bending_stiffness", desc.bending_stiffness)?;
        let positions = grid(
            desc.start,
            desc.step_x,
            desc.step_y,
            desc.num_joints_x,
            desc.num_joints_y,
        )?;

        let nx = desc.num_joints_x;
        let ny = desc.num_joints_y;
        let stiffness = desc.stretch_stiffness;
        let bending = desc.bending_stiffness;

        let length_x = desc.step_x.length();
        let length_y = desc.step_y.length();
        let length_diag = (desc.step_x + desc.step_y).length();
        let length_anti_diag = (desc.step_y - desc.step_x).length();

        let immovables = Corner::ALL
            .iter()
            .zip(desc.pinned_corners)
            .filter(|(_, pinned)| *pinned)
            .map(|(corner, _)| corner.index(nx, ny))
            .collect();

        let mut distances = Vec::new();
        let mut bendings = Vec::new();
        let mut faces = Vec::new();

        for x in 0..nx {
            for y in 0..ny {
                let has_right = x + 1 < nx;
                let has_up = y + 1 < ny;

                let p1 = grid_index(nx, x, y);
                let p2 = p1 + 1;
                let p3 = p1 + nx;
                let p4 = p3 + 1;

                if has_right && has_up {
                    faces.push(UVec3::new(p1, p2, p3));
                    faces.push(UVec3::new(p2, p3, p4));
                }

                // structural
                if has_right {
                    distances.push(DistanceConstraint::new(p1, p2, length_x, stiffness));
                }
                if has_up {
                    distances.push(DistanceConstraint::new(p1, p3, length_y, stiffness));
                }

                // shear
                if has_right && has_up {
                    distances.push(DistanceConstraint::new(p1, p4, length_diag, stiffness));
                    distances.push(DistanceConstraint::new(p2, p3, length_anti_diag, stiffness));
                }

                if mode.long_range() && x > 0 && y > 0 && has_right && has_up {
                    // q[row][col] covers the 3x3 neighbourhood of (x, y)
                    let q = |row: u32, col: u32| grid_index(nx, x + col - 1, y + row - 1);
                    for row in 0..3 {
                        distances.push(DistanceConstraint::new(
                            q(row, 0),
                            q(row, 2),
                            length_x * 2.0,
                            bending,
                        ));
                    }
                    for col in 0..3 {
                        distances.push(DistanceConstraint::new(
                            q(0, col),
                            q(2, col),
                            length_y * 2.0,
                            bending,
                        ));
                    }
                }

                if mode.dihedral() && has_right && has_up {
                    let ids = if (x + y) % 2 == 1 {
                        [p3, p2, p1, p4]
                    } else {
                        [p1, p4, p3, p2]
                    };
                    bendings.push(BendingConstraint::from_positions(ids, &positions, bending));
                }
            }
        }

        Ok(Self {
            positions,
            distances,
            bendings,
            faces,
            immovables,
            mass_per_particle: desc.mass_per_particle,
        })
    }
}
