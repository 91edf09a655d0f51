use glam::Vec3;

use crate::error::{
    check_finite_position, check_non_degenerate, check_particle_count, ShapeError, ShapeResult,
};

/// Flat index of grid vertex `(x, y)`; rows of `num_joints_x` are contiguous.
#[inline]
pub fn grid_index(num_joints_x: u32, x: u32, y: u32) -> u32 {
    y * num_joints_x + x
}

/// Positions `start + x * step_x + y * step_y` of a `num_joints_x` by
/// `num_joints_y` grid, ordered by [`grid_index`].
///
/// Grids narrower than two joints on either axis have no cells and are
/// rejected.
pub fn grid(
    start: Vec3,
    step_x: Vec3,
    step_y: Vec3,
    num_joints_x: u32,
    num_joints_y: u32,
) -> ShapeResult<Vec<Vec3>> {
    for (param, value) in [("num_joints_x", num_joints_x), ("num_joints_y", num_joints_y)] {
        if value < 2 {
            return Err(ShapeError::TooFewJoints { param, min: 2, value });
        }
    }
    let count = check_particle_count("num_joints", &[num_joints_x, num_joints_y])?;
    check_finite_position("start", start)?;
    check_non_degenerate("step_x", step_x)?;
    check_non_degenerate("step_y", step_y)?;
    let normal = step_x.cross(step_y);
    if normal.length_squared() <= f32::EPSILON * step_x.length_squared() * step_y.length_squared() {
        return Err(ShapeError::ParallelSteps {
            first: "step_x",
            second: "step_y",
        });
    }

    let mut positions = Vec::with_capacity(count);
    for y in 0..num_joints_y {
        for x in 0..num_joints_x {
            positions.push(start + step_x * x as f32 + step_y * y as f32);
        }
    }
    Ok(positions)
}
