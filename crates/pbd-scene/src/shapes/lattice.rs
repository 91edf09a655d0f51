//! Box lattice shared by rigid, granular and fluid blocks.

use glam::{UVec3, Vec3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{
    check_finite_position, check_non_degenerate, check_particle_count, ShapeError, ShapeResult,
};

/// Flat index of lattice cell `(i, j, k)`: `i` is the slowest axis, `k` the fastest.
#[inline]
pub fn lattice_index(dimension: UVec3, i: u32, j: u32, k: u32) -> u32 {
    i * dimension.y * dimension.z + j * dimension.z + k
}

/// Positions `start + step * (i, j, k)` for every cell of `dimension`.
///
/// The returned vector is ordered by [`lattice_index`].
pub fn lattice(dimension: UVec3, start: Vec3, step: Vec3) -> ShapeResult<Vec<Vec3>> {
    if dimension.cmpeq(UVec3::ZERO).any() {
        return Err(ShapeError::ZeroDimension {
            param: "dimension",
            value: dimension,
        });
    }
    check_finite_position("start", start)?;
    check_non_degenerate("step", step)?;

    let count = check_particle_count("dimension", &dimension.to_array())?;
    let plane = dimension.y as usize * dimension.z as usize;
    let depth = dimension.z as usize;
    let position_at = |idx: usize| {
        let i = idx / plane;
        let j = (idx % plane) / depth;
        let k = idx % depth;
        start + step * Vec3::new(i as f32, j as f32, k as f32)
    };

    #[cfg(feature = "parallel")]
    let positions: Vec<Vec3> = (0..count).into_par_iter().map(position_at).collect();
    #[cfg(not(feature = "parallel"))]
    let positions: Vec<Vec3> = (0..count).map(position_at).collect();

    Ok(positions)
}
