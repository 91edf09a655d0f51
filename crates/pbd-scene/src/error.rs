//! Error types for scene construction.
//!
//! Builders report a [`ShapeError`] naming the offending parameter; the
//! [`Scene`](crate::scene::Scene) wraps it together with the `add_*` call that
//! received it. Every error is raised before any array is touched.

use glam::{UVec3, Vec3};
use thiserror::Error;

/// A shape descriptor parameter that no builder can accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A lattice dimension has a zero extent along at least one axis.
    #[error("`{param}` must be non-zero on every axis, got {value}")]
    ZeroDimension { param: &'static str, value: UVec3 },

    /// Too few joints to span a rope or a cloth grid.
    #[error("`{param}` must be at least {min}, got {value}")]
    TooFewJoints {
        param: &'static str,
        min: u32,
        value: u32,
    },

    /// A step or span vector has zero length or is not finite.
    #[error("`{param}` must be a finite, non-zero vector, got {value}")]
    DegenerateVector { param: &'static str, value: Vec3 },

    /// The two step vectors of a grid point the same way.
    #[error("`{first}` and `{second}` must not be parallel")]
    ParallelSteps {
        first: &'static str,
        second: &'static str,
    },

    /// A position contains NaN or infinity.
    #[error("`{param}` must be finite, got {value}")]
    NonFinitePosition { param: &'static str, value: Vec3 },

    /// A mass or size that must be strictly positive.
    #[error("`{param}` must be positive and finite, got {value}")]
    NonPositive { param: &'static str, value: f32 },

    /// The shape has more particles than a device index can address.
    #[error("`{param}` describes more than {limit} particles")]
    TooManyParticles { param: &'static str, limit: usize },

    /// A stiffness coefficient outside `[0, 1]`.
    #[error("`{param}` must lie in [0, 1], got {value}")]
    StiffnessOutOfRange { param: &'static str, value: f32 },
}

/// Failure of a [`Scene`](crate::scene::Scene) operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("{operation}: invalid shape parameter")]
    InvalidShape {
        operation: &'static str,
        #[source]
        source: ShapeError,
    },

    #[error("{operation}: particle index {index} is outside the allocated range [0, {count})")]
    IndexOutOfRange {
        operation: &'static str,
        index: u32,
        count: u32,
    },

    /// Global indices are handed to the device as `i32`.
    #[error("{operation}: {requested} particles would exceed the limit of {limit}")]
    CapacityExceeded {
        operation: &'static str,
        requested: usize,
        limit: usize,
    },
}

impl SceneError {
    /// Name of the scene operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            SceneError::InvalidShape { operation, .. }
            | SceneError::IndexOutOfRange { operation, .. }
            | SceneError::CapacityExceeded { operation, .. } => operation,
        }
    }
}

/// Convenience alias for `Result<T, ShapeError>`.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Convenience alias for `Result<T, SceneError>`.
pub type SceneResult<T> = Result<T, SceneError>;

/// Product of `extents` as a particle count, bounded by
/// [`MAX_PARTICLES`](crate::scene::MAX_PARTICLES).
pub(crate) fn check_particle_count(param: &'static str, extents: &[u32]) -> ShapeResult<usize> {
    let limit = crate::scene::MAX_PARTICLES;
    extents
        .iter()
        .try_fold(1usize, |n, &e| n.checked_mul(e as usize))
        .filter(|&n| n <= limit)
        .ok_or(ShapeError::TooManyParticles { param, limit })
}

pub(crate) fn check_finite_position(param: &'static str, value: Vec3) -> ShapeResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFinitePosition { param, value })
    }
}

pub(crate) fn check_non_degenerate(param: &'static str, value: Vec3) -> ShapeResult<()> {
    if value.is_finite() && value.length_squared() > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::DegenerateVector { param, value })
    }
}

pub(crate) fn check_positive(param: &'static str, value: f32) -> ShapeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NonPositive { param, value })
    }
}

pub(crate) fn check_stiffness(param: &'static str, value: f32) -> ShapeResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ShapeError::StiffnessOutOfRange { param, value })
    }
}
