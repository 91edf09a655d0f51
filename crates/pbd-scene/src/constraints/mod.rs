//! Constraint records handed to the solver.
//!
//! Builders emit these with body-local indices; [`offset`](DistanceConstraint::offset)
//! rebases them onto the global particle array.
pub mod bending;
pub mod distance;
pub mod immovable;
pub mod shape_matching;

pub use bending::BendingConstraint;
pub use distance::DistanceConstraint;
pub use immovable::ImmovableSet;
pub use shape_matching::RigidRestPose;
