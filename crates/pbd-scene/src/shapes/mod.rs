//! Geometry generators.
//!
//! Pure functions turning a shape description into particle positions in a
//! fixed iteration order, so that index formulas applied by the material
//! builders are reproducible.
pub mod grid;
pub mod lattice;
pub mod line;

pub use grid::{grid, grid_index};
pub use lattice::{lattice, lattice_index};
pub use line::line;
