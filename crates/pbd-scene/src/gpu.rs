//! Device layout of a frozen scene.
//!
//! Every element type is `bytemuck::Pod`, so each array can be uploaded with
//! `bytemuck::cast_slice` and no further conversion. Indices are `i32`.

use bytemuck::{Pod, Zeroable};

use crate::scene::FrozenScene;

/// GPU-compatible distance constraint: 16 bytes, matches the device struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuDistanceConstraint {
    pub ids: [i32; 2],
    pub distance: f32,
    pub stiffness: f32,
}

/// Solver-ready arrays, already globally indexed.
#[derive(Clone, Debug, Default)]
pub struct GpuBuffers {
    pub positions: Vec<[f32; 3]>,
    pub masses: Vec<f32>,
    pub phases: Vec<i32>,
    pub group_ids: Vec<i32>,
    pub distance_constraints: Vec<GpuDistanceConstraint>,
    pub bendings: Vec<[i32; 4]>,
    pub faces: Vec<[i32; 3]>,
    pub rigid_rest_positions: Vec<[f32; 3]>,
    pub rigid_ranges: Vec<[i32; 2]>,
    pub immovables: Vec<i32>,
}

impl GpuBuffers {
    pub fn from_scene(scene: &FrozenScene) -> Self {
        let particles = scene.particles();
        Self {
            positions: particles.position.iter().map(|p| p.to_array()).collect(),
            masses: particles.mass.clone(),
            phases: particles.phase.iter().map(|p| p.0).collect(),
            group_ids: particles.group.clone(),
            distance_constraints: scene
                .distance_constraints()
                .iter()
                .map(|c| GpuDistanceConstraint {
                    ids: [c.i as i32, c.j as i32],
                    distance: c.rest_length,
                    stiffness: c.stiffness,
                })
                .collect(),
            bendings: scene
                .bending_constraints()
                .iter()
                .map(|c| c.ids().map(|id| id as i32))
                .collect(),
            faces: scene
                .faces()
                .iter()
                .map(|f| f.as_ivec3().to_array())
                .collect(),
            rigid_rest_positions: scene
                .rigid_bodies()
                .iter()
                .flat_map(|r| r.rest_positions.iter().map(|p| p.to_array()))
                .collect(),
            rigid_ranges: scene
                .rigid_bodies()
                .iter()
                .map(|r| [r.range.start as i32, r.range.end as i32])
                .collect(),
            immovables: scene.immovables().iter().map(|&id| id as i32).collect(),
        }
    }

    /// Bytes the device needs to hold every array.
    pub fn byte_len(&self) -> usize {
        fn bytes<T: Pod>(v: &[T]) -> usize {
            std::mem::size_of_val(v)
        }
        bytes(&self.positions)
            + bytes(&self.masses)
            + bytes(&self.phases)
            + bytes(&self.group_ids)
            + bytes(&self.distance_constraints)
            + bytes(&self.bendings)
            + bytes(&self.faces)
            + bytes(&self.rigid_rest_positions)
            + bytes(&self.rigid_ranges)
            + bytes(&self.immovables)
    }
}
