//! Scene aggregator.
//!
//! [`Scene`] owns the global particle columns and every constraint array.
//! Each `add_*` call builds one body with local indices, rebases them onto the
//! current particle count and returns the allocated `[start, end)` range.
//! [`Scene::freeze`] ends the build phase and hands out an immutable
//! [`FrozenScene`] for the solver.

use std::ops::Range;

use glam::{UVec3, Vec3};

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::constraints::{BendingConstraint, DistanceConstraint, ImmovableSet, RigidRestPose};
use crate::error::{SceneError, SceneResult, ShapeError};
use crate::gpu::GpuBuffers;
use crate::light::PointLight;
use crate::materials::{BlockDesc, Cloth, ClothDesc, Fluid, Granulars, RigidBody, Rope, RopeDesc};
use crate::particle::{GroupPolicy, MaterialKind, ParticleSet, Phase, PhaseAllocator};
use crate::plane::Plane;

/// Largest particle count whose indices still fit the device's `i32`.
pub const MAX_PARTICLES: usize = i32::MAX as usize;

/// Half-open range `[start, end)` of global particle indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
}

impl IndexRange {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Zero for a reversed range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, id: u32) -> bool {
        (self.start..self.end).contains(&id)
    }

    pub fn iter(&self) -> Range<u32> {
        self.start..self.end
    }
}

/// One `add_*` call as recorded by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyRecord {
    pub kind: MaterialKind,
    pub range: IndexRange,
    pub phase: Phase,
}

/// Array lengths of a scene, which is what the solver sizes its buffers by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneSummary {
    pub bodies: usize,
    pub particles: usize,
    pub rigid_bodies: usize,
    pub rigid_particles: usize,
    pub distance_constraints: usize,
    pub bending_constraints: usize,
    pub faces: usize,
    pub immovables: usize,
    pub planes: usize,
}

/// Body-local output of a material builder, ready to be appended.
struct LocalBody<'a> {
    kind: MaterialKind,
    positions: &'a [Vec3],
    mass_per_particle: f32,
    groups: GroupPolicy,
    distances: &'a [DistanceConstraint],
    bendings: &'a [BendingConstraint],
    faces: &'a [UVec3],
    immovables: &'a [u32],
}

impl<'a> LocalBody<'a> {
    fn particles(kind: MaterialKind, positions: &'a [Vec3], mass: f32, groups: GroupPolicy) -> Self {
        Self {
            kind,
            positions,
            mass_per_particle: mass,
            groups,
            distances: &[],
            bendings: &[],
            faces: &[],
            immovables: &[],
        }
    }
}

/// Mutable scene under construction.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    config: SceneConfig,
    allocator: PhaseAllocator,
    bodies: Vec<BodyRecord>,

    particles: ParticleSet,
    planes: Vec<Plane>,
    /// Aerodynamic triangles.
    faces: Vec<UVec3>,
    rigid_bodies: Vec<RigidRestPose>,
    distances: Vec<DistanceConstraint>,
    bendings: Vec<BendingConstraint>,
    immovables: ImmovableSet,

    camera: Option<Camera>,
    point_light: Option<PointLight>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn bodies(&self) -> &[BodyRecord] {
        &self.bodies
    }

    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.distances
    }

    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.bendings
    }

    pub fn faces(&self) -> &[UVec3] {
        &self.faces
    }

    pub fn rigid_bodies(&self) -> &[RigidRestPose] {
        &self.rigid_bodies
    }

    pub fn immovables(&self) -> &[u32] {
        self.immovables.as_slice()
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Rigid box of particles sharing one phase and one group.
    pub fn add_rigid_box(&mut self, desc: &BlockDesc) -> SceneResult<IndexRange> {
        const OP: &str = "add_rigid_box";
        self.check_capacity(OP, desc.checked_particle_count())?;
        let body = build(OP, RigidBody::create_box(desc))?;
        let range = self.insert(
            OP,
            LocalBody::particles(
                MaterialKind::Rigid,
                &body.positions,
                body.mass_per_particle,
                GroupPolicy::Shared,
            ),
        )?;
        self.rigid_bodies.push(body.rest_pose.offset(range.start));
        Ok(range)
    }

    /// Block of granular particles. Each particle gets its own group so grains
    /// of the same block collide with each other.
    pub fn add_granulars_block(&mut self, desc: &BlockDesc) -> SceneResult<IndexRange> {
        const OP: &str = "add_granulars_block";
        self.check_capacity(OP, desc.checked_particle_count())?;
        let body = build(OP, Granulars::create_block(desc))?;
        self.insert(
            OP,
            LocalBody::particles(
                MaterialKind::Granular,
                &body.positions,
                body.mass_per_particle,
                GroupPolicy::PerParticle,
            ),
        )
    }

    pub fn add_fluid_block(&mut self, desc: &BlockDesc) -> SceneResult<IndexRange> {
        const OP: &str = "add_fluid_block";
        self.check_capacity(OP, desc.checked_particle_count())?;
        let body = build(OP, Fluid::create_block(desc))?;
        self.insert(
            OP,
            LocalBody::particles(
                MaterialKind::Fluid,
                &body.positions,
                body.mass_per_particle,
                GroupPolicy::Shared,
            ),
        )
    }

    pub fn add_rope(&mut self, desc: &RopeDesc) -> SceneResult<IndexRange> {
        const OP: &str = "add_rope";
        self.check_capacity(OP, Some(desc.num_joints as usize))?;
        let rope = build(OP, Rope::create(desc, &self.config.rope))?;
        self.insert(
            OP,
            LocalBody {
                distances: &rope.distances,
                ..LocalBody::particles(
                    MaterialKind::Rope,
                    &rope.positions,
                    rope.mass_per_particle,
                    GroupPolicy::Shared,
                )
            },
        )
    }

    /// Cloth sheet. Pinned corners are added to the immovable set.
    pub fn add_cloth(&mut self, desc: &ClothDesc) -> SceneResult<IndexRange> {
        const OP: &str = "add_cloth";
        self.check_capacity(OP, desc.checked_particle_count())?;
        let cloth = build(OP, Cloth::create(desc, self.config.bending_mode))?;
        let groups = if desc.self_collidable {
            GroupPolicy::PerParticle
        } else {
            GroupPolicy::Shared
        };
        self.insert(
            OP,
            LocalBody {
                distances: &cloth.distances,
                bendings: &cloth.bendings,
                faces: &cloth.faces,
                immovables: &cloth.immovables,
                ..LocalBody::particles(
                    MaterialKind::Cloth,
                    &cloth.positions,
                    cloth.mass_per_particle,
                    groups,
                )
            },
        )
    }

    /// Pin particle `id`. Returns `false` when it was already pinned.
    pub fn make_immovable(&mut self, id: u32) -> SceneResult<bool> {
        let count = self.num_particles();
        if id as usize >= count {
            tracing::warn!(target: "scene", "make_immovable rejected: index {} of {}", id, count);
            return Err(SceneError::IndexOutOfRange {
                operation: "make_immovable",
                index: id,
                count: count as u32,
            });
        }
        Ok(self.immovables.insert(id))
    }

    /// Pin every particle of `range`, typically one returned by an `add_*` call.
    ///
    /// Reversed ranges and ranges reaching past the last particle are rejected.
    pub fn make_range_immovable(&mut self, range: IndexRange) -> SceneResult<()> {
        let count = self.num_particles();
        if range.start > range.end || range.end as usize > count {
            tracing::warn!(
                target: "scene",
                "make_range_immovable rejected: [{}, {}) of {}",
                range.start,
                range.end,
                count
            );
            return Err(SceneError::IndexOutOfRange {
                operation: "make_range_immovable",
                index: range.end.saturating_sub(1).max(range.start),
                count: count as u32,
            });
        }
        for id in range.iter() {
            self.immovables.insert(id);
        }
        Ok(())
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn set_point_light(&mut self, light: PointLight) {
        self.point_light = Some(light);
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            bodies: self.bodies.len(),
            particles: self.particles.len(),
            rigid_bodies: self.rigid_bodies.len(),
            rigid_particles: self.rigid_bodies.iter().map(|r| r.rest_positions.len()).sum(),
            distance_constraints: self.distances.len(),
            bending_constraints: self.bendings.len(),
            faces: self.faces.len(),
            immovables: self.immovables.len(),
            planes: self.planes.len(),
        }
    }

    /// End the build phase.
    pub fn freeze(self) -> FrozenScene {
        self.particles.assert_consistent();
        let summary = self.summary();
        tracing::info!(
            target: "scene",
            "Scene frozen: {} bodies, {} particles, {} distance, {} bending, {} rigid, {} immovable",
            summary.bodies,
            summary.particles,
            summary.distance_constraints,
            summary.bending_constraints,
            summary.rigid_bodies,
            summary.immovables
        );
        FrozenScene { scene: self }
    }

    /// Fails unless `count` more particles keep every global index within
    /// [`MAX_PARTICLES`]. `None` stands for a count too large to represent.
    fn check_capacity(&self, operation: &'static str, count: Option<usize>) -> SceneResult<()> {
        let base = self.particles.len();
        match count.and_then(|n| base.checked_add(n)) {
            Some(total) if total <= MAX_PARTICLES => Ok(()),
            total => {
                let requested = total.unwrap_or(usize::MAX);
                tracing::warn!(
                    target: "scene",
                    "{} rejected: {} particles requested",
                    operation,
                    requested
                );
                Err(SceneError::CapacityExceeded {
                    operation,
                    requested,
                    limit: MAX_PARTICLES,
                })
            }
        }
    }

    /// Append `body`, rebasing its local indices onto the global arrays.
    ///
    /// Only the capacity check can fail, and it runs before any mutation.
    fn insert(&mut self, operation: &'static str, body: LocalBody<'_>) -> SceneResult<IndexRange> {
        let count = body.positions.len();
        self.check_capacity(operation, Some(count))?;
        let base = self.particles.len() as u32;
        let range = IndexRange::new(base, base + count as u32);

        let phase = self.allocator.next_phase(body.kind);
        let groups = self.allocator.groups_for(body.groups, count);
        self.particles
            .push_body(body.positions, body.mass_per_particle, phase, &groups);

        self.distances
            .extend(body.distances.iter().map(|c| c.offset(base)));
        self.bendings
            .extend(body.bendings.iter().map(|c| c.offset(base)));
        self.faces
            .extend(body.faces.iter().map(|&f| f + UVec3::splat(base)));
        for &id in body.immovables {
            self.immovables.insert(id + base);
        }

        self.bodies.push(BodyRecord {
            kind: body.kind,
            range,
            phase,
        });
        tracing::debug!(
            target: "scene",
            "{}: {:?} particles [{}, {}) phase {} with {} distance, {} bending, {} faces",
            operation,
            body.kind,
            range.start,
            range.end,
            phase.0,
            body.distances.len(),
            body.bendings.len(),
            body.faces.len()
        );
        Ok(range)
    }
}

fn build<T>(operation: &'static str, result: Result<T, ShapeError>) -> SceneResult<T> {
    result.map_err(|source| {
        tracing::warn!(target: "scene", "{} rejected: {}", operation, source);
        SceneError::InvalidShape { operation, source }
    })
}

/// Finished scene; read-only from here on.
#[derive(Clone, Debug)]
pub struct FrozenScene {
    scene: Scene,
}

impl FrozenScene {
    pub fn config(&self) -> &SceneConfig {
        &self.scene.config
    }

    pub fn num_particles(&self) -> usize {
        self.scene.num_particles()
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.scene.particles
    }

    pub fn bodies(&self) -> &[BodyRecord] {
        &self.scene.bodies
    }

    pub fn distance_constraints(&self) -> &[DistanceConstraint] {
        &self.scene.distances
    }

    pub fn bending_constraints(&self) -> &[BendingConstraint] {
        &self.scene.bendings
    }

    pub fn faces(&self) -> &[UVec3] {
        &self.scene.faces
    }

    pub fn rigid_bodies(&self) -> &[RigidRestPose] {
        &self.scene.rigid_bodies
    }

    pub fn immovables(&self) -> &[u32] {
        self.scene.immovables()
    }

    pub fn planes(&self) -> &[Plane] {
        &self.scene.planes
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.scene.camera.as_ref()
    }

    pub fn point_light(&self) -> Option<&PointLight> {
        self.scene.point_light.as_ref()
    }

    pub fn summary(&self) -> SceneSummary {
        self.scene.summary()
    }

    /// Flatten every array into device layout.
    pub fn to_gpu_buffers(&self) -> GpuBuffers {
        GpuBuffers::from_scene(self)
    }
}
