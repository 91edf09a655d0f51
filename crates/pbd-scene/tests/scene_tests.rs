use std::sync::Arc;

use glam::{UVec3, Vec3};
use pbd_scene::materials::{BlockDesc, ClothDesc, Corner, RopeDesc};
use pbd_scene::particle::{MaterialKind, Phase};
use pbd_scene::plane::Plane;
use pbd_scene::scene::MAX_PARTICLES;
use pbd_scene::{IndexRange, Scene, SceneConfig, SceneError, ShapeError};

fn block(dim: u32) -> BlockDesc {
    BlockDesc::uniform(UVec3::splat(dim), Vec3::ZERO, 0.1, 1.0)
}

fn mixed_scene() -> (Scene, Vec<IndexRange>) {
    let mut scene = Scene::new(SceneConfig::default());
    let ranges = vec![
        scene.add_rigid_box(&block(2)).unwrap(),
        scene.add_fluid_block(&block(3)).unwrap(),
        scene
            .add_rope(&RopeDesc::between(Vec3::ZERO, Vec3::X, 6, 0.1))
            .unwrap(),
        scene
            .add_cloth(&ClothDesc::new(Vec3::ZERO, Vec3::X * 0.1, Vec3::Z * 0.1, 4, 3, 0.1))
            .unwrap(),
        scene.add_granulars_block(&block(2)).unwrap(),
        scene.add_fluid_block(&block(2)).unwrap(),
    ];
    (scene, ranges)
}

#[test]
fn test_ranges_are_contiguous_and_sized() {
    let (scene, ranges) = mixed_scene();
    let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![8, 27, 6, 12, 8, 8]);

    let mut expected_start = 0;
    for r in &ranges {
        assert_eq!(r.start, expected_start);
        expected_start = r.end;
    }
    assert_eq!(scene.num_particles(), expected_start as usize);
}

#[test]
fn test_columns_stay_aligned() {
    let (scene, _) = mixed_scene();
    let particles = scene.particles();
    let n = scene.num_particles();
    assert_eq!(particles.position.len(), n);
    assert_eq!(particles.mass.len(), n);
    assert_eq!(particles.phase.len(), n);
    assert_eq!(particles.group.len(), n);
}

#[test]
fn test_phase_allocation() {
    let (scene, ranges) = mixed_scene();
    let phase_of = |r: &IndexRange| scene.particles().phase[r.start as usize];

    let phases: Vec<Phase> = ranges.iter().map(phase_of).collect();
    assert_eq!(
        phases,
        vec![Phase(1), Phase(-1), Phase(2), Phase(3), Phase(4), Phase(-2)]
    );
    for r in &ranges {
        let first = phase_of(r);
        assert!(r.iter().all(|id| scene.particles().phase[id as usize] == first));
    }

    let kinds: Vec<MaterialKind> = scene.bodies().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MaterialKind::Rigid,
            MaterialKind::Fluid,
            MaterialKind::Rope,
            MaterialKind::Cloth,
            MaterialKind::Granular,
            MaterialKind::Fluid
        ]
    );
}

#[test]
fn test_group_policy() {
    let (scene, ranges) = mixed_scene();
    let groups = |r: &IndexRange| -> Vec<i32> {
        r.iter().map(|id| scene.particles().group[id as usize]).collect()
    };

    // rigid: one shared group
    assert!(groups(&ranges[0]).iter().all(|&g| g == 1));
    // fluid: next shared group
    assert!(groups(&ranges[1]).iter().all(|&g| g == 2));
    // rope: shared
    assert!(groups(&ranges[2]).iter().all(|&g| g == 3));
    // self-collidable cloth: one group per particle
    assert_eq!(groups(&ranges[3]), (4..16).collect::<Vec<i32>>());
    // granulars: one group per particle
    assert_eq!(groups(&ranges[4]), (16..24).collect::<Vec<i32>>());
}

#[test]
fn test_non_self_collidable_cloth_shares_group() {
    let mut scene = Scene::default();
    let desc = ClothDesc::new(Vec3::ZERO, Vec3::X, Vec3::Z, 3, 3, 1.0).self_collidable(false);
    scene.add_cloth(&desc).unwrap();
    assert!(scene.particles().group.iter().all(|&g| g == 1));
}

#[test]
fn test_constraint_indices_are_global() {
    let (scene, ranges) = mixed_scene();
    let rope = ranges[2];
    let cloth = ranges[3];
    let n = scene.num_particles() as u32;

    let rope_pairs = scene
        .distance_constraints()
        .iter()
        .filter(|c| rope.contains(c.i))
        .count();
    assert_eq!(rope_pairs, 5 + 4);

    for c in scene.distance_constraints() {
        assert!(c.i < n && c.j < n);
        let same_body = (rope.contains(c.i) && rope.contains(c.j))
            || (cloth.contains(c.i) && cloth.contains(c.j));
        assert!(same_body, "constraint {c:?} crosses bodies");
    }
}

#[test]
fn test_rejected_calls_leave_scene_untouched() {
    let (mut scene, _) = mixed_scene();
    let before = scene.summary();
    let particles_before = scene.particles().position.clone();

    let zero_dim = BlockDesc::uniform(UVec3::new(3, 0, 3), Vec3::ZERO, 0.1, 1.0);
    let err = scene.add_fluid_block(&zero_dim).unwrap_err();
    assert_eq!(
        err,
        SceneError::InvalidShape {
            operation: "add_fluid_block",
            source: ShapeError::ZeroDimension {
                param: "dimension",
                value: UVec3::new(3, 0, 3)
            }
        }
    );

    let short_rope = RopeDesc::between(Vec3::ZERO, Vec3::X, 1, 1.0);
    let err = scene.add_rope(&short_rope).unwrap_err();
    assert_eq!(err.operation(), "add_rope");

    let massless = BlockDesc::uniform(UVec3::splat(2), Vec3::ZERO, 0.1, 0.0);
    assert!(scene.add_rigid_box(&massless).is_err());
    assert!(scene.add_granulars_block(&massless).is_err());

    assert_eq!(scene.summary(), before);
    assert_eq!(scene.particles().position, particles_before);

    // counters were not consumed by the failed calls
    let r = scene.add_rigid_box(&block(1)).unwrap();
    assert_eq!(scene.particles().phase[r.start as usize], Phase(5));
}

#[test]
fn test_oversized_bodies_report_capacity() {
    let (mut scene, _) = mixed_scene();
    let before = scene.summary();

    let cloth = ClothDesc::new(Vec3::ZERO, Vec3::X, Vec3::Z, 70_000, 70_000, 1.0);
    assert!(matches!(
        scene.add_cloth(&cloth),
        Err(SceneError::CapacityExceeded { operation: "add_cloth", limit: MAX_PARTICLES, .. })
    ));

    let fluid = BlockDesc::uniform(UVec3::splat(2_000_000), Vec3::ZERO, 0.1, 1.0);
    assert!(matches!(
        scene.add_fluid_block(&fluid),
        Err(SceneError::CapacityExceeded { operation: "add_fluid_block", .. })
    ));

    // the count itself does not fit usize
    let huge = BlockDesc::uniform(UVec3::splat(u32::MAX), Vec3::ZERO, 0.1, 1.0);
    assert_eq!(
        scene.add_rigid_box(&huge),
        Err(SceneError::CapacityExceeded {
            operation: "add_rigid_box",
            requested: usize::MAX,
            limit: MAX_PARTICLES
        })
    );

    // fits on its own, not on top of the particles already in the scene
    let rope = RopeDesc::between(Vec3::ZERO, Vec3::X, MAX_PARTICLES as u32, 1.0);
    assert_eq!(
        scene.add_rope(&rope),
        Err(SceneError::CapacityExceeded {
            operation: "add_rope",
            requested: 69 + MAX_PARTICLES,
            limit: MAX_PARTICLES
        })
    );

    assert_eq!(scene.summary(), before);
    let r = scene.add_rigid_box(&block(1)).unwrap();
    assert_eq!(scene.particles().phase[r.start as usize], Phase(5));
}

#[test]
fn test_reversed_range_is_rejected() {
    let mut scene = Scene::default();
    scene.add_granulars_block(&block(2)).unwrap();
    let reversed = IndexRange { start: 6, end: 2 };
    assert_eq!(reversed.len(), 0);
    assert!(reversed.is_empty());
    assert!(matches!(
        scene.make_range_immovable(reversed),
        Err(SceneError::IndexOutOfRange { operation: "make_range_immovable", index: 6, count: 8 })
    ));
    assert!(scene.immovables().is_empty());
}

#[test]
fn test_make_immovable_bounds() {
    let mut scene = Scene::default();
    assert!(matches!(
        scene.make_immovable(0),
        Err(SceneError::IndexOutOfRange { index: 0, count: 0, .. })
    ));

    let range = scene.add_granulars_block(&block(2)).unwrap();
    assert_eq!(scene.make_immovable(7), Ok(true));
    assert_eq!(scene.make_immovable(7), Ok(false));
    assert!(scene.make_immovable(8).is_err());
    assert_eq!(scene.immovables(), &[7]);

    scene.make_range_immovable(range).unwrap();
    assert_eq!(scene.immovables().len(), 8);
    assert!(scene.make_range_immovable(IndexRange::new(4, 9)).is_err());
}

#[test]
fn test_freeze_exports_solver_buffers() {
    let (mut scene, _) = mixed_scene();
    scene
        .add_cloth(
            &ClothDesc::new(Vec3::ZERO, Vec3::X, Vec3::Z, 3, 3, 1.0).pin(Corner::MinXMinY),
        )
        .unwrap();
    scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y).unwrap());
    let summary = scene.summary();

    let frozen = Arc::new(scene.freeze());
    assert_eq!(frozen.summary(), summary);
    assert!(frozen.camera().is_none());

    let buffers = frozen.to_gpu_buffers();
    assert_eq!(buffers.positions.len(), summary.particles);
    assert_eq!(buffers.masses.len(), summary.particles);
    assert_eq!(buffers.phases.len(), summary.particles);
    assert_eq!(buffers.group_ids.len(), summary.particles);
    assert_eq!(buffers.distance_constraints.len(), summary.distance_constraints);
    assert_eq!(buffers.faces.len(), summary.faces);
    assert_eq!(buffers.rigid_ranges, vec![[0, 8]]);
    assert_eq!(buffers.rigid_rest_positions.len(), summary.rigid_particles);
    assert_eq!(buffers.immovables, vec![69]);
    assert!(buffers.byte_len() > 0);

    let c = &frozen.distance_constraints()[0];
    let g = buffers.distance_constraints[0];
    assert_eq!(g.ids, [c.i as i32, c.j as i32]);
    assert_eq!(g.distance, c.rest_length);
}

#[test]
fn test_frozen_scene_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<pbd_scene::FrozenScene>();
}
