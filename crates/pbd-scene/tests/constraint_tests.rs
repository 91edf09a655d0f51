use glam::{UVec3, Vec3};
use pbd_scene::config::RopeStiffness;
use pbd_scene::constraints::DistanceConstraint;
use pbd_scene::materials::{BlockDesc, RigidBody, Rope, RopeDesc};
use pbd_scene::{Scene, SceneConfig};

// ---------------------------------------------------------------------------
// Rope
// ---------------------------------------------------------------------------

#[test]
fn test_rope_five_joints() {
    let desc = RopeDesc::between(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 2.0, 0.0), 5, 0.1);
    let rope = Rope::create(&desc, &RopeStiffness::default()).unwrap();

    let (adjacent, skip): (Vec<DistanceConstraint>, Vec<DistanceConstraint>) =
        rope.distances.iter().copied().partition(|c| c.j == c.i + 1);
    assert_eq!(adjacent.len(), 4);
    assert_eq!(skip.len(), 3);

    for c in &adjacent {
        assert!((c.rest_length - 0.25).abs() < 1e-6);
        assert_eq!(c.stiffness, 1.0);
    }
    for c in &skip {
        assert_eq!(c.j, c.i + 2);
        assert!((c.rest_length - 2.0 * adjacent[0].rest_length).abs() < 1e-6);
        assert_eq!(c.stiffness, 0.1);
    }
}

#[test]
fn test_rope_rest_lengths_match_positions() {
    let desc = RopeDesc::between(Vec3::new(-1.0, 3.0, 0.5), Vec3::new(2.0, 0.0, -1.5), 9, 0.1);
    let rope = Rope::create(&desc, &RopeStiffness::default()).unwrap();
    for c in &rope.distances {
        let actual = (rope.positions[c.i as usize] - rope.positions[c.j as usize]).length();
        assert!(
            (actual - c.rest_length).abs() < 1e-5,
            "pair ({}, {}) stores {} but particles are {} apart",
            c.i,
            c.j,
            c.rest_length,
            actual
        );
    }
}

#[test]
fn test_rope_stiffness_from_config() {
    let config = SceneConfig {
        rope: RopeStiffness {
            structural: 0.9,
            bending: 0.3,
        },
        ..SceneConfig::default()
    };
    let mut scene = Scene::new(config);
    scene
        .add_rope(&RopeDesc::between(Vec3::ZERO, Vec3::Y, 3, 1.0))
        .unwrap();
    let stiffness: Vec<f32> = scene
        .distance_constraints()
        .iter()
        .map(|c| c.stiffness)
        .collect();
    assert_eq!(stiffness, vec![0.9, 0.9, 0.3]);
}

#[test]
fn test_rope_with_one_joint_fails() {
    let desc = RopeDesc::between(Vec3::ZERO, Vec3::Y, 1, 1.0);
    assert!(Rope::create(&desc, &RopeStiffness::default()).is_err());
}

// ---------------------------------------------------------------------------
// Rigid bodies
// ---------------------------------------------------------------------------

#[test]
fn test_rigid_rest_pose_sums_to_zero() {
    let desc = BlockDesc::new(
        UVec3::new(4, 2, 3),
        Vec3::new(10.0, -3.0, 7.0),
        Vec3::new(0.1, 0.07, 0.13),
        0.5,
    );
    let body = RigidBody::create_box(&desc).unwrap();
    let pose = &body.rest_pose;
    let sum: Vec3 = pose.rest_positions.iter().copied().sum();
    assert!(sum.length() < 1e-4, "rest pose sums to {sum}");
    for (p, r) in body.positions.iter().zip(&pose.rest_positions) {
        assert!((*p - pose.center_of_mass - *r).length() < 1e-6);
    }
}

#[test]
fn test_scene_rigid_body_range_and_rest_pose() {
    let mut scene = Scene::new(SceneConfig::default());
    scene
        .add_granulars_block(&BlockDesc::uniform(UVec3::splat(2), Vec3::ZERO, 0.1, 1.0))
        .unwrap();
    let desc = BlockDesc::uniform(UVec3::new(3, 3, 3), Vec3::new(0.0, 1.0, 0.0), 0.1, 2.0);
    let range = scene.add_rigid_box(&desc).unwrap();

    assert_eq!(range.start, 8);
    assert_eq!(range.end, 35);
    let rigid = &scene.rigid_bodies()[0];
    assert_eq!(rigid.range, range);
    assert_eq!(rigid.rest_positions.len(), 27);
    for (n, id) in range.iter().enumerate() {
        let expected = scene.particles().position[id as usize] - rigid.center_of_mass;
        assert!((rigid.rest_positions[n] - expected).length() < 1e-6);
        assert_eq!(scene.particles().mass[id as usize], 2.0);
    }
}
