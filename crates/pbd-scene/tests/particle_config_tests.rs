use glam::Vec3;
use pbd_scene::config::{BendingMode, RopeStiffness, SceneConfig};
use pbd_scene::particle::{MaterialKind, ParticleSet, Phase, PhaseAllocator};

#[test]
fn test_particle_set_new_is_empty() {
    let particles = ParticleSet::new();
    assert!(particles.is_empty());
    assert_eq!(particles.len(), 0);
    assert_eq!(particles.mass.len(), 0);
    assert_eq!(particles.phase.len(), 0);
    assert_eq!(particles.group.len(), 0);
}

#[test]
fn test_particle_set_push_bodies() {
    let mut particles = ParticleSet::with_capacity(5);
    particles.push_body(&[Vec3::ZERO, Vec3::X], 1.0, Phase(1), &[1, 1]);
    particles.push_body(&[Vec3::Y, Vec3::Z, Vec3::ONE], 0.25, Phase(-1), &[2, 3, 4]);

    assert_eq!(particles.len(), 5);
    assert_eq!(particles.position[2], Vec3::Y);
    assert_eq!(particles.mass, vec![1.0, 1.0, 0.25, 0.25, 0.25]);
    assert!(particles.phase[..2].iter().all(|p| p.is_solid()));
    assert!(particles.phase[2..].iter().all(|p| p.is_fluid()));
    assert_eq!(particles.group, vec![1, 1, 2, 3, 4]);
}

#[test]
fn test_allocator_phase_sequence() {
    let mut alloc = PhaseAllocator::new();
    let kinds = [
        MaterialKind::Fluid,
        MaterialKind::Granular,
        MaterialKind::Fluid,
        MaterialKind::Rope,
        MaterialKind::Cloth,
    ];
    let phases: Vec<i32> = kinds.iter().map(|&k| alloc.next_phase(k).0).collect();
    assert_eq!(phases, vec![-1, 1, -2, 2, 3]);
}

#[test]
fn test_config_default_values() {
    let config = SceneConfig::default();

    assert_eq!(config.particle_radius, 0.05);
    assert_eq!(config.fluid_kernel_scale, 2.3);
    assert_eq!(config.fluid_rest_density, 1000.0);
    assert_eq!(config.bending_mode, BendingMode::LongRange);
    assert_eq!(config.rope, RopeStiffness { structural: 1.0, bending: 0.1 });
}

#[test]
fn test_config_partial_document_uses_defaults() {
    let config: SceneConfig =
        serde_json::from_str(r#"{ "particle_radius": 0.02, "bending_mode": "both" }"#).unwrap();
    assert_eq!(config.particle_radius, 0.02);
    assert_eq!(config.bending_mode, BendingMode::Both);
    assert_eq!(config.fluid_rest_density, 1000.0);
    assert_eq!(config.rope, RopeStiffness::default());

    let config: SceneConfig = serde_json::from_str(r#"{ "rope": { "bending": 0.05 } }"#).unwrap();
    assert_eq!(config.rope.structural, 1.0);
    assert_eq!(config.rope.bending, 0.05);
}

#[test]
fn test_config_rejects_unknown_bending_mode() {
    let result: Result<SceneConfig, _> = serde_json::from_str(r#"{ "bending_mode": "angular" }"#);
    assert!(result.is_err());
}
