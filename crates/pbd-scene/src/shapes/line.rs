use glam::Vec3;

use crate::error::{
    check_finite_position, check_non_degenerate, check_particle_count, ShapeError, ShapeResult,
};

/// `num_joints` evenly spaced points from `start` to `end`, both included.
pub fn line(start: Vec3, end: Vec3, num_joints: u32) -> ShapeResult<Vec<Vec3>> {
    if num_joints < 2 {
        return Err(ShapeError::TooFewJoints {
            param: "num_joints",
            min: 2,
            value: num_joints,
        });
    }
    check_particle_count("num_joints", &[num_joints])?;
    check_finite_position("start", start)?;
    check_finite_position("end", end)?;
    let span = end - start;
    check_non_degenerate("end - start", span)?;

    let segments = (num_joints - 1) as f32;
    Ok((0..num_joints)
        .map(|i| start + span * (i as f32 / segments))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_includes_both_endpoints() {
        let points = line(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 5).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Vec3::ZERO);
        assert_eq!(points[4], Vec3::new(0.0, 0.0, 4.0));
        assert!((points[2].z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_joint_rejected() {
        assert_eq!(
            line(Vec3::ZERO, Vec3::X, 1),
            Err(ShapeError::TooFewJoints {
                param: "num_joints",
                min: 2,
                value: 1
            })
        );
    }

    #[test]
    fn test_coincident_endpoints_rejected() {
        assert!(matches!(
            line(Vec3::ONE, Vec3::ONE, 4),
            Err(ShapeError::DegenerateVector { .. })
        ));
    }
}
