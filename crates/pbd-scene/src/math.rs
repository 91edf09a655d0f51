use glam::{Vec2, Vec3};

/// Unit direction for spherical angles `(polar, azimuth)`.
///
/// The polar angle is measured from +Y, the azimuth from +X towards +Z.
pub fn spherical_to_world(angles: Vec2) -> Vec3 {
    let (sin_polar, cos_polar) = angles.x.sin_cos();
    let (sin_azimuth, cos_azimuth) = angles.y.sin_cos();
    Vec3::new(cos_azimuth * sin_polar, cos_polar, sin_azimuth * sin_polar)
}

/// Inverse of [`spherical_to_world`]. `dir` need not be normalised.
///
/// Returns polar in `[0, PI]` and azimuth in `(-PI, PI]`.
pub fn world_to_spherical(dir: Vec3) -> Vec2 {
    let azimuth = dir.z.atan2(dir.x);
    let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
    let polar = horizontal.atan2(dir.y);
    Vec2::new(polar, azimuth)
}

/// Right-handed orthonormal basis `(x, y)` completing the unit vector `z`.
///
/// Branchless construction from Duff et al., "Building an Orthonormal Basis,
/// Revisited" (2017); well defined for every unit `z`, including `(0, 0, -1)`.
pub fn orthonormal_basis(z: Vec3) -> (Vec3, Vec3) {
    z.any_orthonormal_pair()
}

/// Up vector for a look-at along `dir`: +Y, or +Z when `dir` is vertical.
pub fn look_at_up(dir: Vec3) -> Vec3 {
    if dir.cross(Vec3::Y).length_squared() <= 1e-12 * dir.length_squared() {
        Vec3::Z
    } else {
        Vec3::Y
    }
}
