use glam::Vec3;

/// Dihedral bending constraint for cloth.
///
/// Constrains the angle between two adjacent triangles sharing edge (i, j),
/// with opposite vertices k and l:
///
/// ```text
///     k
///    / \
///   i---j
///    \ /
///     l
/// ```
///
/// The rest angle is measured from the initial positions when the cloth is
/// built, so a flat sheet rests at 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BendingConstraint {
    /// Shared edge vertex A.
    pub i: u32,
    /// Shared edge vertex B.
    pub j: u32,
    /// Opposite vertex, triangle 1.
    pub k: u32,
    /// Opposite vertex, triangle 2.
    pub l: u32,
    /// Rest dihedral angle in radians.
    pub rest_angle: f32,
    /// Stiffness in `[0..1]`.
    pub stiffness: f32,
}

impl BendingConstraint {
    /// Create a bending constraint whose rest angle is read off `positions`.
    pub fn from_positions(ids: [u32; 4], positions: &[Vec3], stiffness: f32) -> Self {
        let [i, j, k, l] = ids;
        let rest_angle = dihedral_angle(
            positions[i as usize],
            positions[j as usize],
            positions[k as usize],
            positions[l as usize],
        );
        Self {
            i,
            j,
            k,
            l,
            rest_angle,
            stiffness,
        }
    }

    pub fn ids(&self) -> [u32; 4] {
        [self.i, self.j, self.k, self.l]
    }

    /// Same constraint with every index shifted by `base`.
    pub fn offset(self, base: u32) -> Self {
        Self {
            i: self.i + base,
            j: self.j + base,
            k: self.k + base,
            l: self.l + base,
            ..self
        }
    }
}

/// Compute the dihedral angle between two triangles sharing edge (p1, p2),
/// with opposite vertices p3 (triangle 1) and p4 (triangle 2).
///
/// Returns the signed angle in radians. A flat configuration returns 0.
/// Degenerate triangles (zero-area) return 0 to avoid NaN propagation.
pub fn dihedral_angle(p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> f32 {
    let e = p2 - p1;
    let e_len = e.length();
    if e_len < 1e-8 {
        return 0.0;
    }
    let e_norm = e / e_len;

    // Normals of the two triangles (unnormalized).
    let n1 = (p3 - p1).cross(p3 - p2);
    let n2 = (p4 - p2).cross(p4 - p1);

    let n1_len = n1.length();
    let n2_len = n2.length();
    if n1_len < 1e-8 || n2_len < 1e-8 {
        return 0.0;
    }

    let n1 = n1 / n1_len;
    let n2 = n2 / n2_len;

    let cos_angle = n1.dot(n2).clamp(-1.0, 1.0);
    let sin_angle = n1.cross(n2).dot(e_norm);

    sin_angle.atan2(cos_angle)
}
