use glam::Vec3;

/// Material a body was built from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MaterialKind {
    Rigid,
    Granular,
    Fluid,
    Rope,
    Cloth,
}

impl MaterialKind {
    pub fn is_fluid(self) -> bool {
        self == MaterialKind::Fluid
    }
}

/// Signed body tag carried by every particle.
///
/// Positive values are solid bodies, negative values are fluid bodies. Two
/// particles with the same phase belong to the same body. Zero is never
/// allocated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(transparent)]
pub struct Phase(pub i32);

impl Phase {
    pub fn is_solid(self) -> bool {
        self.0 > 0
    }

    pub fn is_fluid(self) -> bool {
        self.0 < 0
    }
}

/// How a body consumes collision group ids.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GroupPolicy {
    /// One id for the whole body: its particles never collide with each other.
    Shared,
    /// One id per particle: particles of the body collide with each other.
    PerParticle,
}

/// Hands out phases and collision group ids.
///
/// Solid phases count up from 1, fluid phases count down from -1, group ids
/// count up from 1 independently of either.
#[derive(Clone, Debug)]
pub struct PhaseAllocator {
    solid: i32,
    fluid: i32,
    group: i32,
}

impl Default for PhaseAllocator {
    fn default() -> Self {
        Self {
            solid: 1,
            fluid: -1,
            group: 1,
        }
    }
}

impl PhaseAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next phase for a body of `kind`.
    pub fn next_phase(&mut self, kind: MaterialKind) -> Phase {
        if kind.is_fluid() {
            let phase = self.fluid;
            self.fluid -= 1;
            Phase(phase)
        } else {
            let phase = self.solid;
            self.solid += 1;
            Phase(phase)
        }
    }

    /// Consume `count` consecutive group ids and return the first.
    pub fn next_groups(&mut self, count: usize) -> i32 {
        let first = self.group;
        self.group += count as i32;
        first
    }

    /// Group ids for `count` particles under `policy`.
    pub fn groups_for(&mut self, policy: GroupPolicy, count: usize) -> Vec<i32> {
        match policy {
            GroupPolicy::Shared => vec![self.next_groups(1); count],
            GroupPolicy::PerParticle => {
                let first = self.next_groups(count);
                (0..count as i32).map(|i| first + i).collect()
            }
        }
    }
}

/// SoA particle storage.
///
/// Every column has the same length; index `i` names the same particle in
/// each of them.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    pub position: Vec<Vec3>,
    pub mass: Vec<f32>,
    pub phase: Vec<Phase>,
    /// Collision filter group, independent of `phase`.
    pub group: Vec<i32>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position: Vec::with_capacity(capacity),
            mass: Vec::with_capacity(capacity),
            phase: Vec::with_capacity(capacity),
            group: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Append one body. Grows every column by `positions.len()`.
    pub fn push_body(&mut self, positions: &[Vec3], mass: f32, phase: Phase, groups: &[i32]) {
        assert_eq!(
            positions.len(),
            groups.len(),
            "one group id per particle is required"
        );
        self.position.extend_from_slice(positions);
        self.mass.extend(std::iter::repeat(mass).take(positions.len()));
        self.phase.extend(std::iter::repeat(phase).take(positions.len()));
        self.group.extend_from_slice(groups);
    }

    /// Panics when the columns disagree on the particle count.
    pub fn assert_consistent(&self) {
        let n = self.position.len();
        assert!(
            self.mass.len() == n && self.phase.len() == n && self.group.len() == n,
            "particle columns out of sync: position={} mass={} phase={} group={}",
            n,
            self.mass.len(),
            self.phase.len(),
            self.group.len()
        );
    }
}
