use std::collections::HashSet;

/// Global particle indices the solver must never move.
///
/// Indices are unique; insertion order is kept for the device buffer.
#[derive(Clone, Debug, Default)]
pub struct ImmovableSet {
    ids: Vec<u32>,
    seen: HashSet<u32>,
}

impl ImmovableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `id` was already pinned.
    pub fn insert(&mut self, id: u32) -> bool {
        if self.seen.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }
}
